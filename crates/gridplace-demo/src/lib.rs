//! Headless scenario runner for the placement core.
//!
//! A scenario directory holds the usual data files (`tiles`, `prefabs`,
//! optional `map` and `config`) plus a `script` listing inputs to replay.
//!
//! ```rust,ignore
//! let report = gridplace_demo::run_scenario(Path::new("scenarios/farm"))?;
//! println!("{}", report.rendered_grid);
//! ```

pub mod error;
pub mod runner;
pub mod script;

pub use error::DemoError;
pub use runner::{PlacedSummary, ScenarioReport, render_grid, run_scenario};
pub use script::ScriptStep;
