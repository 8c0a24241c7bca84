//! Data-driven setup for placement sessions: tile data tables, prefab
//! catalogs, authored maps and build config, read from RON, TOML or JSON.

pub mod loader;
pub mod schema;

pub use loader::{BuildData, DataLoadError, load_build_data};
