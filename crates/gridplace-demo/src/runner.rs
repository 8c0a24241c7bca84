use crate::error::DemoError;
use crate::script::ScriptStep;
use gridplace_build::{CommitOutcome, InputResponse, PlacementInput};
use gridplace_core::grid::{Cell, Footprint, Rotation};
use gridplace_core::layout::WorldPoint;
use gridplace_data::loader::{deserialize_list, require_data_file};
use gridplace_data::load_build_data;
use gridplace_spatial::OccupancyGrid;
use std::path::Path;

/// A placed object as reported after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSummary {
    pub prefab: String,
    pub anchor: Cell,
    pub footprint: Footprint,
    pub rotation: Rotation,
}

/// Outcome of replaying a scenario script.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub placed: Vec<PlacedSummary>,
    /// Pending objects discarded by cancel or an illegal commit.
    pub discarded: usize,
    /// Inputs the controller refused (e.g. a request while one is pending).
    pub rejected: usize,
    /// `data1` read by each `Probe` step, in order.
    pub probes: Vec<Option<f32>>,
    /// Occupancy after the run, one text row per grid row.
    pub rendered_grid: String,
}

/// Load a scenario directory and replay its script.
pub fn run_scenario(dir: &Path) -> Result<ScenarioReport, DemoError> {
    let data_err = |source| DemoError::DataLoad {
        dir: dir.to_path_buf(),
        source,
    };

    let data = load_build_data(dir).map_err(data_err)?;
    let script_path = require_data_file(dir, "script").map_err(data_err)?;
    let steps: Vec<ScriptStep> = deserialize_list(&script_path, "steps").map_err(data_err)?;

    let (mut controller, tiles) = data.into_controller();
    let mut report = ScenarioReport {
        placed: Vec::new(),
        discarded: 0,
        rejected: 0,
        probes: Vec::new(),
        rendered_grid: String::new(),
    };

    for (index, step) in steps.iter().enumerate() {
        let input = match step {
            ScriptStep::Request(name) => {
                let prefab = controller.catalog().id(name).ok_or_else(|| {
                    DemoError::PrefabNotFound {
                        step: index,
                        name: name.clone(),
                    }
                })?;
                PlacementInput::RequestPlacement(prefab)
            }
            ScriptStep::Move { x, y, z } => PlacementInput::PointerMoved(WorldPoint::new(*x, *y, *z)),
            ScriptStep::Rotate => PlacementInput::Rotate,
            ScriptStep::Cancel => PlacementInput::Cancel,
            ScriptStep::Commit => PlacementInput::Commit,
            ScriptStep::Probe { x, y, z } => {
                let value = tiles.data_at_world(controller.layout(), WorldPoint::new(*x, *y, *z));
                tracing::info!(step = index, ?value, "probe");
                report.probes.push(value);
                continue;
            }
        };

        match controller.handle(input) {
            Ok(InputResponse::Committed(CommitOutcome::Discarded(rejection))) => {
                tracing::info!(step = index, %rejection, "placement discarded");
                report.discarded += 1;
            }
            Ok(InputResponse::Cancelled) => report.discarded += 1,
            Ok(response) => tracing::debug!(step = index, ?response, "input handled"),
            Err(err) => {
                tracing::warn!(step = index, %err, "input rejected");
                report.rejected += 1;
            }
        }
    }

    for (_, object) in controller.placed_objects() {
        let prefab = controller
            .catalog()
            .get(object.prefab())
            .map(|def| def.name.clone())
            .unwrap_or_default();
        report.placed.push(PlacedSummary {
            prefab,
            anchor: object.anchor(),
            footprint: object.footprint(),
            rotation: object.rotation(),
        });
    }
    report.placed.sort_by_key(|p| (p.anchor.y, p.anchor.x));
    report.rendered_grid = render_grid(controller.grid());

    Ok(report)
}

/// Draw a bounded grid as text: `#` blocked, `.` free, first line is the
/// lowest y. Unbounded grids are drawn over the extent of their blocked
/// cells; an empty unbounded grid renders as an empty string.
pub fn render_grid(grid: &OccupancyGrid) -> String {
    let (min, max) = match grid.bounds() {
        Some(b) => (b.min, b.max),
        None => {
            let mut cells = grid.blocked_cells();
            let Some(first) = cells.next() else {
                return String::new();
            };
            cells.fold((first, first), |(lo, hi), c| {
                (
                    Cell::new(lo.x.min(c.x), lo.y.min(c.y)),
                    Cell::new(hi.x.max(c.x), hi.y.max(c.y)),
                )
            })
        }
    };

    let mut out = String::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            out.push(if grid.is_blocked(Cell::new(x, y)) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}
