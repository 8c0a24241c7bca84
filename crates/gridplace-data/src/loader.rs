//! Resolution pipeline: reads data files, resolves names, builds the
//! placement session.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers, plus [`load_build_data`] which ties them together
//! for a data directory laid out as:
//!
//! | base name | required | contents |
//! |---|---|---|
//! | `tiles`   | yes | list of [`TileDataDef`] (TOML key `tiles`) |
//! | `prefabs` | yes | list of [`PrefabData`] (TOML key `prefabs`) |
//! | `map`     | no  | one [`MapData`] |
//! | `config`  | no  | one [`BuildConfig`] |

use crate::schema::{MapData, PrefabData, TileDataDef};
use gridplace_build::{BuildConfig, PlacementController};
use gridplace_core::grid::{Cell, Footprint, GridBounds};
use gridplace_core::layout::RectGridLayout;
use gridplace_core::prefab::{CatalogError, PrefabCatalog};
use gridplace_core::tile::{TileData, TileDataRegistry, TileLayer, TileMap, TileNames};
use gridplace_spatial::OccupancyGrid;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// An entry parsed but holds an unusable value.
    #[error("invalid entry in {file}: {detail}")]
    Invalid { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Register every tile named in the data table and build the registry.
fn resolve_tiles(
    defs: &[TileDataDef],
    file: &Path,
) -> Result<(TileNames, TileDataRegistry), DataLoadError> {
    let mut names = TileNames::new();
    let mut entries = Vec::new();
    for def in defs {
        for name in &def.tiles {
            let id = names
                .register(name)
                .map_err(|_| DataLoadError::DuplicateName {
                    file: file.to_path_buf(),
                    name: name.clone(),
                })?;
            entries.push((id, TileData { data1: def.data1 }));
        }
    }
    // Names are unique at this point, so ids are too.
    let registry = TileDataRegistry::load(entries).map_err(|e| DataLoadError::Invalid {
        file: file.to_path_buf(),
        detail: e.to_string(),
    })?;
    Ok((names, registry))
}

fn resolve_prefabs(defs: &[PrefabData], file: &Path) -> Result<PrefabCatalog, DataLoadError> {
    let mut catalog = PrefabCatalog::new();
    for def in defs {
        catalog
            .register(&def.name, Footprint::new(def.width, def.depth))
            .map_err(|e| match e {
                CatalogError::DuplicateName(name) => DataLoadError::DuplicateName {
                    file: file.to_path_buf(),
                    name,
                },
                other @ (CatalogError::EmptyFootprint { .. }
                | CatalogError::OversizedFootprint { .. }) => DataLoadError::Invalid {
                    file: file.to_path_buf(),
                    detail: other.to_string(),
                },
            })?;
    }
    Ok(catalog)
}

/// A map resolved into grid terms.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMap {
    pub layer: TileLayer,
    pub blocked: Vec<Cell>,
    /// Extent of the drawn rows, or `None` for an empty map.
    pub extent: Option<GridBounds>,
}

/// Turn legend rows into a tile layer and a list of pre-blocked cells.
///
/// Tile names used by the legend but absent from the data table are
/// registered on the fly; they simply have no data.
pub fn resolve_map(
    map: &MapData,
    names: &mut TileNames,
    file: &Path,
) -> Result<ResolvedMap, DataLoadError> {
    let (ox, oy) = map.origin;
    let mut resolved = ResolvedMap::default();
    let mut widest = 0usize;

    for (row_index, row) in map.rows.iter().enumerate() {
        let y = oy + row_index as i32;
        widest = widest.max(row.chars().count());
        for (col_index, ch) in row.chars().enumerate() {
            let cell = Cell::new(ox + col_index as i32, y);
            let entry = map
                .legend
                .get(&ch)
                .ok_or_else(|| DataLoadError::UnresolvedRef {
                    file: file.to_path_buf(),
                    name: ch.to_string(),
                    expected_kind: "legend",
                })?;
            if let Some(tile_name) = &entry.tile {
                let id = match names.id(tile_name) {
                    Some(id) => id,
                    None => names
                        .register(tile_name)
                        .map_err(|e| DataLoadError::Invalid {
                            file: file.to_path_buf(),
                            detail: e.to_string(),
                        })?,
                };
                resolved.layer.set(cell, id);
            }
            if entry.blocked {
                resolved.blocked.push(cell);
            }
        }
    }

    resolved.extent = GridBounds::from_footprint(
        Cell::new(ox, oy),
        Footprint::new(widest as u32, map.rows.len() as u32),
    );
    Ok(resolved)
}

// ===========================================================================
// Pipeline
// ===========================================================================

/// Everything needed to run a placement session, loaded from one directory.
#[derive(Debug)]
pub struct BuildData {
    pub config: BuildConfig,
    pub tile_names: TileNames,
    pub tiles: TileMap,
    pub catalog: PrefabCatalog,
    pub grid: OccupancyGrid,
}

impl BuildData {
    /// Hand the grid and catalog to a controller on the configured layout.
    /// Returns the controller and the tile map for data queries.
    pub fn into_controller(self) -> (PlacementController<RectGridLayout>, TileMap) {
        let controller = PlacementController::new(
            self.config.layout,
            self.grid,
            self.config.validator(),
            self.catalog,
        )
        .with_spawn_point(self.config.spawn_point);
        (controller, self.tiles)
    }
}

/// Load tiles, prefabs, and the optional map and config from `dir`.
///
/// Grid bounds come from the config if set, otherwise from the map's extent;
/// with neither the grid is unbounded.
pub fn load_build_data(dir: &Path) -> Result<BuildData, DataLoadError> {
    let config = match find_data_file(dir, "config")? {
        Some(path) => {
            let config: BuildConfig = deserialize_file(&path)?;
            config.layout.validate().map_err(|e| DataLoadError::Invalid {
                file: path.clone(),
                detail: e.to_string(),
            })?;
            config
        }
        None => BuildConfig::default(),
    };

    let tiles_path = require_data_file(dir, "tiles")?;
    let tile_defs: Vec<TileDataDef> = deserialize_list(&tiles_path, "tiles")?;
    let (mut tile_names, registry) = resolve_tiles(&tile_defs, &tiles_path)?;

    let prefabs_path = require_data_file(dir, "prefabs")?;
    let prefab_defs: Vec<PrefabData> = deserialize_list(&prefabs_path, "prefabs")?;
    let catalog = resolve_prefabs(&prefab_defs, &prefabs_path)?;

    let map = match find_data_file(dir, "map")? {
        Some(path) => {
            let data: MapData = deserialize_file(&path)?;
            resolve_map(&data, &mut tile_names, &path)?
        }
        None => ResolvedMap::default(),
    };

    let bounds = config.bounds.or(map.extent);
    let grid = match bounds {
        Some(bounds) => OccupancyGrid::bounded(bounds, config.out_of_bounds),
        None => OccupancyGrid::new(),
    }
    .with_blocked(map.blocked);

    tracing::info!(
        dir = %dir.display(),
        tiles = tile_names.len(),
        prefabs = catalog.len(),
        blocked = grid.blocked_count(),
        "build data loaded"
    );

    Ok(BuildData {
        config,
        tile_names,
        tiles: TileMap::new(map.layer, registry),
        catalog,
        grid,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gridplace_core::test_utils::*;
    use gridplace_spatial::OutOfBoundsPolicy;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gridplace_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const TILES_RON: &str = r#"[
        (tiles: ["grass", "flowers"], data1: 1.0),
        (tiles: ["mud"], data1: 0.25),
    ]"#;

    const PREFABS_RON: &str = r#"[
        (name: "house", width: 1, depth: 1),
        (name: "wall", width: 2, depth: 1),
    ]"#;

    const MAP_RON: &str = r##"(
        rows: [
            "gggm",
            "g#gm",
            "gggm",
        ],
        legend: {
            'g': (tile: Some("grass")),
            'm': (tile: Some("mud")),
            '#': (tile: Some("rock"), blocked: true),
        },
    )"##;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_known_extensions() {
        assert_eq!(detect_format(Path::new("tiles.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("tiles.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("tiles.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("tiles.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("tiles")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        fs::write(dir.join("tiles.json"), "[]").unwrap();

        assert_eq!(
            find_data_file(&dir, "tiles").unwrap(),
            Some(dir.join("tiles.json"))
        );
        assert_eq!(find_data_file(&dir, "prefabs").unwrap(), None);
        assert!(matches!(
            require_data_file(&dir, "prefabs"),
            Err(DataLoadError::MissingRequired { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("tiles.ron"), "[]").unwrap();
        fs::write(dir.join("tiles.json"), "[]").unwrap();

        assert!(matches!(
            find_data_file(&dir, "tiles"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_tiles_from_toml() {
        let dir = make_test_dir("toml_tiles");
        let path = dir.join("tiles.toml");
        fs::write(
            &path,
            r#"
[[tiles]]
tiles = ["grass"]
data1 = 2.5
"#,
        )
        .unwrap();

        let defs: Vec<TileDataDef> = deserialize_list(&path, "tiles").unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].tiles, vec!["grass".to_string()]);
        assert_eq!(defs[0].data1, 2.5);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_prefabs_from_json() {
        let dir = make_test_dir("json_prefabs");
        let path = dir.join("prefabs.json");
        fs::write(&path, r#"[{"name": "barn", "width": 3, "depth": 2}]"#).unwrap();

        let defs: Vec<PrefabData> = deserialize_list(&path, "prefabs").unwrap();
        assert_eq!(defs[0].name, "barn");
        assert_eq!((defs[0].width, defs[0].depth), (3, 2));

        cleanup(&dir);
    }

    #[test]
    fn parse_error_names_file() {
        let dir = make_test_dir("parse_err");
        let path = dir.join("tiles.ron");
        fs::write(&path, "[ (tiles: oops) ]").unwrap();

        let err = deserialize_list::<TileDataDef>(&path, "tiles").unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { ref file, .. } if file == &path));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    #[test]
    fn duplicate_tile_across_entries_rejected() {
        let defs = vec![
            TileDataDef {
                tiles: vec!["grass".into()],
                data1: 1.0,
            },
            TileDataDef {
                tiles: vec!["grass".into()],
                data1: 2.0,
            },
        ];
        let err = resolve_tiles(&defs, Path::new("tiles.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateName { ref name, .. } if name == "grass"));
    }

    #[test]
    fn empty_prefab_footprint_rejected() {
        let defs = vec![PrefabData {
            name: "ghost".into(),
            width: 0,
            depth: 1,
        }];
        assert!(matches!(
            resolve_prefabs(&defs, Path::new("prefabs.ron")),
            Err(DataLoadError::Invalid { .. })
        ));
    }

    #[test]
    fn oversized_prefab_footprint_rejected() {
        let dir = make_test_dir("oversized_prefab");
        let path = dir.join("prefabs.json");
        fs::write(&path, r#"[{"name": "runway", "width": 2147483648, "depth": 1}]"#).unwrap();

        let defs: Vec<PrefabData> = deserialize_list(&path, "prefabs").unwrap();
        let err = resolve_prefabs(&defs, &path).unwrap_err();
        assert!(matches!(err, DataLoadError::Invalid { ref detail, .. } if detail.contains("runway")));

        cleanup(&dir);
    }

    #[test]
    fn unknown_legend_char_rejected() {
        let map: MapData = ron::from_str(r#"(rows: ["x"], legend: {})"#).unwrap();
        let mut names = TileNames::new();
        let err = resolve_map(&map, &mut names, Path::new("map.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnresolvedRef { ref name, .. } if name == "x"));
    }

    #[test]
    fn map_resolves_layer_blocked_and_extent() {
        let map: MapData = ron::from_str(MAP_RON).unwrap();
        let mut names = TileNames::new();
        names.register("grass").unwrap();
        names.register("mud").unwrap();

        let resolved = resolve_map(&map, &mut names, Path::new("map.ron")).unwrap();
        assert_eq!(resolved.blocked, vec![cell(1, 1)]);
        assert_eq!(resolved.layer.len(), 12);
        // "rock" had no data entry and was registered by the map.
        assert_eq!(names.id("rock"), Some(gridplace_core::id::TileId(2)));
        assert_eq!(
            resolved.extent,
            Some(GridBounds::new(cell(0, 0), cell(3, 2)))
        );
    }

    // -----------------------------------------------------------------------
    // load_build_data
    // -----------------------------------------------------------------------

    #[test]
    fn load_full_directory() {
        let dir = make_test_dir("full");
        fs::write(dir.join("tiles.ron"), TILES_RON).unwrap();
        fs::write(dir.join("prefabs.ron"), PREFABS_RON).unwrap();
        fs::write(dir.join("map.ron"), MAP_RON).unwrap();

        let data = load_build_data(&dir).unwrap();
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.tile_names.len(), 4);
        assert!(data.grid.is_blocked(cell(1, 1)));
        assert_eq!(data.grid.bounds(), Some(GridBounds::new(cell(0, 0), cell(3, 2))));
        assert_eq!(data.grid.policy(), OutOfBoundsPolicy::Blocked);
        assert_eq!(data.tiles.data_at_cell(cell(3, 0)).map(|d| d.data1), Some(0.25));
        assert_eq!(data.tiles.data_at_cell(cell(1, 1)), None);

        cleanup(&dir);
    }

    #[test]
    fn config_bounds_override_map_extent() {
        let dir = make_test_dir("config");
        fs::write(dir.join("tiles.ron"), TILES_RON).unwrap();
        fs::write(dir.join("prefabs.ron"), PREFABS_RON).unwrap();
        fs::write(dir.join("map.ron"), MAP_RON).unwrap();
        fs::write(
            dir.join("config.toml"),
            r#"
margin = 0
out_of_bounds = "open"

[bounds]
min = { x = -5, y = -5 }
max = { x = 5, y = 5 }

[layout]
cell_size = 2.0
"#,
        )
        .unwrap();

        let data = load_build_data(&dir).unwrap();
        assert_eq!(data.config.margin, 0);
        assert_eq!(data.config.layout.cell_size, 2.0);
        assert_eq!(data.grid.bounds(), Some(GridBounds::new(cell(-5, -5), cell(5, 5))));
        assert_eq!(data.grid.policy(), OutOfBoundsPolicy::Open);

        cleanup(&dir);
    }

    #[test]
    fn invalid_cell_size_rejected() {
        let dir = make_test_dir("bad_layout");
        fs::write(dir.join("tiles.ron"), TILES_RON).unwrap();
        fs::write(dir.join("prefabs.ron"), PREFABS_RON).unwrap();
        fs::write(dir.join("config.json"), r#"{"layout": {"cell_size": -1.0}}"#).unwrap();

        assert!(matches!(
            load_build_data(&dir),
            Err(DataLoadError::Invalid { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn missing_prefabs_is_an_error() {
        let dir = make_test_dir("no_prefabs");
        fs::write(dir.join("tiles.ron"), TILES_RON).unwrap();

        assert!(matches!(
            load_build_data(&dir),
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "prefabs"
        ));

        cleanup(&dir);
    }

    #[test]
    fn no_map_means_unbounded() {
        let dir = make_test_dir("no_map");
        fs::write(dir.join("tiles.ron"), TILES_RON).unwrap();
        fs::write(dir.join("prefabs.ron"), PREFABS_RON).unwrap();

        let data = load_build_data(&dir).unwrap();
        assert_eq!(data.grid.bounds(), None);
        let (mut controller, _tiles) = data.into_controller();
        let house = controller.catalog().id("house").unwrap();
        controller.request_placement(house).unwrap();
        assert!(controller.commit().is_ok());

        cleanup(&dir);
    }
}
