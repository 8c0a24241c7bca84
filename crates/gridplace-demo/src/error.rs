use std::path::PathBuf;

/// Errors that can stop a scenario run.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Failed to load the scenario's data files.
    #[error("data load error in {dir}: {source}")]
    DataLoad {
        dir: PathBuf,
        source: gridplace_data::DataLoadError,
    },

    /// The script names a prefab missing from `prefabs`.
    #[error("script step {step}: prefab '{name}' not found")]
    PrefabNotFound { step: usize, name: String },
}
