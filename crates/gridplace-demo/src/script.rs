use serde::Deserialize;

/// One scripted input. Coordinates are world space.
///
/// In RON: `Request("wall")`, `Move(x: 2.5, y: 0.5)`, `Rotate`, `Commit`,
/// `Cancel`, `Probe(x: 1.0, y: 1.0)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ScriptStep {
    /// Begin placing the named prefab.
    Request(String),
    /// Move the pointer.
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    },
    Rotate,
    Cancel,
    Commit,
    /// Read tile data under a world position.
    Probe {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    },
}
