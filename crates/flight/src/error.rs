use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a controller or loading its tunables.
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("scene service reports no levels")]
    NoLevels,
    #[error("level index {index} out of range for {count} levels")]
    LevelOutOfRange { index: usize, count: usize },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tunables: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid tunable `{name}`: {value}")]
    InvalidTunable { name: &'static str, value: f32 },
}
