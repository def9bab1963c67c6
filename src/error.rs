//! Configuration errors
//!
//! The simulation itself has no error paths; a finished run is reported
//! through [`crate::sim::RunState`]. Only building a run from outside input
//! can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid viewport {width}x{height}: dimensions must be positive and finite")]
    InvalidViewport { width: f32, height: f32 },
    #[error("invalid tuning value for `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
