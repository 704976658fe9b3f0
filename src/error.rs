//! Start-up failures.  The simulation itself has no error cases.

use std::path::PathBuf;

/// Anything that stops a session from reaching its first frame.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Raw mode, alternate screen, or terminal size query failed.
    #[error("terminal unavailable: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),
}
