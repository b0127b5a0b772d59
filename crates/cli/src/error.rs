//! CLI errors and their exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: animation error (bad dimensions, surface failure)
//! - 11: I/O error (PNG write, scene read, output directory)
//! - 12: input error (bad color, bad JSON params, malformed scene)
//! - 13: serialization error

use std::fmt;

use quiet_drift_core::DriftError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// An animation-level error (bad dimensions, surface failure).
    Engine(DriftError),
    /// An I/O error (PNG write, scene read, output directory).
    Io(String),
    /// A user input error (bad color, bad JSON params, malformed scene).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<DriftError> for CliError {
    fn from(e: DriftError) -> Self {
        match e {
            DriftError::Io(msg) => CliError::Io(msg),
            DriftError::InvalidColor(_) | DriftError::Scene(_) => CliError::Input(e.to_string()),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
