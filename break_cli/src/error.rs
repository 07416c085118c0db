//! Errors surfaced by the front ends.

use break_core::CalcError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// A calculation, lookup or export failed
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Terminal or stream I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// `--material` is required outside CSV and self-test modes
    #[error("--material is required when using command-line arguments (except for --all-csv and --test)")]
    MissingMaterial,

    /// One or more self-test checks failed
    #[error("self-test failed: {failed} check(s) did not pass")]
    SelfTestFailed { failed: usize },
}

impl CliError {
    /// Whether usage help should follow the message.
    pub fn wants_usage(&self) -> bool {
        matches!(self, CliError::MissingMaterial)
    }
}
