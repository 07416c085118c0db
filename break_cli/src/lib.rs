//! # break_cli
//!
//! Front ends for [`break_core`]: a flag-driven command line and an
//! interactive prompt session. Both build the same
//! [`CalculationRequest`](break_core::CalculationRequest) and print through
//! the same report functions.

pub mod args;
pub mod commands;
pub mod error;
pub mod interactive;
pub mod logging;

pub use args::Cli;
pub use error::{CliError, CliResult};
