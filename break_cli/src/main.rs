//! Breakcalc - Breaking Force Calculator
//!
//! With flags, runs one calculation, matrix, export or self-test and exits.
//! Without arguments, starts the interactive prompt session.

use std::io::{self, Write};
use std::process::ExitCode;

use break_cli::commands;
use break_cli::interactive::Session;
use break_cli::logging;
use break_cli::{Cli, CliResult};
use break_core::load_materials;
use clap::{CommandFactory, Parser};

fn interactive() -> CliResult<()> {
    let registry = load_materials(None);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), &registry);
    session.run()
}

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        logging::init(0);
        return match interactive() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = commands::run(&cli, &mut out);
    let _ = out.flush();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.wants_usage() {
                eprintln!();
                let _ = Cli::command().write_help(&mut io::stderr());
            }
            ExitCode::FAILURE
        }
    }
}
