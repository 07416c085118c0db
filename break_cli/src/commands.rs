//! Command line mode dispatch.

use std::io::Write;

use break_core::calculations::{layer_matrix, CalculationRequest};
use break_core::export::export_csv;
use break_core::materials::{load_materials, MaterialRegistry};
use break_core::plot::save_force_plot;
use break_core::report::{calibration_note, format_assist, format_matrix, format_single};
use break_core::self_test::run_self_test;
use break_core::calculate;
use tracing::debug;

use crate::args::{Cli, Mode};
use crate::error::{CliError, CliResult};

/// Run one command line invocation, writing reports to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> CliResult<()> {
    let registry = load_materials(cli.materials_file.as_deref());
    debug!(source = %registry.source(), "material registry ready");
    run_with_registry(cli, &registry, out)
}

/// Same as [`run`] with an already loaded registry.
pub fn run_with_registry(
    cli: &Cli,
    registry: &MaterialRegistry,
    out: &mut impl Write,
) -> CliResult<()> {
    let constants = cli.constants()?;

    match cli.mode() {
        Mode::SelfTest => {
            let report = run_self_test(registry, &constants);
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "Self-test against {}:", registry.source())?;
                for check in &report.checks {
                    if check.passed {
                        writeln!(out, "  [OK]   {}", check.name)?;
                    } else {
                        writeln!(out, "  [FAIL] {}: {}", check.name, check.detail)?;
                    }
                }
            }
            if report.passed() {
                Ok(())
            } else {
                Err(CliError::SelfTestFailed {
                    failed: report.failed_count(),
                })
            }
        }
        Mode::CsvExport(path) => {
            let spacing = cli.spacing.or_else(|| cli.pencil.then(|| cli.pegged_spacing()));
            let rows = export_csv(registry, spacing, &constants, &path)?;
            writeln!(out, "CSV written to {} ({} rows)", path.display(), rows)?;
            Ok(())
        }
        mode @ (Mode::Matrix | Mode::Single) => {
            let name = cli.material.as_deref().ok_or(CliError::MissingMaterial)?;
            let material = registry.get(name)?.clone();
            let request = CalculationRequest::new(material, cli.layers, cli.configuration())
                .with_spacing(cli.spacing_for_config())
                .with_constants(constants);
            request.validate()?;

            if mode == Mode::Matrix {
                let rows = layer_matrix(&request)?;
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
                } else {
                    write!(out, "{}", format_matrix(&rows))?;
                }
            } else {
                let result = calculate(&request)?;
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
                } else {
                    if let Some(note) = calibration_note(result.layers) {
                        writeln!(out, "{note}")?;
                    }
                    write!(out, "{}", format_single(&result))?;
                    if let (Some(assist), true) = (&result.assist, cli.verbose > 0) {
                        write!(out, "{}", format_assist(assist))?;
                    }
                }
            }

            if cli.plot {
                let rows = layer_matrix(&request)?;
                save_force_plot(&rows, &cli.plot_path)?;
                if !cli.json {
                    writeln!(out, "Plot written to {}", cli.plot_path.display())?;
                }
            }
            Ok(())
        }
    }
}
