//! Interactive prompt session.
//!
//! Asks for mode, material, configuration, spacing, optional constant
//! overrides and layer count in turn. Blank input takes the default shown in
//! brackets, invalid input is re-prompted, and `q` / `quit` (or end of input)
//! ends the session at any prompt.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use break_core::calculations::{
    layer_matrix, CalculationRequest, Configuration, PhysicalConstants, SpacingPreset,
};
use break_core::export::{export_csv, DEFAULT_CSV_FILE};
use break_core::materials::{MaterialClass, MaterialProfile, MaterialRegistry};
use break_core::plot::{save_force_plot, DEFAULT_PLOT_FILE};
use break_core::report::{calibration_note, format_matrix, format_single};
use break_core::{calculate, CalcError};

use crate::error::CliResult;

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionMode {
    Single,
    Matrix,
    Csv,
    Plot,
}

/// Prompt session over any line source and sink.
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    registry: &'a MaterialRegistry,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, registry: &'a MaterialRegistry) -> Self {
        Session {
            input,
            output,
            registry,
        }
    }

    /// Give back the output sink (used by tests to inspect the transcript).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed line. `None` means quit.
    fn ask(&mut self, prompt: &str) -> CliResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim().to_string();
        if QUIT_WORDS.iter().any(|q| answer.eq_ignore_ascii_case(q)) {
            return Ok(None);
        }
        Ok(Some(answer))
    }

    /// Numbered menu choice, 1-based; blank picks `default` if there is one.
    fn choose(&mut self, prompt: &str, count: usize, default: Option<usize>) -> CliResult<Option<usize>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(Some(d));
                }
            } else if let Ok(n) = answer.parse::<usize>() {
                if (1..=count).contains(&n) {
                    return Ok(Some(n));
                }
            }
            writeln!(self.output, "Invalid choice. Please enter 1-{count}.")?;
        }
    }

    /// Number accepted by `check`; blank returns `default` when given.
    fn number<T, F>(&mut self, prompt: &str, default: Option<T>, check: F) -> CliResult<Option<T>>
    where
        T: std::str::FromStr + Copy,
        F: Fn(T) -> Result<(), String>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            let value = if answer.is_empty() {
                match default {
                    Some(d) => d,
                    None => {
                        writeln!(self.output, "Please enter a value.")?;
                        continue;
                    }
                }
            } else {
                match answer.parse::<T>() {
                    Ok(v) => v,
                    Err(_) => {
                        writeln!(self.output, "Invalid number. Please try again.")?;
                        continue;
                    }
                }
            };
            match check(value) {
                Ok(()) => return Ok(Some(value)),
                Err(msg) => writeln!(self.output, "{msg}")?,
            }
        }
    }

    fn positive(prompt_value: f64) -> Result<(), String> {
        if prompt_value.is_finite() && prompt_value > 0.0 {
            Ok(())
        } else {
            Err("Value must be a positive number.".to_string())
        }
    }

    fn select_mode(&mut self) -> CliResult<Option<SessionMode>> {
        writeln!(self.output, "Select mode:")?;
        writeln!(self.output, "1. single calculation (default)")?;
        writeln!(self.output, "2. matrix (1-10 layers)")?;
        writeln!(self.output, "3. CSV matrix for all materials")?;
        writeln!(self.output, "4. plot force vs. layers")?;
        let choice = self.choose("Enter number (1-4) [default 1]: ", 4, Some(1))?;
        Ok(choice.map(|n| match n {
            2 => SessionMode::Matrix,
            3 => SessionMode::Csv,
            4 => SessionMode::Plot,
            _ => SessionMode::Single,
        }))
    }

    fn select_material(&mut self) -> CliResult<Option<MaterialProfile>> {
        writeln!(self.output, "\nSelect material by number or name:")?;
        let names: Vec<String> = self.registry.names().iter().map(|s| s.to_string()).collect();
        for (i, name) in names.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name)?;
        }
        let prompt = format!("Enter material (1-{}): ", names.len());
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            let by_number = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| names.get(i));
            let lookup = match by_number {
                Some(name) => self.registry.get(name),
                None => self.registry.get(&answer),
            };
            match lookup {
                Ok(profile) => return Ok(Some(profile.clone())),
                Err(_) => writeln!(self.output, "Invalid choice. Please enter 1-{}.", names.len())?,
            }
        }
    }

    fn select_configuration(&mut self) -> CliResult<Option<Configuration>> {
        writeln!(self.output, "\nSelect configuration:")?;
        writeln!(self.output, "1. pegged")?;
        writeln!(self.output, "2. unpegged (default)")?;
        let choice = self.choose("Enter number (1-2) [default 2]: ", 2, Some(2))?;
        Ok(choice.map(|n| {
            if n == 1 {
                Configuration::Pegged
            } else {
                Configuration::Unpegged
            }
        }))
    }

    fn select_spacing(&mut self) -> CliResult<Option<f64>> {
        writeln!(self.output, "\nSelect spacing:")?;
        writeln!(self.output, "1. penny ({} mm, default)", SpacingPreset::Penny.mm())?;
        writeln!(self.output, "2. pencil ({} mm)", SpacingPreset::Pencil.mm())?;
        writeln!(self.output, "3. custom")?;
        match self.choose("Enter number (1-3) [default 1]: ", 3, Some(1))? {
            None => Ok(None),
            Some(1) => Ok(Some(SpacingPreset::Penny.mm())),
            Some(2) => Ok(Some(SpacingPreset::Pencil.mm())),
            Some(_) => self.number("Enter custom spacing in mm: ", None, |v: f64| {
                if v.is_finite() && v >= 0.0 {
                    Ok(())
                } else {
                    Err("Spacing cannot be negative.".to_string())
                }
            }),
        }
    }

    fn select_constants(
        &mut self,
        material: &MaterialProfile,
        configuration: Configuration,
    ) -> CliResult<Option<PhysicalConstants>> {
        let defaults = PhysicalConstants::default();
        let Some(answer) = self.ask("\nOverride physical constants? (y/N): ")? else {
            return Ok(None);
        };
        if !answer.eq_ignore_ascii_case("y") && !answer.eq_ignore_ascii_case("yes") {
            return Ok(Some(defaults));
        }

        let prompt = format!("Impact duration in s [default {}]: ", defaults.impact_duration_s);
        let Some(dt) = self.number(&prompt, Some(defaults.impact_duration_s), Self::positive)? else {
            return Ok(None);
        };
        let prompt = format!("Contact area in in² [default {}]: ", defaults.contact_area_in2);
        let Some(area) = self.number(&prompt, Some(defaults.contact_area_in2), Self::positive)? else {
            return Ok(None);
        };
        let mut constants = defaults.with_impact_duration(dt).with_contact_area(area);

        if material.class == MaterialClass::Flexible && configuration == Configuration::Unpegged {
            let prompt = format!("Scaling exponent [default {}]: ", defaults.scaling_exponent);
            let Some(k) = self.number(&prompt, Some(defaults.scaling_exponent), Self::positive)? else {
                return Ok(None);
            };
            constants = constants.with_scaling_exponent(k);
        }
        Ok(Some(constants))
    }

    fn select_layers(&mut self) -> CliResult<Option<u32>> {
        self.number(
            "\nEnter number of layers (1-10) [default: 1]: ",
            Some(1u32),
            |n: u32| {
                if n >= 1 {
                    Ok(())
                } else {
                    Err("Layers must be at least 1.".to_string())
                }
            },
        )
    }

    fn report_error(&mut self, err: CalcError) -> CliResult<()> {
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }

    /// Run the session to completion or until the user quits.
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "Martial Arts Breaking Calculator")?;
        writeln!(self.output, "This tool calculates force and PSI for breaking materials.")?;
        writeln!(self.output, "Enter 'q' at any prompt to quit.")?;

        let Some(mode) = self.select_mode()? else {
            return Ok(());
        };

        if mode == SessionMode::Csv {
            let prompt = format!("Enter CSV filename [default: {DEFAULT_CSV_FILE}]: ");
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(());
            };
            let path = PathBuf::from(if answer.is_empty() { DEFAULT_CSV_FILE } else { answer.as_str() });
            return match export_csv(self.registry, None, &PhysicalConstants::default(), &path) {
                Ok(rows) => {
                    writeln!(self.output, "CSV written to {} ({} rows)", path.display(), rows)?;
                    Ok(())
                }
                Err(e) => self.report_error(e),
            };
        }

        let Some(material) = self.select_material()? else {
            return Ok(());
        };
        let Some(configuration) = self.select_configuration()? else {
            return Ok(());
        };
        let spacing = if configuration == Configuration::Pegged {
            let Some(s) = self.select_spacing()? else {
                return Ok(());
            };
            Some(s)
        } else {
            None
        };
        let Some(constants) = self.select_constants(&material, configuration)? else {
            return Ok(());
        };

        let request = CalculationRequest::new(material, 1, configuration)
            .with_spacing(spacing)
            .with_constants(constants);

        match mode {
            SessionMode::Single => {
                let Some(layers) = self.select_layers()? else {
                    return Ok(());
                };
                match calculate(&request.at_layers(layers)) {
                    Ok(result) => {
                        if let Some(note) = calibration_note(layers) {
                            writeln!(self.output, "{note}")?;
                        }
                        write!(self.output, "{}", format_single(&result))?;
                    }
                    Err(e) => self.report_error(e)?,
                }
            }
            SessionMode::Matrix => match layer_matrix(&request) {
                Ok(rows) => write!(self.output, "{}", format_matrix(&rows))?,
                Err(e) => self.report_error(e)?,
            },
            SessionMode::Plot => {
                let prompt = format!("Enter plot filename [default: {DEFAULT_PLOT_FILE}]: ");
                let Some(answer) = self.ask(&prompt)? else {
                    return Ok(());
                };
                let path = PathBuf::from(if answer.is_empty() { DEFAULT_PLOT_FILE } else { answer.as_str() });
                match layer_matrix(&request).and_then(|rows| save_force_plot(&rows, &path)) {
                    Ok(()) => writeln!(self.output, "Plot written to {}", path.display())?,
                    Err(e) => self.report_error(e)?,
                }
            }
            SessionMode::Csv => {}
        }
        Ok(())
    }
}
