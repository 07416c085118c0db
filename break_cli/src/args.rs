//! Command line flags.

use std::path::PathBuf;

use break_core::calculations::{Configuration, PhysicalConstants, SpacingPreset};
use break_core::plot::DEFAULT_PLOT_FILE;
use break_core::CalcResult;
use clap::{ArgAction, Parser, ValueEnum};

/// Stack configuration as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigArg {
    /// Layers separated by spacers
    Pegged,
    /// Layers stacked in direct contact
    Unpegged,
}

impl From<ConfigArg> for Configuration {
    fn from(arg: ConfigArg) -> Self {
        match arg {
            ConfigArg::Pegged => Configuration::Pegged,
            ConfigArg::Unpegged => Configuration::Unpegged,
        }
    }
}

/// Estimate the force and PSI needed to break stacked boards, tiles or slabs.
///
/// Run without arguments for interactive mode.
#[derive(Parser, Debug, Clone)]
#[command(name = "breakcalc")]
#[command(version)]
pub struct Cli {
    /// Material to break (e.g. pine, paulownia, concrete)
    #[arg(short, long)]
    pub material: Option<String>,

    /// Number of layers. Ignored by --matrix and --all-csv
    #[arg(short, long, default_value_t = 1)]
    pub layers: u32,

    /// Stack configuration
    #[arg(short, long, value_enum, default_value_t = ConfigArg::Unpegged)]
    pub config: ConfigArg,

    /// Spacing in mm for pegged stacks (overrides --pencil)
    #[arg(long, value_name = "MM", allow_negative_numbers = true)]
    pub spacing: Option<f64>,

    /// Use carpenter pencil spacing (6.35 mm) instead of a penny (1.52 mm)
    #[arg(long)]
    pub pencil: bool,

    /// Print a matrix for 1-10 layers instead of a single result
    #[arg(long)]
    pub matrix: bool,

    /// Write the matrix for every material and both configurations to a CSV file
    #[arg(long, value_name = "PATH")]
    pub all_csv: Option<PathBuf>,

    /// Impact duration in seconds [default: 0.005]
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    pub impact_duration: Option<f64>,

    /// Contact area in square inches [default: 2.5]
    #[arg(long, value_name = "IN2", allow_negative_numbers = true)]
    pub contact_area: Option<f64>,

    /// Exponent for unpegged flexible stacks [default: 1.5]
    #[arg(long, value_name = "EXP", allow_negative_numbers = true)]
    pub scaling_exponent: Option<f64>,

    /// Render force vs. layers for the selected material and configuration
    #[arg(long)]
    pub plot: bool,

    /// Output file for --plot
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PLOT_FILE)]
    pub plot_path: PathBuf,

    /// Run the built-in self-test and exit
    #[arg(long)]
    pub test: bool,

    /// JSON material table replacing the built-in one [default: materials.json if present]
    #[arg(long, value_name = "PATH")]
    pub materials_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    SelfTest,
    CsvExport(PathBuf),
    Matrix,
    Single,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.test {
            Mode::SelfTest
        } else if let Some(path) = &self.all_csv {
            Mode::CsvExport(path.clone())
        } else if self.matrix {
            Mode::Matrix
        } else {
            Mode::Single
        }
    }

    pub fn configuration(&self) -> Configuration {
        self.config.into()
    }

    /// Spacing a pegged stack would use: explicit value, else pencil, else penny.
    pub fn pegged_spacing(&self) -> f64 {
        self.spacing.unwrap_or_else(|| {
            if self.pencil {
                SpacingPreset::Pencil.mm()
            } else {
                SpacingPreset::Penny.mm()
            }
        })
    }

    /// Spacing for the selected configuration (`None` when unpegged).
    pub fn spacing_for_config(&self) -> Option<f64> {
        match self.configuration() {
            Configuration::Pegged => Some(self.pegged_spacing()),
            Configuration::Unpegged => None,
        }
    }

    /// Defaults with any command line overrides applied, validated.
    pub fn constants(&self) -> CalcResult<PhysicalConstants> {
        let mut constants = PhysicalConstants::default();
        if let Some(dt) = self.impact_duration {
            constants = constants.with_impact_duration(dt);
        }
        if let Some(area) = self.contact_area {
            constants = constants.with_contact_area(area);
        }
        if let Some(exponent) = self.scaling_exponent {
            constants = constants.with_scaling_exponent(exponent);
        }
        constants.validate()?;
        Ok(constants)
    }
}
