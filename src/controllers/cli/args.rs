use crate::controllers::cli::errors::CliError;
use crate::core::fractals::formula::formula_config::DrawConfig;
use crate::core::fractals::formula::params::Mode;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Complex,
    Real,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Complex => Mode::Complex,
            ModeArg::Real => Mode::Real,
        }
    }
}

/// Flags left unset fall back to the config file, then to the defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "formula-explorer")]
#[command(about = "Render an escape-time fractal from user formulas to a PPM image")]
pub struct CliArgs {
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    #[arg(long, allow_negative_numbers = true)]
    pub center_x: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub center_y: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub zoom: Option<f64>,

    #[arg(long)]
    pub max_iterations: Option<u32>,

    #[arg(long)]
    pub pixel_size: Option<u32>,

    #[arg(long)]
    pub color_depth: Option<f64>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Complex-mode update, over `z` and `c`
    #[arg(long)]
    pub formula_z: Option<String>,

    /// Real-mode update of `x`, over `x`, `y`, `cx` and `cy`
    #[arg(long)]
    pub formula_x: Option<String>,

    /// Real-mode update of `y`, over `x`, `y`, `cx` and `cy`
    #[arg(long)]
    pub formula_y: Option<String>,

    /// Escape condition over `z`, or over `x` and `y` in real mode
    #[arg(long)]
    pub escape: Option<String>,

    /// JSON file with draw settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Longest time a render slice may run, in milliseconds
    #[arg(long, default_value_t = 33)]
    pub slice_ms: u64,

    #[arg(short, long, default_value = "output/fractal.ppm")]
    pub output: PathBuf,
}

impl CliArgs {
    #[must_use]
    pub fn slice_budget(&self) -> Duration {
        Duration::from_millis(self.slice_ms)
    }

    /// Loads `--config` when given and applies the explicit flags on top.
    pub fn draw_config(&self) -> Result<DrawConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DrawConfig::default(),
        };

        self.apply_overrides(&mut config);

        Ok(config)
    }

    fn apply_overrides(&self, config: &mut DrawConfig) {
        if let Some(center_x) = self.center_x {
            config.center_x = center_x;
        }
        if let Some(center_y) = self.center_y {
            config.center_y = center_y;
        }
        if let Some(zoom) = self.zoom {
            config.zoom = zoom;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(pixel_size) = self.pixel_size {
            config.pixel_size = pixel_size;
        }
        if let Some(color_depth) = self.color_depth {
            config.color_depth = color_depth;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(formula) = &self.formula_z {
            config.formula_z.clone_from(formula);
        }
        if let Some(formula) = &self.formula_x {
            config.formula_x.clone_from(formula);
        }
        if let Some(formula) = &self.formula_y {
            config.formula_y.clone_from(formula);
        }
        if let Some(escape) = &self.escape {
            config.escape_condition = Some(escape.clone());
        }
    }
}

fn load_config(path: &Path) -> Result<DrawConfig, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    DrawConfig::from_json(&json).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}
