use crate::core::expression::ParseError;
use crate::core::fractals::formula::params::{FormulaRole, Mode};
use thiserror::Error;

/// Draw parameters that were rejected before any rendering started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationFault {
    #[error("Maximum iterations must be greater than zero")]
    ZeroMaxIterations,

    #[error("Pixel size must be at least one")]
    ZeroPixelSize,

    #[error("Colour depth must be a positive number, got {0}")]
    InvalidColorDepth(f64),

    #[error("View must be finite, got center ({center_x}, {center_y}) and zoom {zoom}")]
    NonFiniteView {
        center_x: f64,
        center_y: f64,
        zoom: f64,
    },

    #[error("Invalid {role} formula '{formula}': {error}")]
    InvalidFormula {
        role: FormulaRole,
        formula: String,
        #[source]
        error: ParseError,
    },

    #[error("The {role} formula uses '{variable}', which is not available in {mode} mode")]
    UnsupportedVariable {
        role: FormulaRole,
        mode: Mode,
        variable: String,
    },
}
