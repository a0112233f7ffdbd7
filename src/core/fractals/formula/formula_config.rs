use crate::core::fractals::formula::params::Mode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CENTER_X: f64 = 0.0;
pub const DEFAULT_CENTER_Y: f64 = 0.0;
pub const DEFAULT_ZOOM: f64 = 5.0;
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;
pub const DEFAULT_PIXEL_SIZE: u32 = 3;
pub const DEFAULT_COLOR_DEPTH: f64 = 20.0;
pub const DEFAULT_FORMULA_Z: &str = "z^2 + c";
pub const DEFAULT_FORMULA_X: &str = "x^2 - y^2 + cx";
pub const DEFAULT_FORMULA_Y: &str = "2*x*y + cy";
pub const DEFAULT_COMPLEX_ESCAPE: &str = "abs(z) > 100";
pub const DEFAULT_REAL_ESCAPE: &str = "x^2 + y^2 > 10000";

/// User-facing draw settings as plain text and numbers.
///
/// Every field has a named default, so a partial JSON document fills in the
/// rest. Compile it with [`DrawParameters::from_config`].
///
/// [`DrawParameters::from_config`]: crate::core::fractals::formula::params::DrawParameters::from_config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub max_iterations: u32,
    pub pixel_size: u32,
    pub color_depth: f64,
    pub mode: Mode,
    pub formula_z: String,
    pub formula_x: String,
    pub formula_y: String,
    /// Falls back to the default for `mode` when absent.
    pub escape_condition: Option<String>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            center_x: DEFAULT_CENTER_X,
            center_y: DEFAULT_CENTER_Y,
            zoom: DEFAULT_ZOOM,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            pixel_size: DEFAULT_PIXEL_SIZE,
            color_depth: DEFAULT_COLOR_DEPTH,
            mode: Mode::default(),
            formula_z: DEFAULT_FORMULA_Z.to_string(),
            formula_x: DEFAULT_FORMULA_X.to_string(),
            formula_y: DEFAULT_FORMULA_Y.to_string(),
            escape_condition: None,
        }
    }
}

impl DrawConfig {
    #[must_use]
    pub fn escape_condition(&self) -> &str {
        match (&self.escape_condition, self.mode) {
            (Some(condition), _) => condition,
            (None, Mode::Complex) => DEFAULT_COMPLEX_ESCAPE,
            (None, Mode::Real) => DEFAULT_REAL_ESCAPE,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = DrawConfig::from_json(r#"{ "zoom": 1.5, "mode": "real" }"#).unwrap();

        assert_eq!(config.zoom, 1.5);
        assert_eq!(config.mode, Mode::Real);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.formula_x, DEFAULT_FORMULA_X);
        assert_eq!(config.escape_condition(), DEFAULT_REAL_ESCAPE);
    }

    #[test]
    fn test_explicit_escape_condition_wins_over_mode_default() {
        let config = DrawConfig {
            escape_condition: Some("abs(z) > 2".to_string()),
            ..DrawConfig::default()
        };

        assert_eq!(config.escape_condition(), "abs(z) > 2");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(DrawConfig::from_json(r#"{ "mode": "quaternion" }"#).is_err());
    }
}
