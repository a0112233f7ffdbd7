use crate::core::data::point::PlanePoint;
use crate::core::expression::Expression;
use crate::core::fractals::formula::errors::ConfigurationFault;
use crate::core::fractals::formula::formula_config::DrawConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the iterated state is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One complex variable `z`, iterated with `c` fixed.
    #[default]
    Complex,
    /// Two real variables `x` and `y`, iterated with `cx` and `cy` fixed.
    Real,
}

impl Mode {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Complex => "complex",
            Self::Real => "real",
        }
    }

    #[must_use]
    pub const fn iteration_variables(self) -> &'static [&'static str] {
        match self {
            Self::Complex => &["z", "c"],
            Self::Real => &["x", "y", "cx", "cy"],
        }
    }

    #[must_use]
    pub const fn escape_variables(self) -> &'static [&'static str] {
        match self {
            Self::Complex => &["z"],
            Self::Real => &["x", "y"],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which formula a configuration fault refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaRole {
    IterationZ,
    IterationX,
    IterationY,
    EscapeCondition,
}

impl fmt::Display for FormulaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IterationZ => "z iteration",
            Self::IterationX => "x iteration",
            Self::IterationY => "y iteration",
            Self::EscapeCondition => "escape condition",
        })
    }
}

/// The iterated map. The variant is the mode, so a complex map can never be
/// paired with real update formulas or the other way round.
#[derive(Debug, Clone, PartialEq)]
pub enum IterationFormula {
    Complex { z: Expression },
    Real { x: Expression, y: Expression },
}

impl IterationFormula {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Complex { .. } => Mode::Complex,
            Self::Real { .. } => Mode::Real,
        }
    }
}

/// Everything needed to render one image. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawParameters {
    center: PlanePoint,
    zoom: f64,
    max_iterations: u32,
    pixel_size: u32,
    color_depth: f64,
    iteration_formula: IterationFormula,
    escape_condition: Expression,
}

impl DrawParameters {
    pub fn new(
        center: PlanePoint,
        zoom: f64,
        max_iterations: u32,
        pixel_size: u32,
        color_depth: f64,
        iteration_formula: IterationFormula,
        escape_condition: Expression,
    ) -> Result<Self, ConfigurationFault> {
        if max_iterations == 0 {
            return Err(ConfigurationFault::ZeroMaxIterations);
        }

        if pixel_size == 0 {
            return Err(ConfigurationFault::ZeroPixelSize);
        }

        if !(color_depth.is_finite() && color_depth > 0.0) {
            return Err(ConfigurationFault::InvalidColorDepth(color_depth));
        }

        // exp(zoom) under- or overflows well before zoom itself does.
        let scale = 1.0 / zoom.exp();
        if !(center.is_finite() && scale.is_finite() && scale > 0.0) {
            return Err(ConfigurationFault::NonFiniteView {
                center_x: center.x,
                center_y: center.y,
                zoom,
            });
        }

        let mode = iteration_formula.mode();
        match &iteration_formula {
            IterationFormula::Complex { z } => {
                check_variables(z, FormulaRole::IterationZ, mode, mode.iteration_variables())?;
            }
            IterationFormula::Real { x, y } => {
                check_variables(x, FormulaRole::IterationX, mode, mode.iteration_variables())?;
                check_variables(y, FormulaRole::IterationY, mode, mode.iteration_variables())?;
            }
        }
        check_variables(
            &escape_condition,
            FormulaRole::EscapeCondition,
            mode,
            mode.escape_variables(),
        )?;

        Ok(Self {
            center,
            zoom,
            max_iterations,
            pixel_size,
            color_depth,
            iteration_formula,
            escape_condition,
        })
    }

    /// Compiles the formulas of `config` and validates the result.
    pub fn from_config(config: &DrawConfig) -> Result<Self, ConfigurationFault> {
        let iteration_formula = match config.mode {
            Mode::Complex => IterationFormula::Complex {
                z: compile(&config.formula_z, FormulaRole::IterationZ)?,
            },
            Mode::Real => IterationFormula::Real {
                x: compile(&config.formula_x, FormulaRole::IterationX)?,
                y: compile(&config.formula_y, FormulaRole::IterationY)?,
            },
        };

        let escape_condition = compile(config.escape_condition(), FormulaRole::EscapeCondition)?;

        Self::new(
            PlanePoint {
                x: config.center_x,
                y: config.center_y,
            },
            config.zoom,
            config.max_iterations,
            config.pixel_size,
            config.color_depth,
            iteration_formula,
            escape_condition,
        )
    }

    #[must_use]
    pub fn center(&self) -> PlanePoint {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Plane units per raster pixel.
    #[must_use]
    pub fn scale(&self) -> f64 {
        1.0 / self.zoom.exp()
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    #[must_use]
    pub fn color_depth(&self) -> f64 {
        self.color_depth
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.iteration_formula.mode()
    }

    #[must_use]
    pub fn iteration_formula(&self) -> &IterationFormula {
        &self.iteration_formula
    }

    #[must_use]
    pub fn escape_condition(&self) -> &Expression {
        &self.escape_condition
    }
}

fn compile(source: &str, role: FormulaRole) -> Result<Expression, ConfigurationFault> {
    Expression::compile(source).map_err(|error| ConfigurationFault::InvalidFormula {
        role,
        formula: source.to_string(),
        error,
    })
}

fn check_variables(
    expression: &Expression,
    role: FormulaRole,
    mode: Mode,
    allowed: &[&str],
) -> Result<(), ConfigurationFault> {
    match expression
        .variables()
        .iter()
        .find(|variable| !allowed.contains(&variable.as_str()))
    {
        Some(variable) => Err(ConfigurationFault::UnsupportedVariable {
            role,
            mode,
            variable: variable.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expression::ParseError;

    fn expr(source: &str) -> Expression {
        Expression::compile(source).unwrap()
    }

    fn complex_formula() -> IterationFormula {
        IterationFormula::Complex { z: expr("z^2 + c") }
    }

    #[test]
    fn test_default_config_builds() {
        let params = DrawParameters::from_config(&DrawConfig::default()).unwrap();

        assert_eq!(params.mode(), Mode::Complex);
        assert_eq!(params.max_iterations(), 200);
        assert_eq!(params.pixel_size(), 3);
        assert_eq!(params.zoom(), 5.0);
        assert_eq!(params.escape_condition().source(), "abs(z) > 100");
    }

    #[test]
    fn test_real_mode_config_uses_real_defaults() {
        let config = DrawConfig {
            mode: Mode::Real,
            ..DrawConfig::default()
        };

        let params = DrawParameters::from_config(&config).unwrap();

        assert_eq!(params.mode(), Mode::Real);
        assert_eq!(params.escape_condition().source(), "x^2 + y^2 > 10000");
        let IterationFormula::Real { x, y } = params.iteration_formula() else {
            panic!("expected real iteration formula");
        };
        assert_eq!(x.source(), "x^2 - y^2 + cx");
        assert_eq!(y.source(), "2*x*y + cy");
    }

    #[test]
    fn test_zero_max_iterations_is_rejected() {
        let result = DrawParameters::new(
            PlanePoint::default(),
            0.0,
            0,
            1,
            20.0,
            complex_formula(),
            expr("abs(z) > 2"),
        );

        assert_eq!(result.unwrap_err(), ConfigurationFault::ZeroMaxIterations);
    }

    #[test]
    fn test_zero_pixel_size_is_rejected() {
        let result = DrawParameters::new(
            PlanePoint::default(),
            0.0,
            10,
            0,
            20.0,
            complex_formula(),
            expr("abs(z) > 2"),
        );

        assert_eq!(result.unwrap_err(), ConfigurationFault::ZeroPixelSize);
    }

    #[test]
    fn test_non_positive_color_depth_is_rejected() {
        for depth in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = DrawParameters::new(
                PlanePoint::default(),
                0.0,
                10,
                1,
                depth,
                complex_formula(),
                expr("abs(z) > 2"),
            );

            assert!(
                matches!(result, Err(ConfigurationFault::InvalidColorDepth(_))),
                "depth {depth} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_view_is_rejected() {
        let result = DrawParameters::new(
            PlanePoint {
                x: f64::NAN,
                y: 0.0,
            },
            0.0,
            10,
            1,
            20.0,
            complex_formula(),
            expr("abs(z) > 2"),
        );

        assert!(matches!(result, Err(ConfigurationFault::NonFiniteView { .. })));
    }

    #[test]
    fn test_zoom_whose_scale_degenerates_is_rejected() {
        for zoom in [800.0, -800.0, f64::INFINITY] {
            let config = DrawConfig {
                zoom,
                ..DrawConfig::default()
            };

            assert!(
                matches!(
                    DrawParameters::from_config(&config),
                    Err(ConfigurationFault::NonFiniteView { .. })
                ),
                "zoom {zoom} should be rejected"
            );
        }

        let deep = DrawConfig {
            zoom: 700.0,
            ..DrawConfig::default()
        };
        assert!(DrawParameters::from_config(&deep).is_ok());
    }

    #[test]
    fn test_escape_condition_must_match_mode() {
        let result = DrawParameters::new(
            PlanePoint::default(),
            0.0,
            10,
            1,
            20.0,
            complex_formula(),
            expr("x^2 + y^2 > 4"),
        );

        assert_eq!(
            result.unwrap_err(),
            ConfigurationFault::UnsupportedVariable {
                role: FormulaRole::EscapeCondition,
                mode: Mode::Complex,
                variable: "x".to_string(),
            }
        );
    }

    #[test]
    fn test_escape_condition_cannot_read_c() {
        let result = DrawParameters::new(
            PlanePoint::default(),
            0.0,
            10,
            1,
            20.0,
            complex_formula(),
            expr("abs(z - c) > 2"),
        );

        assert!(matches!(
            result,
            Err(ConfigurationFault::UnsupportedVariable { variable, .. }) if variable == "c"
        ));
    }

    #[test]
    fn test_real_formula_using_z_is_rejected() {
        let config = DrawConfig {
            mode: Mode::Real,
            formula_y: "2*x*y + z".to_string(),
            ..DrawConfig::default()
        };

        let result = DrawParameters::from_config(&config);

        assert_eq!(
            result.unwrap_err(),
            ConfigurationFault::UnsupportedVariable {
                role: FormulaRole::IterationY,
                mode: Mode::Real,
                variable: "z".to_string(),
            }
        );
    }

    #[test]
    fn test_formula_that_does_not_parse_is_rejected() {
        let config = DrawConfig {
            formula_z: "z^^2".to_string(),
            ..DrawConfig::default()
        };

        let result = DrawParameters::from_config(&config);

        assert!(matches!(
            result,
            Err(ConfigurationFault::InvalidFormula {
                role: FormulaRole::IterationZ,
                error: ParseError::UnexpectedToken { position: 2, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_deeply_nested_escape_condition_is_rejected() {
        let config = DrawConfig {
            escape_condition: Some(format!(
                "{}abs(z){} > 2",
                "(".repeat(10_000),
                ")".repeat(10_000)
            )),
            ..DrawConfig::default()
        };

        let result = DrawParameters::from_config(&config);

        assert!(matches!(
            result,
            Err(ConfigurationFault::InvalidFormula {
                role: FormulaRole::EscapeCondition,
                error: ParseError::TooDeep { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_scale_is_inverse_exponential_of_zoom() {
        let params = DrawParameters::new(
            PlanePoint::default(),
            0.0,
            10,
            1,
            20.0,
            complex_formula(),
            expr("abs(z) > 2"),
        )
        .unwrap();

        assert_eq!(params.scale(), 1.0);
    }

    #[test]
    fn test_fault_messages() {
        assert_eq!(
            ConfigurationFault::ZeroMaxIterations.to_string(),
            "Maximum iterations must be greater than zero"
        );
        assert_eq!(
            ConfigurationFault::UnsupportedVariable {
                role: FormulaRole::EscapeCondition,
                mode: Mode::Real,
                variable: "z".to_string(),
            }
            .to_string(),
            "The escape condition formula uses 'z', which is not available in real mode"
        );
    }
}
