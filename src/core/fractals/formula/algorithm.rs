use crate::core::actions::render_job::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::{PlanePoint, Point};
use crate::core::expression::{Bindings, EvaluationFault, Expression, Value};
use crate::core::fractals::formula::params::{DrawParameters, IterationFormula};
use crate::core::util::pixel_to_plane_coords::pixel_to_plane_coords;
use num_complex::Complex64;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationResult {
    /// Number of updates applied before the escape test held.
    Escaped(u32),
    DidNotEscape,
}

pub type EscapeOutcome = Result<IterationResult, EvaluationFault>;

/// Iterates the configured map from `start` until it escapes or the
/// iteration cap is reached.
///
/// The state starts at the point itself. Before each update the escape
/// condition is tested; a state that is no longer finite counts as escaped
/// whatever the condition says.
pub fn compute_escape_iterations(params: &DrawParameters, start: PlanePoint) -> EscapeOutcome {
    let escape = params.escape_condition();
    let max_iterations = params.max_iterations();

    match params.iteration_formula() {
        IterationFormula::Complex { z: update } => {
            let c = Complex64::new(start.x, start.y);
            let mut z = c;

            for iteration in 0..max_iterations {
                let z_value = Value::Complex(z);
                if !z_value.is_finite()
                    || has_escaped(escape, &Bindings::new().with("z", z_value))?
                {
                    return Ok(IterationResult::Escaped(iteration));
                }

                let bindings = Bindings::new().with("z", z).with("c", c);
                z = update.evaluate(&bindings)?.as_complex("z iteration")?;
            }
        }
        IterationFormula::Real {
            x: update_x,
            y: update_y,
        } => {
            let (cx, cy) = (start.x, start.y);
            let (mut x, mut y) = (cx, cy);

            for iteration in 0..max_iterations {
                if !(x.is_finite() && y.is_finite())
                    || has_escaped(escape, &Bindings::new().with("x", x).with("y", y))?
                {
                    return Ok(IterationResult::Escaped(iteration));
                }

                let bindings = Bindings::new()
                    .with("x", x)
                    .with("y", y)
                    .with("cx", cx)
                    .with("cy", cy);
                let next_x = update_x.evaluate(&bindings)?.as_real("x iteration")?;
                let next_y = update_y.evaluate(&bindings)?.as_real("y iteration")?;
                x = next_x;
                y = next_y;
            }
        }
    }

    Ok(IterationResult::DidNotEscape)
}

/// Booleans are taken as is. Real results are true when non-zero; NaN is
/// false.
fn has_escaped(escape: &Expression, bindings: &Bindings<'_>) -> Result<bool, EvaluationFault> {
    match escape.evaluate(bindings)? {
        Value::Bool(escaped) => Ok(escaped),
        other => other
            .as_real("escape condition")
            .map(|r| r != 0.0 && !r.is_nan()),
    }
}

/// Escape-time iteration of a formula over one raster.
#[derive(Debug, Clone)]
pub struct FormulaAlgorithm {
    params: Arc<DrawParameters>,
    width: u32,
    height: u32,
}

impl FormulaAlgorithm {
    #[must_use]
    pub fn new(params: Arc<DrawParameters>, width: u32, height: u32) -> Self {
        Self {
            params,
            width,
            height,
        }
    }
}

impl FractalAlgorithm for FormulaAlgorithm {
    type Success = IterationResult;
    type Failure = EvaluationFault;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let start = pixel_to_plane_coords(
            pixel,
            self.width,
            self.height,
            self.params.center(),
            self.params.scale(),
        );

        compute_escape_iterations(&self.params, start)
    }
}
