use crate::core::expression::errors::EvaluationFault;
use num_complex::Complex64;
use std::fmt;

/// A value produced or consumed by a compiled formula.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    Real(f64),
    Complex(Complex64),
    Bool(bool),
}

impl Value {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Real(_) => "a real number",
            Self::Complex(_) => "a complex number",
            Self::Bool(_) => "a boolean",
        }
    }

    /// True when every numeric component is finite. Booleans are always finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Real(r) => r.is_finite(),
            Self::Complex(c) => c.re.is_finite() && c.im.is_finite(),
            Self::Bool(_) => true,
        }
    }

    pub fn as_complex(&self, operation: &'static str) -> Result<Complex64, EvaluationFault> {
        match *self {
            Self::Real(r) => Ok(Complex64::new(r, 0.0)),
            Self::Complex(c) => Ok(c),
            Self::Bool(_) => Err(self.mismatch(operation, "a number")),
        }
    }

    /// Complex values count as real only when their imaginary part is zero.
    pub fn as_real(&self, operation: &'static str) -> Result<f64, EvaluationFault> {
        match *self {
            Self::Real(r) => Ok(r),
            Self::Complex(c) if c.im == 0.0 => Ok(c.re),
            _ => Err(self.mismatch(operation, "a real number")),
        }
    }

    pub fn as_bool(&self, operation: &'static str) -> Result<bool, EvaluationFault> {
        match *self {
            Self::Bool(b) => Ok(b),
            _ => Err(self.mismatch(operation, "a boolean")),
        }
    }

    pub fn negate(self) -> Result<Self, EvaluationFault> {
        match self {
            Self::Real(r) => Ok(Self::Real(-r)),
            Self::Complex(c) => Ok(Self::Complex(-c)),
            Self::Bool(_) => Err(self.mismatch("negation", "a number")),
        }
    }

    pub fn add(self, rhs: Self) -> Result<Self, EvaluationFault> {
        numeric(self, rhs, "addition", |a, b| a + b, |a, b| a + b)
    }

    pub fn sub(self, rhs: Self) -> Result<Self, EvaluationFault> {
        numeric(self, rhs, "subtraction", |a, b| a - b, |a, b| a - b)
    }

    pub fn mul(self, rhs: Self) -> Result<Self, EvaluationFault> {
        numeric(self, rhs, "multiplication", |a, b| a * b, |a, b| a * b)
    }

    pub fn div(self, rhs: Self) -> Result<Self, EvaluationFault> {
        numeric(self, rhs, "division", |a, b| a / b, |a, b| a / b)
    }

    /// Integer real exponents multiply out, so `z^2` is exactly `z*z`.
    /// Negative real bases with fractional exponents promote to complex.
    pub fn pow(self, exponent: Self) -> Result<Self, EvaluationFault> {
        const OPERATION: &str = "exponentiation";

        match (self, exponent) {
            (Self::Real(base), Self::Real(exp)) => match integer_exponent(exp) {
                Some(n) => Ok(Self::Real(base.powi(n))),
                None if base < 0.0 => Ok(Self::Complex(Complex64::new(base, 0.0).powf(exp))),
                None => Ok(Self::Real(base.powf(exp))),
            },
            (Self::Complex(base), Self::Real(exp)) => match integer_exponent(exp) {
                Some(n) => Ok(Self::Complex(base.powi(n))),
                None => Ok(Self::Complex(base.powf(exp))),
            },
            (base, exp) => {
                let base = base.as_complex(OPERATION)?;
                let exp = exp.as_complex(OPERATION)?;
                Ok(Self::Complex(base.powc(exp)))
            }
        }
    }

    pub fn less_than(self, rhs: Self) -> Result<Self, EvaluationFault> {
        ordering(self, rhs, |a, b| a < b)
    }

    pub fn less_equal(self, rhs: Self) -> Result<Self, EvaluationFault> {
        ordering(self, rhs, |a, b| a <= b)
    }

    pub fn greater_than(self, rhs: Self) -> Result<Self, EvaluationFault> {
        ordering(self, rhs, |a, b| a > b)
    }

    pub fn greater_equal(self, rhs: Self) -> Result<Self, EvaluationFault> {
        ordering(self, rhs, |a, b| a >= b)
    }

    pub fn equals(self, rhs: Self) -> Result<Self, EvaluationFault> {
        match (self, rhs) {
            (Self::Bool(a), Self::Bool(b)) => Ok(Self::Bool(a == b)),
            (a, b) => Ok(Self::Bool(
                a.as_complex("comparison")? == b.as_complex("comparison")?,
            )),
        }
    }

    fn mismatch(&self, operation: &'static str, expected: &'static str) -> EvaluationFault {
        EvaluationFault::TypeMismatch {
            operation,
            expected,
            found: self.type_name(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Complex64> for Value {
    fn from(value: Complex64) -> Self {
        Self::Complex(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn integer_exponent(exp: f64) -> Option<i32> {
    if exp.fract() == 0.0 && exp.abs() <= f64::from(i32::MAX) {
        Some(exp as i32)
    } else {
        None
    }
}

fn numeric(
    lhs: Value,
    rhs: Value,
    operation: &'static str,
    real: impl Fn(f64, f64) -> f64,
    complex: impl Fn(Complex64, Complex64) -> Complex64,
) -> Result<Value, EvaluationFault> {
    match (lhs, rhs) {
        (Value::Real(a), Value::Real(b)) => Ok(Value::Real(real(a, b))),
        (a, b) => Ok(Value::Complex(complex(
            a.as_complex(operation)?,
            b.as_complex(operation)?,
        ))),
    }
}

fn ordering(
    lhs: Value,
    rhs: Value,
    compare: impl Fn(f64, f64) -> bool,
) -> Result<Value, EvaluationFault> {
    let a = lhs.as_real("comparison")?;
    let b = rhs.as_real("comparison")?;

    Ok(Value::Bool(compare(a, b)))
}
