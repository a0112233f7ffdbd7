use crate::core::expression::errors::EvaluationFault;
use crate::core::expression::value::Value;
use num_complex::Complex64;

/// Built-in functions callable from formulas.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Function {
    Abs,
    Sqrt,
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Re,
    Im,
    Conj,
    Arg,
    Norm,
    Pow,
}

impl Function {
    pub const ALL: &'static [Self] = &[
        Self::Abs,
        Self::Sqrt,
        Self::Exp,
        Self::Log,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Re,
        Self::Im,
        Self::Conj,
        Self::Arg,
        Self::Norm,
        Self::Pow,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Re => "re",
            Self::Im => "im",
            Self::Conj => "conj",
            Self::Arg => "arg",
            Self::Norm => "norm",
            Self::Pow => "pow",
        }
    }

    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Applies the function. The argument count has been checked at compile time.
    pub(crate) fn apply(self, args: &[Value]) -> Result<Value, EvaluationFault> {
        if self == Self::Pow {
            return args[0].pow(args[1]);
        }

        let arg = args[0];
        let operation = self.name();

        match arg {
            Value::Real(r) => Ok(self.apply_real(r)),
            Value::Complex(c) => Ok(self.apply_complex(c)),
            Value::Bool(_) => Err(EvaluationFault::TypeMismatch {
                operation,
                expected: "a number",
                found: arg.type_name(),
            }),
        }
    }

    fn apply_real(self, r: f64) -> Value {
        match self {
            Self::Abs => Value::Real(r.abs()),
            Self::Sqrt if r < 0.0 => Value::Complex(Complex64::new(r, 0.0).sqrt()),
            Self::Sqrt => Value::Real(r.sqrt()),
            Self::Exp => Value::Real(r.exp()),
            Self::Log if r < 0.0 => Value::Complex(Complex64::new(r, 0.0).ln()),
            Self::Log => Value::Real(r.ln()),
            Self::Sin => Value::Real(r.sin()),
            Self::Cos => Value::Real(r.cos()),
            Self::Tan => Value::Real(r.tan()),
            Self::Sinh => Value::Real(r.sinh()),
            Self::Cosh => Value::Real(r.cosh()),
            Self::Tanh => Value::Real(r.tanh()),
            Self::Re | Self::Conj => Value::Real(r),
            Self::Im => Value::Real(0.0),
            Self::Arg => Value::Real(0.0_f64.atan2(r)),
            Self::Norm => Value::Real(r * r),
            Self::Pow => unreachable!("pow is binary"),
        }
    }

    fn apply_complex(self, c: Complex64) -> Value {
        match self {
            Self::Abs => Value::Real(c.norm()),
            Self::Sqrt => Value::Complex(c.sqrt()),
            Self::Exp => Value::Complex(c.exp()),
            Self::Log => Value::Complex(c.ln()),
            Self::Sin => Value::Complex(c.sin()),
            Self::Cos => Value::Complex(c.cos()),
            Self::Tan => Value::Complex(c.tan()),
            Self::Sinh => Value::Complex(c.sinh()),
            Self::Cosh => Value::Complex(c.cosh()),
            Self::Tanh => Value::Complex(c.tanh()),
            Self::Re => Value::Real(c.re),
            Self::Im => Value::Real(c.im),
            Self::Conj => Value::Complex(c.conj()),
            Self::Arg => Value::Real(c.arg()),
            Self::Norm => Value::Real(c.norm_sqr()),
            Self::Pow => unreachable!("pow is binary"),
        }
    }
}
