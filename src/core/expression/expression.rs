use crate::core::expression::ast::Node;
use crate::core::expression::bindings::Bindings;
use crate::core::expression::errors::{EvaluationFault, ParseError};
use crate::core::expression::parser::parse;
use crate::core::expression::value::Value;
use std::fmt;
use std::str::FromStr;

/// A compiled formula.
///
/// Compiled once, then evaluated any number of times. Evaluation only reads
/// the tree, so one `Expression` can be shared across threads and evaluated
/// concurrently without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
    variables: Vec<String>,
}

impl Expression {
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        let root = parse(source)?;

        let mut variables = Vec::new();
        root.collect_variables(&mut variables);
        variables.sort();
        variables.dedup();

        Ok(Self {
            source: source.to_string(),
            root,
            variables,
        })
    }

    pub fn evaluate(&self, bindings: &Bindings<'_>) -> Result<Value, EvaluationFault> {
        self.root.evaluate(bindings)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Free variables, sorted and without duplicates. Constants are excluded.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn eval(source: &str, bindings: &Bindings<'_>) -> Result<Value, EvaluationFault> {
        Expression::compile(source).unwrap().evaluate(bindings)
    }

    #[test]
    fn test_mandelbrot_step() {
        let z = Complex64::new(1.0, 1.0);
        let c = Complex64::new(0.5, -0.25);
        let bindings = Bindings::new().with("z", z).with("c", c);

        let result = eval("z^2 + c", &bindings).unwrap();

        assert_eq!(result, Value::Complex(z * z + c));
    }

    #[test]
    fn test_real_mode_step() {
        let bindings = Bindings::new()
            .with("x", 2.0)
            .with("y", 3.0)
            .with("cx", 0.5)
            .with("cy", -1.0);

        assert_eq!(eval("x^2 - y^2 + cx", &bindings), Ok(Value::Real(-4.5)));
        assert_eq!(eval("2*x*y + cy", &bindings), Ok(Value::Real(11.0)));
    }

    #[test]
    fn test_escape_condition_returns_bool() {
        let bindings = Bindings::new().with("z", Complex64::new(3.0, 4.0));

        assert_eq!(eval("abs(z) > 2", &bindings), Ok(Value::Bool(true)));
        assert_eq!(eval("abs(z) > 100", &bindings), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_imaginary_unit_constant() {
        let result = eval("i * i", &Bindings::new()).unwrap();

        assert_eq!(result, Value::Complex(Complex64::new(-1.0, 0.0)));
    }

    #[test]
    fn test_binding_shadows_constant() {
        let bindings = Bindings::new().with("e", 2.0);

        assert_eq!(eval("e + 1", &bindings), Ok(Value::Real(3.0)));
    }

    #[test]
    fn test_logical_operators_short_circuit() {
        // `y` is unbound, so evaluating it would fault.
        let bindings = Bindings::new().with("x", 1.0);

        assert_eq!(eval("x > 0 or y > 0", &bindings), Ok(Value::Bool(true)));
        assert_eq!(eval("x < 0 and y > 0", &bindings), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_unbound_variable_is_fault() {
        let bindings = Bindings::new().with("z", 1.0);

        assert_eq!(
            eval("z + q", &bindings),
            Err(EvaluationFault::UnboundVariable {
                name: "q".to_string()
            })
        );
    }

    #[test]
    fn test_variables_exclude_constants_and_functions() {
        let expression = Expression::compile("abs(z * i) + pi * c + z").unwrap();

        assert_eq!(expression.variables(), &["c".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let expression = Expression::compile("sin(z) * exp(c) - z^3").unwrap();
        let bindings = Bindings::new()
            .with("z", Complex64::new(0.3, 0.7))
            .with("c", Complex64::new(-0.1, 0.2));

        let first = expression.evaluate(&bindings).unwrap();
        let second = expression.evaluate(&bindings).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_from_str_and_display_round_trip_source() {
        let expression: Expression = "x^2 + y^2 > 10000".parse().unwrap();

        assert_eq!(expression.to_string(), "x^2 + y^2 > 10000");
        assert_eq!(expression.source(), "x^2 + y^2 > 10000");
    }
}
