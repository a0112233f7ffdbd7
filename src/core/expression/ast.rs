use crate::core::expression::bindings::Bindings;
use crate::core::expression::errors::EvaluationFault;
use crate::core::expression::functions::Function;
use crate::core::expression::value::Value;
use num_complex::Complex64;
use std::f64::consts::{E, PI};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Negate,
    Plus,
    Not,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    Identifier(String),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        function: Function,
        args: Vec<Node>,
    },
}

/// Named constants. A binding of the same name shadows them.
pub(crate) fn constant(name: &str) -> Option<Value> {
    match name {
        "i" => Some(Value::Complex(Complex64::new(0.0, 1.0))),
        "pi" => Some(Value::Real(PI)),
        "e" => Some(Value::Real(E)),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

impl Node {
    pub(crate) fn evaluate(&self, bindings: &Bindings<'_>) -> Result<Value, EvaluationFault> {
        match self {
            Self::Number(n) => Ok(Value::Real(*n)),
            Self::Identifier(name) => bindings
                .get(name)
                .or_else(|| constant(name))
                .ok_or_else(|| EvaluationFault::UnboundVariable { name: name.clone() }),
            Self::Unary { op, operand } => {
                let value = operand.evaluate(bindings)?;
                match op {
                    UnaryOp::Negate => value.negate(),
                    UnaryOp::Plus => {
                        value.as_complex("unary plus")?;
                        Ok(value)
                    }
                    UnaryOp::Not => Ok(Value::Bool(!value.as_bool("not")?)),
                }
            }
            Self::Binary { op, lhs, rhs } => match op {
                BinaryOp::And => {
                    if !lhs.evaluate(bindings)?.as_bool("and")? {
                        return Ok(Value::Bool(false));
                    }
                    Ok(Value::Bool(rhs.evaluate(bindings)?.as_bool("and")?))
                }
                BinaryOp::Or => {
                    if lhs.evaluate(bindings)?.as_bool("or")? {
                        return Ok(Value::Bool(true));
                    }
                    Ok(Value::Bool(rhs.evaluate(bindings)?.as_bool("or")?))
                }
                _ => {
                    let a = lhs.evaluate(bindings)?;
                    let b = rhs.evaluate(bindings)?;
                    match op {
                        BinaryOp::Add => a.add(b),
                        BinaryOp::Sub => a.sub(b),
                        BinaryOp::Mul => a.mul(b),
                        BinaryOp::Div => a.div(b),
                        BinaryOp::Pow => a.pow(b),
                        BinaryOp::Less => a.less_than(b),
                        BinaryOp::LessEqual => a.less_equal(b),
                        BinaryOp::Greater => a.greater_than(b),
                        BinaryOp::GreaterEqual => a.greater_equal(b),
                        BinaryOp::Equal => a.equals(b),
                        BinaryOp::NotEqual => {
                            Ok(Value::Bool(!a.equals(b)?.as_bool("comparison")?))
                        }
                        BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
                    }
                }
            },
            Self::Call { function, args } => {
                // Arity never exceeds two, so arguments live on the stack.
                let mut values = [Value::Real(0.0); 2];
                for (slot, arg) in values.iter_mut().zip(args) {
                    *slot = arg.evaluate(bindings)?;
                }
                function.apply(&values[..args.len()])
            }
        }
    }

    /// Pushes every identifier that is not a constant onto `out`.
    pub(crate) fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Self::Number(_) => {}
            Self::Identifier(name) => {
                if constant(name).is_none() {
                    out.push(name.clone());
                }
            }
            Self::Unary { operand, .. } => operand.collect_variables(out),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
            Self::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(out);
                }
            }
        }
    }
}
