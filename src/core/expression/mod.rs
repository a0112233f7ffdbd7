//! Formula compiler and evaluator.
//!
//! Formulas are compiled once into an [`Expression`] tree and evaluated per
//! iteration against a small set of [`Bindings`]. Values are real, complex or
//! boolean; see [`Value`] for the promotion rules.

mod ast;
pub mod bindings;
pub mod errors;
#[allow(clippy::module_inception)]
pub mod expression;
pub mod functions;
mod lexer;
mod parser;
pub mod value;

pub use bindings::Bindings;
pub use errors::{EvaluationFault, ParseError};
pub use expression::Expression;
pub use value::Value;
