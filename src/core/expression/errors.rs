use thiserror::Error;

/// A formula that could not be compiled. Positions are byte offsets into the
/// formula source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { position: usize, text: String },

    #[error("expected {expected} but found {found} at position {position}")]
    UnexpectedToken {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { position: usize, name: String },

    #[error("function '{name}' takes {expected} argument(s) but was given {found} at position {position}")]
    WrongArity {
        position: usize,
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("formula nests deeper than {limit} levels at position {position}")]
    TooDeep { position: usize, limit: usize },

    #[error("formula has more than {limit} operators at position {position}")]
    TooComplex { position: usize, limit: usize },
}

/// A compiled formula failed while being evaluated for one set of bindings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationFault {
    #[error("undefined symbol {name}")]
    UnboundVariable { name: String },

    #[error("{operation} expects {expected} but got {found}")]
    TypeMismatch {
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
