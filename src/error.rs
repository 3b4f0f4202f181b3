use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, NnError>;

/// Errors raised when building, compiling, training or persisting a model.
#[derive(Debug)]
pub enum NnError {
    /// Two shapes that must agree do not.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An argument is invalid for semantic reasons (zero units, empty data...).
    InvalidInput(&'static str),
    /// `fit`/`evaluate` was called before `compile`.
    NotCompiled,
    /// A component was requested by a name that is not registered.
    UnknownName { kind: &'static str, name: String },
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for NnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            NnError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            NnError::NotCompiled => {
                write!(f, "the model must be compiled before training or evaluation")
            }
            NnError::UnknownName { kind, name } => write!(f, "unknown {kind}: {name:?}"),
            NnError::Io(e) => write!(f, "io error: {e}"),
            NnError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for NnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NnError::Io(e) => Some(e),
            NnError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for NnError {
    fn from(e: io::Error) -> Self {
        NnError::Io(e)
    }
}

impl From<serde_json::Error> for NnError {
    fn from(e: serde_json::Error) -> Self {
        NnError::Json(e)
    }
}
