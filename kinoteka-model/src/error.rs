use std::fmt::{self, Display};

/// Errors produced by payload validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    MissingField(&'static str),
    InvalidField { field: &'static str, reason: String },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MissingField(field) => {
                write!(f, "missing field: {field}")
            }
            ModelError::InvalidField { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
