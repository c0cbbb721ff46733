use crate::reader::Location;
use thiserror::Error;

/// Grammar or tokenizer level error. Raised on an unexpected token, a failed `must_match`,
/// an unterminated construct, or any at-rule that is not allowed in strict mode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// Error message
    pub message: String,
    /// Location of the offending token
    pub location: Location,
}

impl SyntaxError {
    #[must_use]
    pub fn new(message: &str, location: Location) -> Self {
        Self {
            message: message.to_string(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

/// A property value that does not match the grammar of its property, or an unknown property.
/// These never abort a parse; they are attached to the property event instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub location: Location,
}

impl ValidationError {
    #[must_use]
    pub fn new(message: &str, location: Location) -> Self {
        Self {
            message: message.to_string(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

pub type CssResult<T> = Result<T, SyntaxError>;

pub type ValidationResult<T> = Result<T, ValidationError>;
