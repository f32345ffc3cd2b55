//! Common error types.

use thiserror::Error;

/// Main error type for the custom select widget.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("Element has no options to select from")]
    NoOptions,

    #[error("Node is not an element")]
    NotAnElement,

    #[error("Node not found in document")]
    NodeNotFound,

    #[error("No option with value {0:?}")]
    UnknownValue(String),

    #[error("Unknown widget")]
    UnknownWidget,

    #[error("Element is already enhanced")]
    AlreadyEnhanced,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type SelectResult<T> = Result<T, SelectError>;

impl SelectError {
    pub fn unknown_value(value: impl Into<String>) -> Self {
        Self::UnknownValue(value.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SelectError::unknown_value("kiwi").to_string(),
            "No option with value \"kiwi\""
        );
        assert_eq!(
            SelectError::NoOptions.to_string(),
            "Element has no options to select from"
        );
    }
}
