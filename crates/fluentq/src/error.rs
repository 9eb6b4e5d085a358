//! Error types for fluentq

use thiserror::Error;

use crate::value::ValueKind;

/// Result type alias for fluentq operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for template compilation and completion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// `%%name` where `name` is not a known formatting directive
    #[error("Unknown directive '%%{name}' at byte {position}")]
    UnknownDirective { name: String, position: usize },

    /// Fewer arguments than directive occurrences.
    ///
    /// `position` is the byte offset of the directive's `%%` in the compiled
    /// template, or in the text segment holding it when raised by
    /// [`Processor::process_formatted`](crate::Processor::process_formatted).
    #[error("Missing argument #{index} for directive at byte {position}")]
    MissingArgument { index: usize, position: usize },

    /// A value reached the dispatcher fallback while raw pass-through is disabled
    #[error("Unsupported value kind: {kind:?}")]
    UnsupportedValueKind { kind: ValueKind },

    /// The driver does not provide a required capability
    #[error("Driver capability missing: {0}")]
    DriverCapabilityMissing(&'static str),

    /// A directive argument could not be coerced to the directive's type
    #[error("Invalid argument for '%%{directive}': {message}")]
    InvalidArgument {
        directive: &'static str,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QueryError {
    /// Create an unknown directive error
    pub fn unknown_directive(name: impl Into<String>, position: usize) -> Self {
        Self::UnknownDirective {
            name: name.into(),
            position,
        }
    }

    /// Create an invalid argument error for a directive
    pub fn invalid_argument(directive: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            directive,
            message: message.into(),
        }
    }

    /// Check if this is an unknown directive error
    pub fn is_unknown_directive(&self) -> bool {
        matches!(self, Self::UnknownDirective { .. })
    }

    /// Check if this is a missing argument error
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }

    /// Check if this is a missing driver capability error
    pub fn is_capability_missing(&self) -> bool {
        matches!(self, Self::DriverCapabilityMissing(_))
    }
}
