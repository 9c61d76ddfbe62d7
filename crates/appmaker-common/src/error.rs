//! Error types shared across the appmaker workspace
//!
//! Errors carry the component they relate to so a failed compilation of a
//! large app can be traced back to the offending declaration.

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for appmaker operations
#[derive(Debug, Error)]
pub enum Error {
    /// A component declaration could not be compiled
    #[error("validation error for {component}: {message}")]
    Validation {
        /// Name of the component with the invalid declaration
        component: String,
        /// Description of what's invalid
        message: String,
        /// The offending field (e.g., "based_on", "flavor", "kind")
        field: Option<String>,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The format or resource kind being serialized (if known)
        kind: Option<String>,
    },
}

impl Error {
    /// Create a validation error with the given message
    ///
    /// For simple validation errors without component context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            component: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with component context and field name
    pub fn validation_for_field(
        component: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            component: component.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a serialization error for a specific format or kind
    pub fn serialization_for(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Get the component name associated with this error, if any
    pub fn component(&self) -> Option<&str> {
        match self {
            Error::Validation { component, .. } if component != UNKNOWN_CONTEXT => {
                Some(component)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization_for("json", err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::serialization_for("yaml", err.to_string())
    }
}
