//! Error types for sqltrace.

use thiserror::Error;

/// The main error type for statement-trace operations.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The statement identity could not be resolved to an operation
    /// descriptor, so no print decision can be made for it.
    #[error("Policy resolution failed for '{identity}': {message}")]
    PolicyResolution { identity: String, message: String },

    /// A parameter slot names a property the structured parameter object
    /// does not have. The statement itself would have failed to bind, so
    /// hitting this during logging points at a mismatched slot list.
    #[error("Parameter property '{property}' not found on the parameter object")]
    MissingProperty { property: String },
}

impl TraceError {
    /// Create a policy resolution error for the given identity.
    pub fn policy(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PolicyResolution {
            identity: identity.into(),
            message: message.into(),
        }
    }

    /// Create a missing-property error.
    pub fn missing_property(property: impl Into<String>) -> Self {
        Self::MissingProperty {
            property: property.into(),
        }
    }
}

/// Result type alias for statement-trace operations.
pub type TraceResult<T> = Result<T, TraceError>;
