use thiserror::Error;

/// Result type for inspector operations.
pub type InspectorResult<T> = Result<T, InspectorError>;

/// Error outputs from the settings inspector.
///
/// Errors come in two tiers. [`InspectorError::InvalidInput`] and
/// [`InspectorError::InvalidRules`] are recoverable and surface as a disabled
/// action or a rejected configuration. [`InspectorError::InvariantViolation`]
/// means an internally constructed value could not be represented; callers
/// are expected to abort on it (see [`InspectorError::is_fatal`]).
#[derive(Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error))]
#[cfg_attr(feature = "ffi", uniffi(flat_error))]
pub enum InspectorError {
    /// The presented input is not valid for the requested operation.
    #[error("invalid_input: {0}")]
    InvalidInput(String),
    /// A classification rule document could not be parsed.
    #[error("invalid_rules: {0}")]
    InvalidRules(String),
    /// A value that must always be representable could not be serialized.
    #[error("invariant_violation: {0}")]
    InvariantViolation(String),
}

impl InspectorError {
    /// Returns `true` for errors that indicate a programming-contract violation.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
