//! Domain and persistence error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type returned by repository ports.
pub type StoreResult<T> = Result<T, StoreError>;

/// Domain-level error.
///
/// Services only surface these four outcomes (plus `Unauthorized` for the
/// credential boundary). Expected absences are modelled as `Option`, not as
/// `NotFound`; the caller decides whether absence is an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input (e.g. an unparseable date). The operation was not attempted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller identity could not be established.
    #[error("unauthorized")]
    Unauthorized,

    /// Persistence fault or unexpected failure. The message is for operators only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error should be hidden from callers and logged instead.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Error reported by a repository implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("unique violation: {0}")]
    UniqueViolation(String),

    /// A foreign-key constraint rejected the write.
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Any other backend failure (connection, protocol, decoding).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    /// Default translation: everything a store reports is an internal fault.
    ///
    /// Services that can give a constraint a meaning (e.g. duplicate email)
    /// match on the `StoreError` before falling back to this conversion.
    fn from(err: StoreError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<validator::ValidationErrors> for DomainError {
    /// One message per failed rule, sorted so the text is stable.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|err| match &err.message {
                        Some(message) => message.to_string(),
                        None if err.code == crate::validation::BLANK => format!("{field} must not be empty"),
                        None => format!("{field} is invalid"),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        messages.sort();
        messages.dedup();
        DomainError::Validation(messages.join("; "))
    }
}
