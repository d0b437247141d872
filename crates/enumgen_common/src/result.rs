//! Common result and error types for the generator.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error (a bug in the generator),
/// not a problem with the user's enum declarations. Problems with user input
/// are reported as diagnostics and the affected item is skipped.
pub type EnumgenResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in the generator, not a user input problem.
#[derive(Debug, thiserror::Error)]
#[error("internal generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
