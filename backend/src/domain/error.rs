//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and plain-text bodies; nothing here knows about actix.

use std::fmt;

use crate::middleware::trace::TraceId;

/// Failure category used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed (bad JSON body, non-integer identifier).
    InvalidRequest,
    /// The requested user does not exist.
    NotFound,
    /// The store failed or another unexpected fault occurred.
    InternalError,
}

/// Domain error carrying a category and a human-readable message.
///
/// The message is already in its client-facing form: a short prefix naming
/// the failed operation followed by the underlying cause.
///
/// # Examples
/// ```
/// use user_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("User not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the
    /// response can be correlated with the request logs.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Create an error whose message is `"{prefix}: {cause}"`.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{Error, ErrorCode};
    ///
    /// let err = Error::with_cause(ErrorCode::InternalError, "Failed to create user", "db down");
    /// assert_eq!(err.message(), "Failed to create user: db down");
    /// ```
    pub fn with_cause(code: ErrorCode, prefix: &str, cause: impl fmt::Display) -> Self {
        Self::new(code, format!("{prefix}: {cause}"))
    }

    /// Stable category of the failure.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a trace identifier explicitly.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
