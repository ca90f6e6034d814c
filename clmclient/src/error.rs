//! Error types for the loyalty client
//!
//! Two families of failures exist:
//!
//! - [`ServiceError`]: failures of the remote service as seen by the caller,
//!   carrying a fixed `(status code, error code, message)` triple and an
//!   optional internal diagnostic. Connection errors, timeouts, non-200
//!   statuses and unusable response bodies all surface as the
//!   [`ConnectionFailure`] kind.
//! - [`Error::InvalidArgument`]: local precondition violations, raised before
//!   any network interaction. They must not be retried.

use std::fmt;

/// Result type alias for loyalty client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Static description of a service failure kind
///
/// Every kind must provide a non-empty message and non-zero codes; this is
/// checked when the kind is instantiated through [`ServiceError::of`].
pub trait ServiceFailure {
    /// Transport-style status code (e.g. 503)
    const STATUS_CODE: u16;
    /// Provider-style numeric error code
    const ERROR_CODE: u32;
    /// User-facing message
    const MESSAGE: &'static str;
}

/// The bonus program could not be reached or answered with an unusable
/// response
#[derive(Debug, Clone, Copy)]
pub struct ConnectionFailure;

impl ServiceFailure for ConnectionFailure {
    const STATUS_CODE: u16 = 503;
    const ERROR_CODE: u32 = 50301;
    const MESSAGE: &'static str = "Bonus program is unavailable";
}

/// A classified failure of the loyalty service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    message: String,
    error_code: u32,
    status_code: u16,
    internal_message: Option<String>,
}

impl ServiceError {
    /// Creates an error for an ad-hoc failure kind
    ///
    /// # Panics
    ///
    /// Panics if `message` is empty or either code is zero.
    pub fn new(message: impl Into<String>, error_code: u32, status_code: u16) -> Self {
        let message = message.into();
        assert!(!message.is_empty(), "Message not implemented!");
        assert!(error_code != 0, "Error code not implemented!");
        assert!(status_code != 0, "Status code not implemented!");

        Self {
            message,
            error_code,
            status_code,
            internal_message: None,
        }
    }

    /// Creates an error of kind `K`
    pub fn of<K: ServiceFailure>() -> Self {
        const {
            assert!(!K::MESSAGE.is_empty(), "Message not implemented!");
            assert!(K::ERROR_CODE != 0, "Error code not implemented!");
            assert!(K::STATUS_CODE != 0, "Status code not implemented!");
        }

        Self {
            message: K::MESSAGE.to_string(),
            error_code: K::ERROR_CODE,
            status_code: K::STATUS_CODE,
            internal_message: None,
        }
    }

    /// Creates a [`ConnectionFailure`] carrying an internal diagnostic
    pub fn connection(internal_message: impl Into<String>) -> Self {
        Self::of::<ConnectionFailure>().with_internal_message(internal_message)
    }

    /// Attaches an internal diagnostic (never shown to end users)
    pub fn with_internal_message(mut self, internal_message: impl Into<String>) -> Self {
        let internal_message = internal_message.into();
        if !internal_message.is_empty() {
            self.internal_message = Some(internal_message);
        }
        self
    }

    /// User-facing message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Provider-style error code
    pub fn error_code(&self) -> u32 {
        self.error_code
    }

    /// Transport-style status code
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Internal diagnostic, for logs and telemetry only
    pub fn internal_message(&self) -> Option<&str> {
        self.internal_message.as_deref()
    }

    /// Returns true if this error is of kind `K`
    pub fn is<K: ServiceFailure>(&self) -> bool {
        self.status_code == K::STATUS_CODE && self.error_code == K::ERROR_CODE
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.status_code, self.error_code, self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " {{{}}}", internal)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Errors that can occur when using the loyalty client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service failed (see [`ServiceError`])
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A local precondition was violated; no request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A domain object could not be turned into its wire form
    #[error("Wire serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request envelope could not be rendered
    #[error("Envelope rendering failed: {0}")]
    Envelope(#[from] clmsoap::SoapError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns the service error, if this is one
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true for [`ConnectionFailure`] service errors
    pub fn is_connection_error(&self) -> bool {
        self.service_error()
            .is_some_and(|e| e.is::<ConnectionFailure>())
    }

    /// Returns true for local precondition violations
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}
