//! Error types for the protocol layer.
//!
//! The taxonomy separates four kinds of failure, and callers that build
//! retry policies must keep them apart:
//!
//! | Error | Meaning | Safe to retry? |
//! |-------|---------|----------------|
//! | [`TransportError`] | the request may never have reached the service | yes |
//! | [`ClientError::ProtocolMismatch`] | the response does not correlate with the request | no; reconcile first |
//! | [`ClientError::InvalidSession`] | the session is not `Active` | after re-authenticating |
//! | [`RemoteError`] (inside an operation result) | the service processed and rejected one operation | no; blind retry can duplicate a financial transaction |
//!
//! Remote business errors are *data* on an [`crate::OperationResult`],
//! never a `ClientError`: a batch whose envelope succeeded returns `Ok`
//! even when every operation inside it was rejected.

use thiserror::Error;

use meridian_wire::WireError;

use crate::session::SessionStatus;

/// An error descriptor returned by the remote service: a code plus a
/// human-readable message. Carried on operation results and on
/// envelope-level rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Transport-level failure. The request may or may not have reached the
/// service; retrying at a policy layer is safe because the service never
/// parsed a request it did not receive.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection-level failure reported by a non-HTTP transport.
    #[error("connection failure: {0}")]
    Connection(String),

    /// The service answered outside the 2xx range.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// Error raised by the HTTP client.
    #[cfg(feature = "http")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The primary error type for session and batch calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A value could not be encoded or decoded under the wire format, or a
    /// response element was structurally unusable. Aborts the enclosing
    /// call entirely.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The service rejected the supplied credentials. Terminal for the
    /// session instance being authenticated.
    #[error("authentication rejected: {}", format_remote_errors(.errors))]
    Authentication { errors: Vec<RemoteError> },

    /// A call was attempted against a session that is not `Active`.
    /// Create a new session and re-authenticate to continue.
    #[error("session is {status:?}, not Active")]
    InvalidSession { status: SessionStatus },

    /// Transport-level failure; zero operation results were produced.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response shape does not correlate with the request (result
    /// block count mismatch, missing outer status). The whole batch fails
    /// and no partial results are trusted: pairing results by best-effort
    /// order would corrupt financial data.
    #[error("response does not correlate with request: {message}")]
    ProtocolMismatch { message: String },

    /// The envelope itself was rejected (malformed request, envelope-level
    /// refusal other than an invalid ticket). Zero operation results.
    #[error("request rejected by the service: {}", format_remote_errors(.errors))]
    RequestRejected { errors: Vec<RemoteError> },

    /// `execute` was called with no operations.
    #[error("batch contains no operations")]
    EmptyBatch,

    /// The cancellation signal fired before the request was sent. No
    /// network effect occurred.
    #[error("call cancelled before the request was sent")]
    CancelledBeforeSend,

    /// The cancellation signal fired while the request was in flight.
    /// Whether the service processed the request is unknown; reconcile
    /// with a read operation rather than retrying blindly.
    #[error("call cancelled while awaiting the response; remote outcome unknown")]
    CancelledInFlight,
}

fn format_remote_errors(errors: &[RemoteError]) -> String {
    if errors.is_empty() {
        return "no error detail provided".to_string();
    }
    errors
        .iter()
        .map(RemoteError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for protocol-layer calls.
pub type Result<T> = std::result::Result<T, ClientError>;
