use crate::analysis::MediaKind;
use thiserror::Error;

/// Everything that can end a dispatch without a result.
///
/// The `Display` form is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Could not capture from camera")]
    CaptureUnavailable,

    #[error("No file selected")]
    NoFileSelected,

    #[error("{0}")]
    TransportFailure(String),

    /// The service answered with its own `error` message.
    #[error("{0}")]
    ServiceError(String),

    #[error("Malformed response from service: {0}")]
    MalformedResponse(String),

    /// A failure that carried no description of its own.
    #[error("Analysis failed")]
    UnknownFailure,
}

impl From<TransportError> for DispatchError {
    fn from(err: TransportError) -> Self {
        if err.0.trim().is_empty() {
            DispatchError::UnknownFailure
        } else {
            DispatchError::TransportFailure(err.0)
        }
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::MalformedResponse(err.to_string())
    }
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Files can only be picked in image or video mode")]
    NotFileMode,

    #[error("{name} is not a supported {expected} file")]
    KindMismatch { name: String, expected: MediaKind },
}
