//! Error taxonomy shared by every stage of the detector.
//!
//! - [`LsdError::InvalidArgument`]: malformed inputs, detected eagerly at the
//!   start of the offending operation.
//! - [`LsdError::InvalidOperation`]: a region or rectangle reached a
//!   mathematically degenerate state; the current seed must be abandoned.
//! - [`LsdError::Decode`] / [`LsdError::Io`]: collaborator failures (codec and
//!   file helpers).

/// Errors returned by the line segment detector and its helpers.
#[derive(thiserror::Error, Debug)]
pub enum LsdError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LsdError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LsdError>;
