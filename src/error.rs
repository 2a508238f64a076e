//! Error taxonomy shared by the loader, the aggregation engine, and the
//! record store.
//!
//! Library functions return [`BookingError`] so callers can branch on the
//! [`ErrorKind`]. The command layer wraps these in `anyhow` with context and
//! maps the kind back to a process exit status.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Data,
    BadRequest,
    NotFound,
    Unauthorized,
    Io,
}

#[derive(Debug, Error)]
pub enum BookingError {
    /// A derived computation is malformed or undefined for its input.
    #[error("data error: {0}")]
    Data(String),

    /// A caller-supplied filter or search criterion is invalid.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A lookup that expects at least one result found nothing.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl BookingError {
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Data(_) => ErrorKind::Data,
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Io(_) | Self::Csv(_) => ErrorKind::Io,
        }
    }
}

impl ErrorKind {
    /// Process exit status used by the command-line front end.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::BadRequest => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::Unauthorized => 4,
            ErrorKind::Data => 5,
            ErrorKind::Io => 1,
        }
    }
}

pub type BookingResult<T> = std::result::Result<T, BookingError>;

/// Finds the first [`BookingError`] in an `anyhow` chain and returns its
/// exit status, falling back to 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<BookingError>())
        .map(|booking| booking.kind().exit_code())
        .unwrap_or(1)
}
