
use crate::config::ConfigError;
use derive_more::Display;
use querydeck_core::error::{BuilderError, CatalogError, CatalogErrorKind};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<BuilderError> for Error {
    fn from(err: BuilderError) -> Self {
        let kind = match err {
            BuilderError::Busy => ErrorKind::Busy,
            BuilderError::StaleTicket => ErrorKind::Internal,
            _ => ErrorKind::Invalid,
        };

        Self::new(kind, ErrorOrigin::Builder, err.to_string())
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        let kind = match err.kind {
            CatalogErrorKind::Transport => ErrorKind::Unavailable,
            CatalogErrorKind::Timeout => ErrorKind::Timeout,
            CatalogErrorKind::Status(code) => ErrorKind::Rejected(code),
            CatalogErrorKind::Decode => ErrorKind::Malformed,
        };

        Self::new(kind, ErrorOrigin::Catalog, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Invalid, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Input or configuration the caller can fix.
    Invalid,

    /// A request is already in flight.
    Busy,

    /// The backend could not be reached.
    Unavailable,

    Timeout,

    /// The backend answered with a non-success status.
    Rejected(u16),

    /// The backend answered with an unexpected body.
    Malformed,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorOrigin {
    Builder,
    Catalog,
    Config,
}
