use crate::predicate::PredicateId;
use derive_more::Display;
use std::fmt;
use thiserror::Error as ThisError;

///
/// CatalogError
///
/// Failure reported by the catalog/execution collaborator.
/// Builders convert these into in-state messages; they never escape a
/// builder transition.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{kind}: {message}")]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Construct a connection/IO failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Transport, message)
    }

    /// Construct a request that exceeded its deadline.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Timeout, message)
    }

    /// Construct a non-success status response.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Status(code), message)
    }

    /// Construct a body that could not be decoded into the expected shape.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Decode, message)
    }

    /// True when the collaborator answered, but not with success.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self.kind, CatalogErrorKind::Status(_))
    }
}

///
/// CatalogErrorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogErrorKind {
    Transport,
    Timeout,
    Status(u16),
    Decode,
}

impl fmt::Display for CatalogErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("transport"),
            Self::Timeout => f.write_str("timeout"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

///
/// BuilderError
///
/// A rejected builder transition. Rejection never mutates builder state.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BuilderError {
    #[error("a request is already executing")]
    Busy,

    #[error("no table selected")]
    TableUnset,

    #[error("no columns selected")]
    NoColumnsSelected,

    #[error("join requires both tables and both join columns")]
    JoinIncomplete,

    #[error("column '{column}' is not a column of table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("no predicate with id {0}")]
    UnknownPredicate(PredicateId),

    #[error("predicate index {index} out of range (len {len})")]
    PredicateIndex { index: usize, len: usize },

    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),

    #[error("catalog names must not be empty")]
    EmptyName,

    #[error("query text is empty")]
    EmptyQuery,

    #[error("response does not belong to the current request")]
    StaleTicket,
}

///
/// ErrorClass
///
/// Log-facing classification of the failures a builder absorbs.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    CatalogFetch,
    Execution,
    MalformedResult,
    InvalidInput,
}
