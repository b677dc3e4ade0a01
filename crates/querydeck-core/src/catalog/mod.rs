//! Catalog vocabulary and the collaborator boundary.
//!
//! Everything the builders know about the remote store arrives through the
//! [`Catalog`] trait. Names are opaque and case-sensitive; listings are
//! ordered, deduplicated and replaced wholesale on refetch.


use crate::error::{BuilderError, CatalogError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

///
/// CatalogName
///
/// Table or column identifier. Never empty once constructed.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CatalogName(String);

impl CatalogName {
    pub fn new(name: impl Into<String>) -> Result<Self, BuilderError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BuilderError::EmptyName);
        }

        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CatalogName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CatalogName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CatalogName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CatalogName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

///
/// NameList
///
/// Ordered, duplicate-free sequence of catalog names as last reported by the
/// collaborator. Empty until fetched.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NameList {
    names: Vec<CatalogName>,
}

/// Columns of one table.
pub type ColumnSet = NameList;

/// Tables known to the catalog.
pub type TableList = NameList;

impl NameList {
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Build a listing from raw collaborator output.
    ///
    /// Empty names are dropped and only the first occurrence of a repeated
    /// name is kept.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<CatalogName> = Vec::new();
        for name in raw {
            let Ok(name) = CatalogName::new(name) else {
                continue;
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }

        Self { names }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Return the listed name equal to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogName> {
        self.names.iter().find(|n| *n == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogName> {
        self.names.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CatalogName] {
        &self.names
    }

    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.names.iter().map(|n| n.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a NameList {
    type Item = &'a CatalogName;
    type IntoIter = std::slice::Iter<'a, CatalogName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

///
/// SelectRequest
///
/// Execution payload for a projection. `columns` is already expanded;
/// the endpoint does not understand wildcards.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SelectRequest {
    pub columns: Vec<String>,
    pub condition: String,
    pub table: String,
    pub database: String,
}

///
/// JoinRequest
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub left_table: String,
    pub database: String,
    pub right_table: String,
    pub left_join_column: String,
    pub right_join_column: String,
}

///
/// Catalog
///
/// Remote catalog and execution collaborator. One call per user action;
/// implementations must not retry.
///
/// Tabular executions return the raw JSON body; shape validation belongs
/// to the caller.
///

pub trait Catalog {
    fn list_tables(&self) -> Result<Vec<String>, CatalogError>;

    fn list_columns(&self, table: &str) -> Result<Vec<String>, CatalogError>;

    /// Columns usable as join keys. May be a subset of `list_columns`.
    fn list_join_columns(&self, table: &str) -> Result<Vec<String>, CatalogError>;

    /// Submit raw query text verbatim and return the response text.
    fn execute_sql(&self, sql: &str) -> Result<String, CatalogError>;

    fn execute_select(&self, request: &SelectRequest) -> Result<serde_json::Value, CatalogError>;

    fn execute_join(&self, request: &JoinRequest) -> Result<serde_json::Value, CatalogError>;

    /// Fire-and-forget bulk insert; only the acknowledgement is observed.
    fn bulk_insert(&self) -> Result<(), CatalogError>;
}
