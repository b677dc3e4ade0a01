//! AND-only predicate lists.
//!
//! Predicates are addressed by a [`PredicateId`] assigned at creation, so
//! removing one never re-targets edits aimed at another. Positional access is
//! still offered for callers that think in rows.

#[cfg(test)]
mod tests;

use crate::{catalog::CatalogName, error::BuilderError};
use derive_more::Display;
use std::str::FromStr;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum CompareOp {
    #[default]
    #[display("=")]
    Eq,
    #[display("<")]
    Lt,
    #[display(">")]
    Gt,
}

impl CompareOp {
    pub const ALL: [Self; 3] = [Self::Eq, Self::Lt, Self::Gt];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Gt => ">",
        }
    }
}

impl FromStr for CompareOp {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| BuilderError::UnknownOperator(s.to_string()))
    }
}

///
/// PredicateId
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct PredicateId(u64);

impl PredicateId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// Predicate
///
/// `column operator value`. The column stays unset until chosen; an unset
/// predicate takes no part in generated text.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Predicate {
    id: PredicateId,
    pub column: Option<CatalogName>,
    pub op: CompareOp,
    pub value: String,
}

impl Predicate {
    #[must_use]
    pub const fn id(&self) -> PredicateId {
        self.id
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.column.is_some()
    }
}

///
/// PredicateEdit
///
/// Single-field update applied by `PredicateList::update`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PredicateEdit {
    Column(Option<CatalogName>),
    Op(CompareOp),
    Value(String),
}

///
/// PredicateList
///

#[derive(Clone, Debug, Default)]
pub struct PredicateList {
    items: Vec<Predicate>,
    issued: u64,
}

impl PredicateList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            issued: 0,
        }
    }

    /// Append a blank predicate (`<unset> = ''`).
    pub fn add(&mut self) -> PredicateId {
        self.push(None, CompareOp::default(), String::new())
    }

    /// Append a fully specified predicate.
    pub fn push(
        &mut self,
        column: Option<CatalogName>,
        op: CompareOp,
        value: impl Into<String>,
    ) -> PredicateId {
        self.issued += 1;
        let id = PredicateId(self.issued);
        self.items.push(Predicate {
            id,
            column,
            op,
            value: value.into(),
        });

        id
    }

    pub fn update(&mut self, id: PredicateId, edit: PredicateEdit) -> Result<(), BuilderError> {
        let predicate = self
            .items
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BuilderError::UnknownPredicate(id))?;

        match edit {
            PredicateEdit::Column(column) => predicate.column = column,
            PredicateEdit::Op(op) => predicate.op = op,
            PredicateEdit::Value(value) => predicate.value = value,
        }

        Ok(())
    }

    pub fn remove(&mut self, id: PredicateId) -> Result<Predicate, BuilderError> {
        let index = self
            .position(id)
            .ok_or(BuilderError::UnknownPredicate(id))?;

        Ok(self.items.remove(index))
    }

    /// Remove by position; later predicates shift up by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Predicate, BuilderError> {
        if index >= self.items.len() {
            return Err(BuilderError::PredicateIndex {
                index,
                len: self.items.len(),
            });
        }

        Ok(self.items.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: PredicateId) -> Option<&Predicate> {
        self.items.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn position(&self, id: PredicateId) -> Option<usize> {
        self.items.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<PredicateId> {
        self.items.get(index).map(Predicate::id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.items.iter()
    }

    /// Predicates with a chosen column, in list order.
    pub fn complete(&self) -> impl Iterator<Item = &Predicate> {
        self.items.iter().filter(|p| p.is_complete())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every predicate. Ids are never reused.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
