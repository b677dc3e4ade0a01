//! Table/column selection slots.
//!
//! A slot owns one table choice and the column listings fetched for it.
//! Every table change bumps the slot generation; a fetch completion carrying
//! an older generation (or another table) is stale and is dropped without
//! touching the slot.


use crate::{
    catalog::{CatalogName, ColumnSet},
    error::{BuilderError, CatalogError, ErrorClass},
};
use derive_more::Display;
use tracing::{debug, warn};

///
/// SlotId
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum SlotId {
    #[display("main")]
    Main,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

///
/// ListingKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ListingKind {
    #[display("columns")]
    Columns,
    #[display("join columns")]
    JoinColumns,
}

///
/// ColumnFetch
///
/// A column listing the slot is waiting for. Hand it back to `apply`
/// together with the collaborator's answer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnFetch {
    pub slot: SlotId,
    pub kind: ListingKind,
    pub table: CatalogName,
    generation: u64,
}

///
/// FetchOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// The slot moved on; nothing changed.
    Stale,
}

///
/// SelectionSlot
///

#[derive(Clone, Debug)]
pub struct SelectionSlot {
    id: SlotId,
    table: Option<CatalogName>,
    columns: ColumnSet,
    join_columns: ColumnSet,
    loading: bool,
    join_loading: bool,
    generation: u64,
    last_error: Option<String>,
}

impl SelectionSlot {
    #[must_use]
    pub const fn new(id: SlotId) -> Self {
        Self {
            id,
            table: None,
            columns: ColumnSet::new(),
            join_columns: ColumnSet::new(),
            loading: false,
            join_loading: false,
            generation: 0,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    #[must_use]
    pub const fn table(&self) -> Option<&CatalogName> {
        self.table.as_ref()
    }

    /// Columns of the selected table; empty while unset or loading.
    #[must_use]
    pub const fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub const fn join_columns(&self) -> &ColumnSet {
        &self.join_columns
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading || self.join_loading
    }

    /// Most recent listing failure for the current table.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Replace the table choice, invalidating everything derived from the
    /// previous one. Returns the listings to fetch; none when unset.
    pub fn select_table(
        &mut self,
        table: Option<CatalogName>,
        kinds: &[ListingKind],
    ) -> Vec<ColumnFetch> {
        self.generation += 1;
        self.table = table;
        self.columns = ColumnSet::new();
        self.join_columns = ColumnSet::new();
        self.loading = false;
        self.join_loading = false;
        self.last_error = None;

        let Some(table) = &self.table else {
            debug!(slot = %self.id, "table cleared");
            return Vec::new();
        };

        debug!(slot = %self.id, %table, generation = self.generation, "table selected");

        kinds
            .iter()
            .map(|&kind| {
                match kind {
                    ListingKind::Columns => self.loading = true,
                    ListingKind::JoinColumns => self.join_loading = true,
                }

                ColumnFetch {
                    slot: self.id,
                    kind,
                    table: table.clone(),
                    generation: self.generation,
                }
            })
            .collect()
    }

    /// Settle a listing fetch.
    pub fn apply(
        &mut self,
        fetch: &ColumnFetch,
        outcome: Result<Vec<String>, CatalogError>,
    ) -> FetchOutcome {
        if !self.is_current(fetch) {
            debug!(
                slot = %self.id,
                table = %fetch.table,
                kind = %fetch.kind,
                "discarding stale listing"
            );
            return FetchOutcome::Stale;
        }

        let (listing, loading) = match fetch.kind {
            ListingKind::Columns => (&mut self.columns, &mut self.loading),
            ListingKind::JoinColumns => (&mut self.join_columns, &mut self.join_loading),
        };
        *loading = false;

        match outcome {
            Ok(raw) => {
                *listing = ColumnSet::from_raw(raw);
                debug!(
                    slot = %self.id,
                    table = %fetch.table,
                    kind = %fetch.kind,
                    count = listing.len(),
                    "listing loaded"
                );

                FetchOutcome::Applied
            }
            Err(err) => {
                *listing = ColumnSet::new();
                warn!(
                    class = %ErrorClass::CatalogFetch,
                    slot = %self.id,
                    table = %fetch.table,
                    kind = %fetch.kind,
                    error = %err,
                    "listing fetch failed"
                );
                self.last_error = Some(format!(
                    "could not list {} for table {}: {err}",
                    fetch.kind, fetch.table
                ));

                FetchOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Column resolution
    // ------------------------------------------------------------------

    /// Resolve `name` against the column listing.
    pub fn column(&self, name: &str) -> Result<CatalogName, BuilderError> {
        self.resolve(name, false)
    }

    /// Resolve `name` against the column or join-column listing.
    pub fn join_column(&self, name: &str) -> Result<CatalogName, BuilderError> {
        self.resolve(name, true)
    }

    fn resolve(&self, name: &str, allow_join: bool) -> Result<CatalogName, BuilderError> {
        let table = self.table.as_ref().ok_or(BuilderError::TableUnset)?;

        self.columns
            .get(name)
            .or_else(|| allow_join.then(|| self.join_columns.get(name)).flatten())
            .cloned()
            .ok_or_else(|| BuilderError::UnknownColumn {
                table: table.to_string(),
                column: name.to_string(),
            })
    }

    fn is_current(&self, fetch: &ColumnFetch) -> bool {
        fetch.slot == self.id
            && fetch.generation == self.generation
            && self.table.as_ref() == Some(&fetch.table)
    }
}
