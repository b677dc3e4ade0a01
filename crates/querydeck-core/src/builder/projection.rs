use super::{optional_name, table_listing, tabular_outcome};
use crate::{
    catalog::{CatalogName, ColumnSet, SelectRequest, TableList},
    error::{BuilderError, CatalogError},
    lifecycle::{RequestLifecycle, RequestTracker, Ticket},
    predicate::{Predicate, PredicateEdit, PredicateId, PredicateList},
    result::ExecutionResult,
    slot::{ColumnFetch, FetchOutcome, ListingKind, SelectionSlot, SlotId},
    sql::{self, ColumnList, WILDCARD},
};
use std::time::Duration;
use tracing::info;

///
/// ColumnSelection
///
/// Chosen columns in selection order, plus the all-columns flag.
/// While the flag is set the named list is kept but ignored.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnSelection {
    wildcard: bool,
    named: Vec<CatalogName>,
}

impl ColumnSelection {
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    #[must_use]
    pub fn named(&self) -> &[CatalogName] {
        &self.named
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.wildcard && self.named.is_empty()
    }

    #[must_use]
    pub fn as_column_list(&self) -> ColumnList<'_> {
        if self.wildcard {
            ColumnList::All
        } else {
            ColumnList::Named(&self.named)
        }
    }

    /// Columns the execute endpoint receives: the wildcard is expanded into
    /// the full listing.
    #[must_use]
    pub fn expand(&self, all: &ColumnSet) -> Vec<String> {
        if self.wildcard {
            all.to_strings()
        } else {
            self.named.iter().map(|c| c.as_str().to_string()).collect()
        }
    }

    fn clear(&mut self) {
        self.wildcard = false;
        self.named.clear();
    }
}

///
/// ProjectionPhase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProjectionPhase {
    NoTableSelected,
    TableSelected,
    ColumnsLoaded,
    QueryReady,
    Executing,
    ResultReady,
    ExecutionFailed,
}

///
/// ProjectionBuilder
///
/// Single-table `SELECT` with column subset, AND-ed predicates and an
/// optional `DISTINCT`.
///

#[derive(Clone, Debug)]
pub struct ProjectionBuilder {
    database: String,
    tables: TableList,
    slot: SelectionSlot,
    selection: ColumnSelection,
    distinct: bool,
    predicates: PredicateList,
    run: RequestTracker<ExecutionResult>,
}

impl ProjectionBuilder {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            tables: TableList::new(),
            slot: SelectionSlot::new(SlotId::Main),
            selection: ColumnSelection::default(),
            distinct: false,
            predicates: PredicateList::new(),
            run: RequestTracker::new(),
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub const fn tables(&self) -> &TableList {
        &self.tables
    }

    #[must_use]
    pub const fn slot(&self) -> &SelectionSlot {
        &self.slot
    }

    #[must_use]
    pub const fn table(&self) -> Option<&CatalogName> {
        self.slot.table()
    }

    #[must_use]
    pub const fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    #[must_use]
    pub const fn predicates(&self) -> &PredicateList {
        &self.predicates
    }

    #[must_use]
    pub const fn lifecycle(&self) -> &RequestLifecycle<ExecutionResult> {
        self.run.state()
    }

    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.run.elapsed()
    }

    #[must_use]
    pub fn phase(&self) -> ProjectionPhase {
        match self.run.state() {
            RequestLifecycle::Loading(_) => return ProjectionPhase::Executing,
            RequestLifecycle::Succeeded(_) => return ProjectionPhase::ResultReady,
            RequestLifecycle::Failed(_) => return ProjectionPhase::ExecutionFailed,
            RequestLifecycle::Idle => {}
        }

        if self.slot.table().is_none() {
            ProjectionPhase::NoTableSelected
        } else if self.slot.is_loading() || self.slot.columns().is_empty() {
            ProjectionPhase::TableSelected
        } else if self.selection.is_empty() {
            ProjectionPhase::ColumnsLoaded
        } else {
            ProjectionPhase::QueryReady
        }
    }

    // ------------------------------------------------------------------
    // Catalog selection
    // ------------------------------------------------------------------

    pub fn apply_tables(&mut self, outcome: Result<Vec<String>, CatalogError>) {
        self.tables = table_listing(outcome);
    }

    /// Choose the table; an empty name clears it.
    ///
    /// Column choices, predicates and any run belong to the old table and
    /// are dropped; a run still in flight is orphaned. The distinct flag
    /// survives.
    pub fn select_table(&mut self, name: &str) -> Option<ColumnFetch> {
        self.selection.clear();
        self.predicates.clear();
        self.run.abandon();

        self.slot
            .select_table(optional_name(name), &[ListingKind::Columns])
            .pop()
    }

    pub fn apply_columns(
        &mut self,
        fetch: &ColumnFetch,
        outcome: Result<Vec<String>, CatalogError>,
    ) -> FetchOutcome {
        self.slot.apply(fetch, outcome)
    }

    /// Add a column to the selection. `*` selects all columns.
    /// Re-selecting is a no-op.
    pub fn select_column(&mut self, name: &str) -> Result<(), BuilderError> {
        if name == WILDCARD {
            self.require_columns(name)?;
            self.selection.wildcard = true;
            return Ok(());
        }

        let column = self.slot.column(name)?;
        if !self.selection.named.contains(&column) {
            self.selection.named.push(column);
        }

        Ok(())
    }

    pub fn deselect_column(&mut self, name: &str) {
        if name == WILDCARD {
            self.selection.wildcard = false;
        } else {
            self.selection.named.retain(|c| c != name);
        }
    }

    /// Replace the whole selection. Either every name is accepted or the
    /// selection is left unchanged.
    pub fn set_columns<I, S>(&mut self, names: I) -> Result<(), BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = ColumnSelection::default();
        for name in names {
            let name = name.as_ref();
            if name == WILDCARD {
                self.require_columns(name)?;
                next.wildcard = true;
                continue;
            }

            let column = self.slot.column(name)?;
            if !next.named.contains(&column) {
                next.named.push(column);
            }
        }

        self.selection = next;
        Ok(())
    }

    pub const fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    fn require_columns(&self, name: &str) -> Result<(), BuilderError> {
        let table = self.slot.table().ok_or(BuilderError::TableUnset)?;
        if self.slot.columns().is_empty() {
            return Err(BuilderError::UnknownColumn {
                table: table.to_string(),
                column: name.to_string(),
            });
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    pub fn add_predicate(&mut self) -> PredicateId {
        self.predicates.add()
    }

    /// Apply a single-field edit. A column edit must name a column of the
    /// selected table.
    pub fn update_predicate(
        &mut self,
        id: PredicateId,
        edit: PredicateEdit,
    ) -> Result<(), BuilderError> {
        let edit = match edit {
            PredicateEdit::Column(Some(column)) => {
                PredicateEdit::Column(Some(self.slot.column(column.as_str())?))
            }
            other => other,
        };

        self.predicates.update(id, edit)
    }

    pub fn update_predicate_at(
        &mut self,
        index: usize,
        edit: PredicateEdit,
    ) -> Result<(), BuilderError> {
        let id = self.id_at(index)?;
        self.update_predicate(id, edit)
    }

    pub fn remove_predicate(&mut self, id: PredicateId) -> Result<Predicate, BuilderError> {
        self.predicates.remove(id)
    }

    pub fn remove_predicate_at(&mut self, index: usize) -> Result<Predicate, BuilderError> {
        self.predicates.remove_at(index)
    }

    fn id_at(&self, index: usize) -> Result<PredicateId, BuilderError> {
        self.predicates
            .id_at(index)
            .ok_or(BuilderError::PredicateIndex {
                index,
                len: self.predicates.len(),
            })
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// SQL preview; empty until a table and at least one column are chosen.
    #[must_use]
    pub fn query_text(&self) -> String {
        match self.slot.table() {
            Some(table) if !self.selection.is_empty() => sql::select_text(
                table,
                self.selection.as_column_list(),
                self.distinct,
                self.predicates.iter(),
            ),
            _ => String::new(),
        }
    }

    /// Submit control state.
    #[must_use]
    pub fn can_run(&self) -> bool {
        self.run.state().can_submit() && self.request().is_ok()
    }

    /// The payload `begin_run` would submit.
    pub fn request(&self) -> Result<SelectRequest, BuilderError> {
        let table = self.slot.table().ok_or(BuilderError::TableUnset)?;
        if self.selection.is_empty() {
            return Err(BuilderError::NoColumnsSelected);
        }

        Ok(SelectRequest {
            columns: self.selection.expand(self.slot.columns()),
            condition: sql::where_body(self.predicates.iter()),
            table: table.to_string(),
            database: self.database.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    pub fn begin_run(&mut self) -> Result<(Ticket, SelectRequest), BuilderError> {
        let request = self.request()?;
        let ticket = self.run.begin()?;

        info!(
            builder = "projection",
            %ticket,
            table = %request.table,
            columns = request.columns.len(),
            "submitting select"
        );

        Ok((ticket, request))
    }

    pub fn finish_run(
        &mut self,
        ticket: Ticket,
        outcome: Result<serde_json::Value, CatalogError>,
    ) -> Result<(), BuilderError> {
        if !matches!(self.run.state(), RequestLifecycle::Loading(current) if *current == ticket) {
            return Err(BuilderError::StaleTicket);
        }

        self.run.finish(ticket, tabular_outcome("projection", outcome))?;
        info!(builder = "projection", %ticket, elapsed = ?self.run.elapsed(), "select settled");

        Ok(())
    }
}
