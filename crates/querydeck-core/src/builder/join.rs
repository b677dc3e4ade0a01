use super::{optional_name, table_listing, tabular_outcome};
use crate::{
    catalog::{CatalogName, JoinRequest, TableList},
    error::{BuilderError, CatalogError},
    lifecycle::{RequestLifecycle, RequestTracker, Ticket},
    result::ExecutionResult,
    slot::{ColumnFetch, FetchOutcome, ListingKind, SelectionSlot, SlotId},
    sql,
};
use derive_more::Display;
use std::time::Duration;
use tracing::info;

const JOIN_LISTINGS: [ListingKind; 2] = [ListingKind::Columns, ListingKind::JoinColumns];

///
/// JoinSide
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum JoinSide {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

impl JoinSide {
    const fn slot_id(self) -> SlotId {
        match self {
            Self::Left => SlotId::Left,
            Self::Right => SlotId::Right,
        }
    }
}

///
/// JoinSlot
///

#[derive(Clone, Debug)]
struct JoinSlot {
    slot: SelectionSlot,
    column: Option<CatalogName>,
}

impl JoinSlot {
    const fn new(side: JoinSide) -> Self {
        Self {
            slot: SelectionSlot::new(side.slot_id()),
            column: None,
        }
    }
}

///
/// JoinBuilder
///
/// Two-table inner equi-join on exactly one column pair. Each side is an
/// independent selection slot; their listings may load concurrently.
///

#[derive(Clone, Debug)]
pub struct JoinBuilder {
    database: String,
    tables: TableList,
    left: JoinSlot,
    right: JoinSlot,
    run: RequestTracker<ExecutionResult>,
}

impl JoinBuilder {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            tables: TableList::new(),
            left: JoinSlot::new(JoinSide::Left),
            right: JoinSlot::new(JoinSide::Right),
            run: RequestTracker::new(),
        }
    }

    const fn side(&self, side: JoinSide) -> &JoinSlot {
        match side {
            JoinSide::Left => &self.left,
            JoinSide::Right => &self.right,
        }
    }

    const fn side_mut(&mut self, side: JoinSide) -> &mut JoinSlot {
        match side {
            JoinSide::Left => &mut self.left,
            JoinSide::Right => &mut self.right,
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
    pub const fn slot(&self, side: JoinSide) -> &SelectionSlot {
        &self.side(side).slot
    }

    #[must_use]
    pub const fn table(&self, side: JoinSide) -> Option<&CatalogName> {
        self.side(side).slot.table()
    }

    #[must_use]
    pub const fn join_column(&self, side: JoinSide) -> Option<&CatalogName> {
        self.side(side).column.as_ref()
    }

    #[must_use]
    pub const fn lifecycle(&self) -> &RequestLifecycle<ExecutionResult> {
        self.run.state()
    }

    /// Duration of the last completed submission; cleared on resubmit.
    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.run.elapsed()
    }

    // ------------------------------------------------------------------
    // Catalog selection
    // ------------------------------------------------------------------

    pub fn apply_tables(&mut self, outcome: Result<Vec<String>, CatalogError>) {
        self.tables = table_listing(outcome);
    }

    /// Choose one side's table, clearing that side's join column and
    /// dropping any run, in flight or settled.
    /// Returns the column and join-column fetches to issue.
    pub fn select_table(&mut self, side: JoinSide, name: &str) -> Vec<ColumnFetch> {
        self.run.abandon();

        let entry = self.side_mut(side);
        entry.column = None;

        entry.slot.select_table(optional_name(name), &JOIN_LISTINGS)
    }

    pub fn apply_columns(
        &mut self,
        fetch: &ColumnFetch,
        outcome: Result<Vec<String>, CatalogError>,
    ) -> FetchOutcome {
        let entry = match fetch.slot {
            SlotId::Left => &mut self.left,
            SlotId::Right => &mut self.right,
            SlotId::Main => return FetchOutcome::Stale,
        };

        entry.slot.apply(fetch, outcome)
    }

    /// Choose one side's join column; an empty name clears it.
    pub fn select_column(&mut self, side: JoinSide, name: &str) -> Result<(), BuilderError> {
        let entry = self.side_mut(side);
        entry.column = if name.is_empty() {
            None
        } else {
            Some(entry.slot.join_column(name)?)
        };

        Ok(())
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// SQL preview; empty until all four fields are set.
    #[must_use]
    pub fn query_text(&self) -> String {
        match self.fields() {
            Some((left, left_column, right, right_column)) => {
                sql::join_text(left, left_column, right, right_column)
            }
            None => String::new(),
        }
    }

    #[must_use]
    pub fn can_run(&self) -> bool {
        self.run.state().can_submit() && self.fields().is_some()
    }

    pub fn request(&self) -> Result<JoinRequest, BuilderError> {
        let (left, left_column, right, right_column) =
            self.fields().ok_or(BuilderError::JoinIncomplete)?;

        Ok(JoinRequest {
            left_table: left.to_string(),
            database: self.database.clone(),
            right_table: right.to_string(),
            left_join_column: left_column.to_string(),
            right_join_column: right_column.to_string(),
        })
    }

    fn fields(&self) -> Option<(&CatalogName, &CatalogName, &CatalogName, &CatalogName)> {
        Some((
            self.left.slot.table()?,
            self.left.column.as_ref()?,
            self.right.slot.table()?,
            self.right.column.as_ref()?,
        ))
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    pub fn begin_run(&mut self) -> Result<(Ticket, JoinRequest), BuilderError> {
        let request = self.request()?;
        let ticket = self.run.begin()?;

        info!(
            builder = "join",
            %ticket,
            left = %request.left_table,
            right = %request.right_table,
            "submitting join"
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

        self.run.finish(ticket, tabular_outcome("join", outcome))?;
        info!(builder = "join", %ticket, elapsed = ?self.run.elapsed(), "join settled");

        Ok(())
    }
}
