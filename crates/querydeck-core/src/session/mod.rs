//! Synchronous driver pairing builders with a catalog.
//!
//! Each method performs exactly the collaborator calls one user action
//! needs and feeds the answers back through the builder's transitions.


use crate::{
    builder::{FreeformExecutor, JoinBuilder, JoinSide, ProjectionBuilder},
    catalog::{Catalog, ColumnSet, TableList},
    error::{BuilderError, CatalogError},
    slot::{ColumnFetch, FetchOutcome, ListingKind},
};
use tracing::debug;

///
/// Session
///

pub struct Session<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    database: String,
}

impl<'a, C: Catalog + ?Sized> Session<'a, C> {
    pub fn new(catalog: &'a C, database: impl Into<String>) -> Self {
        Self {
            catalog,
            database: database.into(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a C {
        self.catalog
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    // ------------------------------------------------------------------
    // Catalog discovery
    // ------------------------------------------------------------------

    pub fn list_tables(&self) -> Result<TableList, CatalogError> {
        self.catalog.list_tables().map(TableList::from_raw)
    }

    pub fn list_columns(&self, table: &str, kind: ListingKind) -> Result<ColumnSet, CatalogError> {
        let raw = match kind {
            ListingKind::Columns => self.catalog.list_columns(table)?,
            ListingKind::JoinColumns => self.catalog.list_join_columns(table)?,
        };

        Ok(ColumnSet::from_raw(raw))
    }

    fn fetch(&self, fetch: &ColumnFetch) -> Result<Vec<String>, CatalogError> {
        debug!(slot = %fetch.slot, table = %fetch.table, kind = %fetch.kind, "fetching listing");

        match fetch.kind {
            ListingKind::Columns => self.catalog.list_columns(fetch.table.as_str()),
            ListingKind::JoinColumns => self.catalog.list_join_columns(fetch.table.as_str()),
        }
    }

    // ------------------------------------------------------------------
    // Mounting
    // ------------------------------------------------------------------

    /// Fresh projection builder with the table listing loaded.
    pub fn mount_projection(&self) -> ProjectionBuilder {
        let mut builder = ProjectionBuilder::new(self.database.clone());
        builder.apply_tables(self.catalog.list_tables());

        builder
    }

    /// Fresh join builder with the table listing loaded.
    pub fn mount_join(&self) -> JoinBuilder {
        let mut builder = JoinBuilder::new(self.database.clone());
        builder.apply_tables(self.catalog.list_tables());

        builder
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select the projection table and load its columns.
    /// `None` when the table was cleared and nothing was fetched.
    pub fn select_projection_table(
        &self,
        builder: &mut ProjectionBuilder,
        name: &str,
    ) -> Option<FetchOutcome> {
        let fetch = builder.select_table(name)?;
        let outcome = self.fetch(&fetch);

        Some(builder.apply_columns(&fetch, outcome))
    }

    /// Select one join side's table and load both of its listings.
    pub fn select_join_table(
        &self,
        builder: &mut JoinBuilder,
        side: JoinSide,
        name: &str,
    ) -> Vec<FetchOutcome> {
        builder
            .select_table(side, name)
            .into_iter()
            .map(|fetch| {
                let outcome = self.fetch(&fetch);
                builder.apply_columns(&fetch, outcome)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Submit the projection. Collaborator failures settle into the
    /// builder's lifecycle; only rejected transitions are returned.
    pub fn run_projection(&self, builder: &mut ProjectionBuilder) -> Result<(), BuilderError> {
        let (ticket, request) = builder.begin_run()?;
        let outcome = self.catalog.execute_select(&request);

        builder.finish_run(ticket, outcome)
    }

    pub fn run_join(&self, builder: &mut JoinBuilder) -> Result<(), BuilderError> {
        let (ticket, request) = builder.begin_run()?;
        let outcome = self.catalog.execute_join(&request);

        builder.finish_run(ticket, outcome)
    }

    pub fn run_freeform(&self, executor: &mut FreeformExecutor) -> Result<(), BuilderError> {
        let (ticket, text) = executor.begin_execute()?;
        let outcome = self.catalog.execute_sql(&text);

        executor.finish_execute(ticket, outcome)
    }

    pub fn trigger_bulk_insert(&self, executor: &mut FreeformExecutor) -> Result<(), BuilderError> {
        let ticket = executor.begin_bulk_insert()?;
        let outcome = self.catalog.bulk_insert();

        executor.finish_bulk_insert(ticket, outcome)
    }
}
