use crate::{
    error::{BuilderError, CatalogError, ErrorClass},
    lifecycle::{RequestLifecycle, RequestTracker, Ticket},
};
use std::time::Duration;
use tracing::{info, warn};

pub(crate) const STATUS_FAILURE: &str = "error executing the query";
pub(crate) const TRANSPORT_FAILURE: &str = "an error occurred while executing the query";
pub(crate) const BULK_INSERT_ACK: &str = "bulk insert initiated";

///
/// FreeformExecutor
///
/// User-authored query text, submitted verbatim. The bulk-insert trigger
/// shares the same lifecycle, so neither can start while the other runs.
///

#[derive(Clone, Debug, Default)]
pub struct FreeformExecutor {
    text: String,
    run: RequestTracker<String>,
}

impl FreeformExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub const fn lifecycle(&self) -> &RequestLifecycle<String> {
        self.run.state()
    }

    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.run.elapsed()
    }

    #[must_use]
    pub fn can_run(&self) -> bool {
        self.run.state().can_submit() && !self.text.trim().is_empty()
    }

    // ------------------------------------------------------------------
    // Query execution
    // ------------------------------------------------------------------

    pub fn begin_execute(&mut self) -> Result<(Ticket, String), BuilderError> {
        if self.text.trim().is_empty() {
            return Err(BuilderError::EmptyQuery);
        }
        let ticket = self.run.begin()?;
        info!(builder = "freeform", %ticket, "submitting query text");

        Ok((ticket, self.text.clone()))
    }

    /// Any failure collapses to one of two fixed messages.
    pub fn finish_execute(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, CatalogError>,
    ) -> Result<(), BuilderError> {
        let outcome = outcome.map_err(|err| {
            warn!(class = %ErrorClass::Execution, builder = "freeform", error = %err, "query failed");
            if err.is_status() {
                STATUS_FAILURE.to_string()
            } else {
                TRANSPORT_FAILURE.to_string()
            }
        });

        self.run.finish(ticket, outcome)
    }

    // ------------------------------------------------------------------
    // Bulk insert
    // ------------------------------------------------------------------

    pub fn begin_bulk_insert(&mut self) -> Result<Ticket, BuilderError> {
        let ticket = self.run.begin()?;
        info!(builder = "freeform", %ticket, "triggering bulk insert");

        Ok(ticket)
    }

    pub fn finish_bulk_insert(
        &mut self,
        ticket: Ticket,
        outcome: Result<(), CatalogError>,
    ) -> Result<(), BuilderError> {
        let outcome = outcome
            .map(|()| BULK_INSERT_ACK.to_string())
            .map_err(|err| {
                warn!(class = %ErrorClass::Execution, builder = "freeform", error = %err, "bulk insert failed");
                format!("bulk insert failed: {err}")
            });

        self.run.finish(ticket, outcome)
    }
}
