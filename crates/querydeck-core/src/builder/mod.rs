//! The three query builders.
//!
//! Each builder is an explicit state record mutated only through named
//! transitions. I/O never happens here: transitions that need the catalog
//! hand back a ticket or fetch descriptor, and the caller feeds the
//! collaborator's answer to the matching `apply_*`/`finish_*` transition.

mod freeform;
mod join;
mod projection;

#[cfg(test)]
mod tests;

pub use freeform::FreeformExecutor;
pub use join::{JoinBuilder, JoinSide};
pub use projection::{ColumnSelection, ProjectionBuilder, ProjectionPhase};

use crate::{
    catalog::{CatalogName, TableList},
    error::{CatalogError, ErrorClass},
    result::ExecutionResult,
};
use tracing::{debug, warn};

// Interpret the table listing fetched when a builder is mounted.
fn table_listing(outcome: Result<Vec<String>, CatalogError>) -> TableList {
    match outcome {
        Ok(raw) => {
            let tables = TableList::from_raw(raw);
            debug!(count = tables.len(), "tables loaded");
            tables
        }
        Err(err) => {
            warn!(class = %ErrorClass::CatalogFetch, error = %err, "table listing failed");
            TableList::new()
        }
    }
}

// Empty input means "no table".
fn optional_name(name: &str) -> Option<CatalogName> {
    CatalogName::new(name).ok()
}

// Settle a tabular execution outcome into lifecycle terms.
fn tabular_outcome(
    builder: &'static str,
    outcome: Result<serde_json::Value, CatalogError>,
) -> Result<ExecutionResult, String> {
    match outcome {
        Ok(body) => Ok(ExecutionResult::from_tabular_json(body)),
        Err(err) => {
            warn!(class = %ErrorClass::Execution, builder, error = %err, "execution failed");
            Err(format!("query failed: {err}"))
        }
    }
}
