//! Rendering-independent query construction for a remote relational store.
//!
//! ## Crate layout
//! - `catalog`: names, listings, wire payloads and the `Catalog` collaborator.
//! - `slot`: table/column selection with stale-response discarding.
//! - `predicate`: AND-only predicate lists keyed by stable ids.
//! - `sql`: SQL preview generation.
//! - `lifecycle`: one-in-flight request tracking.
//! - `result`: execution results and tabular shape checks.
//! - `builder`: the projection, join and free-form builders.
//! - `session`: synchronous driver wiring builders to a catalog.

pub mod builder;
pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod predicate;
pub mod result;
pub mod session;
pub mod slot;
pub mod sql;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Builder vocabulary only; errors and drivers are imported explicitly.
///

pub mod prelude {
    pub use crate::{
        builder::{FreeformExecutor, JoinBuilder, JoinSide, ProjectionBuilder},
        catalog::{CatalogName, ColumnSet, TableList},
        lifecycle::RequestLifecycle,
        predicate::{CompareOp, PredicateEdit, PredicateId},
        result::{ExecutionResult, TabularResult},
    };
}
