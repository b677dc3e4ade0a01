use crate::{
    catalog::{Catalog, JoinRequest, SelectRequest},
    error::CatalogError,
};
use serde_json::Value as JsonValue;
use std::{cell::RefCell, collections::BTreeMap};

///
/// Call
///
/// One recorded collaborator invocation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Call {
    ListTables,
    ListColumns(String),
    ListJoinColumns(String),
    ExecuteSql(String),
    ExecuteSelect(SelectRequest),
    ExecuteJoin(JoinRequest),
    BulkInsert,
}

///
/// ScriptedCatalog
///
/// In-memory catalog with canned answers and a call log.
///

#[derive(Default)]
pub(crate) struct ScriptedCatalog {
    pub(crate) tables: Vec<String>,
    pub(crate) columns: BTreeMap<String, Vec<String>>,
    pub(crate) join_columns: BTreeMap<String, Vec<String>>,
    pub(crate) sql_response: Option<Result<String, CatalogError>>,
    pub(crate) table_response: Option<Result<JsonValue, CatalogError>>,
    pub(crate) fail_listings: bool,
    pub(crate) fail_bulk_insert: bool,
    pub(crate) calls: RefCell<Vec<Call>>,
}

impl ScriptedCatalog {
    pub(crate) fn school() -> Self {
        let mut catalog = Self {
            tables: vec!["students".to_string(), "grades".to_string(), "teachers".to_string()],
            ..Self::default()
        };
        catalog.columns.insert("students".to_string(), strings(&["id", "name", "age"]));
        catalog.columns.insert("grades".to_string(), strings(&["student_id", "course", "grade"]));
        catalog.columns.insert("teachers".to_string(), strings(&["id", "name", "subject"]));
        catalog.join_columns.insert("students".to_string(), strings(&["id"]));
        catalog.join_columns.insert("grades".to_string(), strings(&["student_id"]));

        catalog
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn listing(
        &self,
        source: &BTreeMap<String, Vec<String>>,
        table: &str,
    ) -> Result<Vec<String>, CatalogError> {
        if self.fail_listings {
            return Err(CatalogError::transport("listing unavailable"));
        }

        source
            .get(table)
            .cloned()
            .ok_or_else(|| CatalogError::status(404, format!("unknown table {table}")))
    }
}

impl Catalog for ScriptedCatalog {
    fn list_tables(&self) -> Result<Vec<String>, CatalogError> {
        self.record(Call::ListTables);
        if self.fail_listings {
            return Err(CatalogError::transport("listing unavailable"));
        }

        Ok(self.tables.clone())
    }

    fn list_columns(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        self.record(Call::ListColumns(table.to_string()));
        self.listing(&self.columns, table)
    }

    fn list_join_columns(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        self.record(Call::ListJoinColumns(table.to_string()));
        self.listing(&self.join_columns, table)
    }

    fn execute_sql(&self, sql: &str) -> Result<String, CatalogError> {
        self.record(Call::ExecuteSql(sql.to_string()));
        self.sql_response
            .clone()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }

    fn execute_select(&self, request: &SelectRequest) -> Result<JsonValue, CatalogError> {
        self.record(Call::ExecuteSelect(request.clone()));
        self.table_response
            .clone()
            .unwrap_or_else(|| Ok(serde_json::json!({ "headers": [], "rows": [] })))
    }

    fn execute_join(&self, request: &JoinRequest) -> Result<JsonValue, CatalogError> {
        self.record(Call::ExecuteJoin(request.clone()));
        self.table_response
            .clone()
            .unwrap_or_else(|| Ok(serde_json::json!({ "headers": [], "rows": [] })))
    }

    fn bulk_insert(&self) -> Result<(), CatalogError> {
        self.record(Call::BulkInsert);
        if self.fail_bulk_insert {
            return Err(CatalogError::status(500, "insert failed"));
        }

        Ok(())
    }
}

pub(crate) fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}
