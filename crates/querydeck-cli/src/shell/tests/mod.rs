
use querydeck::core::{
    catalog::{Catalog, JoinRequest, SelectRequest},
    error::CatalogError,
};
use serde_json::{Value, json};
use std::cell::RefCell;

///
/// StubCatalog
///
/// Two-table school catalog. Records every submitted payload.
///

#[derive(Default)]
pub(super) struct StubCatalog {
    pub(super) fail_execution: bool,
    pub(super) submitted: RefCell<Vec<String>>,
}

impl StubCatalog {
    fn columns(table: &str) -> Result<Vec<String>, CatalogError> {
        let columns: &[&str] = match table {
            "students" => &["id", "name", "age"],
            "grades" => &["student_id", "course", "grade"],
            _ => return Err(CatalogError::status(404, format!("no table {table}"))),
        };

        Ok(columns.iter().map(ToString::to_string).collect())
    }

    fn answer(&self, submitted: String, body: Value) -> Result<Value, CatalogError> {
        self.submitted.borrow_mut().push(submitted);
        if self.fail_execution {
            return Err(CatalogError::status(500, "backend exploded"));
        }

        Ok(body)
    }
}

impl Catalog for StubCatalog {
    fn list_tables(&self) -> Result<Vec<String>, CatalogError> {
        Ok(vec!["students".to_string(), "grades".to_string()])
    }

    fn list_columns(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        Self::columns(table)
    }

    fn list_join_columns(&self, table: &str) -> Result<Vec<String>, CatalogError> {
        Self::columns(table).map(|mut columns| {
            columns.truncate(1);
            columns
        })
    }

    fn execute_sql(&self, sql: &str) -> Result<String, CatalogError> {
        self.answer(sql.to_string(), Value::Null)
            .map(|_| "1 row affected".to_string())
    }

    fn execute_select(&self, request: &SelectRequest) -> Result<Value, CatalogError> {
        self.answer(
            format!("select {} where {}", request.columns.join(","), request.condition),
            json!({ "headers": ["name"], "rows": [["Ann"], ["Bob"]] }),
        )
    }

    fn execute_join(&self, request: &JoinRequest) -> Result<Value, CatalogError> {
        self.answer(
            format!("join {} {}", request.left_table, request.right_table),
            json!({ "headers": ["id", "course"], "rows": [[1, "math"]] }),
        )
    }

    fn bulk_insert(&self) -> Result<(), CatalogError> {
        self.answer("1m".to_string(), Value::Null).map(|_| ())
    }
}
