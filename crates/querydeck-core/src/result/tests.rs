use crate::result::{ExecutionResult, ShapeError, TabularResult, cell_text};
use serde_json::json;

#[test]
fn from_json_accepts_well_formed_table() {
    let table = TabularResult::from_json(json!({
        "headers": ["id", "name"],
        "rows": [[1, "ada"], [2, "grace"]],
    }))
    .expect("well-formed table should validate");

    assert_eq!(table.headers(), ["id", "name"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 2);
}

#[test]
fn from_json_rejects_ragged_rows() {
    let err = TabularResult::from_json(json!({
        "headers": ["id", "name"],
        "rows": [[1, "ada"], [2]],
    }))
    .expect_err("ragged rows must be rejected");

    assert_eq!(
        err,
        ShapeError::RowWidth {
            row: 1,
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn from_json_requires_headers_and_rows() {
    let missing_rows = TabularResult::from_json(json!({ "headers": [] }))
        .expect_err("rows are required");
    let missing_headers = TabularResult::from_json(json!({ "rows": [] }))
        .expect_err("headers are required");
    let not_object =
        TabularResult::from_json(json!(["id"])).expect_err("arrays are not tables");

    assert_eq!(missing_rows, ShapeError::MissingRows);
    assert_eq!(missing_headers, ShapeError::MissingHeaders);
    assert_eq!(not_object, ShapeError::NotAnObject);
}

#[test]
fn malformed_tabular_body_degrades_to_no_result() {
    let result = ExecutionResult::from_tabular_json(json!({ "message": "ok" }));

    assert!(matches!(
        result,
        ExecutionResult::NoResult { ref reason } if reason.contains("headers")
    ));
    assert!(result.table().is_none());
}

#[test]
fn empty_table_is_still_a_table() {
    let result = ExecutionResult::from_tabular_json(json!({ "headers": ["id"], "rows": [] }));

    let table = result.table().expect("empty row set should still be a table");
    assert_eq!(table.row_count(), 0);
}

#[test]
fn cell_text_renders_scalars() {
    assert_eq!(cell_text(&json!(null)), "NULL");
    assert_eq!(cell_text(&json!("ada")), "ada");
    assert_eq!(cell_text(&json!(42)), "42");
    assert_eq!(cell_text(&json!(true)), "true");
}
