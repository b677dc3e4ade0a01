use crate::render::{
    MAX_COLUMN_WIDTH, TableFormatter, render_names, render_result, render_status, settled, truncate,
};
use querydeck::core::{
    lifecycle::RequestLifecycle,
    result::{ExecutionResult, TabularResult},
};
use serde_json::{Value, json};
use std::time::Duration;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn empty_table_renders_headers_only() {
    let formatter = TableFormatter::new(&headers(&["id", "name"]), &[]);
    let output = formatter.render();

    assert!(output.contains("+----+------+"));
    assert!(output.contains("| id | name |"));
    assert_eq!(formatter.row_count(), 0);
}

#[test]
fn rows_are_padded_to_widest_cell() {
    let rows = vec![
        vec![json!(1), json!("Alice")],
        vec![json!(2), json!("Bob")],
    ];
    let output = TableFormatter::new(&headers(&["id", "name"]), &rows).render();

    assert!(output.contains("| 1  | Alice |"));
    assert!(output.contains("| 2  | Bob   |"));
}

#[test]
fn null_cells_display_as_null() {
    let rows = vec![vec![Value::Null]];
    let output = TableFormatter::new(&headers(&["value"]), &rows).render();

    assert!(output.contains("| NULL  |"));
}

#[test]
fn width_is_capped() {
    let long = "x".repeat(MAX_COLUMN_WIDTH * 2);
    let rows = vec![vec![json!(long)]];
    let formatter = TableFormatter::new(&headers(&["x"]), &rows);

    assert_eq!(formatter.widths(), [MAX_COLUMN_WIDTH]);
    assert!(formatter.render().contains("..."));
}

#[test]
fn truncate_counts_characters() {
    assert_eq!(truncate("Short", 20), "Short");
    assert_eq!(truncate("ääääää", 5), "ää...");
    assert_eq!(truncate("abcdef", 3), "abc");
}

// ----------------------------------------------------------------------
// Results
// ----------------------------------------------------------------------

#[test]
fn table_result_has_row_footer() {
    let table = TabularResult::new(headers(&["name"]), vec![vec![json!("Ann")]])
        .expect("table should be well formed");
    let output = render_result(
        &ExecutionResult::Table(table),
        Some(Duration::from_millis(12)),
    );

    assert!(output.ends_with("1 row in set (0.012 sec)"));
}

#[test]
fn empty_table_result_reports_empty_set() {
    let table = TabularResult::new(headers(&["name"]), Vec::new())
        .expect("table should be well formed");
    let output = render_result(&ExecutionResult::Table(table), None);

    assert!(output.ends_with("Empty set (0.000 sec)"));
}

#[test]
fn text_and_no_result_render_verbatim() {
    let text = render_result(&ExecutionResult::Text("ok".to_string()), None);
    let none = render_result(
        &ExecutionResult::NoResult {
            reason: "response has no 'rows' array".to_string(),
        },
        None,
    );

    assert!(text.starts_with("ok\n"));
    assert!(none.contains("no 'rows' array"));
}

#[test]
fn status_line_names_failure() {
    let failed: RequestLifecycle<()> = RequestLifecycle::Failed("boom".to_string());

    assert_eq!(render_status(&failed), "failed: boom");
    assert_eq!(render_status(&RequestLifecycle::<()>::Idle), "idle");
}

#[test]
fn empty_listing_uses_placeholder() {
    assert_eq!(render_names([], "No tables found."), "No tables found.");
    assert_eq!(render_names(["a", "b"], "none"), "a\nb");
}

#[test]
fn settled_splits_success_and_failure() {
    let ok: RequestLifecycle<String> = RequestLifecycle::Succeeded("done".to_string());
    let failed: RequestLifecycle<String> =
        RequestLifecycle::Failed("error executing the query".to_string());

    assert_eq!(settled(&ok, Clone::clone), Ok("done".to_string()));
    assert_eq!(
        settled(&failed, Clone::clone),
        Err("error executing the query".to_string())
    );
    assert_eq!(
        settled(&RequestLifecycle::<String>::Idle, Clone::clone),
        Err("idle".to_string())
    );
}
