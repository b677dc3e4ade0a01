//! SQL preview text.
//!
//! Generation is pure and purely textual: predicate values are emitted
//! verbatim, unquoted and unescaped. The preview makes no attempt at type
//! inference or injection safety, and the same WHERE body is what the
//! projection payload carries as its `condition`.

#[cfg(test)]
mod tests;

use crate::{catalog::CatalogName, predicate::Predicate};
use std::fmt::Write as _;

/// The all-columns choice.
pub const WILDCARD: &str = "*";

///
/// ColumnList
///
/// Columns as they appear in generated text.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnList<'a> {
    All,
    Named(&'a [CatalogName]),
}

/// `SELECT [DISTINCT ]<cols> FROM <table>[ WHERE <p1> AND <p2> ...];`
///
/// Predicates without a column are skipped.
#[must_use]
pub fn select_text<'a, I>(
    table: &CatalogName,
    columns: ColumnList<'_>,
    distinct: bool,
    predicates: I,
) -> String
where
    I: IntoIterator<Item = &'a Predicate>,
{
    let mut sql = String::from("SELECT ");
    if distinct {
        sql.push_str("DISTINCT ");
    }

    match columns {
        ColumnList::All => sql.push_str(WILDCARD),
        ColumnList::Named(names) => sql.push_str(&join_names(names, ", ")),
    }

    let _ = write!(sql, " FROM {table}");

    let body = where_body(predicates);
    if !body.is_empty() {
        let _ = write!(sql, " WHERE {body}");
    }

    sql.push(';');
    sql
}

/// WHERE body without the keyword or terminator; empty when nothing applies.
#[must_use]
pub fn where_body<'a, I>(predicates: I) -> String
where
    I: IntoIterator<Item = &'a Predicate>,
{
    predicates
        .into_iter()
        .filter_map(|p| {
            p.column
                .as_ref()
                .map(|column| format!("{column} {} {}", p.op, p.value))
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `SELECT * FROM <left> INNER JOIN <right> ON <left>.<lc> = <right>.<rc>;`
#[must_use]
pub fn join_text(
    left: &CatalogName,
    left_column: &CatalogName,
    right: &CatalogName,
    right_column: &CatalogName,
) -> String {
    format!(
        "SELECT * FROM {left} INNER JOIN {right} ON {left}.{left_column} = {right}.{right_column};"
    )
}

fn join_names(names: &[CatalogName], separator: &str) -> String {
    names
        .iter()
        .map(CatalogName::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
