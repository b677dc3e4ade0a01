use crate::{
    catalog::CatalogName,
    predicate::{CompareOp, PredicateList},
    sql::{ColumnList, join_text, select_text, where_body},
};
use proptest::prelude::*;

fn name(raw: &str) -> CatalogName {
    CatalogName::new(raw).expect("test names are non-empty")
}

#[test]
fn select_without_predicates_matches_template() {
    let columns = [name("name"), name("age")];
    let predicates = PredicateList::new();

    let sql = select_text(
        &name("students"),
        ColumnList::Named(&columns),
        false,
        predicates.iter(),
    );

    assert_eq!(sql, "SELECT name, age FROM students;");
}

#[test]
fn select_with_distinct_wildcard_and_predicates() {
    let mut predicates = PredicateList::new();
    predicates.push(Some(name("age")), CompareOp::Gt, "5");
    predicates.push(Some(name("name")), CompareOp::Eq, "'ada'");

    let sql = select_text(&name("students"), ColumnList::All, true, predicates.iter());

    assert_eq!(
        sql,
        "SELECT DISTINCT * FROM students WHERE age > 5 AND name = 'ada';"
    );
}

#[test]
fn values_are_emitted_verbatim() {
    let mut predicates = PredicateList::new();
    predicates.push(Some(name("name")), CompareOp::Eq, "x; DROP TABLE t");

    assert_eq!(where_body(predicates.iter()), "name = x; DROP TABLE t");
}

#[test]
fn where_body_skips_unset_columns() {
    let mut predicates = PredicateList::new();
    predicates.add();
    predicates.push(Some(name("age")), CompareOp::Lt, "30");

    assert_eq!(where_body(predicates.iter()), "age < 30");
}

#[test]
fn join_matches_template() {
    let sql = join_text(
        &name("students"),
        &name("id"),
        &name("grades"),
        &name("student_id"),
    );

    assert_eq!(
        sql,
        "SELECT * FROM students INNER JOIN grades ON students.id = grades.student_id;"
    );
}

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn arb_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![Just(CompareOp::Eq), Just(CompareOp::Lt), Just(CompareOp::Gt)]
}

proptest! {
    #[test]
    fn select_text_has_template_shape(
        table in arb_ident(),
        columns in prop::collection::vec(arb_ident(), 1..5),
        distinct in any::<bool>(),
        wildcard in any::<bool>(),
        predicates in prop::collection::vec((arb_ident(), arb_op(), "[0-9]{1,4}"), 0..4),
    ) {
        let columns: Vec<CatalogName> = columns.iter().map(|c| name(c)).collect();
        let mut list = PredicateList::new();
        for (column, op, value) in &predicates {
            list.push(Some(name(column)), *op, value.clone());
        }
        let column_list = if wildcard { ColumnList::All } else { ColumnList::Named(&columns) };

        let sql = select_text(&name(&table), column_list, distinct, list.iter());

        let head = if distinct { "SELECT DISTINCT " } else { "SELECT " };
        prop_assert!(sql.starts_with(head));
        prop_assert!(sql.ends_with(';'));
        prop_assert_eq!(sql.matches(';').count(), 1);

        let from = format!(" FROM {table}");
        let from_at = sql.find(&from).expect("FROM clause should be present");
        let projected = &sql[head.len()..from_at];
        if wildcard {
            prop_assert_eq!(projected, "*");
        } else {
            let expected = columns.iter().map(CatalogName::as_str).collect::<Vec<_>>().join(", ");
            prop_assert_eq!(projected, expected.as_str());
        }

        prop_assert_eq!(sql.contains(" WHERE "), !predicates.is_empty());
        if !predicates.is_empty() {
            prop_assert_eq!(sql.matches(" AND ").count(), predicates.len() - 1);
        }
    }

    #[test]
    fn removal_preserves_relative_order(
        count in 1_usize..6,
        remove in 0_usize..6,
    ) {
        let remove = remove % count;
        let mut list = PredicateList::new();
        for i in 0..count {
            list.push(Some(name("c")), CompareOp::Eq, i.to_string());
        }

        list.remove_at(remove).expect("index is in range");

        let expected = (0..count)
            .filter(|i| *i != remove)
            .map(|i| format!("c = {i}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        prop_assert_eq!(where_body(list.iter()), expected);
    }
}
