use crate::{
    catalog::CatalogName,
    error::BuilderError,
    predicate::{CompareOp, PredicateEdit, PredicateList},
};

fn name(raw: &str) -> CatalogName {
    CatalogName::new(raw).expect("test names are non-empty")
}

#[test]
fn compare_op_parses_supported_symbols() {
    assert_eq!("=".parse::<CompareOp>(), Ok(CompareOp::Eq));
    assert_eq!(" < ".parse::<CompareOp>(), Ok(CompareOp::Lt));
    assert_eq!(">".parse::<CompareOp>(), Ok(CompareOp::Gt));
    assert_eq!(
        "<=".parse::<CompareOp>(),
        Err(BuilderError::UnknownOperator("<=".to_string()))
    );
}

#[test]
fn add_creates_blank_equality_predicate() {
    let mut list = PredicateList::new();
    let id = list.add();

    let predicate = list.get(id).expect("added predicate should be present");
    assert_eq!(predicate.column, None);
    assert_eq!(predicate.op, CompareOp::Eq);
    assert_eq!(predicate.value, "");
    assert!(!predicate.is_complete());
}

#[test]
fn remove_at_shifts_later_predicates() {
    let mut list = PredicateList::new();
    let p0 = list.push(Some(name("a")), CompareOp::Eq, "1");
    let p1 = list.push(Some(name("b")), CompareOp::Lt, "2");
    let p2 = list.push(Some(name("c")), CompareOp::Gt, "3");

    let removed = list.remove_at(1).expect("index 1 should exist");

    assert_eq!(removed.id(), p1);
    assert_eq!(list.iter().map(|p| p.id()).collect::<Vec<_>>(), vec![p0, p2]);
    assert_eq!(list.position(p2), Some(1));
}

#[test]
fn edits_follow_id_after_earlier_removal() {
    let mut list = PredicateList::new();
    let first = list.add();
    let second = list.add();

    list.remove(first).expect("first predicate should be removable");
    list.update(second, PredicateEdit::Value("42".to_string()))
        .expect("second predicate should still be addressable");

    let predicate = list.get(second).expect("second predicate should remain");
    assert_eq!(predicate.value, "42");
}

#[test]
fn removed_ids_are_not_reused() {
    let mut list = PredicateList::new();
    let first = list.add();
    list.remove(first).expect("first predicate should be removable");
    let next = list.add();

    assert_ne!(first, next);
    assert_eq!(
        list.update(first, PredicateEdit::Op(CompareOp::Gt)),
        Err(BuilderError::UnknownPredicate(first))
    );
}

#[test]
fn remove_at_out_of_range_leaves_list_untouched() {
    let mut list = PredicateList::new();
    list.add();

    let err = list.remove_at(3).expect_err("index 3 is out of range");

    assert_eq!(err, BuilderError::PredicateIndex { index: 3, len: 1 });
    assert_eq!(list.len(), 1);
}

#[test]
fn complete_skips_predicates_without_column() {
    let mut list = PredicateList::new();
    list.add();
    let set = list.push(Some(name("age")), CompareOp::Gt, "5");

    let complete: Vec<_> = list.complete().map(|p| p.id()).collect();

    assert_eq!(complete, vec![set]);
}
