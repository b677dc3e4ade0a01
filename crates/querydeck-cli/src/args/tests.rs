use crate::args::{Cli, Command, Condition, ConditionError, ConnectionArgs};
use clap::{CommandFactory, Parser};
use querydeck::core::predicate::CompareOp;
use std::{fs, process};

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn no_subcommand_means_shell() {
    let cli = Cli::try_parse_from(["querydeck"]).expect("bare invocation should parse");

    assert!(cli.command.is_none());
    assert_eq!(cli.verbose, 0);
}

#[test]
fn verbose_flag_counts() {
    let cli = Cli::try_parse_from(["querydeck", "-vv", "tables"]).expect("flags should parse");

    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Some(Command::Tables)));
}

#[test]
fn select_collects_columns_and_conditions() {
    let cli = Cli::try_parse_from([
        "querydeck",
        "select",
        "--table",
        "students",
        "--columns",
        "name,age",
        "--distinct",
        "--where",
        "age > 20",
        "--where",
        "name=Ann",
    ])
    .expect("select should parse");

    let Some(Command::Select(args)) = cli.command else {
        panic!("expected select command");
    };
    assert_eq!(args.table, "students");
    assert_eq!(args.columns, ["name", "age"]);
    assert!(args.distinct);
    assert_eq!(args.conditions.len(), 2);
    assert_eq!(args.conditions[1].op, CompareOp::Eq);
    assert_eq!(args.conditions[1].value, "Ann");
}

#[test]
fn select_requires_columns() {
    Cli::try_parse_from(["querydeck", "select", "--table", "students"])
        .expect_err("select without columns must fail");
}

#[test]
fn join_takes_four_fields() {
    let cli = Cli::try_parse_from([
        "querydeck",
        "join",
        "--left",
        "students",
        "--left-column",
        "id",
        "--right",
        "grades",
        "--right-column",
        "student_id",
        "--print-sql",
    ])
    .expect("join should parse");

    let Some(Command::Join(args)) = cli.command else {
        panic!("expected join command");
    };
    assert_eq!(args.right_column, "student_id");
    assert!(args.print_sql);
}

// ----------------------------------------------------------------------
// Conditions
// ----------------------------------------------------------------------

#[test]
fn condition_splits_at_first_operator() {
    let condition: Condition = "age>20".parse().expect("compact condition should parse");

    assert_eq!(condition.column, "age");
    assert_eq!(condition.op, CompareOp::Gt);
    assert_eq!(condition.value, "20");
}

#[test]
fn condition_value_may_contain_operators() {
    let condition: Condition = "note = a<b".parse().expect("condition should parse");

    assert_eq!(condition.op, CompareOp::Eq);
    assert_eq!(condition.value, "a<b");
}

#[test]
fn condition_value_may_be_empty() {
    let condition: Condition = "name =".parse().expect("empty value should parse");

    assert_eq!(condition.value, "");
}

#[test]
fn condition_without_operator_is_rejected() {
    let err = "age 20".parse::<Condition>().expect_err("no operator must fail");

    assert_eq!(err, ConditionError::MissingOperator);
}

#[test]
fn condition_without_column_is_rejected() {
    let err = " = 3".parse::<Condition>().expect_err("no column must fail");

    assert_eq!(err, ConditionError::MissingColumn);
}

#[test]
fn compound_operators_are_rejected() {
    for (input, op) in [("age >= 5", ">="), ("age<=5", "<="), ("age <> 5", "<>"), ("age == 5", "==")] {
        let err = input
            .parse::<Condition>()
            .expect_err("two-character operators must fail");

        assert_eq!(err, ConditionError::CompoundOperator(op.to_string()), "{input}");
    }
}

// ----------------------------------------------------------------------
// Config resolution
// ----------------------------------------------------------------------

#[test]
fn flags_override_config_file() {
    let path = std::env::temp_dir().join(format!("querydeck-args-{}.toml", process::id()));
    fs::write(
        &path,
        "database = \"from_file\"\nrequest_timeout_ms = 500\n",
    )
    .expect("temp config should be writable");

    let args = ConnectionArgs {
        config: Some(path.clone()),
        database: Some("from_flag".to_string()),
        ..ConnectionArgs::default()
    };
    let config = args.resolve();
    fs::remove_file(&path).ok();

    let config = config.expect("config should resolve");
    assert_eq!(config.database, "from_flag");
    assert_eq!(config.request_timeout_ms, 500);
}

#[test]
fn invalid_override_is_rejected() {
    let args = ConnectionArgs {
        config: Some(std::env::temp_dir().join("querydeck-missing-dir/none.toml")),
        ..ConnectionArgs::default()
    };

    args.resolve().expect_err("missing named config file must fail");

    let args = ConnectionArgs {
        config: None,
        base_url: Some("localhost:8080".to_string()),
        ..ConnectionArgs::default()
    };

    args.resolve().expect_err("schemeless base url must fail");
}
