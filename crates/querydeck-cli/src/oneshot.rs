//! Non-interactive subcommands: one builder, one run, then exit.

use crate::{
    args::{JoinArgs, SelectArgs},
    render::{render_names, render_result, render_text, settled},
};
use querydeck::{
    Error,
    core::{
        builder::{FreeformExecutor, JoinBuilder, JoinSide, ProjectionBuilder},
        catalog::{Catalog, CatalogName},
        session::Session,
        slot::{FetchOutcome, ListingKind, SelectionSlot},
    },
    error::{ErrorKind, ErrorOrigin},
};
use std::process::ExitCode;

pub fn tables<C: Catalog + ?Sized>(session: &Session<'_, C>) -> Result<ExitCode, Error> {
    let tables = session.list_tables()?;
    println!(
        "{}",
        render_names(tables.iter().map(CatalogName::as_str), "No tables found.")
    );

    Ok(ExitCode::SUCCESS)
}

pub fn columns<C: Catalog + ?Sized>(
    session: &Session<'_, C>,
    table: &str,
    joinable: bool,
) -> Result<ExitCode, Error> {
    let kind = if joinable {
        ListingKind::JoinColumns
    } else {
        ListingKind::Columns
    };
    let columns = session.list_columns(table, kind)?;
    println!(
        "{}",
        render_names(columns.iter().map(CatalogName::as_str), "No columns found.")
    );

    Ok(ExitCode::SUCCESS)
}

pub fn sql<C: Catalog + ?Sized>(session: &Session<'_, C>, text: &str) -> Result<ExitCode, Error> {
    let mut executor = FreeformExecutor::new();
    executor.set_text(text);
    session.run_freeform(&mut executor)?;

    let elapsed = executor.elapsed();
    Ok(report(settled(executor.lifecycle(), |t| render_text(t, elapsed))))
}

pub fn bulk_insert<C: Catalog + ?Sized>(session: &Session<'_, C>) -> Result<ExitCode, Error> {
    let mut executor = FreeformExecutor::new();
    session.trigger_bulk_insert(&mut executor)?;

    Ok(report(settled(executor.lifecycle(), Clone::clone)))
}

pub fn select<C: Catalog + ?Sized>(
    session: &Session<'_, C>,
    args: &SelectArgs,
) -> Result<ExitCode, Error> {
    let mut builder = ProjectionBuilder::new(session.database());
    let outcome = session.select_projection_table(&mut builder, &args.table);
    ensure_loaded(builder.slot(), outcome.as_slice())?;

    builder.set_columns(&args.columns)?;
    builder.set_distinct(args.distinct);
    for condition in &args.conditions {
        condition.add_to(&mut builder)?;
    }
    if args.print_sql {
        println!("{}", builder.query_text());
    }

    session.run_projection(&mut builder)?;
    let elapsed = builder.elapsed();

    Ok(report(settled(builder.lifecycle(), |r| render_result(r, elapsed))))
}

pub fn join<C: Catalog + ?Sized>(
    session: &Session<'_, C>,
    args: &JoinArgs,
) -> Result<ExitCode, Error> {
    let mut builder = JoinBuilder::new(session.database());
    for (side, table, column) in [
        (JoinSide::Left, &args.left, &args.left_column),
        (JoinSide::Right, &args.right, &args.right_column),
    ] {
        let outcomes = session.select_join_table(&mut builder, side, table);
        ensure_loaded(builder.slot(side), &outcomes)?;
        builder.select_column(side, column)?;
    }
    if args.print_sql {
        println!("{}", builder.query_text());
    }

    session.run_join(&mut builder)?;
    let elapsed = builder.elapsed();

    Ok(report(settled(builder.lifecycle(), |r| render_result(r, elapsed))))
}

// A listing failure is absorbed by the slot; surface it here so a one-shot
// run fails with the catalog's reason instead of an unknown column.
fn ensure_loaded(slot: &SelectionSlot, outcomes: &[FetchOutcome]) -> Result<(), Error> {
    if !outcomes.contains(&FetchOutcome::Failed) {
        return Ok(());
    }

    Err(Error::new(
        ErrorKind::Unavailable,
        ErrorOrigin::Catalog,
        slot.last_error().unwrap_or("column listing failed"),
    ))
}

fn report(outcome: Result<String, String>) -> ExitCode {
    match outcome {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
