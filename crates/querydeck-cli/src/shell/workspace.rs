use super::command::{Mode, ShellCommand, WhereCommand, help_text, parse_side};
use crate::render::{render_names, render_result, render_status, render_text, settled};
use querydeck::core::{
    builder::{FreeformExecutor, JoinBuilder, JoinSide, ProjectionBuilder},
    catalog::{Catalog, CatalogName},
    error::BuilderError,
    predicate::PredicateEdit,
    session::Session,
    slot::{FetchOutcome, SelectionSlot, SlotId},
};
use std::fmt::Write;
use tracing::debug;

///
/// CommandResult
///

#[derive(Debug, Eq, PartialEq)]
pub enum CommandResult {
    Output(String),
    Continue,
    Exit,
    Error(String),
}

impl From<BuilderError> for CommandResult {
    fn from(err: BuilderError) -> Self {
        Self::Error(err.to_string())
    }
}

impl From<Result<String, String>> for CommandResult {
    fn from(outcome: Result<String, String>) -> Self {
        match outcome {
            Ok(text) => Self::Output(text),
            Err(message) => Self::Error(message),
        }
    }
}

///
/// Workspace
///
/// The three builders behind the shell and the mode choosing which one
/// `.col`, `.show` and `.run` address.
///

pub struct Workspace {
    mode: Mode,
    projection: ProjectionBuilder,
    join: JoinBuilder,
    freeform: FreeformExecutor,
}

impl Workspace {
    pub fn mount<C: Catalog + ?Sized>(session: &Session<'_, C>) -> Self {
        Self {
            mode: Mode::default(),
            projection: session.mount_projection(),
            join: session.mount_join(),
            freeform: FreeformExecutor::new(),
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    pub(crate) const fn projection(&self) -> &ProjectionBuilder {
        &self.projection
    }

    #[cfg(test)]
    pub(crate) const fn join(&self) -> &JoinBuilder {
        &self.join
    }

    pub fn dispatch<C: Catalog + ?Sized>(
        &mut self,
        session: &Session<'_, C>,
        command: ShellCommand,
    ) -> CommandResult {
        debug!(mode = %self.mode, ?command, "shell command");

        match command {
            ShellCommand::Quit => CommandResult::Exit,
            ShellCommand::Help => CommandResult::Output(help_text()),
            ShellCommand::Mode(mode) => {
                self.mode = mode;
                CommandResult::Output(format!("mode: {mode}"))
            }
            ShellCommand::Tables => self.refresh_tables(session),
            ShellCommand::Table(name) => self.select_table(session, &name),
            ShellCommand::Left(name) => self.select_join_table(session, JoinSide::Left, &name),
            ShellCommand::Right(name) => self.select_join_table(session, JoinSide::Right, &name),
            ShellCommand::Col { side, name } => self.select_column(side, &name),
            ShellCommand::Uncol(name) => self.deselect_column(&name),
            ShellCommand::Cols(names) => self.edit(|b| b.set_columns(&names)),
            ShellCommand::Distinct(on) => self.edit(|b| {
                b.set_distinct(on);
                Ok(())
            }),
            ShellCommand::Where(command) => self.edit_where(command),
            ShellCommand::Show => CommandResult::Output(self.show()),
            ShellCommand::Run => self.run(session),
            ShellCommand::BulkInsert => self.bulk_insert(session),
        }
    }

    /// Submit query text verbatim through the free-form executor.
    pub fn execute_sql<C: Catalog + ?Sized>(
        &mut self,
        session: &Session<'_, C>,
        text: &str,
    ) -> CommandResult {
        self.freeform.set_text(text);
        self.run_freeform(session)
    }

    // ------------------------------------------------------------------
    // Catalog selection
    // ------------------------------------------------------------------

    fn refresh_tables<C: Catalog + ?Sized>(&mut self, session: &Session<'_, C>) -> CommandResult {
        let outcome = session.catalog().list_tables();
        if let Err(err) = &outcome {
            return CommandResult::Error(format!("could not list tables: {err}"));
        }
        self.projection.apply_tables(outcome.clone());
        self.join.apply_tables(outcome);

        let tables = self.projection.tables();
        CommandResult::Output(render_names(
            tables.iter().map(CatalogName::as_str),
            "No tables found.",
        ))
    }

    fn select_table<C: Catalog + ?Sized>(
        &mut self,
        session: &Session<'_, C>,
        name: &str,
    ) -> CommandResult {
        match session.select_projection_table(&mut self.projection, name) {
            None => CommandResult::Output("table cleared".to_string()),
            Some(outcome) => describe_slot(self.projection.slot(), &[outcome]),
        }
    }

    fn select_join_table<C: Catalog + ?Sized>(
        &mut self,
        session: &Session<'_, C>,
        side: JoinSide,
        name: &str,
    ) -> CommandResult {
        let outcomes = session.select_join_table(&mut self.join, side, name);
        if outcomes.is_empty() {
            return CommandResult::Output(format!("{side} table cleared"));
        }

        describe_slot(self.join.slot(side), &outcomes)
    }

    fn select_column(&mut self, side: Option<JoinSide>, name: &str) -> CommandResult {
        match (self.mode, side) {
            (Mode::Select, None) => self.edit(|b| b.select_column(name)),
            (Mode::Join, Some(side)) => match self.join.select_column(side, name) {
                Ok(()) => self.join_preview(),
                Err(err) => err.into(),
            },
            (Mode::Join, None) => CommandResult::Error("usage: .col left|right COLUMN".to_string()),
            (Mode::Select, Some(_)) => CommandResult::Error("usage: .col COLUMN".to_string()),
            (Mode::Sql, _) => not_in_sql_mode(".col"),
        }
    }

    fn deselect_column(&mut self, name: &str) -> CommandResult {
        match self.mode {
            Mode::Select => self.edit(|b| {
                b.deselect_column(name);
                Ok(())
            }),
            Mode::Join => match parse_side(name) {
                Some(side) => match self.join.select_column(side, "") {
                    Ok(()) => self.join_preview(),
                    Err(err) => err.into(),
                },
                None => CommandResult::Error("usage: .uncol left|right".to_string()),
            },
            Mode::Sql => not_in_sql_mode(".uncol"),
        }
    }

    // ------------------------------------------------------------------
    // Projection edits
    // ------------------------------------------------------------------

    // Apply an edit to the projection and echo the new preview.
    fn edit(
        &mut self,
        edit: impl FnOnce(&mut ProjectionBuilder) -> Result<(), BuilderError>,
    ) -> CommandResult {
        match edit(&mut self.projection) {
            Ok(()) => self.projection_preview(),
            Err(err) => err.into(),
        }
    }

    fn edit_where(&mut self, command: WhereCommand) -> CommandResult {
        match command {
            WhereCommand::Add(condition) => {
                let added = match condition {
                    Some(condition) => condition.add_to(&mut self.projection),
                    None => Ok(self.projection.add_predicate()),
                };
                if let Err(err) = added {
                    return err.into();
                }

                let number = self.projection.predicates().len();
                let mut out = format!("condition {number} added");
                append_preview(&mut out, &self.projection.query_text());
                CommandResult::Output(out)
            }
            WhereCommand::Set { index, column } => self.edit(|b| {
                let column = CatalogName::new(column)?;
                b.update_predicate_at(index, PredicateEdit::Column(Some(column)))
            }),
            WhereCommand::Op { index, op } => {
                self.edit(|b| b.update_predicate_at(index, PredicateEdit::Op(op)))
            }
            WhereCommand::Val { index, value } => {
                self.edit(|b| b.update_predicate_at(index, PredicateEdit::Value(value)))
            }
            WhereCommand::Rm(index) => self.edit(|b| b.remove_predicate_at(index).map(|_| ())),
        }
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    fn run<C: Catalog + ?Sized>(&mut self, session: &Session<'_, C>) -> CommandResult {
        match self.mode {
            Mode::Select => {
                if let Err(err) = session.run_projection(&mut self.projection) {
                    return err.into();
                }
                let elapsed = self.projection.elapsed();
                settled(self.projection.lifecycle(), |r| render_result(r, elapsed)).into()
            }
            Mode::Join => {
                if let Err(err) = session.run_join(&mut self.join) {
                    return err.into();
                }
                let elapsed = self.join.elapsed();
                settled(self.join.lifecycle(), |r| render_result(r, elapsed)).into()
            }
            Mode::Sql => self.run_freeform(session),
        }
    }

    fn run_freeform<C: Catalog + ?Sized>(&mut self, session: &Session<'_, C>) -> CommandResult {
        if let Err(err) = session.run_freeform(&mut self.freeform) {
            return err.into();
        }
        let elapsed = self.freeform.elapsed();

        settled(self.freeform.lifecycle(), |text| render_text(text, elapsed)).into()
    }

    fn bulk_insert<C: Catalog + ?Sized>(&mut self, session: &Session<'_, C>) -> CommandResult {
        if let Err(err) = session.trigger_bulk_insert(&mut self.freeform) {
            return err.into();
        }

        settled(self.freeform.lifecycle(), Clone::clone).into()
    }

    // ------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------

    fn projection_preview(&self) -> CommandResult {
        preview(self.projection.query_text())
    }

    fn join_preview(&self) -> CommandResult {
        preview(self.join.query_text())
    }

    fn show(&self) -> String {
        let mut out = format!("mode: {}\n", self.mode);

        match self.mode {
            Mode::Select => {
                let p = &self.projection;
                let selection = p.selection();
                let columns = if selection.is_wildcard() {
                    "*".to_string()
                } else if selection.named().is_empty() {
                    "(none)".to_string()
                } else {
                    join_names(selection.named())
                };

                let _ = writeln!(out, "table: {}", name_or_unset(p.table()));
                let _ = writeln!(out, "columns: {columns}");
                let _ = writeln!(out, "distinct: {}", if p.is_distinct() { "on" } else { "off" });
                for (number, predicate) in (1..).zip(p.predicates().iter()) {
                    let _ = writeln!(
                        out,
                        "where {number}: {} {} {}",
                        name_or_unset(predicate.column.as_ref()),
                        predicate.op,
                        predicate.value
                    );
                }
                let _ = writeln!(out, "sql: {}", p.query_text());
                let _ = write!(out, "status: {}", render_status(p.lifecycle()));
            }
            Mode::Join => {
                let j = &self.join;
                for side in [JoinSide::Left, JoinSide::Right] {
                    let _ = writeln!(
                        out,
                        "{side}: {} on {}",
                        name_or_unset(j.table(side)),
                        name_or_unset(j.join_column(side))
                    );
                }
                let _ = writeln!(out, "sql: {}", j.query_text());
                let _ = write!(out, "status: {}", render_status(j.lifecycle()));
            }
            Mode::Sql => {
                let f = &self.freeform;
                let _ = writeln!(out, "last query: {}", f.text());
                let _ = write!(out, "status: {}", render_status(f.lifecycle()));
            }
        }

        out
    }
}

// Report the state of a slot after a table selection.
fn describe_slot(slot: &SelectionSlot, outcomes: &[FetchOutcome]) -> CommandResult {
    let table = name_or_unset(slot.table());
    if outcomes.contains(&FetchOutcome::Failed) {
        return CommandResult::Error(format!(
            "could not load columns of '{table}': {}",
            slot.last_error().unwrap_or("unknown error")
        ));
    }

    let mut out = format!("{table}: {}", join_names(slot.columns().as_slice()));
    if slot.id() != SlotId::Main {
        let _ = write!(out, "\njoinable: {}", join_names(slot.join_columns().as_slice()));
    }

    CommandResult::Output(out)
}

fn preview(text: String) -> CommandResult {
    if text.is_empty() {
        CommandResult::Continue
    } else {
        CommandResult::Output(text)
    }
}

fn append_preview(out: &mut String, text: &str) {
    if !text.is_empty() {
        out.push('\n');
        out.push_str(text);
    }
}

fn join_names(names: &[CatalogName]) -> String {
    let names: Vec<&str> = names.iter().map(CatalogName::as_str).collect();

    names.join(", ")
}

fn name_or_unset(name: Option<&CatalogName>) -> &str {
    name.map_or("(unset)", CatalogName::as_str)
}

fn not_in_sql_mode(command: &str) -> CommandResult {
    CommandResult::Error(format!("{command} needs select or join mode; see .mode"))
}
