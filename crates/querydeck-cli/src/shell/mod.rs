//! Interactive shell.
//!
//! Lines starting with `.` are dot-commands and run immediately. In `sql`
//! mode anything else is collected, across lines, until it ends with `;`
//! and is then submitted verbatim. The prompt shows the active mode and
//! switches to `    -> ` while a statement is incomplete.

mod command;
mod workspace;

#[cfg(test)]
mod tests;

use crate::history::history_path;
use command::{Mode, ShellCommand};
use querydeck::core::{catalog::Catalog, session::Session};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::warn;
use workspace::{CommandResult, Workspace};

const CONTINUATION_PROMPT: &str = "    -> ";

///
/// Repl
///

pub struct Repl<'a, C: Catalog + ?Sized> {
    session: Session<'a, C>,
    workspace: Workspace,
    editor: DefaultEditor,
    sql_buffer: String,
}

impl<'a, C: Catalog + ?Sized> Repl<'a, C> {
    pub fn new(session: Session<'a, C>) -> Result<Self, ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = history_path() {
            // first run: nothing to load yet
            let _ = editor.load_history(&path);
        }
        let workspace = Workspace::mount(&session);

        Ok(Self {
            session,
            workspace,
            editor,
            sql_buffer: String::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), ReadlineError> {
        println!("querydeck {}", querydeck::VERSION);
        println!("Enter \".help\" for usage hints.");
        println!();

        loop {
            let prompt = if self.sql_buffer.is_empty() {
                format!("querydeck({})> ", self.workspace.mode())
            } else {
                CONTINUATION_PROMPT.to_string()
            };

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    self.sql_buffer.clear();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye");
                    break;
                }
                Err(err) => {
                    self.save_history();
                    return Err(err);
                }
            }
        }

        self.save_history();
        Ok(())
    }

    // false once the shell should exit
    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }

        if self.sql_buffer.is_empty() && ShellCommand::is_command(trimmed) {
            let _ = self.editor.add_history_entry(trimmed);
            let result = match ShellCommand::parse(trimmed) {
                Ok(command) => self.workspace.dispatch(&self.session, command),
                Err(err) => CommandResult::Error(err.to_string()),
            };
            return print_result(result);
        }

        if self.workspace.mode() != Mode::Sql {
            eprintln!(
                "Error: only dot-commands are accepted in {} mode; see .help",
                self.workspace.mode()
            );
            return true;
        }

        if !self.sql_buffer.is_empty() {
            self.sql_buffer.push('\n');
        }
        self.sql_buffer.push_str(trimmed);

        if self.sql_buffer.ends_with(';') {
            let sql = std::mem::take(&mut self.sql_buffer);
            let _ = self.editor.add_history_entry(sql.as_str());
            let result = self.workspace.execute_sql(&self.session, &sql);
            return print_result(result);
        }

        true
    }

    fn save_history(&mut self) {
        if let Some(path) = history_path()
            && let Err(err) = self.editor.save_history(&path)
        {
            warn!(path = %path.display(), error = %err, "could not save history");
        }
    }
}

fn print_result(result: CommandResult) -> bool {
    match result {
        CommandResult::Output(text) => println!("{text}"),
        CommandResult::Continue => {}
        CommandResult::Exit => return false,
        CommandResult::Error(message) => eprintln!("Error: {message}"),
    }

    true
}
