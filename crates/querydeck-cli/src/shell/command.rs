//! Dot-command parsing.
//!
//! | Command                         | Effect                                  |
//! |---------------------------------|-----------------------------------------|
//! | `.mode sql\|select\|join`       | switch the active builder               |
//! | `.tables`                       | refresh and list tables                 |
//! | `.table [TABLE]`                | projection table (no argument clears)   |
//! | `.left [TABLE]`, `.right [TABLE]` | join tables                           |
//! | `.col COLUMN`                   | add a projection column (`*` for all)   |
//! | `.col left\|right COLUMN`       | set a join column                       |
//! | `.uncol COLUMN`, `.uncol left\|right` | drop a column                     |
//! | `.cols A,B,...`                 | replace the projection columns          |
//! | `.distinct on\|off`             |                                         |
//! | `.where add [COND]`             | append a predicate                      |
//! | `.where set\|op\|val N ...`     | edit predicate N (1-based)              |
//! | `.where rm N`                   | remove predicate N                      |
//! | `.show`, `.run`, `.insert1m`    |                                         |
//! | `.help`, `.quit`                |                                         |

use crate::args::{Condition, ConditionError};
use derive_more::Display;
use querydeck::core::{builder::JoinSide, error::BuilderError, predicate::CompareOp};
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// Mode
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum Mode {
    #[default]
    #[display("sql")]
    Sql,
    #[display("select")]
    Select,
    #[display("join")]
    Join,
}

impl FromStr for Mode {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sql" => Ok(Self::Sql),
            "select" => Ok(Self::Select),
            "join" => Ok(Self::Join),
            _ => Err(CommandError::Mode(s.to_string())),
        }
    }
}

///
/// CommandError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CommandError {
    #[error("unknown command '{0}'; type .help for available commands")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown mode '{0}'; expected sql, select or join")]
    Mode(String),

    #[error("expected on or off, got '{0}'")]
    Switch(String),

    #[error("'{0}' is not a predicate number")]
    Index(String),

    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error(transparent)]
    Operator(#[from] BuilderError),
}

///
/// WhereCommand
///
/// Indexes are zero-based here; the shell shows and accepts one-based.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WhereCommand {
    Add(Option<Condition>),
    Set { index: usize, column: String },
    Op { index: usize, op: CompareOp },
    Val { index: usize, value: String },
    Rm(usize),
}

///
/// ShellCommand
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShellCommand {
    Quit,
    Help,
    Mode(Mode),
    Tables,
    Table(String),
    Left(String),
    Right(String),
    Col {
        side: Option<JoinSide>,
        name: String,
    },
    Uncol(String),
    Cols(Vec<String>),
    Distinct(bool),
    Where(WhereCommand),
    Show,
    Run,
    BulkInsert,
}

impl ShellCommand {
    pub fn is_command(input: &str) -> bool {
        input.trim_start().starts_with('.')
    }

    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let (head, rest) = split_word(input.trim());
        let head = head.to_ascii_lowercase();

        let command = match head.as_str() {
            ".quit" | ".exit" | ".q" => Self::Quit,
            ".help" | ".h" | ".?" => Self::Help,
            ".mode" => Self::Mode(single(rest, ".mode sql|select|join")?.parse()?),
            ".tables" => Self::Tables,
            ".table" => Self::Table(rest.to_string()),
            ".left" => Self::Left(rest.to_string()),
            ".right" => Self::Right(rest.to_string()),
            ".col" => parse_col(rest)?,
            ".uncol" => Self::Uncol(single(rest, ".uncol COLUMN | .uncol left|right")?.to_string()),
            ".cols" => parse_cols(rest)?,
            ".distinct" => Self::Distinct(parse_switch(single(rest, ".distinct on|off")?)?),
            ".where" => Self::Where(parse_where(rest)?),
            ".show" => Self::Show,
            ".run" => Self::Run,
            ".insert1m" => Self::BulkInsert,
            _ => return Err(CommandError::Unknown(head)),
        };

        Ok(command)
    }
}

pub fn parse_side(word: &str) -> Option<JoinSide> {
    match word.to_ascii_lowercase().as_str() {
        "left" => Some(JoinSide::Left),
        "right" => Some(JoinSide::Right),
        _ => None,
    }
}

pub fn help_text() -> String {
    r".mode sql|select|join          Switch the active builder
.tables                        Refresh and list tables
.table [TABLE]                 Choose the projection table (no argument clears it)
.left [TABLE] / .right [TABLE] Choose a join table
.col COLUMN                    Add a projection column; * selects all
.col left|right COLUMN         Choose a join column
.uncol COLUMN                  Drop a projection column
.uncol left|right              Clear a join column
.cols A,B,...                  Replace the projection columns
.distinct on|off               Toggle SELECT DISTINCT
.where add [COLUMN OP VALUE]   Append a condition (OP is =, < or >)
.where set N COLUMN            Set the column of condition N
.where op N OP                 Set the operator of condition N
.where val N [VALUE]           Set the value of condition N
.where rm N                    Remove condition N
.show                          Show the active builder
.run                           Run the active builder
.insert1m                      Trigger the backend's bulk insert
.help                          Show this message
.quit                          Exit

In sql mode, other input is collected until ';' and sent verbatim."
        .to_string()
}

// Split off the first whitespace-delimited word; the remainder keeps its
// inner spacing.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim()),
        None => (input, ""),
    }
}

fn single<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    let (word, extra) = split_word(rest);
    if word.is_empty() || !extra.is_empty() {
        return Err(CommandError::Usage(usage));
    }

    Ok(word)
}

fn parse_switch(word: &str) -> Result<bool, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(CommandError::Switch(word.to_string())),
    }
}

fn parse_index(word: &str) -> Result<usize, CommandError> {
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::Index(word.to_string())),
    }
}

fn parse_col(rest: &str) -> Result<ShellCommand, CommandError> {
    const USAGE: &str = ".col COLUMN | .col left|right COLUMN";

    let (first, second) = split_word(rest);
    if first.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }

    match (parse_side(first), second) {
        (Some(side), name) if !name.is_empty() => Ok(ShellCommand::Col {
            side: Some(side),
            name: single(name, USAGE)?.to_string(),
        }),
        (_, "") => Ok(ShellCommand::Col {
            side: None,
            name: first.to_string(),
        }),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn parse_cols(rest: &str) -> Result<ShellCommand, CommandError> {
    let names: Vec<String> = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect();
    if names.is_empty() {
        return Err(CommandError::Usage(".cols A,B,..."));
    }

    Ok(ShellCommand::Cols(names))
}

fn parse_where(rest: &str) -> Result<WhereCommand, CommandError> {
    const USAGE: &str = ".where add|set|op|val|rm ...";

    let (verb, rest) = split_word(rest);
    if verb.eq_ignore_ascii_case("add") {
        let condition = if rest.is_empty() {
            None
        } else {
            Some(rest.parse::<Condition>()?)
        };
        return Ok(WhereCommand::Add(condition));
    }

    let (index, arg) = split_word(rest);
    if index.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    let index = parse_index(index)?;

    match verb.to_ascii_lowercase().as_str() {
        "set" => Ok(WhereCommand::Set {
            index,
            column: single(arg, ".where set N COLUMN")?.to_string(),
        }),
        "op" => Ok(WhereCommand::Op {
            index,
            op: single(arg, ".where op N =|<|>")?.parse()?,
        }),
        "val" => Ok(WhereCommand::Val {
            index,
            value: arg.to_string(),
        }),
        "rm" if arg.is_empty() => Ok(WhereCommand::Rm(index)),
        _ => Err(CommandError::Usage(USAGE)),
    }
}
