//! Command line surface.

#[cfg(test)]
mod tests;

use clap::{ArgAction, Args, Parser, Subcommand};
use querydeck::{
    config::{Config, ConfigError},
    core::{
        builder::ProjectionBuilder,
        catalog::CatalogName,
        error::BuilderError,
        predicate::{CompareOp, PredicateEdit, PredicateId},
    },
};
use std::{path::PathBuf, str::FromStr};
use thiserror::Error as ThisError;

/// Picked up from the working directory when no other file is named.
pub const DEFAULT_CONFIG_FILE: &str = "querydeck.toml";

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "querydeck", version, about = "Build and run queries against a minidbms backend")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

///
/// ConnectionArgs
///
/// Flags override environment variables, which override the config file.
///

#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    /// TOML file with `base_url`, `database` and `request_timeout_ms`.
    #[arg(long, env = "QUERYDECK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "QUERYDECK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[arg(long, env = "QUERYDECK_DATABASE", global = true)]
    pub database: Option<String>,

    /// Per-request timeout in milliseconds; 0 disables it.
    #[arg(long, env = "QUERYDECK_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,
}

impl ConnectionArgs {
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut config = match self.config_file() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(database) = &self.database {
            config.database.clone_from(database);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }
        config.validate()?;

        Ok(config)
    }

    fn config_file(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        })
    }
}

///
/// Command
///

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the tables of the configured database.
    Tables,

    /// List the columns of one table.
    Columns {
        table: String,

        /// List the columns usable as join keys instead.
        #[arg(long)]
        joinable: bool,
    },

    /// Submit query text verbatim.
    Sql { text: String },

    /// Run a single-table projection.
    Select(SelectArgs),

    /// Run a two-table equi-join.
    Join(JoinArgs),

    /// Ask the backend to insert its bulk test data set.
    BulkInsert,

    /// Interactive shell (the default).
    Shell,
}

///
/// SelectArgs
///

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[arg(long)]
    pub table: String,

    /// Comma-separated column names, or `*`.
    #[arg(long, value_delimiter = ',', required = true)]
    pub columns: Vec<String>,

    #[arg(long)]
    pub distinct: bool,

    /// Condition of the form `column op value`; repeat to AND several.
    #[arg(long = "where", value_name = "CONDITION")]
    pub conditions: Vec<Condition>,

    /// Print the generated SQL before running it.
    #[arg(long)]
    pub print_sql: bool,
}

///
/// JoinArgs
///

#[derive(Debug, Args)]
pub struct JoinArgs {
    #[arg(long)]
    pub left: String,

    #[arg(long)]
    pub left_column: String,

    #[arg(long)]
    pub right: String,

    #[arg(long)]
    pub right_column: String,

    #[arg(long)]
    pub print_sql: bool,
}

///
/// ConditionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConditionError {
    #[error("expected 'column op value' with op one of =, <, >")]
    MissingOperator,

    #[error("condition has no column")]
    MissingColumn,

    #[error("unsupported operator '{0}'; expected =, < or >")]
    CompoundOperator(String),

    #[error(transparent)]
    Operator(#[from] BuilderError),
}

///
/// Condition
///
/// `column op value`, split at the first operator character. Whitespace
/// around each part is optional and trimmed.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: CompareOp,
    pub value: String,
}

impl FromStr for Condition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let at = s
            .find(|c| matches!(c, '=' | '<' | '>'))
            .ok_or(ConditionError::MissingOperator)?;

        let column = s[..at].trim();
        if column.is_empty() {
            return Err(ConditionError::MissingColumn);
        }
        let op = s[at..=at].parse::<CompareOp>()?;

        let value = s[at + 1..].trim();
        if let Some(next) = value.chars().next().filter(|c| matches!(c, '=' | '<' | '>')) {
            return Err(ConditionError::CompoundOperator(format!("{}{next}", &s[at..=at])));
        }

        Ok(Self {
            column: column.to_string(),
            op,
            value: value.to_string(),
        })
    }
}

impl Condition {
    /// Append this condition to a projection's predicate list. A column the
    /// selected table does not have leaves the list unchanged.
    pub fn add_to(&self, builder: &mut ProjectionBuilder) -> Result<PredicateId, BuilderError> {
        let column = CatalogName::new(self.column.as_str())?;
        let id = builder.add_predicate();
        if let Err(err) = builder.update_predicate(id, PredicateEdit::Column(Some(column))) {
            builder.remove_predicate(id)?;
            return Err(err);
        }
        builder.update_predicate(id, PredicateEdit::Op(self.op))?;
        builder.update_predicate(id, PredicateEdit::Value(self.value.clone()))?;

        Ok(id)
    }
}
