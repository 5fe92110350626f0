//! The matching-and-dispatch engine.
//!
//! [`Parser`] owns a validated [`OptionTable`] and walks argument vectors
//! against it. Each call to [`Parser::parse`] classifies every token, resolves
//! options, acquires and validates their arguments, runs their actions, and
//! compacts the operands to the front of the vector.
//!
//! When the table holds subcommand entries, the first operand must name one of
//! them. Parsing stops there and the rest of the vector is handed back in
//! [`Outcome::subcommand`], ready for the subcommand's own parser.

pub mod classify;
mod dispatch;

use crate::config::Settings;
use crate::error::{ParseError, ParseErrors};
use crate::table::OptionTable;

pub use classify::{classify, Token};

/// Result of one parse call.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Length of the vector after compaction: argv[0] plus the operands.
    pub argc: usize,
    /// Every error found, in detection order.
    pub errors: Vec<ParseError>,
    /// Set when a callback returned [`Control::Exit`](crate::Control::Exit).
    pub exit: Option<i32>,
    /// The subcommand that ended option parsing, if any.
    pub subcommand: Option<Subcommand>,
}

/// A recognised subcommand and the tokens that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub name: String,
    /// Index of the subcommand's token in the original vector.
    pub index: usize,
    /// The subcommand's own argument vector: its name, then every token after
    /// it, untouched.
    pub args: Vec<String>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(argc)` when no error was found.
    pub fn into_result(self) -> Result<usize, ParseErrors> {
        if self.errors.is_empty() {
            Ok(self.argc)
        } else {
            Err(ParseErrors(self.errors))
        }
    }
}

/// A parser bound to one option table.
#[derive(Debug)]
pub struct Parser {
    table: OptionTable,
    settings: Settings,
}

impl Parser {
    pub fn new(table: OptionTable) -> Self {
        Self::with_settings(table, Settings::default())
    }

    pub fn with_settings(table: OptionTable, settings: Settings) -> Self {
        Parser { table, settings }
    }

    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Parses `args` in place. `args[0]` is the program name and is left
    /// alone; on return `args` holds it followed by the operands, and its
    /// length equals [`Outcome::argc`].
    pub fn parse(&self, args: &mut Vec<String>) -> Outcome {
        dispatch::run(&self.table, &self.settings, args)
    }

    /// Parses the process's own arguments. Arguments that are not valid UTF-8
    /// are converted lossily.
    pub fn parse_env(&self) -> (Vec<String>, Outcome) {
        let mut args: Vec<String> = std::env::args_os()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let outcome = self.parse(&mut args);
        (args, outcome)
    }
}
