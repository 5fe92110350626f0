//! The option table: the registered option definitions.
//!
//! | Submodule | Responsibility |
//! |-----------|----------------|
//! | [`opt`]   | `Opt` definitions, `Action`, `Arity`, `Arg`, `Control` |
//! | [`dest`]  | `Dest<T>` handles and the `Slot` / `Counter` destination shapes |
//!
//! Registration validates every definition before any of them is added, so a
//! failed registration leaves the table as it was. Once a table is moved into a
//! [`Parser`](crate::Parser) it is only reachable through shared references.

pub mod dest;
pub mod opt;

use std::collections::HashSet;

use crate::config::VALIDATE_TABLE;
use crate::error::ConfigError;
use crate::value::ValueType;

pub use dest::{Counter, Dest, Slot};
pub use opt::{Action, Arg, Arity, Callback, Control, Opt, ParseCallback, RawCallback, VoidCallback};

/// Registered option definitions.
#[derive(Debug)]
pub struct OptionTable {
    opts: Vec<Opt>,
    validate: bool,
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionTable {
    /// An empty table; validation follows [`VALIDATE_TABLE`].
    pub fn new() -> Self {
        OptionTable {
            opts: Vec::new(),
            validate: VALIDATE_TABLE,
        }
    }

    /// Builds a table from `opts` in one registration.
    pub fn from_opts(opts: Vec<Opt>) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        table.register(opts)?;
        Ok(table)
    }

    /// Turns registration checks on or off.
    pub fn validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    pub fn is_validating(&self) -> bool {
        self.validate
    }

    /// Adds `opts` to the table. With validation enabled nothing is added
    /// unless every definition is well formed and no name collides with a
    /// definition registered earlier.
    pub fn register(&mut self, opts: Vec<Opt>) -> Result<(), ConfigError> {
        if self.validate {
            for (i, opt) in opts.iter().enumerate() {
                validate_opt(self.opts.len() + i, opt)?;
            }
            check_unique(self.opts.iter().chain(opts.iter()))?;
        }
        tracing::debug!(count = opts.len(), "registered options");
        self.opts.extend(opts);
        Ok(())
    }

    pub fn find_short(&self, name: char) -> Option<&Opt> {
        self.opts.iter().find(|o| o.short == Some(name))
    }

    pub fn find_long(&self, name: &str) -> Option<&Opt> {
        self.opts.iter().find(|o| o.long.as_deref() == Some(name))
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&Opt> {
        self.opts.iter().find(|o| o.is_subcommand() && o.command.as_deref() == Some(name))
    }

    pub fn has_subcommands(&self) -> bool {
        self.opts.iter().any(Opt::is_subcommand)
    }

    /// Subcommand entries, in registration order.
    pub fn subcommands(&self) -> impl Iterator<Item = &Opt> {
        self.opts.iter().filter(|o| o.is_subcommand())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opt> {
        self.opts.iter()
    }

    pub fn len(&self) -> usize {
        self.opts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }
}

impl<'a> IntoIterator for &'a OptionTable {
    type Item = &'a Opt;
    type IntoIter = std::slice::Iter<'a, Opt>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

fn valid_short(c: char) -> bool {
    c != '-' && c != '=' && !c.is_whitespace() && !c.is_control()
}

fn valid_long(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn valid_command(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn validate_subcommand(index: usize, opt: &Opt) -> Result<(), ConfigError> {
    let Some(name) = opt.command.as_deref() else {
        return Err(ConfigError::UnnamedSubcommand { index });
    };
    if !valid_command(name) {
        return Err(ConfigError::InvalidSubcommandName {
            name: name.to_owned(),
        });
    }
    if opt.short.is_some() || opt.long.is_some() {
        return Err(ConfigError::SubcommandWithOptionName {
            name: name.to_owned(),
        });
    }
    let unused = if opt.arity.is_some_and(|a| a != Arity::Zero) {
        Some("an option-argument")
    } else if opt.value_type.is_some() {
        Some("a value type")
    } else if !opt.bounds.is_unbounded() {
        Some("bounds")
    } else if opt.delimiters.is_some() || opt.list_len.is_some() {
        Some("list settings")
    } else if opt.dest_len.is_some() {
        Some("a length counter")
    } else {
        None
    };
    match unused {
        Some(setting) => Err(ConfigError::UnusedSetting {
            option: name.to_owned(),
            setting,
        }),
        None => Ok(()),
    }
}

fn validate_opt(index: usize, opt: &Opt) -> Result<(), ConfigError> {
    if opt.is_subcommand() {
        return validate_subcommand(index, opt);
    }
    if opt.short.is_none() && opt.long.is_none() {
        return Err(ConfigError::Unnamed { index });
    }
    if let Some(c) = opt.short.filter(|&c| !valid_short(c)) {
        return Err(ConfigError::InvalidShortName { name: c });
    }
    if let Some(name) = opt.long.as_deref().filter(|n| !valid_long(n)) {
        return Err(ConfigError::InvalidLongName {
            name: name.to_owned(),
        });
    }

    let option = opt.display_name();
    let arity = opt.get_arity();
    if !opt.action.accepts_arity(arity) {
        return Err(ConfigError::ArityMismatch {
            option,
            action: opt.action.name(),
            arity,
        });
    }

    // List mode.
    if let Some(delimiters) = opt.delimiters.as_deref() {
        if arity == Arity::Zero {
            return Err(ConfigError::ListWithoutArgument { option });
        }
        if delimiters.is_empty() {
            return Err(ConfigError::EmptyDelimiters { option });
        }
    } else if opt.list_len.is_some() {
        return Err(ConfigError::ListBoundsWithoutList { option });
    }
    if let Some(len) = opt.list_len {
        if let Some(max) = len.max.filter(|&max| max < len.min) {
            return Err(ConfigError::InvertedListBounds {
                option,
                min: len.min,
                max,
            });
        }
    }

    // Settings that only make sense for options with an argument.
    if arity == Arity::Zero {
        let unused = if opt.value_type.is_some() {
            Some("a value type")
        } else if !opt.bounds.is_unbounded() {
            Some("bounds")
        } else if opt.dest_len.is_some() {
            Some("a length counter")
        } else {
            None
        };
        if let Some(setting) = unused {
            return Err(ConfigError::UnusedSetting { option, setting });
        }
        return Ok(());
    }

    // Destination shape and type.
    if let Some(slot) = opt.action.slot() {
        let needs_sequence = opt.is_list() || matches!(opt.action, Action::Append(_));
        if needs_sequence && !slot.is_sequence() {
            return Err(ConfigError::NotASequence { option });
        }
        if let Some(declared) = opt.value_type.filter(|&t| t != slot.value_type()) {
            return Err(ConfigError::TypeMismatch {
                option,
                declared,
                destination: slot.value_type(),
            });
        }
    }

    // Bounds.
    let bounds = opt.bounds;
    if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ConfigError::InvertedBounds { option, min, max });
        }
    }
    if opt.get_value_type() == ValueType::Str {
        let is_length = |b: f64| b >= 0.0 && b.fract() == 0.0;
        if bounds.min.is_some_and(|b| !is_length(b)) || bounds.max.is_some_and(|b| !is_length(b)) {
            return Err(ConfigError::LengthBounds { option });
        }
    }
    Ok(())
}

fn check_unique<'a>(opts: impl Iterator<Item = &'a Opt>) -> Result<(), ConfigError> {
    let mut shorts = HashSet::new();
    let mut longs = HashSet::new();
    let mut commands = HashSet::new();
    for opt in opts {
        if let Some(name) = opt.command.as_deref() {
            if !commands.insert(name) {
                return Err(ConfigError::DuplicateSubcommand {
                    name: name.to_owned(),
                });
            }
        }
        if let Some(c) = opt.short {
            if !shorts.insert(c) {
                return Err(ConfigError::DuplicateShort { name: c });
            }
        }
        if let Some(name) = opt.long.as_deref() {
            if !longs.insert(name) {
                return Err(ConfigError::DuplicateLong {
                    name: name.to_owned(),
                });
            }
        }
    }
    Ok(())
}
