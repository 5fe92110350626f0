//! Error types.
//!
//! [`ConfigError`] describes a malformed option table and is raised by
//! registration, before any parsing happens. [`ParseError`] describes a
//! problem with the user's command line; each one names the offending option
//! and the raw token it came from.

use std::fmt;

use thiserror::Error;

use crate::table::Arity;
use crate::value::ValueType;

// ── Registration errors ───────────────────────────────────────────────────────

/// A malformed option table. Developer-facing; never caused by user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("option #{index} has neither a short nor a long name")]
    Unnamed { index: usize },

    #[error("invalid short option name {name:?}")]
    InvalidShortName { name: char },

    #[error("invalid long option name {name:?}")]
    InvalidLongName { name: String },

    #[error("short option -{name} is defined more than once")]
    DuplicateShort { name: char },

    #[error("long option --{name} is defined more than once")]
    DuplicateLong { name: String },

    #[error("subcommand #{index} has no name")]
    UnnamedSubcommand { index: usize },

    #[error("invalid subcommand name {name:?}")]
    InvalidSubcommandName { name: String },

    #[error("subcommand {name} is defined more than once")]
    DuplicateSubcommand { name: String },

    #[error("subcommand {name} cannot have option names")]
    SubcommandWithOptionName { name: String },

    #[error("option {option}: action {action} does not accept arity {arity}")]
    ArityMismatch {
        option: String,
        action: &'static str,
        arity: Arity,
    },

    #[error("option {option}: list mode requires an option-argument")]
    ListWithoutArgument { option: String },

    #[error("option {option}: list delimiter set is empty")]
    EmptyDelimiters { option: String },

    #[error("option {option}: destination cannot hold a list of values")]
    NotASequence { option: String },

    #[error("option {option}: declared type {declared} does not match destination type {destination}")]
    TypeMismatch {
        option: String,
        declared: ValueType,
        destination: ValueType,
    },

    #[error("option {option}: minimum {min} is greater than maximum {max}")]
    InvertedBounds { option: String, min: f64, max: f64 },

    #[error("option {option}: minimum list length {min} is greater than maximum {max}")]
    InvertedListBounds { option: String, min: usize, max: usize },

    #[error("option {option}: length bounds must be non-negative whole numbers")]
    LengthBounds { option: String },

    #[error("option {option}: list length bounds given without list delimiters")]
    ListBoundsWithoutList { option: String },

    #[error("option {option}: {setting} given, but the option takes no argument")]
    UnusedSetting {
        option: String,
        setting: &'static str,
    },
}

// ── Conversion and range errors ───────────────────────────────────────────────

/// Failure to turn option-argument text into the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("empty {ty} argument")]
    Empty { ty: ValueType },

    #[error("invalid {ty} '{text}'")]
    Invalid { text: String, ty: ValueType },

    /// Well-formed, but outside the domain of the target type.
    #[error("'{text}' is outside the {ty} range")]
    OutOfDomain { text: String, ty: ValueType },
}

/// A value or argument length outside its configured bounds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("{value} is out of range ({})", describe_bounds(.min, .max))]
    Value {
        value: String,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("argument length {len} is out of range ({})", describe_bounds(.min, .max))]
    Length {
        len: usize,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("'{text}' is outside the {ty} range")]
    Domain { text: String, ty: ValueType },
}

fn describe_bounds(min: &Option<f64>, max: &Option<f64>) -> String {
    match (*min, *max) {
        (Some(lo), Some(hi)) => format!("expected {lo} to {hi}"),
        (Some(lo), None) => format!("expected at least {lo}"),
        (None, Some(hi)) => format!("expected at most {hi}"),
        (None, None) => "unbounded".to_owned(),
    }
}

fn describe_max(max: &Option<usize>) -> String {
    match max {
        Some(m) => m.to_string(),
        None => "any".to_owned(),
    }
}

// ── Parse errors ──────────────────────────────────────────────────────────────

/// What went wrong with one option on the command line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("unknown option")]
    UnknownOption,

    #[error("missing option-argument")]
    MissingArgument,

    #[error("unexpected option-argument")]
    UnexpectedArgument,

    #[error("unknown subcommand")]
    UnknownSubcommand,

    #[error(transparent)]
    Conversion(ConvertError),

    #[error(transparent)]
    Range(RangeError),

    #[error("{count} list items given, expected {min} to {}", describe_max(.max))]
    ListLength {
        count: usize,
        min: usize,
        max: Option<usize>,
    },
}

impl From<ConvertError> for ParseErrorKind {
    /// Domain overflow is a range problem; everything else is a conversion problem.
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::OutOfDomain { text, ty } => {
                ParseErrorKind::Range(RangeError::Domain { text, ty })
            }
            other => ParseErrorKind::Conversion(other),
        }
    }
}

impl From<RangeError> for ParseErrorKind {
    fn from(err: RangeError) -> Self {
        ParseErrorKind::Range(err)
    }
}

/// One error found while parsing a command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The option as the user spelled it, e.g. `-n` or `--number`.
    pub option: String,
    /// The raw token in which the option appeared.
    pub token: String,
    /// Index of `token` in the argument vector.
    pub index: usize,
}

impl ParseError {
    pub fn new(
        kind: impl Into<ParseErrorKind>,
        option: impl Into<String>,
        token: impl Into<String>,
        index: usize,
    ) -> Self {
        ParseError {
            kind: kind.into(),
            option: option.into(),
            token: token.into(),
            index,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnknownOption => write!(f, "unknown option: {}", self.option),
            ParseErrorKind::MissingArgument => {
                write!(f, "option {} requires an argument", self.option)
            }
            ParseErrorKind::UnexpectedArgument => {
                write!(f, "option {} doesn't allow an argument", self.option)
            }
            ParseErrorKind::UnknownSubcommand => write!(f, "unknown subcommand: {}", self.option),
            kind => write!(f, "option {}: {}", self.option, kind),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Conversion(e) => Some(e),
            ParseErrorKind::Range(e) => Some(e),
            _ => None,
        }
    }
}

/// Every error of one parse call, in detection order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    pub fn first(&self) -> Option<&ParseError> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
