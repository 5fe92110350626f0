// optparse — declarative command-line option parsing
//
// A table of option definitions is registered once; each parse call walks an
// argument vector against it, runs the matched options' actions, and leaves
// the operands at the front of the vector.

#![forbid(unsafe_code)]

pub mod config;
pub mod display;
pub mod value;
pub mod error;
pub mod convert;
pub mod list;
pub mod table;
pub mod engine;
#[cfg(feature = "help")]
pub mod help;

// ── Version constants ─────────────────────────────────────────────────────────
pub const OPTPARSE_VERSION_MAJOR: u32 = 0;
pub const OPTPARSE_VERSION_MINOR: u32 = 3;
pub const OPTPARSE_VERSION_RELEASE: u32 = 0;
pub const OPTPARSE_VERSION_NUMBER: u32 =
    OPTPARSE_VERSION_MAJOR * 100 * 100 + OPTPARSE_VERSION_MINOR * 100 + OPTPARSE_VERSION_RELEASE;
pub const OPTPARSE_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the version number, e.g. `300` for 0.3.0.
pub fn version_number() -> u32 {
    OPTPARSE_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    OPTPARSE_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use config::Settings;
pub use convert::Bounds;
pub use engine::{Outcome, Parser, Subcommand};
pub use error::{ConfigError, ConvertError, ParseError, ParseErrorKind, ParseErrors, RangeError};
#[cfg(feature = "help")]
pub use help::Help;
pub use list::ListLen;
pub use table::{Action, Arg, Arity, Control, Counter, Dest, Opt, OptionTable, Slot};
pub use value::{Scalar, Value, ValueType};

/// Registers `opts` in a fresh table and returns a parser over it.
///
/// ```
/// use optparse::{Action, Dest, Opt};
///
/// let verbose = Dest::new(0u32);
/// let parser = optparse::init(vec![
///     Opt::new(Action::increment(&verbose)).short('v').long("verbose"),
/// ])
/// .unwrap();
///
/// let mut args: Vec<String> = ["prog", "-vv", "input.txt"].iter().map(|s| s.to_string()).collect();
/// let outcome = parser.parse(&mut args);
/// assert!(outcome.is_ok());
/// assert_eq!(verbose.get(), 2);
/// assert_eq!(args, ["prog", "input.txt"]);
/// ```
pub fn init(opts: Vec<Opt>) -> Result<Parser, ConfigError> {
    Ok(Parser::new(OptionTable::from_opts(opts)?))
}
