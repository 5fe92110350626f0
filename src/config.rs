// config.rs — Compile-time defaults and runtime parser settings.
//
// The constants here play the role of build-time switches: table validation,
// halt-on-error, and the help layout. `Settings` carries the per-parser
// overrides that a program may choose at runtime.

// Whether option tables are validated on registration.
// Always on in debug builds; release builds opt in with the `validate` feature.
pub const VALIDATE_TABLE: bool = cfg!(debug_assertions) || cfg!(feature = "validate");

// Whether parsing stops at the first error by default.
// When false, every error of one invocation is collected and reported.
pub const HALT_ON_ERROR_DEFAULT: bool = false;

// Maximum length of a line of help output.
pub const HELP_LINE_WIDTH: usize = 80;

// Minimum width of an option's description column in help output.
pub const MIN_DESCRIPTION_WIDTH: usize = 30;

// Help text shown next to the `--` entry.
pub const DOUBLE_DASH_DESCRIPTION: &str = "Arguments following this are not treated as options.";

// Program name used in diagnostics when argv[0] is missing or empty.
pub const FALLBACK_PROGRAM_NAME: &str = "optparse";

/// Runtime settings of a [`Parser`](crate::Parser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Stop at the first error instead of collecting all of them.
    pub halt_on_error: bool,
    /// Name used to prefix error reports; defaults to the basename of argv[0].
    pub program_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            halt_on_error: HALT_ON_ERROR_DEFAULT,
            program_name: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn halt_on_error(mut self, halt: bool) -> Self {
        self.halt_on_error = halt;
        self
    }

    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Resolves the program name for diagnostics: the explicit setting, else
    /// the last path component of `argv0`, else [`FALLBACK_PROGRAM_NAME`].
    pub fn resolve_program_name<'a>(&'a self, argv0: Option<&'a str>) -> &'a str {
        if let Some(name) = self.program_name.as_deref() {
            return name;
        }
        match argv0.map(last_name_from_path) {
            Some(name) if !name.is_empty() => name,
            _ => FALLBACK_PROGRAM_NAME,
        }
    }
}

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}
