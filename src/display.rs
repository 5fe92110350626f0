// display.rs — Verbosity-gated diagnostics on stderr.
//
// Parse errors are reported to the user at the point of detection through
// `displaylevel!(1, ...)`. Developer-level tracing goes through the `tracing`
// crate instead; this module only covers what the end user sees.

use std::sync::atomic::{AtomicU32, Ordering};

// 0 = no output; 1 = errors only; 2 = normal (default); 3 = verbose; 4 = debug
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Level at which parse errors are reported.
pub const LEVEL_ERRORS: u32 = 1;

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
