const ERROR_START: &str = "\x1b[01;31m";
const WARNING_START: &str = "\x1b[01;33m";
const COLOR_RESET: &str = "\x1b[m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

/// `error:` / `warning:` prefix for a diagnostic line.
pub fn prefix(level: Level, use_color: bool) -> String {
    match level {
        Level::Error => maybe_colorize("error:", ERROR_START, use_color),
        Level::Warning => maybe_colorize("warning:", WARNING_START, use_color),
    }
}

pub fn maybe_colorize(s: &str, start: &str, use_color: bool) -> String {
    if use_color {
        format!("{start}{s}{COLOR_RESET}")
    } else {
        s.to_string()
    }
}
