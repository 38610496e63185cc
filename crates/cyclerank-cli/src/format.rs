//! Human-mode output helpers: color detection and value formatting.
//!
//! Colors are disabled when `--no-color` is set, the `NO_COLOR` environment
//! variable is present (per <https://no-color.org>), or stdout is not a TTY.
use std::io::IsTerminal as _;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

// ---------------------------------------------------------------------------
// ANSI escape sequences
// ---------------------------------------------------------------------------

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_CYAN: &str = "\x1b[36m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Presentation settings derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the `--no-color` flag and the
    /// environment.
    pub fn from_flags(no_color_flag: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
        }
    }

    /// Wraps a node id in the node color.
    pub fn node(&self, id: &str) -> String {
        self.paint(ANSI_CYAN, id)
    }

    /// Wraps a section heading in bold.
    pub fn heading(&self, text: &str) -> String {
        self.paint(ANSI_BOLD, text)
    }

    /// Dims secondary text such as "(none)".
    pub fn dim(&self, text: &str) -> String {
        self.paint(ANSI_DIM, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.colors {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Formats a cycle ratio with six decimals.
pub fn score(value: f64) -> String {
    format!("{value:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!colors_enabled(true));
        assert!(!FormatterConfig::from_flags(true).colors);
    }

    #[test]
    fn paint_is_identity_without_colors() {
        let fmt = FormatterConfig { colors: false };
        assert_eq!(fmt.node("a"), "a");
        assert_eq!(fmt.heading("scores"), "scores");
    }

    #[test]
    fn paint_wraps_with_colors() {
        let fmt = FormatterConfig { colors: true };
        assert_eq!(fmt.node("a"), "\x1b[36ma\x1b[0m");
        assert!(fmt.dim("x").ends_with(ANSI_RESET));
    }

    #[test]
    fn score_uses_six_decimals() {
        assert_eq!(score(4.0), "4.000000");
        assert_eq!(score(49.0 / 12.0), "4.083333");
    }
}
