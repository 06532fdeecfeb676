//! Terminal status output for the retrotile CLI.
//!
//! Conversion progress is reported as Cargo-style status lines with a
//! right-aligned coloured verb. Status goes to stderr; stdout stays free
//! for machine consumption.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled only when stderr is attached to a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Progress line, e.g. "  Converting title-screen (PCE tileset)".
    pub fn status(&self, verb: &str, message: &str) {
        self.line(GREEN, verb, message);
    }

    /// Informational line with a cyan verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.line(CYAN, verb, message);
    }

    /// Warning line. Capacity overruns land here; the pipeline keeps going.
    pub fn warning(&self, verb: &str, message: &str) {
        self.line(YELLOW, verb, message);
    }

    /// Error line. A failed resource is reported and skipped.
    pub fn error(&self, verb: &str, message: &str) {
        self.line(RED, verb, message);
    }

    fn line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(2, "palette", "palettes")` → "2 palettes".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Render a path relative to the working directory when possible.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
