//! Colored terminal output for build progress.

use std::fmt::Display;

use console::{Style, Term};

/// Writes build status lines to stderr.
pub(crate) struct Output {
    term: Term,
    label: Style,
    green: Style,
    red: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan().bold(),
            green: Style::new().green(),
            red: Style::new().red(),
        }
    }

    /// Print `label: value` with a highlighted label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let _ = self
            .term
            .write_line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
