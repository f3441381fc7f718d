//! Output formatting module

pub mod json;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::upgrade::RunSummary;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print the end-of-run recap. Suppressed when `quiet`.
    pub fn summary(&self, summary: &RunSummary) {
        if self.quiet {
            return;
        }
        println!();
        if summary.dry_run {
            self.header(&format!(
                "{} app(s) with an upgrade available (dry run, nothing triggered)",
                summary.upgradable.len()
            ));
            return;
        }
        self.header(&format!(
            "{} upgraded, {} failed",
            summary.succeeded(),
            summary.failed()
        ));
        for result in &summary.results {
            match result.outcome.error() {
                None => self.success(&result.app.name),
                Some(err) => println!(
                    "  {} {}  {}",
                    "✗".style(self.styles.error),
                    result.app.name,
                    err.to_string().style(self.styles.dim)
                ),
            }
        }
    }
}
