//! Colors for the progress lines and the end-of-run recap.

use owo_colors::Style;

/// Plain by default; [`Styles::colorize`] turns colors on.
#[derive(Default, Clone)]
pub struct Styles {
    /// Upgraded apps.
    pub success: Style,
    /// Per-app failure while the run is still going.
    pub warning: Style,
    /// Failed apps in the recap.
    pub error: Style,
    /// App being upgraded.
    pub step: Style,
    /// Failure reason next to a failed app.
    pub dim: Style,
    pub header: Style,
}

impl Styles {
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.step = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}
