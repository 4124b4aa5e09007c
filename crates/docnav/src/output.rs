//! Styled terminal output for command progress and findings.

use console::{Style, Term};
use docnav_tree::{Finding, FindingKind};

/// Writes styled lines to stderr, leaving stdout to command results.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    heading: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            heading: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg.to_owned());
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(self.red.apply_to(msg).to_string());
    }

    pub(crate) fn heading(&self, msg: &str) {
        self.line(self.heading.apply_to(msg).to_string());
    }

    /// One finding per line: location dimmed, missing pages yellow,
    /// malformed paths red.
    pub(crate) fn finding(&self, finding: &Finding) {
        self.line(self.render_finding(finding));
    }

    fn render_finding(&self, finding: &Finding) -> String {
        let kind_style = match finding.kind {
            FindingKind::MissingPage => &self.yellow,
            FindingKind::MalformedPath => &self.red,
        };
        format!(
            "{}: {} \"{}\"",
            self.dim.apply_to(&finding.location),
            kind_style.apply_to(finding.kind),
            finding.target
        )
    }

    fn line(&self, text: String) {
        // Terminal write failures are not actionable.
        let _ = self.term.write_line(&text);
    }
}
