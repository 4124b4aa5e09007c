//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::{check_site, compose_site};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Built site directory to check against (overrides config).
    #[arg(short, long)]
    build_dir: Option<PathBuf>,

    /// Only check sidebar links, not links inside content files.
    #[arg(long)]
    no_content_links: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ValidationFailed`] when any link is broken, or
    /// another error if the sidebar cannot be composed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            build_dir: self.build_dir,
            content_links: self.no_content_links.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.heading(&format!("Checking links for {}", config.site.title));
        match &config.content_resolved.build_dir {
            Some(dir) => output.info(&format!("Pages: {} (build)", dir.display())),
            None => output.info(&format!(
                "Pages: {} (content)",
                config.content_resolved.source_dir.display()
            )),
        }

        let site = compose_site(&config)?;
        let report = check_site(&config, &site)?;

        for finding in report.findings() {
            output.finding(finding);
        }

        if report.is_success() {
            output.success(&format!(
                "Checked {} links, no problems found",
                report.checked()
            ));
            return Ok(());
        }

        output.warning(&format!(
            "Checked {} links: {} missing, {} malformed",
            report.checked(),
            report.count(docnav_tree::FindingKind::MissingPage),
            report.count(docnav_tree::FindingKind::MalformedPath)
        ));
        Err(CliError::ValidationFailed(report.findings().len()))
    }
}
