//! `docnav compose` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use docnav_config::Config;

use crate::error::CliError;
use crate::output::Output;
use crate::pipeline::compose_site;

/// Arguments for the compose command.
#[derive(Args)]
pub(crate) struct ComposeArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the sidebar JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ComposeArgs {
    /// Execute the compose command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, schema loading or composition fails,
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let site = compose_site(&config)?;
        let json = serde_json::to_string_pretty(&site.tree)?;

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, format!("{json}\n"))?;
                output.success(&format!(
                    "Sidebar for {} written to {} ({} links)",
                    config.site.title,
                    path.display(),
                    site.tree.link_count()
                ));
            }
            None => Term::stdout().write_line(&json)?,
        }

        Ok(())
    }
}
