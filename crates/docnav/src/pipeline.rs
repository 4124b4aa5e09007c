//! Shared build steps for the CLI commands.
//!
//! Both commands compose the same sidebar: the configured static entries
//! with every OpenAPI schema's reference groups spliced in.

use docnav_config::Config;
use docnav_content::{extract_content_links, scan_build_pages, scan_content_pages};
use docnav_tree::{
    NavigationTree, PageSet, SpliceInputs, ValidationReport, compose, validate_with,
};

use crate::error::CliError;

/// Composed sidebar plus the reference pages generated alongside it.
pub(crate) struct ComposedSite {
    pub(crate) tree: NavigationTree,
    /// Pages the OpenAPI sources produce; they have no Markdown source.
    pub(crate) generated_pages: Vec<String>,
}

/// Generate reference groups for every OpenAPI source and compose the tree.
pub(crate) fn compose_site(config: &Config) -> Result<ComposedSite, CliError> {
    let mut splices = SpliceInputs::new();
    let mut generated_pages = Vec::new();

    for source in &config.openapi_resolved {
        let sidebar = source.build()?;
        splices.insert(source.splice.clone(), sidebar.groups);
        generated_pages.extend(sidebar.pages);
    }

    let tree = compose(&config.sidebar, &splices)?;
    tracing::info!(
        entries = tree.entries().len(),
        links = tree.link_count(),
        generated_pages = generated_pages.len(),
        "Composed sidebar"
    );

    Ok(ComposedSite {
        tree,
        generated_pages,
    })
}

/// Pages the site serves.
///
/// A build directory is authoritative when configured. Otherwise the
/// content directory is scanned and the generated reference pages added.
pub(crate) fn site_pages(config: &Config, site: &ComposedSite) -> PageSet {
    match &config.content_resolved.build_dir {
        Some(build_dir) => scan_build_pages(build_dir),
        None => {
            let mut pages = scan_content_pages(&config.content_resolved.source_dir);
            pages.extend(&site.generated_pages);
            pages
        }
    }
}

/// Validate the composed sidebar, and content links when enabled.
pub(crate) fn check_site(
    config: &Config,
    site: &ComposedSite,
) -> Result<ValidationReport, CliError> {
    let pages = site_pages(config, site);
    let content_links = if config.validate.content_links {
        extract_content_links(&config.content_resolved.source_dir)?
    } else {
        Vec::new()
    };

    Ok(validate_with(
        &site.tree,
        &pages,
        &content_links,
        &config.validate.options(),
    ))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use docnav_config::CONFIG_FILENAME;
    use docnav_tree::{FindingKind, NavEntry};
    use pretty_assertions::assert_eq;

    use super::*;

    const OPENAPI_JSON: &str = r#"{
        "openapi": "3.1.0",
        "info": { "title": "Discovery" },
        "paths": {
            "/tasks": { "get": { "operationId": "list_tasks", "summary": "List Tasks", "tags": ["tasks"] } }
        }
    }"#;

    const SITE_TOML: &str = r#"
[site]
title = "Discovery"

[[sidebar]]
label = "Overview"
link = "/overview"

[[sidebar]]
label = "Reference"
items = [{ label = "Architecture", link = "/architecture" }]

[[openapi]]
schema = "openapi.json"
base = "api/references"
splice = "Reference/end"
"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_fixture() -> (tempfile::TempDir, Config) {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, CONFIG_FILENAME, SITE_TOML);
        write(root, "openapi.json", OPENAPI_JSON);
        write(root, "src/content/docs/overview.md", "See [tasks](/tasks).\n");
        write(root, "src/content/docs/architecture.md", "# Architecture\n");
        let config = Config::load(Some(&root.join(CONFIG_FILENAME)), None).unwrap();
        (temp_dir, config)
    }

    #[test]
    fn test_compose_site_splices_reference_groups() {
        let (_temp_dir, config) = site_fixture();

        let site = compose_site(&config).unwrap();

        assert_eq!(
            site.tree.entries()[1],
            NavEntry::group(
                "Reference",
                vec![
                    NavEntry::link("Architecture", "/architecture"),
                    NavEntry::group(
                        "tasks",
                        vec![NavEntry::link(
                            "List Tasks",
                            "/api/references/operations/list-tasks"
                        )]
                    ),
                ]
            )
        );
        assert_eq!(
            site.generated_pages,
            vec!["/api/references", "/api/references/operations/list-tasks"]
        );
    }

    #[test]
    fn test_check_site_reports_broken_content_link() {
        let (_temp_dir, config) = site_fixture();
        let site = compose_site(&config).unwrap();

        let report = check_site(&config, &site).unwrap();

        assert_eq!(report.count(FindingKind::MissingPage), 1);
        assert_eq!(
            report.findings()[0].to_string(),
            "overview.md:1: missing page \"/tasks\""
        );
    }

    #[test]
    fn test_check_site_without_content_links_passes() {
        let (_temp_dir, mut config) = site_fixture();
        config.validate.content_links = false;
        let site = compose_site(&config).unwrap();

        let report = check_site(&config, &site).unwrap();

        assert!(report.is_success());
        assert_eq!(report.checked(), 3);
    }

    #[test]
    fn test_check_site_ignores_image_assets() {
        let (temp_dir, config) = site_fixture();
        write(
            temp_dir.path(),
            "src/content/docs/architecture.md",
            "# Architecture\n\n![flow](/diagrams/flow.svg)\n\nSee [overview](/overview).\n",
        );
        let site = compose_site(&config).unwrap();

        let report = check_site(&config, &site).unwrap();

        let targets: Vec<_> = report.findings().iter().map(|f| f.target.as_str()).collect();
        assert_eq!(targets, vec!["/tasks"]);
        assert_eq!(report.checked(), 5);
    }

    #[test]
    fn test_site_pages_prefers_build_dir() {
        let (temp_dir, mut config) = site_fixture();
        let build_dir = temp_dir.path().join("dist");
        write(&build_dir, "overview/index.html", "");
        config.content_resolved.build_dir = Some(build_dir);
        let site = compose_site(&config).unwrap();

        let pages = site_pages(&config, &site);

        assert_eq!(pages.iter().collect::<Vec<_>>(), vec!["/overview"]);
    }

    #[test]
    fn test_compose_site_missing_schema_fails() {
        let (temp_dir, config) = site_fixture();
        fs::remove_file(temp_dir.path().join("openapi.json")).unwrap();

        let err = compose_site(&config).err().unwrap();

        assert!(matches!(err, CliError::OpenApi(_)));
    }
}
