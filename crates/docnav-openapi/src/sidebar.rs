//! Reference sidebar generation.
//!
//! Turns an [`OpenApiDocument`] into one sidebar group per tag plus the list
//! of reference pages the renderer will produce for it.

use std::path::PathBuf;

use docnav_tree::{BadgeVariant, NavEntry, NavGroup, NavLink, SplicePoint};

use crate::document::{OpenApiDocument, OpenApiError, Operation};
use crate::slug::{SlugRegistry, slugify};

/// Group label for operations without tags.
const UNTAGGED_GROUP: &str = "Operations";

/// One OpenAPI schema rendered into the reference section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenApiSource {
    /// Schema file (`.json`, `.yaml` or `.yml`).
    pub schema: PathBuf,
    /// Base URL path of the reference pages (e.g. `api/references`).
    pub base: String,
    /// Wrap the tag groups in a single group with this label.
    pub label: Option<String>,
    /// Where the generated groups go in the sidebar.
    pub splice: SplicePoint,
}

impl OpenApiSource {
    /// Root-relative base path without trailing slash (e.g. `/api/references`).
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/{}", self.base.trim_matches('/'))
    }

    /// Load the schema and generate its sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError`] if the schema cannot be loaded.
    pub fn build(&self) -> Result<ReferenceSidebar, OpenApiError> {
        let document = OpenApiDocument::load(&self.schema)?;
        Ok(generate(&document, self))
    }
}

/// Generated sidebar groups and the pages they link to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceSidebar {
    /// Groups to splice into the sidebar, in order.
    pub groups: Vec<NavGroup>,
    /// Every page generated for the schema: the overview and one per operation.
    pub pages: Vec<String>,
}

/// Generate the reference sidebar for a parsed document.
///
/// Tag groups follow the document's declared `tags` order; tags only used
/// on operations follow in order of first use; untagged operations come
/// last under `Operations`. An operation with several tags appears in each
/// of their groups. Deprecated operations carry a `Deprecated` badge.
#[must_use]
pub fn generate(document: &OpenApiDocument, source: &OpenApiSource) -> ReferenceSidebar {
    let base = source.base_path();
    let mut slugs = SlugRegistry::default();
    let mut pages = vec![base.clone()];
    let mut tag_groups: Vec<(String, Vec<NavEntry>)> = document
        .tags
        .iter()
        .map(|tag| (tag.clone(), Vec::new()))
        .collect();
    let mut untagged = Vec::new();

    for operation in &document.operations {
        let target = format!("{base}/operations/{}", slugs.unique(operation_slug(operation)));
        pages.push(target.clone());
        let entry = NavEntry::Link(operation_link(operation, target));

        if operation.tags.is_empty() {
            untagged.push(entry);
            continue;
        }
        for tag in &operation.tags {
            match tag_groups.iter_mut().find(|(name, _)| name == tag) {
                Some((_, entries)) => entries.push(entry.clone()),
                None => tag_groups.push((tag.clone(), vec![entry.clone()])),
            }
        }
    }

    if !untagged.is_empty() {
        tag_groups.push((UNTAGGED_GROUP.to_owned(), untagged));
    }

    let groups: Vec<NavGroup> = tag_groups
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(label, entries)| NavGroup::new(label, entries))
        .collect();

    tracing::info!(
        schema = %source.schema.display(),
        groups = groups.len(),
        pages = pages.len(),
        "Generated reference sidebar"
    );

    let groups = match &source.label {
        Some(label) => {
            let mut children = vec![NavEntry::link("Overview", base)];
            children.extend(groups.into_iter().map(NavEntry::Group));
            vec![NavGroup::new(label.clone(), children)]
        }
        None => groups,
    };

    ReferenceSidebar { groups, pages }
}

fn operation_slug(operation: &Operation) -> String {
    let slug = match operation.operation_id() {
        Some(id) => slugify(id),
        None => slugify(&format!("{} {}", operation.method, operation.path)),
    };
    if slug.is_empty() {
        "operation".to_owned()
    } else {
        slug
    }
}

fn operation_link(operation: &Operation, target: String) -> NavLink {
    let link = NavLink::new(operation.label(), target);
    if operation.deprecated {
        link.with_badge(BadgeVariant::Caution, "Deprecated")
    } else {
        link
    }
}
