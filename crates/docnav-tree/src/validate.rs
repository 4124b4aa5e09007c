//! Link validation.
//!
//! Checks every navigation link, and any in-content links extracted by the
//! content pipeline, against the set of pages a build produces. The walk is
//! exhaustive: every problem is reported, nothing short-circuits.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::model::NavigationTree;

/// Where a checked link was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceLocation {
    /// Navigation link, identified by its label trail.
    Navigation {
        /// Labels from the top-level ancestor down to the link.
        trail: Vec<String>,
    },
    /// Link inside a content file.
    Content {
        /// Content file path.
        file: PathBuf,
        /// 1-based line number.
        line: usize,
    },
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigation { trail } => write!(f, "sidebar: {}", trail.join(" > ")),
            Self::Content { file, line } => write!(f, "{}:{line}", file.display()),
        }
    }
}

/// In-content link handed over by the content pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentLink {
    pub location: SourceLocation,
    pub target: String,
}

impl ContentLink {
    pub fn new(file: impl Into<PathBuf>, line: usize, target: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::Content {
                file: file.into(),
                line,
            },
            target: target.into(),
        }
    }
}

/// Kind of validation problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// Target is well-formed but no page exists at that path.
    MissingPage,
    /// Target is empty, not root-relative, or contains whitespace.
    MalformedPath,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPage => f.write_str("missing page"),
            Self::MalformedPath => f.write_str("malformed path"),
        }
    }
}

/// One unresolved link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub location: SourceLocation,
    pub target: String,
    pub kind: FindingKind,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} \"{}\"", self.location, self.kind, self.target)
    }
}

/// Root-relative paths produced by a build.
///
/// Paths are stored normalized: query and fragment removed, trailing slash
/// removed except for `/` itself. Lookups normalize the probe the same way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSet {
    paths: BTreeSet<String>,
}

impl PageSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a page exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(normalize_path(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Normalized paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut pages = Self::new();
        pages.extend(iter);
        pages
    }
}

impl<S: AsRef<str>> Extend<S> for PageSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.paths.extend(
            iter.into_iter()
                .map(|path| normalize_path(path.as_ref()).to_owned()),
        );
    }
}

/// Strip query, fragment and trailing slash from a page path.
fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Validation settings.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Well-formed targets at or under any of these paths are not checked
    /// against the page set. Matching is by whole path segment, so
    /// `/api/internal` covers `/api/internal/health` but not
    /// `/api/internals-guide`.
    pub ignore_prefixes: Vec<String>,
}

impl ValidateOptions {
    fn is_ignored(&self, target: &str) -> bool {
        self.ignore_prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .any(|prefix| {
                target
                    .strip_prefix(prefix.trim_end_matches('/'))
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '#', '?']))
            })
    }
}

/// Result of a validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    checked: usize,
}

impl ValidationReport {
    /// True when no finding was produced.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings: navigation links first in display order, then content links
    /// in the order they were supplied.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Number of links examined.
    #[must_use]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Number of findings of the given kind.
    #[must_use]
    pub fn count(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }
}

/// Validate navigation and content links against `pages`.
#[must_use]
pub fn validate(
    tree: &NavigationTree,
    pages: &PageSet,
    content_links: &[ContentLink],
) -> ValidationReport {
    validate_with(tree, pages, content_links, &ValidateOptions::default())
}

/// [`validate`] with explicit options.
#[must_use]
pub fn validate_with(
    tree: &NavigationTree,
    pages: &PageSet,
    content_links: &[ContentLink],
    options: &ValidateOptions,
) -> ValidationReport {
    let mut findings = Vec::new();
    let mut checked = 0;

    for flat in tree.flatten_with_trail() {
        checked += 1;
        if let Some(kind) = classify(&flat.link.target, pages, options) {
            findings.push(Finding {
                location: SourceLocation::Navigation {
                    trail: flat.trail.iter().map(|label| (*label).to_owned()).collect(),
                },
                target: flat.link.target.clone(),
                kind,
            });
        }
    }

    for link in content_links {
        checked += 1;
        if let Some(kind) = classify(&link.target, pages, options) {
            findings.push(Finding {
                location: link.location.clone(),
                target: link.target.clone(),
                kind,
            });
        }
    }

    tracing::info!(
        checked,
        findings = findings.len(),
        pages = pages.len(),
        "Validated links"
    );
    ValidationReport { findings, checked }
}

fn classify(target: &str, pages: &PageSet, options: &ValidateOptions) -> Option<FindingKind> {
    if is_malformed(target) {
        return Some(FindingKind::MalformedPath);
    }
    if options.is_ignored(target) || pages.contains(target) {
        return None;
    }
    Some(FindingKind::MissingPage)
}

/// Empty, not root-relative, or containing unescaped whitespace.
fn is_malformed(target: &str) -> bool {
    !target.starts_with('/') || target.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::NavEntry;

    fn pages(paths: &[&str]) -> PageSet {
        paths.iter().collect()
    }

    #[test]
    fn test_missing_page_scenario() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("Overview", "/overview"),
            NavEntry::group("API", vec![NavEntry::link("Orders", "/api/orders")]),
        ]);
        let pages = pages(&["/overview", "/api/users"]);

        let report = validate(&tree, &pages, &[]);

        assert_eq!(
            report.findings(),
            &[Finding {
                location: SourceLocation::Navigation {
                    trail: vec!["API".to_owned(), "Orders".to_owned()],
                },
                target: "/api/orders".to_owned(),
                kind: FindingKind::MissingPage,
            }]
        );
    }

    #[test]
    fn test_present_target_has_no_finding() {
        let tree = NavigationTree::new(vec![NavEntry::link("Users", "/api/users")]);

        let report = validate(&tree, &pages(&["/api/users"]), &[]);

        assert!(report.is_success());
        assert_eq!(report.checked(), 1);
    }

    #[test]
    fn test_malformed_targets() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("Empty", ""),
            NavEntry::link("Relative", "guides/setup"),
            NavEntry::link("Space", "/guides/my page"),
            NavEntry::link("Tab", "/guides/\tx"),
            NavEntry::link("Escaped", "/guides/my%20page"),
        ]);
        let pages = pages(&["/guides/my%20page"]);

        let report = validate(&tree, &pages, &[]);

        let kinds: Vec<_> = report.findings().iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FindingKind::MalformedPath; 4]);
        assert_eq!(report.count(FindingKind::MalformedPath), 4);
    }

    #[test]
    fn test_malformed_is_not_also_missing() {
        let tree = NavigationTree::new(vec![NavEntry::link("Relative", "nowhere")]);

        let report = validate(&tree, &PageSet::new(), &[]);

        assert_eq!(report.findings().len(), 1);
        assert_eq!(report.findings()[0].kind, FindingKind::MalformedPath);
    }

    #[test]
    fn test_validation_is_exhaustive() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("A", "/a"),
            NavEntry::group(
                "G",
                vec![
                    NavEntry::link("B", "/b"),
                    NavEntry::group("H", vec![NavEntry::link("C", "c")]),
                ],
            ),
            NavEntry::link("D", "/d"),
        ]);
        let pages = pages(&["/a"]);

        let report = validate(&tree, &pages, &[]);

        // 4 links, 1 well-formed and present
        assert_eq!(report.findings().len(), tree.flatten().len() - 1);
        let targets: Vec<_> = report.findings().iter().map(|f| f.target.as_str()).collect();
        assert_eq!(targets, vec!["/b", "c", "/d"]);
    }

    #[test]
    fn test_duplicate_targets_each_reported() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("One", "/missing"),
            NavEntry::link("Two", "/missing"),
        ]);

        let report = validate(&tree, &PageSet::new(), &[]);

        assert_eq!(report.count(FindingKind::MissingPage), 2);
    }

    #[test]
    fn test_content_links_follow_navigation_findings() {
        let tree = NavigationTree::new(vec![NavEntry::link("Gone", "/gone")]);
        let links = vec![
            ContentLink::new("guides/setup.md", 3, "/overview"),
            ContentLink::new("guides/setup.md", 9, "/nope"),
            ContentLink::new("guides/setup.md", 12, "relative.md"),
        ];

        let report = validate(&tree, &pages(&["/overview"]), &links);

        let lines: Vec<_> = report.findings().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                r#"sidebar: Gone: missing page "/gone""#,
                r#"guides/setup.md:9: missing page "/nope""#,
                r#"guides/setup.md:12: malformed path "relative.md""#,
            ]
        );
        assert_eq!(report.checked(), 4);
    }

    #[test]
    fn test_ignore_prefixes_skip_missing_but_not_malformed() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("Internal", "/api/internal/health"),
            NavEntry::link("Bad", "/api/internal/ x"),
        ]);
        let options = ValidateOptions {
            ignore_prefixes: vec!["/api/internal".to_owned()],
        };

        let report = validate_with(&tree, &PageSet::new(), &[], &options);

        assert_eq!(report.findings().len(), 1);
        assert_eq!(report.findings()[0].kind, FindingKind::MalformedPath);
    }

    #[test]
    fn test_ignore_prefix_matches_whole_segments() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("Internal", "/api/internal"),
            NavEntry::link("Health", "/api/internal/health#status"),
            NavEntry::link("Query", "/api/internal?v=2"),
            NavEntry::link("Guide", "/api/internals-guide"),
        ]);
        let options = ValidateOptions {
            ignore_prefixes: vec!["/api/internal/".to_owned(), String::new()],
        };

        let report = validate_with(&tree, &PageSet::new(), &[], &options);

        assert_eq!(
            report.findings(),
            &[Finding {
                location: SourceLocation::Navigation {
                    trail: vec!["Guide".to_owned()],
                },
                target: "/api/internals-guide".to_owned(),
                kind: FindingKind::MissingPage,
            }]
        );
    }

    #[test]
    fn test_page_set_normalizes_trailing_slash_and_fragment() {
        let pages = pages(&["/", "/overview/", "/guides/setup"]);

        assert!(pages.contains("/"));
        assert!(pages.contains("/overview"));
        assert!(pages.contains("/overview/#intro"));
        assert!(pages.contains("/guides/setup?tab=cli"));
        assert!(!pages.contains("/guides"));
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_root_link_resolves() {
        let tree = NavigationTree::new(vec![NavEntry::link("Home", "/")]);

        assert!(validate(&tree, &pages(&["/"]), &[]).is_success());
    }

    #[test]
    fn test_empty_tree_is_success() {
        let report = validate(&NavigationTree::default(), &PageSet::new(), &[]);

        assert!(report.is_success());
        assert_eq!(report.checked(), 0);
    }
}
