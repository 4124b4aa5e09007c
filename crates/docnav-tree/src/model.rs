//! Navigation entry model.
//!
//! A navigation tree is an ordered sequence of [`NavEntry`] nodes. Each node
//! is either a [`NavLink`] leaf pointing at a page or a [`NavGroup`] holding
//! further entries. Order is display order and is never re-sorted.
//!
//! The serde shape matches the sidebar records consumed by the renderer:
//!
//! ```json
//! [
//!   { "label": "Overview", "link": "/overview" },
//!   { "label": "Guides", "items": [
//!     { "label": "Tasks", "link": "/guides/tasks",
//!       "badge": { "variant": "success", "text": "New" } }
//!   ] }
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// Visual variant of a [`Badge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Note,
    Tip,
    Caution,
    Danger,
    Success,
}

/// Short decoration shown next to a link label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Badge {
    /// Visual variant.
    pub variant: BadgeVariant,
    /// Badge text.
    pub text: String,
}

/// Leaf entry linking to a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Display label.
    pub label: String,
    /// Root-relative page path (e.g. `/guides/setup`).
    #[serde(rename = "link")]
    pub target: String,
    /// Optional badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl NavLink {
    /// Create a link without a badge.
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            badge: None,
        }
    }

    /// Attach a badge to the link.
    #[must_use]
    pub fn with_badge(mut self, variant: BadgeVariant, text: impl Into<String>) -> Self {
        self.badge = Some(Badge {
            variant,
            text: text.into(),
        });
        self
    }
}

/// Entry grouping other entries under a label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavGroup {
    /// Display label.
    pub label: String,
    /// Child entries in display order.
    #[serde(rename = "items")]
    pub children: Vec<NavEntry>,
}

impl NavGroup {
    pub fn new(label: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

/// Navigation tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavEntry {
    Link(NavLink),
    Group(NavGroup),
}

impl NavEntry {
    /// Shorthand for a plain link entry.
    pub fn link(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Link(NavLink::new(label, target))
    }

    /// Shorthand for a group entry.
    pub fn group(label: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self::Group(NavGroup::new(label, children))
    }

    /// Display label of the entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link(link) => &link.label,
            Self::Group(group) => &group.label,
        }
    }

    /// Nesting depth of this entry's subtree.
    ///
    /// A link is `1`; a group is one more than its deepest child, so an empty
    /// group is `1` as well. This is the height below the entry, not its own
    /// position in a tree; for that see [`NavigationTree::levels`] (or
    /// [`FlatLink::level`] for links).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Link(_) => 1,
            Self::Group(group) => 1 + group.children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

impl From<NavLink> for NavEntry {
    fn from(link: NavLink) -> Self {
        Self::Link(link)
    }
}

impl From<NavGroup> for NavEntry {
    fn from(group: NavGroup) -> Self {
        Self::Group(group)
    }
}

/// Link visited by [`NavigationTree::flatten_with_trail`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatLink<'a> {
    /// Labels from the top-level ancestor down to the link itself.
    pub trail: Vec<&'a str>,
    /// Nesting level (top-level entries are level 0).
    pub level: usize,
    /// The link.
    pub link: &'a NavLink,
}

/// Ordered top-level navigation of one site build.
///
/// Produced once per build (usually by [`compose`](crate::compose)) and not
/// mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationTree {
    entries: Vec<NavEntry>,
}

impl NavigationTree {
    #[must_use]
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self { entries }
    }

    /// Top-level entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<NavEntry> {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum nesting depth of the tree (`0` when empty).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.iter().map(NavEntry::depth).max().unwrap_or(0)
    }

    /// All links in depth-first, group-then-children order.
    #[must_use]
    pub fn flatten(&self) -> Vec<&NavLink> {
        self.flatten_with_trail()
            .into_iter()
            .map(|flat| flat.link)
            .collect()
    }

    /// Like [`flatten`](Self::flatten), keeping each link's label trail and level.
    #[must_use]
    pub fn flatten_with_trail(&self) -> Vec<FlatLink<'_>> {
        let mut out = Vec::new();
        let mut trail = Vec::new();
        collect_links(&self.entries, &mut trail, &mut out);
        out
    }

    /// Every entry, groups included, with its nesting level (top level is
    /// `0`), in depth-first display order.
    #[must_use]
    pub fn levels(&self) -> Vec<(usize, &NavEntry)> {
        fn collect<'a>(
            entries: &'a [NavEntry],
            level: usize,
            out: &mut Vec<(usize, &'a NavEntry)>,
        ) {
            for entry in entries {
                out.push((level, entry));
                if let NavEntry::Group(group) = entry {
                    collect(&group.children, level + 1, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.entries, 0, &mut out);
        out
    }

    /// Number of links in the tree.
    #[must_use]
    pub fn link_count(&self) -> usize {
        fn count(entries: &[NavEntry]) -> usize {
            entries
                .iter()
                .map(|entry| match entry {
                    NavEntry::Link(_) => 1,
                    NavEntry::Group(group) => count(&group.children),
                })
                .sum()
        }
        count(&self.entries)
    }
}

fn collect_links<'a>(
    entries: &'a [NavEntry],
    trail: &mut Vec<&'a str>,
    out: &mut Vec<FlatLink<'a>>,
) {
    for entry in entries {
        match entry {
            NavEntry::Link(link) => {
                let mut link_trail = trail.clone();
                link_trail.push(&link.label);
                out.push(FlatLink {
                    trail: link_trail,
                    level: trail.len(),
                    link,
                });
            }
            NavEntry::Group(group) => {
                trail.push(&group.label);
                collect_links(&group.children, trail, out);
                trail.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(NavigationTree: Send, Sync);

    fn sample_tree() -> NavigationTree {
        NavigationTree::new(vec![
            NavEntry::link("Overview", "/overview"),
            NavEntry::group(
                "Reference",
                vec![
                    NavEntry::group(
                        "CLI Tools",
                        vec![NavEntry::link(
                            "discovery-schema",
                            "/references/cli/discovery-schema",
                        )],
                    ),
                    NavEntry::link("Errors", "/references/errors"),
                ],
            ),
        ])
    }

    #[test]
    fn test_flatten_is_depth_first_in_display_order() {
        let tree = sample_tree();

        let targets: Vec<_> = tree.flatten().iter().map(|l| l.target.as_str()).collect();

        assert_eq!(
            targets,
            vec![
                "/overview",
                "/references/cli/discovery-schema",
                "/references/errors"
            ]
        );
    }

    #[test]
    fn test_flatten_with_trail_records_ancestors_and_level() {
        let tree = sample_tree();

        let flat = tree.flatten_with_trail();

        assert_eq!(flat[0].trail, vec!["Overview"]);
        assert_eq!(flat[0].level, 0);
        assert_eq!(
            flat[1].trail,
            vec!["Reference", "CLI Tools", "discovery-schema"]
        );
        assert_eq!(flat[1].level, 2);
        assert_eq!(flat[2].trail, vec!["Reference", "Errors"]);
        assert_eq!(flat[2].level, 1);
    }

    #[test]
    fn test_flatten_keeps_duplicate_labels() {
        let tree = NavigationTree::new(vec![
            NavEntry::link("Same", "/a"),
            NavEntry::link("Same", "/b"),
        ]);

        assert_eq!(tree.flatten().len(), 2);
        assert_eq!(tree.link_count(), 2);
    }

    #[test]
    fn test_depth() {
        let tree = sample_tree();

        assert_eq!(tree.entries()[0].depth(), 1);
        assert_eq!(tree.entries()[1].depth(), 3);
        assert_eq!(tree.depth(), 3);
        assert_eq!(NavEntry::group("Empty", vec![]).depth(), 1);
        assert_eq!(NavigationTree::default().depth(), 0);
    }

    #[test]
    fn test_levels_include_groups() {
        let tree = sample_tree();

        let levels: Vec<_> = tree
            .levels()
            .into_iter()
            .map(|(level, entry)| (level, entry.label()))
            .collect();

        assert_eq!(
            levels,
            vec![
                (0, "Overview"),
                (0, "Reference"),
                (1, "CLI Tools"),
                (2, "discovery-schema"),
                (1, "Errors"),
            ]
        );
    }

    #[test]
    fn test_link_count_ignores_groups() {
        assert_eq!(sample_tree().link_count(), 3);
    }

    #[test]
    fn test_serialize_sidebar_shape() {
        let tree = NavigationTree::new(vec![NavEntry::group(
            "Guides",
            vec![
                NavLink::new("Tasks", "/guides/tasks")
                    .with_badge(BadgeVariant::Success, "New")
                    .into(),
            ],
        )]);

        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "label": "Guides", "items": [
                    { "label": "Tasks", "link": "/guides/tasks",
                      "badge": { "variant": "success", "text": "New" } }
                ] }
            ])
        );
    }

    #[test]
    fn test_deserialize_link_and_group() {
        let json = r#"[
            {"label": "Overview", "link": "/overview"},
            {"label": "Reference", "items": []}
        ]"#;

        let tree: NavigationTree = serde_json::from_str(json).unwrap();

        assert_eq!(
            tree.entries(),
            &[
                NavEntry::link("Overview", "/overview"),
                NavEntry::group("Reference", vec![]),
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_link_with_items() {
        let json = r#"[{"label": "Both", "link": "/x", "items": []}]"#;

        let result: Result<NavigationTree, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_badge_variant() {
        let json = r#"[{"label": "A", "link": "/a", "badge": {"variant": "shiny", "text": "x"}}]"#;

        let result: Result<NavigationTree, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }
}
