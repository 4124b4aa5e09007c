//! Tree composition.
//!
//! Merges a statically authored sidebar with externally generated groups.
//! Groups are inserted at named [`SplicePoint`]s, after the last static
//! sibling at that nesting level.
//!
//! # Splice point names
//!
//! A splice point is a `/`-separated path of group labels ending in `end`:
//!
//! - `end` - end of the top level
//! - `Reference/end` - end of the top-level `Reference` group
//! - `Reference/CLI Tools/end` - end of `CLI Tools` inside `Reference`
//!
//! At each level the first group (by position) with a matching label is
//! used. Points are resolved against the static entries only.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{NavEntry, NavGroup, NavigationTree};

/// Marker closing every splice point name.
const END_MARKER: &str = "end";

/// Location in the static tree where generated groups are inserted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct SplicePoint {
    group_path: Vec<String>,
}

impl SplicePoint {
    /// End of the top-level sequence.
    #[must_use]
    pub fn root_end() -> Self {
        Self {
            group_path: Vec::new(),
        }
    }

    /// End of the group reached by following `labels` from the top level.
    pub fn end_of<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group_path: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Group labels leading to the splice location.
    #[must_use]
    pub fn group_path(&self) -> &[String] {
        &self.group_path
    }
}

impl Default for SplicePoint {
    fn default() -> Self {
        Self::root_end()
    }
}

impl fmt::Display for SplicePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.group_path {
            write!(f, "{label}/")?;
        }
        f.write_str(END_MARKER)
    }
}

impl FromStr for SplicePoint {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = name.split('/').collect();
        let invalid = |reason| ConfigError::InvalidSplicePoint {
            name: name.to_owned(),
            reason,
        };

        let Some((last, labels)) = segments.split_last() else {
            return Err(invalid("name is empty"));
        };
        if *last != END_MARKER {
            return Err(invalid("name must end with `end`"));
        }
        if labels.iter().any(|label| label.trim().is_empty()) {
            return Err(invalid("group label segment is empty"));
        }

        Ok(Self::end_of(labels.iter().copied()))
    }
}

impl TryFrom<String> for SplicePoint {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Generated groups keyed by splice point, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct SpliceInputs {
    points: Vec<(SplicePoint, Vec<NavGroup>)>,
}

impl SpliceInputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `groups` for insertion at `point`.
    ///
    /// Inserting at a point that already has groups appends after them.
    pub fn insert(&mut self, point: SplicePoint, groups: impl IntoIterator<Item = NavGroup>) {
        if let Some((_, existing)) = self.points.iter_mut().find(|(p, _)| *p == point) {
            existing.extend(groups);
        } else {
            self.points.push((point, groups.into_iter().collect()));
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, point: SplicePoint, groups: impl IntoIterator<Item = NavGroup>) -> Self {
        self.insert(point, groups);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total number of queued groups across all points.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.points.iter().map(|(_, groups)| groups.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SplicePoint, &[NavGroup])> {
        self.points
            .iter()
            .map(|(point, groups)| (point, groups.as_slice()))
    }
}

/// Compose the navigation tree for one build.
///
/// Static entries keep their relative order; each splice point's groups are
/// appended, in their own order, to the children of the addressed group (or
/// to the top level for `end`). Duplicate labels are kept.
///
/// # Errors
///
/// - [`ConfigError::EmptyLabel`] / [`ConfigError::EmptyTarget`] for a
///   malformed static or generated entry
/// - [`ConfigError::UnknownSplicePoint`] if a point does not resolve in the
///   static tree
/// - [`ConfigError::EmptyGroup`] if a group has no children after splicing
pub fn compose(
    static_entries: &[NavEntry],
    splices: &SpliceInputs,
) -> Result<NavigationTree, ConfigError> {
    check_entries(static_entries, "")?;

    let mut resolved = Vec::with_capacity(splices.points.len());
    for (point, groups) in splices.iter() {
        let indices = resolve(static_entries, point)?;
        for (index, group) in groups.iter().enumerate() {
            check_group(group, &format!("splice `{point}`[{index}]"))?;
        }
        tracing::debug!(point = %point, groups = groups.len(), "Resolved splice point");
        resolved.push((point, indices, groups));
    }

    let mut entries = static_entries.to_vec();
    for (point, indices, groups) in resolved {
        let siblings = children_at_mut(&mut entries, &indices)
            .ok_or_else(|| ConfigError::UnknownSplicePoint(point.to_string()))?;
        siblings.extend(groups.iter().cloned().map(NavEntry::Group));
    }

    check_non_empty_groups(&entries, "")?;

    tracing::debug!(
        entries = entries.len(),
        inserted = splices.group_count(),
        "Composed navigation tree"
    );
    Ok(NavigationTree::new(entries))
}

/// Positional location of the `index`-th child under `parent`.
fn child_position(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        format!("sidebar[{index}]")
    } else {
        format!("{parent}.items[{index}]")
    }
}

fn check_entries(entries: &[NavEntry], parent: &str) -> Result<(), ConfigError> {
    for (index, entry) in entries.iter().enumerate() {
        let position = child_position(parent, index);
        match entry {
            NavEntry::Link(link) => {
                if link.label.trim().is_empty() {
                    return Err(ConfigError::EmptyLabel(position));
                }
                if link.target.is_empty() {
                    return Err(ConfigError::EmptyTarget(position));
                }
            }
            NavEntry::Group(group) => check_group(group, &position)?,
        }
    }
    Ok(())
}

fn check_group(group: &NavGroup, position: &str) -> Result<(), ConfigError> {
    if group.label.trim().is_empty() {
        return Err(ConfigError::EmptyLabel(position.to_owned()));
    }
    check_entries(&group.children, position)
}

fn check_non_empty_groups(entries: &[NavEntry], parent: &str) -> Result<(), ConfigError> {
    for (index, entry) in entries.iter().enumerate() {
        if let NavEntry::Group(group) = entry {
            let position = child_position(parent, index);
            if group.children.is_empty() {
                return Err(ConfigError::EmptyGroup(position));
            }
            check_non_empty_groups(&group.children, &position)?;
        }
    }
    Ok(())
}

/// Resolve a splice point to the positional path of its group.
fn resolve(entries: &[NavEntry], point: &SplicePoint) -> Result<Vec<usize>, ConfigError> {
    let mut indices = Vec::with_capacity(point.group_path.len());
    let mut level = entries;

    for label in &point.group_path {
        let (index, group) = level
            .iter()
            .enumerate()
            .find_map(|(i, entry)| match entry {
                NavEntry::Group(group) if group.label == *label => Some((i, group)),
                _ => None,
            })
            .ok_or_else(|| ConfigError::UnknownSplicePoint(point.to_string()))?;
        indices.push(index);
        level = &group.children;
    }

    Ok(indices)
}

fn children_at_mut<'a>(
    entries: &'a mut Vec<NavEntry>,
    indices: &[usize],
) -> Option<&'a mut Vec<NavEntry>> {
    let mut level = entries;
    for &index in indices {
        level = match level.get_mut(index) {
            Some(NavEntry::Group(group)) => &mut group.children,
            _ => return None,
        };
    }
    Some(level)
}
