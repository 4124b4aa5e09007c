//! Operation slugs for reference page paths.

use std::collections::{HashMap, HashSet};

/// Slugify an operation identifier.
///
/// Lowercases ASCII letters, keeps digits, and collapses every run of other
/// characters into a single hyphen. Leading and trailing hyphens are dropped.
pub(crate) fn slugify(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut pending_hyphen = false;

    for ch in source.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if !matches!(ch, '{' | '}') {
            pending_hyphen = true;
        }
    }

    slug
}

/// Hands out unique slugs, suffixing repeats with `-1`, `-2`, ...
///
/// A suffix already taken by a literal slug is skipped.
#[derive(Debug, Default)]
pub(crate) struct SlugRegistry {
    seen: HashSet<String>,
    suffixes: HashMap<String, usize>,
}

impl SlugRegistry {
    pub(crate) fn unique(&mut self, slug: String) -> String {
        if self.seen.insert(slug.clone()) {
            return slug;
        }
        let count = self.suffixes.entry(slug.clone()).or_insert(0);
        loop {
            *count += 1;
            let candidate = format!("{slug}-{count}");
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
