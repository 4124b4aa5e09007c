//! In-content link extraction.
//!
//! Parses Markdown/MDX sources with `pulldown-cmark` and collects the
//! destinations of links that point inside the site. External URLs, e-mail
//! autolinks and same-page fragments are not site pages and are skipped.
//! Images reference static assets rather than pages and are not collected.
//! Relative destinations are kept so the validator can report them as
//! malformed.

use std::fs;
use std::path::{Path, PathBuf};

use docnav_tree::ContentLink;
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};

use crate::scanner::PageScanner;

/// Error returned when content files cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extract site-internal page link destinations from one Markdown source.
///
/// `file` is only used as the reported location.
#[must_use]
pub fn extract_links(file: &Path, source: &str) -> Vec<ContentLink> {
    let line_starts = line_starts(source);
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;

    Parser::new_ext(source, options)
        .into_offset_iter()
        .filter_map(|(event, range)| {
            let dest = match event {
                Event::Start(Tag::Link {
                    link_type, dest_url, ..
                }) if link_type != LinkType::Email => dest_url,
                _ => return None,
            };
            if is_external(&dest) || dest.starts_with('#') {
                return None;
            }
            let line = line_starts.partition_point(|&start| start <= range.start);
            Some(ContentLink::new(file, line, dest.into_string()))
        })
        .collect()
}

/// Extract links from every content file under `dir`, in scan order.
///
/// Locations are reported relative to `dir`.
///
/// # Errors
///
/// Returns [`ContentError::Io`] if a content file cannot be read.
pub fn extract_content_links(dir: &Path) -> Result<Vec<ContentLink>, ContentError> {
    let mut links = Vec::new();

    for page in PageScanner::content(dir.to_path_buf()).scan() {
        let source = fs::read_to_string(&page.path).map_err(|source| ContentError::Io {
            path: page.path.clone(),
            source,
        })?;
        let found = extract_links(&page.relative_path, &source);
        tracing::debug!(
            file = %page.relative_path.display(),
            links = found.len(),
            "Extracted links"
        );
        links.extend(found);
    }

    tracing::info!(dir = %dir.display(), links = links.len(), "Extracted content links");
    Ok(links)
}

/// Byte offsets at which each line starts.
fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Has a URL scheme (`https:`, `mailto:`) or is protocol-relative (`//host`).
fn is_external(dest: &str) -> bool {
    if dest.starts_with("//") {
        return true;
    }
    let Some((scheme, _)) = dest.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
