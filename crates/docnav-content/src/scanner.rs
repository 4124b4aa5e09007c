//! Page discovery by filesystem walking.
//!
//! Maps files to the root-relative URL paths the site will serve:
//! - `index.md` -> `/`
//! - `guide.md` -> `/guide`
//! - `domain/index.mdx` -> `/domain`
//! - `domain/setup.html` -> `/domain/setup`

use std::fs;
use std::path::{Path, PathBuf};

use docnav_tree::PageSet;

/// What kind of tree is being scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSource {
    /// Markdown sources (`.md`, `.mdx`).
    Content,
    /// Built HTML output (`.html`); `404.html` is not a page.
    Build,
}

impl PageSource {
    fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Content => &["md", "mdx"],
            Self::Build => &["html"],
        }
    }

    fn is_excluded(self, file_name: &str) -> bool {
        matches!(self, Self::Build) && file_name.eq_ignore_ascii_case("404.html")
    }
}

/// A file that becomes a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageFile {
    /// Root-relative URL path (e.g. `/guides/setup`).
    pub url_path: String,
    /// Path relative to the scanned root.
    pub relative_path: PathBuf,
    /// Full path on disk.
    pub path: PathBuf,
}

/// Walks a content or build directory and lists its pages.
///
/// Hidden files and directories are skipped. Entries are visited in file
/// name order so results are stable across runs.
pub struct PageScanner {
    root: PathBuf,
    source: PageSource,
}

impl PageScanner {
    #[must_use]
    pub fn new(root: PathBuf, source: PageSource) -> Self {
        Self { root, source }
    }

    /// Scanner for a Markdown content directory.
    #[must_use]
    pub fn content(root: PathBuf) -> Self {
        Self::new(root, PageSource::Content)
    }

    /// Scanner for a built output directory.
    #[must_use]
    pub fn build(root: PathBuf) -> Self {
        Self::new(root, PageSource::Build)
    }

    /// Scan the filesystem and return page files.
    ///
    /// Returns an empty Vec if the root directory doesn't exist.
    #[must_use]
    pub fn scan(&self) -> Vec<PageFile> {
        let mut pages = Vec::new();
        if self.root.is_dir() {
            self.scan_directory(&self.root, Path::new(""), &mut pages);
        } else {
            tracing::warn!(root = %self.root.display(), "Page directory does not exist");
        }
        tracing::debug!(root = %self.root.display(), pages = pages.len(), "Scanned pages");
        pages
    }

    /// URL paths of every page.
    #[must_use]
    pub fn page_set(&self) -> PageSet {
        self.scan().into_iter().map(|page| page.url_path).collect()
    }

    fn scan_directory(&self, dir: &Path, relative: &Path, pages: &mut Vec<PageFile>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e, is_dir)
            })
            .collect();
        entries.sort_by_key(|(e, _)| e.file_name());

        for (entry, is_dir) in entries {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let child_relative = relative.join(&name);

            if is_dir {
                self.scan_directory(&path, &child_relative, pages);
                continue;
            }

            let has_page_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| self.source.extensions().contains(&e));
            if !has_page_extension || self.source.is_excluded(&name_str) {
                continue;
            }

            pages.push(PageFile {
                url_path: file_path_to_url(&child_relative),
                relative_path: child_relative,
                path,
            });
        }
    }
}

/// Pages of a Markdown content directory.
#[must_use]
pub fn scan_content_pages(dir: &Path) -> PageSet {
    PageScanner::content(dir.to_path_buf()).page_set()
}

/// Pages of a built output directory.
#[must_use]
pub fn scan_build_pages(dir: &Path) -> PageSet {
    PageScanner::build(dir.to_path_buf()).page_set()
}

/// Convert a path relative to the scanned root into a URL path.
pub(crate) fn file_path_to_url(rel_path: &Path) -> String {
    let stem_path = rel_path.with_extension("");
    let segments: Vec<String> = stem_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let segments = match segments.split_last() {
        Some((last, parents)) if last == "index" => parents,
        _ => &segments[..],
    };

    format!("/{}", segments.join("/"))
}
