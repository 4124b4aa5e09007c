//! Page discovery and in-content link extraction for docnav.
//!
//! Supplies the two build-side inputs of link validation:
//! - the [`PageSet`](docnav_tree::PageSet) of a content or build directory
//! - the site-internal links found in Markdown/MDX content
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use docnav_content::{extract_content_links, scan_content_pages};
//!
//! let pages = scan_content_pages(Path::new("src/content/docs"));
//! let links = extract_content_links(Path::new("src/content/docs"))?;
//! # Ok::<(), docnav_content::ContentError>(())
//! ```

mod links;
mod scanner;

pub use links::{ContentError, extract_content_links, extract_links};
pub use scanner::{PageFile, PageScanner, PageSource, scan_build_pages, scan_content_pages};
