//! Navigation tree model, composition and link validation.
//!
//! This crate provides:
//! - [`NavEntry`] / [`NavigationTree`]: the sidebar data model
//! - [`compose`]: splicing generated groups into a hand-authored sidebar
//! - [`validate`]: checking every link against the pages a build produces
//!
//! Everything here is pure: no I/O, no shared state.
//!
//! # Example
//!
//! ```
//! use docnav_tree::{NavEntry, NavGroup, PageSet, SpliceInputs, compose, validate};
//!
//! let sidebar = vec![
//!     NavEntry::link("Overview", "/overview"),
//!     NavEntry::group("Reference", vec![]),
//! ];
//! let generated = NavGroup::new("Users", vec![NavEntry::link("List Users", "/api/users")]);
//! let splices = SpliceInputs::new().with("Reference/end".parse().unwrap(), [generated]);
//!
//! let tree = compose(&sidebar, &splices).unwrap();
//! assert_eq!(tree.depth(), 3);
//!
//! let pages: PageSet = ["/overview"].into_iter().collect();
//! let report = validate(&tree, &pages, &[]);
//! assert_eq!(report.findings().len(), 1);
//! assert_eq!(
//!     report.findings()[0].to_string(),
//!     r#"sidebar: Reference > Users > List Users: missing page "/api/users""#
//! );
//! ```

mod compose;
mod error;
mod model;
mod validate;

pub use compose::{SpliceInputs, SplicePoint, compose};
pub use error::ConfigError;
pub use model::{Badge, BadgeVariant, FlatLink, NavEntry, NavGroup, NavLink, NavigationTree};
pub use validate::{
    ContentLink, Finding, FindingKind, PageSet, SourceLocation, ValidateOptions, ValidationReport,
    validate, validate_with,
};
