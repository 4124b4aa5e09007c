//! OpenAPI reference sidebar generation for docnav.
//!
//! Reads an OpenAPI 3 schema (JSON or YAML) and produces the sidebar groups
//! for its reference section, one group per tag, together with the list of
//! reference pages those groups link to.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use docnav_openapi::{OpenApiDocument, OpenApiSource, SchemaFormat, generate};
//! use docnav_tree::SplicePoint;
//!
//! let schema = r#"{"paths": {"/users": {"get": {"operationId": "listUsers", "tags": ["Users"]}}}}"#;
//! let document = OpenApiDocument::parse(schema, SchemaFormat::Json).unwrap();
//! let source = OpenApiSource {
//!     schema: PathBuf::from("openapi.json"),
//!     base: "api".to_owned(),
//!     label: None,
//!     splice: SplicePoint::root_end(),
//! };
//!
//! let sidebar = generate(&document, &source);
//! assert_eq!(sidebar.groups[0].label, "Users");
//! assert_eq!(sidebar.pages, vec!["/api", "/api/operations/listusers"]);
//! ```

mod document;
mod sidebar;
mod slug;

pub use document::{OpenApiDocument, OpenApiError, Operation, SchemaFormat};
pub use sidebar::{OpenApiSource, ReferenceSidebar, generate};
