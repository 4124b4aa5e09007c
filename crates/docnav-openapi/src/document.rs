//! OpenAPI document loading.
//!
//! Only the parts that shape the reference sidebar are read: `info.title`,
//! the top-level `tags` list and the operations under `paths`. Everything
//! else in the document is ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Error returned when an OpenAPI document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum OpenApiError {
    /// Schema file could not be read.
    #[error("Failed to read OpenAPI schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON syntax or shape error.
    #[error("Invalid OpenAPI JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML syntax or shape error.
    #[error("Invalid OpenAPI YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Schema file extension is neither JSON nor YAML.
    #[error("Unsupported OpenAPI schema format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Serialization format of a schema file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Declared tag from the document's top-level `tags` list.
#[derive(Clone, Debug, Default, Deserialize)]
struct RawTag {
    name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    info: RawInfo,
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(default)]
    paths: OrderedPaths,
}

/// The `paths` object, keeping document order.
#[derive(Debug, Default)]
struct OrderedPaths(Vec<(String, RawPathItem)>);

impl<'de> Deserialize<'de> for OrderedPaths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = OrderedPaths;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of path items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut paths = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawPathItem>()? {
                    paths.push(entry);
                }
                Ok(OrderedPaths(paths))
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

/// Path item; `parameters`, `$ref` and extensions are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawPathItem {
    get: Option<RawOperation>,
    put: Option<RawOperation>,
    post: Option<RawOperation>,
    delete: Option<RawOperation>,
    options: Option<RawOperation>,
    head: Option<RawOperation>,
    patch: Option<RawOperation>,
    trace: Option<RawOperation>,
}

impl RawPathItem {
    /// Operations in fixed method order.
    fn into_operations(self) -> impl Iterator<Item = (&'static str, RawOperation)> {
        [
            ("GET", self.get),
            ("PUT", self.put),
            ("POST", self.post),
            ("DELETE", self.delete),
            ("OPTIONS", self.options),
            ("HEAD", self.head),
            ("PATCH", self.patch),
            ("TRACE", self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperation {
    operation_id: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    deprecated: bool,
}

/// One API operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    /// Uppercase HTTP method.
    pub method: String,
    /// Path template as written in the document.
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

impl Operation {
    /// Operation id, unless blank.
    #[must_use]
    pub fn operation_id(&self) -> Option<&str> {
        self.operation_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Sidebar label: summary, then operation id, then `METHOD /path`.
    #[must_use]
    pub fn label(&self) -> String {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.operation_id())
            .map_or_else(|| format!("{} {}", self.method, self.path), str::to_owned)
    }
}

/// Parsed OpenAPI document, reduced to what the sidebar needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenApiDocument {
    /// API title from `info.title`.
    pub title: String,
    /// Declared tag names in document order.
    pub tags: Vec<String>,
    /// Operations in document order.
    pub operations: Vec<Operation>,
}

impl OpenApiDocument {
    /// Load a schema file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError`] if the file cannot be read, has an unknown
    /// extension, or does not parse.
    pub fn load(path: &Path) -> Result<Self, OpenApiError> {
        let format = SchemaFormat::from_path(path)
            .ok_or_else(|| OpenApiError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| OpenApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            title = %document.title,
            operations = document.operations.len(),
            "Loaded OpenAPI schema"
        );
        Ok(document)
    }

    /// Parse a schema from a string.
    ///
    /// # Errors
    ///
    /// Returns [`OpenApiError::Json`] or [`OpenApiError::Yaml`] on malformed input.
    pub fn parse(content: &str, format: SchemaFormat) -> Result<Self, OpenApiError> {
        let raw: RawDocument = match format {
            SchemaFormat::Json => serde_json::from_str(content)?,
            SchemaFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDocument) -> Self {
        let mut operations = Vec::new();

        for (path, item) in raw.paths.0 {
            for (method, op) in item.into_operations() {
                operations.push(Operation {
                    method: method.to_owned(),
                    path: path.clone(),
                    operation_id: op.operation_id,
                    summary: op.summary,
                    tags: op.tags,
                    deprecated: op.deprecated,
                });
            }
        }

        Self {
            title: raw.info.title,
            tags: raw.tags.into_iter().map(|tag| tag.name).collect(),
            operations,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PETSTORE_JSON: &str = r#"{
        "openapi": "3.0.0",
        "info": { "title": "Petstore", "version": "1.0" },
        "tags": [{ "name": "pets" }],
        "paths": {
            "/pets": {
                "post": { "operationId": "createPet", "tags": ["pets"] },
                "get": { "operationId": "listPets", "summary": "List pets", "tags": ["pets"] },
                "parameters": []
            },
            "/health": {
                "get": { "deprecated": true }
            }
        }
    }"#;

    #[test]
    fn test_parse_json_keeps_document_order() {
        let doc = OpenApiDocument::parse(PETSTORE_JSON, SchemaFormat::Json).unwrap();

        assert_eq!(doc.title, "Petstore");
        assert_eq!(doc.tags, vec!["pets"]);
        let ops: Vec<_> = doc
            .operations
            .iter()
            .map(|op| format!("{} {}", op.method, op.path))
            .collect();
        // Method order within a path item is fixed (get before post)
        assert_eq!(ops, vec!["GET /pets", "POST /pets", "GET /health"]);
        assert!(doc.operations[2].deprecated);
    }

    #[test]
    fn test_parse_yaml_with_numeric_response_codes() {
        let yaml = r"
openapi: 3.0.0
info:
  title: Discovery
paths:
  /workflows:
    get:
      operationId: listWorkflows
      tags: [workflows]
      responses:
        200:
          description: OK
  /tasks:
    get:
      operationId: listTasks
      tags: [tasks]
";

        let doc = OpenApiDocument::parse(yaml, SchemaFormat::Yaml).unwrap();

        let ids: Vec<_> = doc
            .operations
            .iter()
            .filter_map(|op| op.operation_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["listWorkflows", "listTasks"]);
    }

    #[test]
    fn test_operation_label_fallbacks() {
        let doc = OpenApiDocument::parse(PETSTORE_JSON, SchemaFormat::Json).unwrap();

        assert_eq!(doc.operations[0].label(), "List pets");
        assert_eq!(doc.operations[1].label(), "createPet");
        assert_eq!(doc.operations[2].label(), "GET /health");
    }

    #[test]
    fn test_blank_operation_id_falls_back_to_method_and_path() {
        let json = r#"{ "paths": { "/runs": { "post": { "operationId": "", "summary": " " } } } }"#;
        let doc = OpenApiDocument::parse(json, SchemaFormat::Json).unwrap();

        assert_eq!(doc.operations[0].operation_id(), None);
        assert_eq!(doc.operations[0].label(), "POST /runs");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = OpenApiDocument::parse("{ not json", SchemaFormat::Json);

        assert!(matches!(result, Err(OpenApiError::Json(_))));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = OpenApiDocument::load(Path::new("schema.txt")).unwrap_err();

        assert!(matches!(err, OpenApiError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = OpenApiDocument::load(&temp_dir.path().join("openapi.json")).unwrap_err();

        assert!(matches!(err, OpenApiError::Io { .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SchemaFormat::from_path(Path::new("src/openapi.json")),
            Some(SchemaFormat::Json)
        );
        assert_eq!(
            SchemaFormat::from_path(Path::new("api.yml")),
            Some(SchemaFormat::Yaml)
        );
        assert_eq!(SchemaFormat::from_path(Path::new("api")), None);
    }
}
