//! CLI error types.

use docnav_config::ConfigError;
use docnav_content::ContentError;
use docnav_openapi::OpenApiError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Compose(#[from] docnav_tree::ConfigError),

    #[error("{0}")]
    OpenApi(#[from] OpenApiError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize sidebar: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} broken link(s) found")]
    ValidationFailed(usize),
}
