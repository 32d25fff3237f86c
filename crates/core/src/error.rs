use crate::types::AssetId;

/// Core-domain error type shared by the registry and validation modules.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid code pattern '{pattern}' for asset '{asset_id}': {source}")]
    InvalidPattern {
        asset_id: AssetId,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Duplicate asset id in registry: '{0}'")]
    DuplicateAsset(AssetId),

    #[error("Unknown locale: '{0}'")]
    UnknownLocale(String),

    #[error("Failed to read registry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse registry: {0}")]
    Parse(#[from] serde_json::Error),
}
