//! Asset model and registry loading.
//!
//! The registry is a static JSON table, one entry per downloadable item.
//! Raw entries are schema-validated, then compiled into [`Asset`]s (pattern
//! strings become [`regex::Regex`] values). Assets are immutable after load.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::AssetId;

/// Default per-session download quota when a registry entry omits it.
pub const DEFAULT_MAX_DOWNLOADS: u32 = 3;

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A downloadable resource gated by an authorization code.
#[derive(Debug, Clone)]
pub struct Asset {
    /// Stable registry identifier.
    pub id: AssetId,
    /// Human-readable title, also the basis for the derived filename.
    pub title: String,
    /// URL the binary resource is fetched from.
    pub resource_locator: String,
    /// Codes accepted verbatim for this asset.
    pub literal_allow_list: HashSet<String>,
    /// Compiled patterns defining accepted code shapes.
    pub pattern_family: Vec<Regex>,
    /// Maximum successful downloads per session.
    pub max_downloads_per_session: u32,
    /// Extension appended when the filename is derived from the title.
    pub file_extension: String,
    /// Explicit filename supplied by the catalog record, if any.
    pub file_name: Option<String>,
    /// Whether an accepted code is consumed on first use.
    pub single_use: bool,
}

// ---------------------------------------------------------------------------
// Raw registry entries
// ---------------------------------------------------------------------------

/// One registry-file entry before pattern compilation.
#[derive(Debug, Deserialize, Validate)]
pub struct RawAssetEntry {
    #[validate(length(min = 1, message = "asset id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, message = "asset title must not be empty"))]
    pub title: String,

    #[validate(url(message = "resource_locator must be a valid URL"))]
    pub resource_locator: String,

    #[serde(default)]
    pub literal_allow_list: Vec<String>,

    #[serde(default)]
    pub pattern_family: Vec<String>,

    #[serde(default = "default_max_downloads")]
    #[validate(range(min = 1, message = "max_downloads_per_session must be at least 1"))]
    pub max_downloads_per_session: u32,

    #[validate(length(min = 1, message = "file_extension must not be empty"))]
    pub file_extension: String,

    #[serde(default)]
    pub file_name: Option<String>,

    #[serde(default)]
    pub single_use: bool,
}

fn default_max_downloads() -> u32 {
    DEFAULT_MAX_DOWNLOADS
}

impl RawAssetEntry {
    /// Validate the entry and compile its pattern family.
    pub fn compile(self) -> Result<Asset, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("Asset '{}': {e}", self.id)))?;

        let mut pattern_family = Vec::with_capacity(self.pattern_family.len());
        for pattern in &self.pattern_family {
            let compiled = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
                asset_id: self.id.clone(),
                pattern: pattern.clone(),
                source,
            })?;
            pattern_family.push(compiled);
        }

        Ok(Asset {
            id: self.id,
            title: self.title,
            resource_locator: self.resource_locator,
            literal_allow_list: self.literal_allow_list.into_iter().collect(),
            pattern_family,
            max_downloads_per_session: self.max_downloads_per_session,
            file_extension: self.file_extension,
            file_name: self.file_name,
            single_use: self.single_use,
        })
    }
}

// ---------------------------------------------------------------------------
// AssetRegistry
// ---------------------------------------------------------------------------

/// The loaded, immutable asset table.
///
/// Preserves catalog order for display while allowing id lookup.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, Asset>,
    order: Vec<AssetId>,
}

impl AssetRegistry {
    /// Build a registry from already-compiled assets.
    ///
    /// Rejects duplicate ids: each downloadable item must have exactly one
    /// entry.
    pub fn new(assets: Vec<Asset>) -> Result<Self, CoreError> {
        let mut registry = Self::default();
        for asset in assets {
            if registry.assets.contains_key(&asset.id) {
                return Err(CoreError::DuplicateAsset(asset.id));
            }
            registry.order.push(asset.id.clone());
            registry.assets.insert(asset.id.clone(), asset);
        }
        Ok(registry)
    }

    /// Parse and compile a registry from a JSON reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CoreError> {
        let entries: Vec<RawAssetEntry> = serde_json::from_reader(reader)?;
        let assets = entries
            .into_iter()
            .map(RawAssetEntry::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(assets)
    }

    /// Load a registry from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Look up an asset by id.
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.get(id)
    }

    /// Iterate assets in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.order.iter().filter_map(|id| self.assets.get(id))
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn entry(id: &str) -> RawAssetEntry {
        RawAssetEntry {
            id: id.into(),
            title: "Sorting Algorithms".into(),
            resource_locator: "https://example.com/assets/sorting.zip".into(),
            literal_allow_list: vec!["DAA_SORT_2024".into()],
            pattern_family: vec![r"^ALGO_[A-Z]+_24$".into()],
            max_downloads_per_session: DEFAULT_MAX_DOWNLOADS,
            file_extension: "zip".into(),
            file_name: None,
            single_use: false,
        }
    }

    #[test]
    fn compile_valid_entry() {
        let asset = entry("sorting").compile().unwrap();
        assert_eq!(asset.id, "sorting");
        assert!(asset.literal_allow_list.contains("DAA_SORT_2024"));
        assert!(asset.pattern_family[0].is_match("ALGO_SORT_24"));
    }

    #[test]
    fn compile_rejects_bad_pattern() {
        let mut raw = entry("sorting");
        raw.pattern_family = vec!["[unclosed".into()];
        assert_matches!(raw.compile(), Err(CoreError::InvalidPattern { .. }));
    }

    #[test]
    fn compile_rejects_non_url_locator() {
        let mut raw = entry("sorting");
        raw.resource_locator = "not-a-url".into();
        assert_matches!(raw.compile(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn compile_rejects_zero_quota() {
        let mut raw = entry("sorting");
        raw.max_downloads_per_session = 0;
        assert_matches!(raw.compile(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let a = entry("sorting").compile().unwrap();
        let b = entry("sorting").compile().unwrap();
        assert_matches!(
            AssetRegistry::new(vec![a, b]),
            Err(CoreError::DuplicateAsset(id)) if id == "sorting"
        );
    }

    #[test]
    fn registry_preserves_catalog_order() {
        let assets = vec![
            entry("b").compile().unwrap(),
            entry("a").compile().unwrap(),
        ];
        let registry = AssetRegistry::new(assets).unwrap();
        let ids: Vec<_> = registry.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn from_reader_applies_defaults() {
        let json = r#"[{
            "id": "stack",
            "title": "Stack Implementation",
            "resource_locator": "https://example.com/src/stack.cpp",
            "file_extension": "cpp"
        }]"#;
        let registry = AssetRegistry::from_reader(json.as_bytes()).unwrap();
        let asset = registry.get("stack").unwrap();
        assert_eq!(asset.max_downloads_per_session, DEFAULT_MAX_DOWNLOADS);
        assert!(!asset.single_use);
        assert!(asset.literal_allow_list.is_empty());
        assert!(asset.pattern_family.is_empty());
    }
}
