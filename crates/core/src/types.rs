/// Registry asset identifiers are short, stable slugs (e.g. `"sorting-algorithms"`).
pub type AssetId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
