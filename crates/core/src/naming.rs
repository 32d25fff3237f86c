//! Download filename derivation.
//!
//! The saved filename comes from, in order of preference: the explicit
//! `file_name` on the catalog record, the final path segment of the
//! resource locator when it already names a file, or the normalized asset
//! title with the configured extension appended.

use crate::asset::Asset;

/// Extract a filename from a URL by taking the last path segment.
///
/// Strips query parameters and fragments. Returns `None` when the last
/// segment does not look like a file (no `.` in it), e.g. for
/// directory-style locators.
///
/// # Examples
///
/// ```
/// use codevault_core::naming::file_name_from_locator;
///
/// assert_eq!(
///     file_name_from_locator("https://example.com/src/stack.cpp?raw=1"),
///     Some("stack.cpp".to_string())
/// );
/// assert_eq!(file_name_from_locator("https://example.com/assets/"), None);
/// ```
pub fn file_name_from_locator(locator: &str) -> Option<String> {
    let clean = locator.split('?').next().unwrap_or(locator);
    let clean = clean.split('#').next().unwrap_or(clean);

    let path = clean
        .strip_prefix("https://")
        .or_else(|| clean.strip_prefix("http://"))
        .map(|rest| rest.find('/').map(|i| &rest[i..]).unwrap_or(""))
        .unwrap_or(clean);

    path.rsplit('/')
        .find(|s| !s.is_empty())
        .filter(|s| s.contains('.'))
        .map(|s| s.to_string())
}

/// Normalize a title into a filename stem: lowercase, whitespace runs
/// collapsed to single hyphens.
fn title_slug(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// The filename a download of `asset` should be saved under.
///
/// # Examples
///
/// ```
/// use codevault_core::asset::RawAssetEntry;
/// use codevault_core::naming::suggested_file_name;
///
/// let asset = RawAssetEntry {
///     id: "lib".into(),
///     title: "Library Management System".into(),
///     resource_locator: "https://example.com/assets/lib-v2/".into(),
///     literal_allow_list: vec![],
///     pattern_family: vec![],
///     max_downloads_per_session: 3,
///     file_extension: "zip".into(),
///     file_name: None,
///     single_use: false,
/// }
/// .compile()
/// .unwrap();
///
/// assert_eq!(suggested_file_name(&asset), "library-management-system.zip");
/// ```
pub fn suggested_file_name(asset: &Asset) -> String {
    if let Some(name) = &asset.file_name {
        return name.clone();
    }
    if let Some(name) = file_name_from_locator(&asset.resource_locator) {
        return name;
    }
    let extension = asset.file_extension.trim_start_matches('.');
    format!("{}.{extension}", title_slug(&asset.title))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, DEFAULT_MAX_DOWNLOADS};
    use std::collections::HashSet;

    fn asset(title: &str, locator: &str, file_name: Option<&str>) -> Asset {
        Asset {
            id: "a".into(),
            title: title.into(),
            resource_locator: locator.into(),
            literal_allow_list: HashSet::new(),
            pattern_family: Vec::new(),
            max_downloads_per_session: DEFAULT_MAX_DOWNLOADS,
            file_extension: "zip".into(),
            file_name: file_name.map(String::from),
            single_use: false,
        }
    }

    #[test]
    fn explicit_file_name_wins() {
        let a = asset(
            "Stack Implementation",
            "https://example.com/src/other.cpp",
            Some("stack.cpp"),
        );
        assert_eq!(suggested_file_name(&a), "stack.cpp");
    }

    #[test]
    fn locator_segment_used_when_it_names_a_file() {
        let a = asset("Stack Implementation", "https://example.com/src/stack.cpp", None);
        assert_eq!(suggested_file_name(&a), "stack.cpp");
    }

    #[test]
    fn title_derived_when_locator_is_directory_style() {
        let a = asset(
            "Library Management System",
            "https://example.com/assets/library/",
            None,
        );
        assert_eq!(suggested_file_name(&a), "library-management-system.zip");
    }

    #[test]
    fn extension_leading_dot_not_doubled() {
        let mut a = asset("Heap", "https://example.com/assets/", None);
        a.file_extension = ".cpp".into();
        assert_eq!(suggested_file_name(&a), "heap.cpp");
    }

    #[test]
    fn locator_query_and_fragment_stripped() {
        assert_eq!(
            file_name_from_locator("https://example.com/a/b.zip?tok=1#frag"),
            Some("b.zip".to_string())
        );
    }

    #[test]
    fn bare_domain_yields_none() {
        assert_eq!(file_name_from_locator("https://example.com"), None);
        assert_eq!(file_name_from_locator("https://example.com/"), None);
    }
}
