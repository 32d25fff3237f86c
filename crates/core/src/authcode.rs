//! Authorization-code validation.
//!
//! Pure with respect to its inputs: callers pass the asset, the submitted
//! code, and a read-only snapshot of the consumed-code set. No I/O happens
//! here; recording consumption is the caller's job after a successful
//! download.

use std::collections::HashSet;

use crate::asset::Asset;

/// Why a submitted code was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRejection {
    /// The code was empty or whitespace-only.
    Required,
    /// The code matched neither the allow-list nor the pattern family.
    Invalid,
    /// The code was consumed earlier (single-use asset, or a stale code
    /// the asset policy no longer accepts).
    AlreadyUsed,
}

/// Validate a submitted code against an asset's rule set.
///
/// The code is trimmed first. A non-empty code is checked in order:
/// membership in the literal allow-list, then a match against any pattern
/// in the family; the first match wins. On a single-use asset, a matching
/// code that already appears in `used_codes` is rejected as
/// [`CodeRejection::AlreadyUsed`]. A non-matching code that appears in
/// `used_codes` also reports `AlreadyUsed` rather than the generic
/// `Invalid`, so users who re-enter a consumed code get the specific error.
pub fn validate_code(
    asset: &Asset,
    code: &str,
    used_codes: &HashSet<String>,
) -> Result<(), CodeRejection> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CodeRejection::Required);
    }

    let matched = asset.literal_allow_list.contains(code)
        || asset.pattern_family.iter().any(|p| p.is_match(code));

    if matched {
        if asset.single_use && used_codes.contains(code) {
            return Err(CodeRejection::AlreadyUsed);
        }
        return Ok(());
    }

    if used_codes.contains(code) {
        Err(CodeRejection::AlreadyUsed)
    } else {
        Err(CodeRejection::Invalid)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn asset(single_use: bool) -> Asset {
        Asset {
            id: "sorting-algorithms".into(),
            title: "Sorting Algorithms".into(),
            resource_locator: "https://example.com/assets/sorting.zip".into(),
            literal_allow_list: ["SORT_ADV_101".to_string()].into_iter().collect(),
            pattern_family: vec![Regex::new(r"^DAA_[A-Z]+_2024$").unwrap()],
            max_downloads_per_session: 3,
            file_extension: "zip".into(),
            file_name: None,
            single_use,
        }
    }

    fn no_used() -> HashSet<String> {
        HashSet::new()
    }

    // -- empty input ---------------------------------------------------------

    #[test]
    fn empty_code_is_required() {
        assert_eq!(
            validate_code(&asset(false), "", &no_used()),
            Err(CodeRejection::Required)
        );
    }

    #[test]
    fn whitespace_code_is_required() {
        assert_eq!(
            validate_code(&asset(false), "   ", &no_used()),
            Err(CodeRejection::Required)
        );
    }

    // -- matching ------------------------------------------------------------

    #[test]
    fn literal_member_accepted() {
        assert_eq!(validate_code(&asset(false), "SORT_ADV_101", &no_used()), Ok(()));
    }

    #[test]
    fn pattern_match_accepted_without_literal_entry() {
        assert_eq!(
            validate_code(&asset(false), "DAA_SORT_2024", &no_used()),
            Ok(())
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            validate_code(&asset(false), "  DAA_SORT_2024  ", &no_used()),
            Ok(())
        );
    }

    #[test]
    fn unknown_code_invalid() {
        assert_eq!(
            validate_code(&asset(false), "WRONG123", &no_used()),
            Err(CodeRejection::Invalid)
        );
    }

    // -- consumed codes ------------------------------------------------------

    #[test]
    fn consumed_non_matching_code_reports_already_used() {
        let used: HashSet<String> = ["OLD_CODE_99".to_string()].into_iter().collect();
        assert_eq!(
            validate_code(&asset(false), "OLD_CODE_99", &used),
            Err(CodeRejection::AlreadyUsed)
        );
    }

    #[test]
    fn reusable_asset_accepts_consumed_matching_code() {
        let used: HashSet<String> = ["DAA_SORT_2024".to_string()].into_iter().collect();
        assert_eq!(validate_code(&asset(false), "DAA_SORT_2024", &used), Ok(()));
    }

    #[test]
    fn single_use_asset_rejects_consumed_matching_code() {
        let used: HashSet<String> = ["DAA_SORT_2024".to_string()].into_iter().collect();
        assert_eq!(
            validate_code(&asset(true), "DAA_SORT_2024", &used),
            Err(CodeRejection::AlreadyUsed)
        );
    }
}
