//! Canonical folder paths

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ListingError, ListingResult};

/// The one separator of canonical paths
pub const SEPARATOR: char = '/';

static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/\\]+").unwrap());

/// Canonicalizes and validates folder paths
pub struct PathNormalizer;

impl PathNormalizer {
    /// Canonical form: trimmed, `/` separated, no repeated or trailing
    /// separator (except the root itself), case preserved.
    pub fn normalize(raw: &str) -> String {
        let collapsed = SEPARATOR_RUNS.replace_all(raw.trim(), "/");
        if collapsed.len() > 1 {
            if let Some(stripped) = collapsed.strip_suffix(SEPARATOR) {
                return stripped.to_string();
            }
        }
        collapsed.into_owned()
    }

    /// Accept only paths already in canonical form and return them.
    /// Non-canonical input is rejected, never silently fixed.
    pub fn validate(raw: &str) -> ListingResult<String> {
        if raw.trim().is_empty() {
            return Err(ListingError::InvalidPath {
                path: raw.to_string(),
                reason: "You need to specify path as a request parameter".to_string(),
            });
        }

        let normalized = Self::normalize(raw);
        if normalized != raw {
            let reason = if raw.trim_end().len() > 1 && raw.trim_end().ends_with(SEPARATOR) {
                "Do not pass trailing separators for paths".to_string()
            } else {
                format!("Path is not canonical, expected '{}'", normalized)
            };
            return Err(ListingError::InvalidPath {
                path: raw.to_string(),
                reason,
            });
        }

        Ok(normalized)
    }

    /// Every path from the root down to `path`, inclusive, shortest first
    pub fn ancestor_paths(path: &str) -> Vec<String> {
        let absolute = path.starts_with(SEPARATOR);
        let mut paths = Vec::new();
        if absolute {
            paths.push(SEPARATOR.to_string());
        }

        let mut current = String::new();
        for segment in path.split(SEPARATOR).filter(|s| !s.is_empty()) {
            if absolute || !current.is_empty() {
                current.push(SEPARATOR);
            }
            current.push_str(segment);
            paths.push(current.clone());
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(PathNormalizer::normalize("/a/b/"), "/a/b");
        assert_eq!(PathNormalizer::normalize("  /a//b "), "/a/b");
        assert_eq!(PathNormalizer::normalize("\\a\\B"), "/a/B");
        assert_eq!(PathNormalizer::normalize("/"), "/");
        assert_eq!(PathNormalizer::normalize("//"), "/");
    }

    #[test]
    fn test_validate_accepts_canonical_path() {
        assert_eq!(PathNormalizer::validate("/a/b").unwrap(), "/a/b");
        assert_eq!(PathNormalizer::validate("/").unwrap(), "/");
        assert_eq!(PathNormalizer::validate("/Shared/Docs").unwrap(), "/Shared/Docs");
    }

    #[test]
    fn test_validate_rejects_trailing_separator() {
        let err = PathNormalizer::validate("/a/b/").unwrap_err();
        assert!(matches!(err, ListingError::InvalidPath { .. }));
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn test_validate_rejects_empty_and_non_canonical() {
        assert!(matches!(
            PathNormalizer::validate("   ").unwrap_err(),
            ListingError::InvalidPath { .. }
        ));
        assert!(PathNormalizer::validate("").is_err());
        assert!(PathNormalizer::validate("/a//b").is_err());
        assert!(PathNormalizer::validate(" /a").is_err());
    }

    #[test]
    fn test_ancestor_paths() {
        assert_eq!(PathNormalizer::ancestor_paths("/"), vec!["/"]);
        assert_eq!(
            PathNormalizer::ancestor_paths("/a/b/c"),
            vec!["/", "/a", "/a/b", "/a/b/c"]
        );
    }
}
