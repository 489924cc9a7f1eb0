//! Listing configuration module

use serde::{Deserialize, Serialize};

use crate::models::{ResourceType, SortKey};

/// Listing configuration, loaded once at start-up and shared read-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Resource type tags accepted in `resource_types`
    #[serde(default = "default_resource_types")]
    pub resource_types: Vec<ResourceType>,

    /// Keys accepted in `sort`
    #[serde(default = "default_sort_keys")]
    pub sort_keys: Vec<SortKey>,

    /// Sort applied when the request has none
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Page size applied when the request has no limit
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Largest accepted page size
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Canonical path of the tree root, also the root folder's name
    #[serde(default = "default_root_path")]
    pub root_path: String,

    /// Upper bound on ancestor walks
    #[serde(default = "default_max_folder_depth")]
    pub max_folder_depth: usize,
}

fn default_resource_types() -> Vec<ResourceType> {
    ResourceType::ALL.to_vec()
}

fn default_sort_keys() -> Vec<SortKey> {
    SortKey::ALL.to_vec()
}

fn default_sort() -> String {
    "name".to_string()
}

fn default_limit() -> u32 {
    50
}

fn default_max_limit() -> u32 {
    100
}

fn default_root_path() -> String {
    "/".to_string()
}

fn default_max_folder_depth() -> usize {
    64
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            resource_types: default_resource_types(),
            sort_keys: default_sort_keys(),
            default_sort: default_sort(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            root_path: default_root_path(),
            max_folder_depth: default_max_folder_depth(),
        }
    }
}

impl ListingConfig {
    /// Create a new listing config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject configurations the validator could never satisfy
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.resource_types.is_empty() {
            anyhow::bail!("At least one resource type must be enabled");
        }
        if self.sort_keys.is_empty() {
            anyhow::bail!("At least one sort key must be enabled");
        }
        if self.max_limit == 0 {
            anyhow::bail!("max_limit must be positive");
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            anyhow::bail!(
                "default_limit {} must be between 1 and max_limit {}",
                self.default_limit,
                self.max_limit
            );
        }
        if self.default_sort.trim().is_empty() {
            anyhow::bail!("default_sort cannot be empty");
        }
        if self.root_path.trim().is_empty() {
            anyhow::bail!("root_path cannot be empty");
        }
        crate::services::QuerySpecValidator::new(self)
            .parse_sort(Some(&self.default_sort))
            .map_err(|e| anyhow::anyhow!("Invalid default_sort: {}", e))?;
        Ok(())
    }

    pub fn allowed_resource_types(&self) -> Vec<String> {
        self.resource_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }

    pub fn allowed_sort_keys(&self) -> Vec<String> {
        self.sort_keys
            .iter()
            .map(|k| k.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ListingConfig::default();
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.max_limit, 100);
        assert_eq!(config.root_path, "/");
        assert_eq!(config.allowed_sort_keys(), vec!["name", "createdOn", "lastUpdatedOn"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_takes_defaults() {
        let config: ListingConfig =
            serde_json::from_str(r#"{"max_limit": 20, "default_limit": 10}"#).unwrap();
        assert_eq!(config.max_limit, 20);
        assert_eq!(config.default_sort, "name");
        assert_eq!(config.resource_types.len(), 5);
    }

    #[test]
    fn test_validate_rejects_inconsistent_limits() {
        let config = ListingConfig {
            default_limit: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_default_sort() {
        let config = ListingConfig {
            default_sort: "size".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
