//! Configuration management for the listing server

use anyhow::{Context, Result};
use folder_listing::ListingConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Folder store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    #[default]
    MongoDB,
    Memory,
}

impl FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(DatabaseType::MongoDB),
            "memory" | "mem" => Ok(DatabaseType::Memory),
            _ => Err(format!("Unknown database type: {}", s)),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Store backend (default: mongodb)
    #[serde(default)]
    pub database_type: DatabaseType,

    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database URL (default: mongodb://localhost:27017)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Database name (default: folder_listing)
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Public base URL of paging links (e.g., https://repo.example.org).
    /// If not set, derived from host and port
    pub base_url: Option<String>,

    /// API key -> user id
    #[serde(default)]
    pub api_keys: HashMap<String, String>,

    /// JSON seed of the memory backend
    pub seed_file: Option<String>,

    /// CORS allowed origins (comma-separated). If empty, any origin is allowed.
    pub cors_allowed_origins: Option<String>,

    /// Listing limits, sort keys and resource types
    #[serde(default)]
    pub listing: ListingConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "folder_listing".to_string()
}

/// Parse `key:user_id` pairs separated by commas
pub fn parse_api_keys(raw: &str) -> Result<HashMap<String, String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (key, user) = pair
                .split_once(':')
                .with_context(|| format!("Invalid API_KEYS entry '{}', expected key:user_id", pair))?;
            let (key, user) = (key.trim(), user.trim());
            if key.is_empty() || user.is_empty() {
                anyhow::bail!("Invalid API_KEYS entry '{}', expected key:user_id", pair);
            }
            Ok((key.to_string(), user.to_string()))
        })
        .collect()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_type = match std::env::var("DATABASE_TYPE") {
            Ok(s) => s.parse().map_err(anyhow::Error::msg)?,
            Err(_) => DatabaseType::default(),
        };
        let host = std::env::var("LISTING_SERVER_HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("LISTING_SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_port);
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("MONGODB_URL"))
            .unwrap_or_else(|_| default_database_url());
        let database_name = std::env::var("DATABASE_NAME")
            .or_else(|_| std::env::var("MONGODB_DATABASE"))
            .unwrap_or_else(|_| default_database_name());
        let base_url = std::env::var("BASE_URL").ok();
        let api_keys = parse_api_keys(&std::env::var("API_KEYS").unwrap_or_default())?;
        let seed_file = std::env::var("SEED_FILE").ok();
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();

        let mut listing = ListingConfig::default();
        if let Some(limit) = env_number("LISTING_DEFAULT_LIMIT")? {
            listing.default_limit = limit;
        }
        if let Some(limit) = env_number("LISTING_MAX_LIMIT")? {
            listing.max_limit = limit;
        }
        if let Ok(root) = std::env::var("LISTING_ROOT_PATH") {
            listing.root_path = root;
        }

        Ok(Self {
            database_type,
            host,
            port,
            database_url,
            database_name,
            base_url,
            api_keys,
            seed_file,
            cors_allowed_origins,
            listing,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        Ok(config)
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<()> {
        self.listing.validate()?;
        let base = self.public_base_url();
        if !url_is_absolute(&base) {
            anyhow::bail!("BASE_URL '{}' must be an absolute http(s) URL", base);
        }
        if self.api_keys.is_empty() {
            tracing::warn!("No API keys configured; every /api request will be rejected");
        }
        Ok(())
    }

    /// Base of absolute paging links
    pub fn public_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let host = if self.host == "0.0.0.0" {
                    "localhost"
                } else {
                    self.host.as_str()
                };
                format!("http://{}:{}", host, self.port)
            }
        }
    }
}

fn url_is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn env_number(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a positive integer, got '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_type: DatabaseType::default(),
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            database_name: default_database_name(),
            base_url: None,
            api_keys: HashMap::new(),
            seed_file: None,
            cors_allowed_origins: None,
            listing: ListingConfig::default(),
        }
    }
}
