//! Folder content listing
//!
//! Lists the children of one folder of a hierarchical resource tree, with
//! type filtering, multi-key sorting, offset paging, the folder's ancestor
//! chain and RFC 5988 paging links.
//!
//! # Features
//! - Addressing by canonical path or by folder id
//! - Strict validation of every query parameter before any store access
//! - Version and publication-status filters for versioned resources
//! - MongoDB and in-memory folder stores
//! - axum routes for both entry points

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

pub use config::ListingConfig;
pub use db::MongoDb;
pub use error::{ListingError, ListingResult};

/// Authenticated user ID from auth middleware
#[derive(Clone, Debug)]
pub struct AuthenticatedUserId(pub String);

impl AuthenticatedUserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
