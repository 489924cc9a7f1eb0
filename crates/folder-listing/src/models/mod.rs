//! Data models for folder content listing

mod folder;
mod node_mongo;
mod query;
mod response;

pub use folder::*;
pub use query::*;
pub use response::*;

/// MongoDB document shapes
pub mod mongo {
    pub use super::node_mongo::*;
}
