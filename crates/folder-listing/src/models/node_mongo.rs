//! Tree node model for MongoDB
//!
//! Folders and resources share one collection. Folders carry their canonical
//! `path`; every non-root node points at its folder through `parent_id`.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::{FolderNode, PublicationStatus, ResourceExtract, ResourceType};

/// Node document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub node_type: ResourceType,
    pub name: String,
    /// Canonical path, folders only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ObjectId>,
    #[serde(default)]
    pub description: Option<String>,
    pub owned_by: String,
    #[serde(default)]
    pub readers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_status: Option<PublicationStatus>,
    #[serde(default)]
    pub latest_version: bool,
    #[serde(default)]
    pub latest_draft_version: bool,
    #[serde(default)]
    pub latest_published_version: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl NodeDocument {
    /// Fields read for extracts; resource bodies never leave the store
    pub fn extract_projection() -> bson::Document {
        bson::doc! {
            "_id": 1,
            "node_type": 1,
            "name": 1,
            "description": 1,
            "owned_by": 1,
            "version": 1,
            "publication_status": 1,
            "latest_version": 1,
            "latest_draft_version": 1,
            "latest_published_version": 1,
            "created_at": 1,
            "updated_at": 1,
        }
    }

    /// Folder view of this node, `None` when it is not a folder
    pub fn into_folder(self) -> Option<FolderNode> {
        if self.node_type != ResourceType::Folder {
            return None;
        }
        Some(FolderNode {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: self.name,
            path: self.path.unwrap_or_default(),
            description: self.description,
            parent_id: self.parent_id.map(|id| id.to_hex()),
            owned_by: self.owned_by,
            readers: self.readers,
            created_on: self.created_at,
            last_updated_on: self.updated_at,
        })
    }
}

impl From<NodeDocument> for ResourceExtract {
    fn from(n: NodeDocument) -> Self {
        Self {
            id: n.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: n.name,
            resource_type: n.node_type,
            description: n.description,
            owned_by: n.owned_by,
            created_on: n.created_at,
            last_updated_on: n.updated_at,
            version: n.version,
            publication_status: n.publication_status,
            latest_version: n.latest_version,
            latest_draft_version: n.latest_draft_version,
            latest_published_version: n.latest_published_version,
        }
    }
}
