//! Folder and child extract models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type tag of a node in the resource tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Folder,
    Field,
    Element,
    Template,
    Instance,
}

impl ResourceType {
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Folder,
        ResourceType::Field,
        ResourceType::Element,
        ResourceType::Template,
        ResourceType::Instance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Folder => "folder",
            ResourceType::Field => "field",
            ResourceType::Element => "element",
            ResourceType::Template => "template",
            ResourceType::Instance => "instance",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid resource type: {}", s))
    }
}

/// Publication status of a versioned resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Draft,
    Published,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Published => "published",
        }
    }
}

/// A folder node of the tree, as used for resolution and path info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    /// Canonical path of the folder
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub owned_by: String,
    /// User ids granted read access; `"*"` grants everybody
    #[serde(default, skip_serializing)]
    pub readers: Vec<String>,
    pub created_on: DateTime<Utc>,
    pub last_updated_on: DateTime<Utc>,
}

impl FolderNode {
    /// The tree root is recognized by its well-known name
    pub fn is_root(&self, root_name: &str) -> bool {
        self.name == root_name
    }
}

/// Lightweight projection of a child node used in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceExtract {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owned_by: String,
    pub created_on: DateTime<Utc>,
    pub last_updated_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_status: Option<PublicationStatus>,
    #[serde(default)]
    pub latest_version: bool,
    #[serde(default)]
    pub latest_draft_version: bool,
    #[serde(default)]
    pub latest_published_version: bool,
}

/// Folders from the tree root down to the addressed folder
pub type AncestorChain = Vec<FolderNode>;

impl From<&FolderNode> for ResourceExtract {
    fn from(f: &FolderNode) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
            resource_type: ResourceType::Folder,
            description: f.description.clone(),
            owned_by: f.owned_by.clone(),
            created_on: f.created_on,
            last_updated_on: f.last_updated_on,
            version: None,
            publication_status: None,
            latest_version: false,
            latest_draft_version: false,
            latest_published_version: false,
        }
    }
}
