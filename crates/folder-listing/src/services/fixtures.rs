//! Shared tree fixtures for unit tests
//!
//! ```text
//! /                          (readable by everybody)
//! /Shared                    (readable by everybody)
//! /Shared/Projects           (readable by everybody) 7 templates, 5 instances
//! /Shared/Projects/Alpha     (owned by alice, private)
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::store_memory::MemoryFolderStore;
use crate::models::{FolderNode, PublicationStatus, ResourceExtract, ResourceType};
use crate::security::EVERYBODY;

pub const ROOT_ID: &str = "root";
pub const SHARED_ID: &str = "shared";
pub const PROJECTS_ID: &str = "projects";
pub const ALPHA_ID: &str = "alpha";
pub const BULK_ID: &str = "bulk";

pub const OWNER: &str = "alice";
pub const READER: &str = "bob";

pub const PROJECT_TEMPLATES: u64 = 7;
pub const PROJECT_INSTANCES: u64 = 5;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn folder(id: &str, name: &str, path: &str, parent: Option<&str>, readers: &[&str]) -> FolderNode {
    FolderNode {
        id: id.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        description: None,
        parent_id: parent.map(str::to_string),
        owned_by: OWNER.to_string(),
        readers: readers.iter().map(|r| r.to_string()).collect(),
        created_on: at(0),
        last_updated_on: at(0),
    }
}

pub fn resource(id: &str, name: &str, resource_type: ResourceType, minutes: i64) -> ResourceExtract {
    ResourceExtract {
        id: id.to_string(),
        name: name.to_string(),
        resource_type,
        description: None,
        owned_by: OWNER.to_string(),
        created_on: at(minutes),
        last_updated_on: at(1000 - minutes),
        version: None,
        publication_status: None,
        latest_version: false,
        latest_draft_version: false,
        latest_published_version: false,
    }
}

/// Template `i` of a chain of versions; even versions are drafts
fn template_version(i: u64, last: u64) -> ResourceExtract {
    let status = if i % 2 == 0 {
        PublicationStatus::Draft
    } else {
        PublicationStatus::Published
    };
    let last_published = if last % 2 == 1 { last } else { last - 1 };
    let last_draft = if last % 2 == 0 { last } else { last - 1 };
    ResourceExtract {
        version: Some(format!("0.0.{}", i)),
        publication_status: Some(status),
        latest_version: i == last,
        latest_draft_version: i == last_draft,
        latest_published_version: i == last_published,
        ..resource(&format!("tpl-{:02}", i), &format!("Template {:02}", i), ResourceType::Template, i as i64)
    }
}

pub fn sample_store() -> MemoryFolderStore {
    let mut store = MemoryFolderStore::new();
    store.insert_folder(folder(ROOT_ID, "/", "/", None, &[EVERYBODY]));
    store.insert_folder(folder(SHARED_ID, "Shared", "/Shared", Some(ROOT_ID), &[EVERYBODY]));
    store.insert_folder(folder(
        PROJECTS_ID,
        "Projects",
        "/Shared/Projects",
        Some(SHARED_ID),
        &[EVERYBODY],
    ));
    store.insert_folder(folder(ALPHA_ID, "Alpha", "/Shared/Projects/Alpha", Some(PROJECTS_ID), &[]));

    for i in 0..PROJECT_TEMPLATES {
        store.insert_resource(PROJECTS_ID, template_version(i, PROJECT_TEMPLATES - 1));
    }
    for i in 0..PROJECT_INSTANCES {
        store.insert_resource(
            PROJECTS_ID,
            resource(
                &format!("ins-{:02}", i),
                &format!("Instance {:02}", i),
                ResourceType::Instance,
                100 + i as i64,
            ),
        );
    }
    store.insert_resource(ALPHA_ID, resource("fld-00", "Secret", ResourceType::Field, 5));
    store
}

/// Root plus `/Bulk`, holding `count` unversioned templates
pub fn bulk_store(count: u64) -> MemoryFolderStore {
    let mut store = MemoryFolderStore::new();
    store.insert_folder(folder(ROOT_ID, "/", "/", None, &[EVERYBODY]));
    store.insert_folder(folder(BULK_ID, "Bulk", "/Bulk", Some(ROOT_ID), &[EVERYBODY]));
    for i in 0..count {
        store.insert_resource(
            BULK_ID,
            resource(&format!("b-{:04}", i), &format!("Item {:04}", i), ResourceType::Template, i as i64),
        );
    }
    store
}
