//! Services module - the listing core and its store collaborators

pub mod assembler;
pub mod content;
pub mod folder_contents;
pub mod path;
pub mod paging;
pub mod query_spec;
pub mod resolver;
pub mod store;
pub mod store_memory;

// MongoDB store
pub mod folder_store_mongo;

#[cfg(test)]
pub(crate) mod fixtures;

pub use assembler::ListingResponseAssembler;
pub use content::ContentLister;
pub use folder_contents::FolderContentsService;
pub use folder_store_mongo::MongoFolderStore;
pub use path::PathNormalizer;
pub use paging::PagingLinkBuilder;
pub use query_spec::QuerySpecValidator;
pub use resolver::{FolderResolver, IdResolver, PathResolver};
pub use store::FolderStore;
pub use store_memory::{MemoryFolderStore, MemorySeed};
