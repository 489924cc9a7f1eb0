//! MongoDB database connection and configuration

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};

/// MongoDB database wrapper
#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    /// Connect to MongoDB
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 }, None).await?;
        tracing::info!("Connected to MongoDB: {}", db_name);

        let instance = Self { db };
        instance.ensure_indexes().await?;

        Ok(instance)
    }

    /// Get collection
    pub fn collection<T>(&self, name: &str) -> mongodb::Collection<T> {
        self.db.collection(name)
    }

    /// Ping the database to check connection
    pub async fn ping(&self) -> anyhow::Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Indexes backing path resolution, ancestor walks and child listings
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        tracing::info!("Ensuring MongoDB indexes...");

        self.create_indexes(
            collections::NODES,
            vec![
                // one live folder per canonical path
                IndexModel::builder()
                    .keys(doc! { "path": 1 })
                    .options(
                        IndexOptions::builder()
                            .name("live_folder_path".to_string())
                            .unique(true)
                            .partial_filter_expression(doc! {
                                "path": { "$exists": true },
                                "is_deleted": false,
                            })
                            .build(),
                    )
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "parent_id": 1, "node_type": 1 })
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "parent_id": 1, "name": 1 })
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "parent_id": 1, "updated_at": -1 })
                    .build(),
                IndexModel::builder().keys(doc! { "is_deleted": 1 }).build(),
            ],
        )
        .await?;

        tracing::info!("MongoDB indexes ensured");
        Ok(())
    }

    async fn create_indexes(
        &self,
        collection: &str,
        indexes: Vec<IndexModel>,
    ) -> anyhow::Result<()> {
        let coll = self.db.collection::<mongodb::bson::Document>(collection);
        coll.create_indexes(indexes, None).await?;
        Ok(())
    }
}

/// Collection names
pub mod collections {
    /// Folders and resources of the tree
    pub const NODES: &str = "nodes";
}
