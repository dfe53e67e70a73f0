use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuning
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("movie_db");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates query indexes for the collections this service reads.
    /// None of these are unique constraints; insert semantics stay unchanged.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::{doc, Document};
        use mongodb::IndexModel;

        log::info!("Creating database indexes...");

        let indexes: [(&str, Document); 5] = [
            ("users", doc! { "email": 1 }),
            ("movies", doc! { "movieId": 1 }),
            ("movies", doc! { "addedBy": 1 }),
            ("reviews", doc! { "movieId": 1, "createdAt": -1 }),
            ("watchlists", doc! { "movieId": 1, "userEmail": 1 }),
        ];

        for (collection_name, keys) in indexes {
            let collection = self.db.collection::<Document>(collection_name);
            let model = IndexModel::builder().keys(keys.clone()).build();
            match collection.create_index(model).await {
                Ok(_) => log::info!("   Index created: {} {}", collection_name, keys),
                Err(e) => log::debug!("   Index already exists: {}", e),
            }
        }

        log::info!("Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// Connection helper for the ignored integration tests; each caller names its
/// own database so tests do not share collections.
#[cfg(test)]
pub(crate) async fn connect_test_db(name: &str) -> MongoDB {
    dotenv::dotenv().ok();
    let uri = format!("mongodb://localhost:27017/{}", name);
    MongoDB::new(&uri)
        .await
        .expect("MongoDB must be running for ignored tests")
}
