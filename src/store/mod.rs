//! Collection storage using SQLite
//!
//! This module handles all local collection storage:
//! - Collections (named, user-defined groupings)
//! - Collection items (memberships pointing at externally typed entities)
//!
//! Constraint enforcement is delegated to the database engine: duplicate
//! memberships are absorbed by the composite unique constraint, and deleting
//! a collection relies on the schema's ON DELETE CASCADE rule to clean up
//! membership rows.

mod schema;

pub use schema::*;

use crate::error::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::debug;

/// A collection row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// A membership record linking a collection to an externally typed entity.
///
/// `item_type` is a free-text discriminator ("document", "chunk", ...);
/// `item_id` references a row in whichever external table that discriminator
/// names. Nothing here validates that reference.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CollectionItem {
    pub item_type: String,
    pub item_id: i64,
}

/// A collection together with its membership count, for listings
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub item_count: i64,
}

/// Global statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub collection_count: usize,
    pub item_count: usize,
}

/// Collections database handle
#[derive(Clone)]
pub struct CollectionStore {
    pool: SqlitePool,
}

impl CollectionStore {
    /// Open (creating if missing) the collections database at the given path
    pub async fn new(db_path: &std::path::Path) -> Result<Self> {
        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true);

        debug!("Connecting to SQLite database at {:?}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };

        // Auto-initialize schema if needed
        if !store.is_initialized().await? {
            store.init_schema().await?;
        }

        Ok(store)
    }

    /// Initialize the database schema
    pub async fn init_schema(&self) -> Result<()> {
        debug!("Initializing database schema");
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Check if database is initialized
    pub async fn is_initialized(&self) -> Result<bool> {
        let result: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM sqlite_master WHERE type='table' AND name='collections'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(result.is_some())
    }

    // ===== Collection Operations =====

    /// Create a collection, returning its generated id.
    ///
    /// Names are not unique; creating a second collection with the same name
    /// succeeds independently.
    pub async fn create_collection(&self, name: &str) -> Result<i64> {
        let id: Option<i64> = sqlx::query_scalar(
            "INSERT INTO collections (name, created_at) VALUES (?, ?) RETURNING id",
        )
        .bind(name)
        .bind(Utc::now().to_rfc3339())
        .fetch_optional(&self.pool)
        .await?;

        // An insert that yields no row is unexpected and fatal
        id.ok_or_else(|| Error::Other("collection insert returned no id".to_string()))
    }

    /// Get a collection by id
    pub async fn get_collection(&self, id: i64) -> Result<Option<Collection>> {
        let collection =
            sqlx::query_as::<_, Collection>("SELECT * FROM collections WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(collection)
    }

    /// List all collections with their membership counts
    pub async fn list_collections(&self) -> Result<Vec<CollectionSummary>> {
        let collections = sqlx::query_as::<_, CollectionSummary>(
            r#"
            SELECT c.id, c.name, c.created_at, COUNT(i.item_id) AS item_count
            FROM collections c
            LEFT JOIN collection_items i ON i.collection_id = c.id
            GROUP BY c.id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(collections)
    }

    /// Delete a collection, returning whether a row was actually deleted.
    ///
    /// Membership rows are removed by the schema's cascade rule.
    pub async fn delete_collection(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ===== Item Operations =====

    /// Add an item to a collection.
    ///
    /// A duplicate (collection_id, item_type, item_id) triple is a silent
    /// no-op. A nonexistent collection id surfaces as the raw driver
    /// foreign-key error.
    pub async fn add_item(&self, collection_id: i64, item_type: &str, item_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO collection_items (collection_id, item_type, item_id, added_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(collection_id)
        .bind(item_type)
        .bind(item_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List a collection's items in insertion order.
    ///
    /// Returns `None` if the collection does not exist, distinguishing it
    /// from an existing-but-empty collection. The existence check and the
    /// fetch are two sequential queries, so a concurrent delete between them
    /// can still yield an empty list for a just-removed collection.
    pub async fn list_items(&self, collection_id: i64) -> Result<Option<Vec<CollectionItem>>> {
        let exists: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM collections WHERE id = ?")
            .bind(collection_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let items = sqlx::query_as::<_, CollectionItem>(
            r#"
            SELECT item_type, item_id FROM collection_items
            WHERE collection_id = ?
            ORDER BY added_at, rowid
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(items))
    }

    /// Remove an item from a collection, returning whether a row was deleted
    pub async fn remove_item(
        &self,
        collection_id: i64,
        item_type: &str,
        item_id: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM collection_items
            WHERE collection_id = ? AND item_type = ? AND item_id = ?
            "#,
        )
        .bind(collection_id)
        .bind(item_type)
        .bind(item_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ===== Statistics =====

    /// Get global statistics
    pub async fn get_stats(&self) -> Result<StoreStats> {
        let collection_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.pool)
            .await?;

        let item_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collection_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(StoreStats {
            collection_count: collection_count as usize,
            item_count: item_count as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test_store() -> (CollectionStore, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = CollectionStore::new(&tmp.path().join("test.db"))
            .await
            .unwrap();
        (store, tmp)
    }

    #[tokio::test]
    async fn test_create_returns_positive_id() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Ethics Readings").await.unwrap();
        assert!(id > 0);

        let loaded = store.get_collection(id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Ethics Readings");
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let (store, _tmp) = setup_test_store().await;

        let first = store.create_collection("Readings").await.unwrap();
        let second = store.create_collection("Readings").await.unwrap();
        assert_ne!(first, second);

        let all = store.list_collections().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_add_item_idempotent() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Papers").await.unwrap();
        store.add_item(id, "document", 42).await.unwrap();
        store.add_item(id, "document", 42).await.unwrap();

        let items = store.list_items(id).await.unwrap().unwrap();
        assert_eq!(
            items,
            vec![CollectionItem {
                item_type: "document".to_string(),
                item_id: 42
            }]
        );
    }

    #[tokio::test]
    async fn test_same_id_different_type_is_distinct() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Mixed").await.unwrap();
        store.add_item(id, "document", 7).await.unwrap();
        store.add_item(id, "chunk", 7).await.unwrap();

        let items = store.list_items(id).await.unwrap().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_add_item_bad_collection_is_db_error() {
        let (store, _tmp) = setup_test_store().await;

        let err = store.add_item(999, "document", 1).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn test_list_items_missing_vs_empty() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Empty").await.unwrap();
        assert_eq!(store.list_items(id).await.unwrap(), Some(vec![]));
        assert_eq!(store.list_items(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_items_kept_in_insertion_order() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Ordered").await.unwrap();
        for item_id in [30, 10, 20] {
            store.add_item(id, "document", item_id).await.unwrap();
        }

        let items = store.list_items(id).await.unwrap().unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Papers").await.unwrap();
        store.add_item(id, "document", 42).await.unwrap();

        assert!(store.remove_item(id, "document", 42).await.unwrap());
        // Second removal finds nothing and does not raise
        assert!(!store.remove_item(id, "document", 42).await.unwrap());

        let items = store.list_items(id).await.unwrap().unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_collection_cascades() {
        let (store, _tmp) = setup_test_store().await;

        let id = store.create_collection("Doomed").await.unwrap();
        store.add_item(id, "document", 1).await.unwrap();
        store.add_item(id, "chunk", 2).await.unwrap();

        assert!(store.delete_collection(id).await.unwrap());
        assert!(!store.delete_collection(id).await.unwrap());

        assert_eq!(store.list_items(id).await.unwrap(), None);
        let stats = store.get_stats().await.unwrap();
        assert_eq!(stats.collection_count, 0);
        assert_eq!(stats.item_count, 0);
    }

    #[tokio::test]
    async fn test_list_collections_with_counts() {
        let (store, _tmp) = setup_test_store().await;

        let a = store.create_collection("A").await.unwrap();
        let _b = store.create_collection("B").await.unwrap();
        store.add_item(a, "document", 1).await.unwrap();
        store.add_item(a, "document", 2).await.unwrap();

        let summaries = store.list_collections().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].item_count, 2);
        assert_eq!(summaries[1].item_count, 0);
    }
}
