//! Collection command implementations
//!
//! These bind directly to the local collections store; everything else the
//! CLI does goes through the API service.

use crate::error::Result;
use crate::store::{CollectionItem, CollectionStore, CollectionSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of creating a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCollection {
    pub id: i64,
    pub name: String,
}

/// Create a new collection
pub async fn cmd_collection_create(
    store: &CollectionStore,
    name: &str,
) -> Result<CreatedCollection> {
    let id = store.create_collection(name).await?;
    info!("Created collection {} ({})", id, name);
    Ok(CreatedCollection {
        id,
        name: name.to_string(),
    })
}

/// Add an item to a collection (idempotent)
pub async fn cmd_collection_add(
    store: &CollectionStore,
    collection_id: i64,
    item_type: &str,
    item_id: i64,
) -> Result<()> {
    store.add_item(collection_id, item_type, item_id).await?;
    info!(
        "Added {} {} to collection {}",
        item_type, item_id, collection_id
    );
    Ok(())
}

/// A collection's items, or `None` if the collection does not exist
pub async fn cmd_collection_items(
    store: &CollectionStore,
    collection_id: i64,
) -> Result<Option<Vec<CollectionItem>>> {
    store.list_items(collection_id).await
}

/// List all collections with counts
pub async fn cmd_collection_list(store: &CollectionStore) -> Result<Vec<CollectionSummary>> {
    store.list_collections().await
}

/// Remove an item; returns whether anything was deleted
pub async fn cmd_collection_remove(
    store: &CollectionStore,
    collection_id: i64,
    item_type: &str,
    item_id: i64,
) -> Result<bool> {
    store.remove_item(collection_id, item_type, item_id).await
}

/// Delete a collection; returns whether anything was deleted
pub async fn cmd_collection_delete(store: &CollectionStore, collection_id: i64) -> Result<bool> {
    store.delete_collection(collection_id).await
}

/// Print a collection's items to console
pub fn print_collection_items(collection_id: i64, items: &[CollectionItem]) {
    println!("\n📚 Collection {}\n", collection_id);

    if items.is_empty() {
        println!("No items. Use 'lectern collection add' to add some.");
        return;
    }

    for item in items {
        println!("• {} {}", item.item_type, item.item_id);
    }
}

/// Print the collections list to console
pub fn print_collections(collections: &[CollectionSummary]) {
    println!("\n📚 Collections\n");

    if collections.is_empty() {
        println!("No collections. Use 'lectern collection create' to add one.");
        return;
    }

    for collection in collections {
        println!(
            "• {} [{}] — {} items",
            collection.name, collection.id, collection.item_count
        );
        println!("  Created: {}", collection.created_at);
    }
}
