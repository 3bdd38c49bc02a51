//! SQLite schema definition

/// SQL schema for the collections database
pub const SCHEMA_SQL: &str = r#"
-- Collections: named, user-defined groupings of documents/chunks
CREATE TABLE IF NOT EXISTS collections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Collection items: membership records linking a collection to an
-- externally typed entity (e.g. a document or chunk row elsewhere)
CREATE TABLE IF NOT EXISTS collection_items (
    collection_id INTEGER NOT NULL REFERENCES collections(id) ON DELETE CASCADE,
    item_type TEXT NOT NULL,
    item_id INTEGER NOT NULL,
    added_at TEXT NOT NULL,
    UNIQUE(collection_id, item_type, item_id)
);

-- Indexes for performance
CREATE INDEX IF NOT EXISTS idx_collection_items_collection ON collection_items(collection_id);
"#;
