//! Show command implementation

use crate::api::{ApiClient, DocumentDetail};
use crate::error::Result;
use tracing::info;

/// Fetch one document's details from the service
pub async fn cmd_show(api: &ApiClient, document_id: i64) -> Result<DocumentDetail> {
    info!("Fetching document {}", document_id);
    api.show_document(document_id).await
}

/// Print document details to console
pub fn print_document(doc: &DocumentDetail) {
    println!("\n📖 {} (doc {})", doc.title, doc.id);
    if let Some(author) = &doc.author {
        println!("  Author: {}", author);
    }
    if let Some(source) = &doc.source {
        println!("  Source: {}", source);
    }
    if let Some(content_type) = &doc.content_type {
        println!("  Type: {}", content_type);
    }
    println!("  Chunks: {}", doc.chunk_count);
    println!("  Added: {}", doc.added_at);
}
