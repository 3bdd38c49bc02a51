//! Acquire command implementation

use crate::api::{AcquireRequest, AcquireResult, ApiClient};
use crate::error::Result;
use tracing::info;

/// Ask the service to fetch a text from a remote catalog and ingest it
pub async fn cmd_acquire(
    api: &ApiClient,
    title: &str,
    author: Option<String>,
    source: Option<String>,
) -> Result<AcquireResult> {
    info!("Acquiring '{}'", title);
    let request = AcquireRequest {
        title: title.to_string(),
        author,
        source,
    };
    api.acquire(&request).await
}

/// Print an acquisition result to console
pub fn print_acquire_result(result: &AcquireResult) {
    println!(
        "\n✓ Acquired '{}' (doc {}): {}",
        result.title, result.document_id, result.status
    );
}
