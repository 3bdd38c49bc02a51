//! Status command implementation

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::store::{CollectionStore, StoreStats};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub config_path: String,
    pub db_path: String,
    pub api_url: String,
    pub api_reachable: bool,
    pub api_version: Option<String>,
    pub api_documents: usize,
    pub api_chunks: usize,
    pub collections: StoreStats,
}

/// Get system status: local collection counts plus service reachability
pub async fn cmd_status(
    config: &Config,
    store: &CollectionStore,
    api: &ApiClient,
) -> Result<StatusInfo> {
    info!("Getting status");

    let collections = store.get_stats().await?;

    let (api_reachable, api_version, api_documents, api_chunks) = match api.status().await {
        Ok(status) => (true, Some(status.version), status.documents, status.chunks),
        Err(e) => {
            tracing::debug!("API status error: {:?}", e);
            (false, None, 0, 0)
        }
    };

    Ok(StatusInfo {
        config_path: config.paths.config_file.display().to_string(),
        db_path: config.paths.db_file.display().to_string(),
        api_url: config.api_url.clone(),
        api_reachable,
        api_version,
        api_documents,
        api_chunks,
        collections,
    })
}

/// Print status to console
pub fn print_status(status: &StatusInfo) {
    println!("\n📊 lectern Status\n");
    println!("Configuration: {}", status.config_path);
    println!("Database: {}", status.db_path);
    println!("\nAPI service:");
    println!("  URL: {}", status.api_url);

    if status.api_reachable {
        println!(
            "  Status: ✓ Connected{}",
            status
                .api_version
                .as_deref()
                .map(|v| format!(" (v{})", v))
                .unwrap_or_default()
        );
        println!("  Documents: {}", status.api_documents);
        println!("  Chunks: {}", status.api_chunks);
    } else {
        println!("  Status: ✗ Not reachable");
    }

    println!("\nCollections:");
    println!("  Collections: {}", status.collections.collection_count);
    println!("  Items: {}", status.collections.item_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_status_merges_store_and_api() {
        let tmp = TempDir::new().unwrap();
        let store = CollectionStore::new(&tmp.path().join("test.db"))
            .await
            .unwrap();
        let id = store.create_collection("Readings").await.unwrap();
        store.add_item(id, "document", 1).await.unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": "0.4.1", "documents": 12, "chunks": 340
            })))
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.api_url = server.uri();
        let api = ApiClient::new(&config).unwrap();

        let status = cmd_status(&config, &store, &api).await.unwrap();
        assert!(status.api_reachable);
        assert_eq!(status.api_version.as_deref(), Some("0.4.1"));
        assert_eq!(status.api_documents, 12);
        assert_eq!(status.collections.collection_count, 1);
        assert_eq!(status.collections.item_count, 1);
    }

    #[tokio::test]
    async fn test_status_survives_unreachable_api() {
        let tmp = TempDir::new().unwrap();
        let store = CollectionStore::new(&tmp.path().join("test.db"))
            .await
            .unwrap();

        let mut config = Config::default();
        // Nothing listens here
        config.api_url = "http://127.0.0.1:1".to_string();
        let api = ApiClient::new(&config).unwrap();

        let status = cmd_status(&config, &store, &api).await.unwrap();
        assert!(!status.api_reachable);
        assert_eq!(status.api_documents, 0);
    }
}
