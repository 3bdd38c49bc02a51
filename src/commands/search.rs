//! Search command implementation

use crate::api::{ApiClient, SearchResponse};
use crate::config::Config;
use crate::error::Result;
use tracing::info;

/// Run a query against the search service
pub async fn cmd_search(
    config: &Config,
    api: &ApiClient,
    query: &str,
    limit: Option<usize>,
) -> Result<SearchResponse> {
    let limit = limit
        .unwrap_or(config.search.default_limit)
        .min(config.search.max_results);

    info!("Searching: {} (limit {})", query, limit);
    api.search(query, limit).await
}

/// Print search results to console
pub fn print_search_results(response: &SearchResponse) {
    println!("\n🔍 Query: {}\n", response.query);

    if response.results.is_empty() {
        println!("No results.");
        return;
    }

    for (i, hit) in response.results.iter().enumerate() {
        println!(
            "{}. [score: {:.3}] {} (doc {})",
            i + 1,
            hit.score,
            hit.title,
            hit.document_id
        );
        if let Some(snippet) = &hit.snippet {
            println!("   {}\n", snippet.replace('\n', " "));
        }
    }
}
