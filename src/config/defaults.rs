//! Default values for configuration

use std::path::PathBuf;

/// Default URL of the ingestion/search API service
pub fn default_api_url() -> String {
    std::env::var("LECTERN_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8877".to_string())
}

/// Default environment variable name for the API key
pub fn default_api_key_env() -> String {
    "LECTERN_API_KEY".to_string()
}

/// Default number of search results
pub fn default_search_limit() -> usize {
    10
}

/// Default maximum search results
pub fn default_search_max_results() -> usize {
    100
}

/// Default fixture output directory (relative to the base dir)
pub fn default_fixtures_dir() -> PathBuf {
    PathBuf::from("fixtures")
}
