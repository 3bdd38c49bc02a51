//! Client for the external ingestion/search API
//!
//! The ingestion pipeline, document table, and search index live behind an
//! HTTP service; this module serializes command arguments into JSON requests
//! and deserializes the responses. Failures collapse into a single
//! `Error::Api` message for the CLI to print.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

/// Request body for `POST /ingest`
#[derive(Debug, Clone, Serialize)]
pub struct IngestRequest {
    /// Local path or URL handed to the pipeline
    pub source: String,
}

/// Outcome of an ingestion run, including per-file failures the pipeline
/// aggregated while walking a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub documents: usize,
    pub chunks: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Request body for `POST /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
}

/// A single search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub document_id: i64,
    pub title: String,
    pub score: f32,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Response body for `POST /search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// Response body for `GET /documents/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    pub chunk_count: usize,
    pub added_at: String,
}

/// Response body for `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub version: String,
    pub documents: usize,
    pub chunks: usize,
}

/// Request body for `POST /acquire`
#[derive(Debug, Clone, Serialize)]
pub struct AcquireRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Response body for `POST /acquire`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquireResult {
    pub document_id: i64,
    pub title: String,
    pub status: String,
}

/// Error body the API returns on failure
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client for the lectern API service
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)?;
        let client = Client::new();
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key(),
        })
    }

    /// Build a client against an explicit base URL (used by tests)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            api_key: None,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid API URL: {}", e)))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Send a request, mapping non-2xx responses to `Error::Api`
    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        if status == StatusCode::NOT_FOUND {
            return Err(Error::DocumentNotFound(message));
        }
        Err(Error::Api(message))
    }

    /// Hand a path or URL to the ingestion pipeline
    pub async fn ingest(&self, source: &str) -> Result<IngestReport> {
        let url = self.endpoint("/ingest")?;
        let body = IngestRequest {
            source: source.to_string(),
        };
        self.send(self.client.post(url).json(&body)).await
    }

    /// Search the index
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchResponse> {
        let url = self.endpoint("/search")?;
        let body = SearchRequest {
            query: query.to_string(),
            limit,
        };
        self.send(self.client.post(url).json(&body)).await
    }

    /// Fetch a single document's details
    pub async fn show_document(&self, id: i64) -> Result<DocumentDetail> {
        let url = self.endpoint(&format!("/documents/{}", id))?;
        self.send(self.client.get(url)).await
    }

    /// Fetch service status
    pub async fn status(&self) -> Result<ApiStatus> {
        let url = self.endpoint("/status")?;
        self.send(self.client.get(url)).await
    }

    /// Ask the service to acquire a text from a remote catalog
    pub async fn acquire(&self, request: &AcquireRequest) -> Result<AcquireResult> {
        let url = self.endpoint("/acquire")?;
        self.send(self.client.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_json(json!({"query": "virtue", "limit": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "virtue",
                "results": [
                    {"document_id": 3, "title": "Nicomachean Ethics", "score": 0.91,
                     "snippet": "…moral virtue comes about as a result of habit…"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let response = client.search("virtue", 5).await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].document_id, 3);
        assert_eq!(response.results[0].title, "Nicomachean Ethics");
    }

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"error": "unsupported file type: .docx"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let err = client.ingest("/tmp/report.docx").await.unwrap_err();

        match err {
            Error::Api(message) => assert_eq!(message, "unsupported file type: .docx"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/documents/999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "document 999"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let err = client.show_document(999).await.unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
    }

    #[tokio::test]
    async fn test_non_json_error_uses_status_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let err = client.status().await.unwrap_err();

        match err {
            Error::Api(message) => assert_eq!(message, "Service Unavailable"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ingest_report_errors_default_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"documents": 4, "chunks": 52})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&server.uri()).unwrap();
        let report = client.ingest("/home/books").await.unwrap();

        assert_eq!(report.documents, 4);
        assert!(report.errors.is_empty());
    }
}
