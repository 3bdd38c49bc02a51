//! Ingest command implementation

use crate::api::{ApiClient, IngestReport};
use crate::error::Result;
use tracing::info;

/// Hand a local path or URL to the ingestion service
pub async fn cmd_ingest(api: &ApiClient, source: &str) -> Result<IngestReport> {
    info!("Ingesting {}", source);
    let report = api.ingest(source).await?;
    info!(
        "Ingested {} documents ({} chunks, {} errors)",
        report.documents,
        report.chunks,
        report.errors.len()
    );
    Ok(report)
}

/// Print an ingestion report to console
pub fn print_ingest_report(report: &IngestReport) {
    println!("\n✓ Ingestion complete");
    println!("  Documents processed: {}", report.documents);
    println!("  Chunks created: {}", report.chunks);

    if !report.errors.is_empty() {
        println!("  Errors ({}):", report.errors.len());
        for error in &report.errors {
            println!("    • {}", error);
        }
    }
}
