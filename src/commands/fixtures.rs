//! Fixtures command implementation

use crate::error::Result;
use crate::fixtures::{self, FixtureKind, ManifestEntry};
use crate::progress::add_progress_bar;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Summary of a corpus generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureStats {
    pub output_dir: String,
    pub epub_files: usize,
    pub pdf_files: usize,
    pub markdown_files: usize,
    pub manifest: String,
}

/// Generate the synthetic fixture corpus under `root`
pub async fn cmd_fixtures(root: &Path, kinds: &[FixtureKind]) -> Result<FixtureStats> {
    info!("Generating fixture corpus at {:?}", root);
    std::fs::create_dir_all(root)?;

    let catalog = fixtures::catalog(kinds);
    let bar = add_progress_bar(catalog.len() as u64);

    let mut entries = Vec::with_capacity(catalog.len());
    for fixture in &catalog {
        bar.set_message(fixture.name);
        let path = fixture.write(root)?;
        debug!("Wrote {:?}", path);
        entries.push(ManifestEntry::from_fixture(fixture, &path));
        bar.inc(1);
    }
    bar.finish_and_clear();

    let manifest = fixtures::write_manifest(root, &entries)?;

    let count = |kind| entries.iter().filter(|e| e.kind == kind).count();
    Ok(FixtureStats {
        output_dir: root.display().to_string(),
        epub_files: count(FixtureKind::Epub),
        pdf_files: count(FixtureKind::Pdf),
        markdown_files: count(FixtureKind::Markdown),
        manifest: manifest.display().to_string(),
    })
}

/// Print fixture generation stats to console
pub fn print_fixture_stats(stats: &FixtureStats) {
    println!("\n✓ Fixture corpus generated");
    println!("  Output: {}", stats.output_dir);
    println!("  EPUB files: {}", stats.epub_files);
    println!("  PDF files: {}", stats.pdf_files);
    println!("  Markdown files: {}", stats.markdown_files);
    println!("  Manifest: {}", stats.manifest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_full_corpus_generation() {
        let tmp = TempDir::new().unwrap();
        let stats = cmd_fixtures(
            tmp.path(),
            &[FixtureKind::Epub, FixtureKind::Pdf, FixtureKind::Markdown],
        )
        .await
        .unwrap();

        assert!(stats.epub_files > 0);
        assert!(stats.pdf_files > 0);
        assert!(stats.markdown_files > 0);
        assert!(tmp.path().join("manifest.json").exists());
        assert!(tmp.path().join("epub").is_dir());
        assert!(tmp.path().join("pdf").is_dir());
        assert!(tmp.path().join("markdown").is_dir());
    }

    #[tokio::test]
    async fn test_single_kind_generation() {
        let tmp = TempDir::new().unwrap();
        let stats = cmd_fixtures(tmp.path(), &[FixtureKind::Markdown]).await.unwrap();

        assert_eq!(stats.epub_files, 0);
        assert_eq!(stats.pdf_files, 0);
        assert!(stats.markdown_files > 0);
        assert!(!tmp.path().join("epub").exists());
    }
}
