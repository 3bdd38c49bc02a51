//! Synthetic fixture corpus for the ingestion pipeline
//!
//! Generates deliberately awkward EPUB/PDF/Markdown files so the extraction
//! pipeline's edge cases (footnote styles, ToC variants, OPF metadata quirks)
//! stay covered by a reproducible corpus. Output lands under one directory
//! per format plus a `manifest.json` describing every file.

pub mod epub;
pub mod markdown;
pub mod pdf;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixture file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Epub,
    Pdf,
    Markdown,
}

impl FixtureKind {
    /// Subdirectory for this format under the corpus root
    pub fn subdir(&self) -> &'static str {
        match self {
            FixtureKind::Epub => "epub",
            FixtureKind::Pdf => "pdf",
            FixtureKind::Markdown => "markdown",
        }
    }
}

impl std::fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureKind::Epub => write!(f, "epub"),
            FixtureKind::Pdf => write!(f, "pdf"),
            FixtureKind::Markdown => write!(f, "markdown"),
        }
    }
}

/// One entry in the fixture catalog
pub struct Fixture {
    pub name: &'static str,
    pub kind: FixtureKind,
    pub description: &'static str,
    writer: fn(&Path) -> Result<PathBuf>,
}

impl Fixture {
    pub(crate) fn new(
        name: &'static str,
        kind: FixtureKind,
        description: &'static str,
        writer: fn(&Path) -> Result<PathBuf>,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            writer,
        }
    }

    /// Write this fixture under the corpus root, returning the file path
    pub fn write(&self, root: &Path) -> Result<PathBuf> {
        let dir = root.join(self.kind.subdir());
        std::fs::create_dir_all(&dir)?;
        (self.writer)(&dir)
    }
}

/// Manifest record describing a generated file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub kind: FixtureKind,
    /// Path relative to the corpus root
    pub path: String,
    pub description: String,
}

impl ManifestEntry {
    pub fn from_fixture(fixture: &Fixture, path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name: fixture.name.to_string(),
            kind: fixture.kind,
            path: format!("{}/{}", fixture.kind.subdir(), file_name),
            description: fixture.description.to_string(),
        }
    }
}

/// The full fixture catalog, filtered to the requested formats
pub fn catalog(kinds: &[FixtureKind]) -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    if kinds.contains(&FixtureKind::Epub) {
        fixtures.extend(epub::catalog());
    }
    if kinds.contains(&FixtureKind::Pdf) {
        fixtures.extend(pdf::catalog());
    }
    if kinds.contains(&FixtureKind::Markdown) {
        fixtures.extend(markdown::catalog());
    }
    fixtures
}

/// Write `manifest.json` at the corpus root
pub fn write_manifest(root: &Path, entries: &[ManifestEntry]) -> Result<PathBuf> {
    let path = root.join("manifest.json");
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_filtering() {
        let all = catalog(&[FixtureKind::Epub, FixtureKind::Pdf, FixtureKind::Markdown]);
        let md_only = catalog(&[FixtureKind::Markdown]);

        assert!(all.len() > md_only.len());
        assert!(md_only.iter().all(|f| f.kind == FixtureKind::Markdown));
    }

    #[test]
    fn test_fixture_names_unique() {
        let all = catalog(&[FixtureKind::Epub, FixtureKind::Pdf, FixtureKind::Markdown]);
        let mut names: Vec<_> = all.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_manifest_round_trip() {
        let tmp = TempDir::new().unwrap();
        let fixtures = catalog(&[FixtureKind::Markdown]);

        let mut entries = Vec::new();
        for fixture in &fixtures {
            let path = fixture.write(tmp.path()).unwrap();
            assert!(path.exists());
            entries.push(ManifestEntry::from_fixture(fixture, &path));
        }

        let manifest = write_manifest(tmp.path(), &entries).unwrap();
        let loaded: Vec<ManifestEntry> =
            serde_json::from_str(&std::fs::read_to_string(manifest).unwrap()).unwrap();

        assert_eq!(loaded.len(), fixtures.len());
        for entry in &loaded {
            assert!(tmp.path().join(&entry.path).exists());
        }
    }
}
