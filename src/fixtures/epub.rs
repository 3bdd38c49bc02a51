//! Synthetic EPUB fixtures
//!
//! Hand-assembled OCF containers: a stored `mimetype` entry first, then
//! `META-INF/container.xml`, an OPF package, the ToC (NCX and/or EPUB3
//! NavDoc), and chapter XHTML. The point of each fixture is one specific
//! quirk the extraction pipeline has to survive, so the package XML is built
//! directly rather than through a validating authoring layer.

use super::{Fixture, FixtureKind};
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// EPUB package version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpubVersion {
    V2,
    V3,
}

/// Which table-of-contents documents the package carries.
///
/// `Missing` keeps the OPF manifest/spine references to `toc.ncx` while the
/// file itself is absent from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocVariant {
    Ncx,
    Nav,
    Both,
    Missing,
}

impl TocVariant {
    fn has_ncx_file(&self) -> bool {
        matches!(self, TocVariant::Ncx | TocVariant::Both)
    }

    fn references_ncx(&self) -> bool {
        matches!(self, TocVariant::Ncx | TocVariant::Both | TocVariant::Missing)
    }

    fn has_nav(&self) -> bool {
        matches!(self, TocVariant::Nav | TocVariant::Both)
    }
}

/// A chapter document. `in_spine`/`in_toc` are independent so a fixture can
/// produce deliberate ToC/spine mismatches.
#[derive(Debug, Clone)]
pub struct Chapter {
    pub title: String,
    pub body: String,
    pub in_spine: bool,
    pub in_toc: bool,
}

/// Declarative description of one EPUB fixture
#[derive(Debug, Clone)]
pub struct EpubSpec {
    pub title: Option<String>,
    pub author: Option<String>,
    pub language: Option<String>,
    pub identifiers: Vec<String>,
    pub version: EpubVersion,
    pub toc: TocVariant,
    pub chapters: Vec<Chapter>,
    /// Legacy `<meta name=… content=…/>` OPF tags (calibre-style)
    pub extra_meta: Vec<(String, String)>,
    /// Nest every ToC entry after the first under the first
    pub nested_toc: bool,
}

impl EpubSpec {
    pub fn new(title: &str, version: EpubVersion, toc: TocVariant) -> Self {
        Self {
            title: Some(title.to_string()),
            author: None,
            language: Some("en".to_string()),
            identifiers: vec![format!("urn:uuid:{}", Uuid::new_v4())],
            version,
            toc,
            chapters: Vec::new(),
            extra_meta: Vec::new(),
            nested_toc: false,
        }
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn identifier(mut self, identifier: &str) -> Self {
        self.identifiers.push(identifier.to_string());
        self
    }

    pub fn meta(mut self, name: &str, content: &str) -> Self {
        self.extra_meta
            .push((name.to_string(), content.to_string()));
        self
    }

    pub fn nested(mut self) -> Self {
        self.nested_toc = true;
        self
    }

    /// Add a chapter with plain paragraphs
    pub fn chapter(self, title: &str, paragraphs: &[&str]) -> Self {
        let body = paragraphs
            .iter()
            .map(|p| format!("    <p>{}</p>\n", xml_escape(p)))
            .collect::<String>();
        self.chapter_xhtml(title, &body)
    }

    /// Add a chapter whose body markup is supplied verbatim
    pub fn chapter_xhtml(mut self, title: &str, body: &str) -> Self {
        self.chapters.push(Chapter {
            title: title.to_string(),
            body: body.to_string(),
            in_spine: true,
            in_toc: true,
        });
        self
    }

    pub fn push(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    /// Write the container to `dir/file_name`
    pub fn write_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        let mut zip = ZipWriter::new(File::create(&path)?);

        // The OCF spec requires mimetype as the first entry, uncompressed
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("mimetype", stored)?;
        zip.write_all(b"application/epub+zip")?;

        let deflated = SimpleFileOptions::default();
        zip.start_file("META-INF/container.xml", deflated)?;
        zip.write_all(CONTAINER_XML.as_bytes())?;

        zip.start_file("OEBPS/content.opf", deflated)?;
        zip.write_all(self.build_opf().as_bytes())?;

        if self.toc.has_ncx_file() {
            zip.start_file("OEBPS/toc.ncx", deflated)?;
            zip.write_all(self.build_ncx().as_bytes())?;
        }
        if self.toc.has_nav() {
            zip.start_file("OEBPS/nav.xhtml", deflated)?;
            zip.write_all(self.build_nav().as_bytes())?;
        }

        for (i, chapter) in self.chapters.iter().enumerate() {
            zip.start_file(format!("OEBPS/chap_{}.xhtml", i + 1), deflated)?;
            zip.write_all(self.build_chapter(chapter).as_bytes())?;
        }

        zip.finish()?;
        Ok(path)
    }

    fn build_opf(&self) -> String {
        let version = match self.version {
            EpubVersion::V2 => "2.0",
            EpubVersion::V3 => "3.0",
        };

        let mut metadata = String::new();
        for (i, identifier) in self.identifiers.iter().enumerate() {
            if i == 0 {
                metadata.push_str(&format!(
                    "    <dc:identifier id=\"pub-id\">{}</dc:identifier>\n",
                    xml_escape(identifier)
                ));
            } else {
                metadata.push_str(&format!(
                    "    <dc:identifier>{}</dc:identifier>\n",
                    xml_escape(identifier)
                ));
            }
        }
        if let Some(title) = &self.title {
            metadata.push_str(&format!("    <dc:title>{}</dc:title>\n", xml_escape(title)));
        }
        if let Some(author) = &self.author {
            metadata.push_str(&format!(
                "    <dc:creator>{}</dc:creator>\n",
                xml_escape(author)
            ));
        }
        if let Some(language) = &self.language {
            metadata.push_str(&format!(
                "    <dc:language>{}</dc:language>\n",
                xml_escape(language)
            ));
        }
        if self.version == EpubVersion::V3 {
            metadata.push_str(
                "    <meta property=\"dcterms:modified\">2024-01-01T00:00:00Z</meta>\n",
            );
        }
        for (name, content) in &self.extra_meta {
            metadata.push_str(&format!(
                "    <meta name=\"{}\" content=\"{}\"/>\n",
                xml_escape(name),
                xml_escape(content)
            ));
        }

        let mut manifest = String::new();
        if self.toc.references_ncx() {
            manifest.push_str(
                "    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n",
            );
        }
        if self.toc.has_nav() {
            manifest.push_str(
                "    <item id=\"nav\" href=\"nav.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n",
            );
        }
        for i in 1..=self.chapters.len() {
            manifest.push_str(&format!(
                "    <item id=\"chap{i}\" href=\"chap_{i}.xhtml\" media-type=\"application/xhtml+xml\"/>\n"
            ));
        }

        let spine_attr = if self.toc.references_ncx() {
            " toc=\"ncx\""
        } else {
            ""
        };
        let mut spine = String::new();
        for (i, chapter) in self.chapters.iter().enumerate() {
            if chapter.in_spine {
                spine.push_str(&format!("    <itemref idref=\"chap{}\"/>\n", i + 1));
            }
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <package xmlns=\"http://www.idpf.org/2007/opf\" version=\"{version}\" unique-identifier=\"pub-id\">\n\
             \x20 <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:opf=\"http://www.idpf.org/2007/opf\">\n\
             {metadata}\
             \x20 </metadata>\n\
             \x20 <manifest>\n\
             {manifest}\
             \x20 </manifest>\n\
             \x20 <spine{spine_attr}>\n\
             {spine}\
             \x20 </spine>\n\
             </package>\n"
        )
    }

    fn toc_entries(&self) -> Vec<(usize, &Chapter)> {
        self.chapters
            .iter()
            .enumerate()
            .filter(|(_, c)| c.in_toc)
            .collect()
    }

    fn build_ncx(&self) -> String {
        let uid = self.identifiers.first().cloned().unwrap_or_default();
        let title = self.title.clone().unwrap_or_default();
        let entries = self.toc_entries();

        let mut nav_map = String::new();
        let mut order = 0usize;
        let mut nav_point = |index: usize, chapter: &Chapter, indent: &str| {
            order += 1;
            format!(
                "{indent}<navPoint id=\"np_{order}\" playOrder=\"{order}\">\n\
                 {indent}  <navLabel><text>{}</text></navLabel>\n\
                 {indent}  <content src=\"chap_{}.xhtml\"/>\n",
                xml_escape(&chapter.title),
                index + 1,
            )
        };

        if self.nested_toc && entries.len() > 1 {
            let (first_idx, first) = entries[0];
            nav_map.push_str(&nav_point(first_idx, first, "    "));
            for &(index, chapter) in &entries[1..] {
                nav_map.push_str(&nav_point(index, chapter, "      "));
                nav_map.push_str("      </navPoint>\n");
            }
            nav_map.push_str("    </navPoint>\n");
        } else {
            for &(index, chapter) in &entries {
                nav_map.push_str(&nav_point(index, chapter, "    "));
                nav_map.push_str("    </navPoint>\n");
            }
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\n\
             \x20 <head>\n\
             \x20   <meta name=\"dtb:uid\" content=\"{}\"/>\n\
             \x20   <meta name=\"dtb:depth\" content=\"{}\"/>\n\
             \x20 </head>\n\
             \x20 <docTitle><text>{}</text></docTitle>\n\
             \x20 <navMap>\n\
             {nav_map}\
             \x20 </navMap>\n\
             </ncx>\n",
            xml_escape(&uid),
            if self.nested_toc { 2 } else { 1 },
            xml_escape(&title),
        )
    }

    fn build_nav(&self) -> String {
        let entries = self.toc_entries();
        let mut list = String::new();

        let li = |index: usize, chapter: &Chapter, indent: &str| {
            format!(
                "{indent}<li><a href=\"chap_{}.xhtml\">{}</a>",
                index + 1,
                xml_escape(&chapter.title)
            )
        };

        if self.nested_toc && entries.len() > 1 {
            let (first_idx, first) = entries[0];
            list.push_str(&li(first_idx, first, "        "));
            list.push_str("\n          <ol>\n");
            for &(index, chapter) in &entries[1..] {
                list.push_str(&li(index, chapter, "            "));
                list.push_str("</li>\n");
            }
            list.push_str("          </ol>\n        </li>\n");
        } else {
            for &(index, chapter) in &entries {
                list.push_str(&li(index, chapter, "        "));
                list.push_str("</li>\n");
            }
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE html>\n\
             <html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\">\n\
             <head><title>Contents</title></head>\n\
             <body>\n\
             \x20 <nav epub:type=\"toc\">\n\
             \x20   <h1>Contents</h1>\n\
             \x20     <ol>\n\
             {list}\
             \x20     </ol>\n\
             \x20 </nav>\n\
             </body>\n\
             </html>\n"
        )
    }

    fn build_chapter(&self, chapter: &Chapter) -> String {
        match self.version {
            EpubVersion::V2 => format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                 <!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.1//EN\" \"http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd\">\n\
                 <html xmlns=\"http://www.w3.org/1999/xhtml\">\n\
                 <head><title>{title}</title></head>\n\
                 <body>\n\
                 \x20 <h1>{title}</h1>\n\
                 {body}\
                 </body>\n\
                 </html>\n",
                title = xml_escape(&chapter.title),
                body = chapter.body,
            ),
            EpubVersion::V3 => format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                 <!DOCTYPE html>\n\
                 <html xmlns=\"http://www.w3.org/1999/xhtml\" xmlns:epub=\"http://www.idpf.org/2007/ops\">\n\
                 <head><title>{title}</title></head>\n\
                 <body>\n\
                 \x20 <h1>{title}</h1>\n\
                 {body}\
                 </body>\n\
                 </html>\n",
                title = xml_escape(&chapter.title),
                body = chapter.body,
            ),
        }
    }
}

const CONTAINER_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<container version=\"1.0\" xmlns=\"urn:oasis:names:tc:opendocument:xmlns:container\">\n\
  <rootfiles>\n\
    <rootfile full-path=\"OEBPS/content.opf\" media-type=\"application/oebps-package+xml\"/>\n\
  </rootfiles>\n\
</container>\n";

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ===== Fixture catalog =====

pub fn catalog() -> Vec<Fixture> {
    let e = |name, description, writer| Fixture::new(name, FixtureKind::Epub, description, writer);
    vec![
        e("epub2_basic", "EPUB2, NCX ToC, ordinary metadata", epub2_basic),
        e("epub3_nav_only", "EPUB3 with NavDoc and no NCX", epub3_nav_only),
        e("epub3_dual_toc", "EPUB3 carrying both NCX and NavDoc", epub3_dual_toc),
        e(
            "epub2_ncx_missing",
            "OPF references toc.ncx but the file is absent",
            epub2_ncx_missing,
        ),
        e("epub2_nested_ncx", "NCX navMap nested two levels deep", epub2_nested_ncx),
        e("epub3_nested_nav", "NavDoc with a nested ol", epub3_nested_nav),
        e(
            "epub3_toc_spine_mismatch",
            "NavDoc lists a chapter missing from the spine and vice versa",
            epub3_toc_spine_mismatch,
        ),
        e(
            "epub3_footnotes_semantic",
            "EPUB3 noteref/footnote semantic markup",
            epub3_footnotes_semantic,
        ),
        e(
            "epub2_footnotes_endnotes",
            "Back-of-book endnotes with backlinks",
            epub2_footnotes_endnotes,
        ),
        e(
            "epub2_footnotes_inline",
            "Inline asterisk and dagger note markers",
            epub2_footnotes_inline,
        ),
        e(
            "epub2_opf_minimal",
            "OPF metadata reduced to a lone identifier",
            epub2_opf_minimal,
        ),
        e(
            "epub3_opf_identifier_soup",
            "Multiple dc:identifier entries (uuid, ISBN, calibre)",
            epub3_opf_identifier_soup,
        ),
        e(
            "epub2_opf_calibre_meta",
            "Calibre series/index meta tags in the OPF",
            epub2_opf_calibre_meta,
        ),
        e(
            "epub3_opf_unicode_whitespace",
            "Whitespace-padded unicode title and creator",
            epub3_opf_unicode_whitespace,
        ),
    ]
}

fn epub2_basic(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("A Treatise of Human Nature", EpubVersion::V2, TocVariant::Ncx)
        .author("David Hume")
        .chapter(
            "Of the Origin of Our Ideas",
            &[
                "All the perceptions of the human mind resolve themselves into two distinct kinds.",
                "The difference betwixt these consists in the degrees of force and liveliness with which they strike upon the mind.",
            ],
        )
        .chapter(
            "Of the Ideas of the Memory and Imagination",
            &["We find by experience, that when any impression has been present with the mind, it again makes its appearance there as an idea."],
        )
        .write_to(dir, "epub2_basic.epub")
}

fn epub3_nav_only(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("Meditations", EpubVersion::V3, TocVariant::Nav)
        .author("Marcus Aurelius")
        .chapter("Book One", &["From my grandfather Verus I learned good morals and the government of my temper."])
        .chapter("Book Two", &["Begin the morning by saying to thyself, I shall meet with the busy-body, the ungrateful, arrogant, deceitful, envious, unsocial."])
        .write_to(dir, "epub3_nav_only.epub")
}

fn epub3_dual_toc(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("The Enchiridion", EpubVersion::V3, TocVariant::Both)
        .author("Epictetus")
        .chapter("Chapter I", &["Some things are in our control and others not."])
        .chapter("Chapter V", &["Men are disturbed, not by things, but by the principles and notions which they form concerning things."])
        .write_to(dir, "epub3_dual_toc.epub")
}

fn epub2_ncx_missing(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("Fragments", EpubVersion::V2, TocVariant::Missing)
        .author("Heraclitus")
        .chapter("On Nature", &["No man ever steps in the same river twice."])
        .write_to(dir, "epub2_ncx_missing.epub")
}

fn epub2_nested_ncx(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("The Republic", EpubVersion::V2, TocVariant::Ncx)
        .author("Plato")
        .nested()
        .chapter("Book I", &["I went down yesterday to the Piraeus with Glaucon the son of Ariston."])
        .chapter("The Argument with Thrasymachus", &["Justice is the interest of the stronger, he said."])
        .chapter("The Challenge of Glaucon", &["Glaucon, who is always the most pugnacious of men, was dissatisfied."])
        .write_to(dir, "epub2_nested_ncx.epub")
}

fn epub3_nested_nav(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("Ethics", EpubVersion::V3, TocVariant::Nav)
        .author("Benedict de Spinoza")
        .nested()
        .chapter("Part I: Concerning God", &["By that which is self-caused, I mean that of which the essence involves existence."])
        .chapter("Definitions", &["By substance, I mean that which is in itself, and is conceived through itself."])
        .chapter("Axioms", &["Everything which exists, exists either in itself or in something else."])
        .write_to(dir, "epub3_nested_nav.epub")
}

fn epub3_toc_spine_mismatch(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("Collected Essays", EpubVersion::V3, TocVariant::Nav)
        .author("Anonymous")
        .chapter("Introduction", &["These essays were gathered over many years."])
        // Listed in the NavDoc, absent from the spine
        .push(Chapter {
            title: "Appendix".to_string(),
            body: "    <p>Supplementary notes never wired into the spine.</p>\n".to_string(),
            in_spine: false,
            in_toc: true,
        })
        // In the spine, absent from the NavDoc
        .push(Chapter {
            title: "Colophon".to_string(),
            body: "    <p>Set in a typeface the ToC refuses to acknowledge.</p>\n".to_string(),
            in_spine: true,
            in_toc: false,
        })
        .write_to(dir, "epub3_toc_spine_mismatch.epub")
}

fn epub3_footnotes_semantic(dir: &Path) -> Result<PathBuf> {
    let body = "    <p>The unexamined life is not worth living.<a epub:type=\"noteref\" href=\"#fn1\">1</a></p>\n\
                \x20   <aside epub:type=\"footnote\" id=\"fn1\">\n\
                \x20     <p>1. As reported in Plato's Apology, 38a.</p>\n\
                \x20   </aside>\n\
                \x20   <p>Know thyself.<a epub:type=\"noteref\" href=\"#fn2\">2</a></p>\n\
                \x20   <aside epub:type=\"footnote\" id=\"fn2\">\n\
                \x20     <p>2. Inscribed at the Temple of Apollo at Delphi.</p>\n\
                \x20   </aside>\n";
    EpubSpec::new("Apology", EpubVersion::V3, TocVariant::Nav)
        .author("Plato")
        .chapter_xhtml("The Defence of Socrates", body)
        .write_to(dir, "epub3_footnotes_semantic.epub")
}

fn epub2_footnotes_endnotes(dir: &Path) -> Result<PathBuf> {
    let text = "    <p>Act only according to that maxim whereby you can at the same time will that it should become a universal law.<sup><a id=\"ref1\" href=\"chap_2.xhtml#note1\">[1]</a></sup></p>\n\
                \x20   <p>Two things fill the mind with ever new and increasing admiration and awe.<sup><a id=\"ref2\" href=\"chap_2.xhtml#note2\">[2]</a></sup></p>\n";
    let notes = "    <p id=\"note1\">1. Groundwork of the Metaphysics of Morals, 4:421. <a href=\"chap_1.xhtml#ref1\">↩</a></p>\n\
                 \x20   <p id=\"note2\">2. Critique of Practical Reason, conclusion. <a href=\"chap_1.xhtml#ref2\">↩</a></p>\n";
    EpubSpec::new("Selected Passages", EpubVersion::V2, TocVariant::Ncx)
        .author("Immanuel Kant")
        .chapter_xhtml("Passages", text)
        .chapter_xhtml("Notes", notes)
        .write_to(dir, "epub2_footnotes_endnotes.epub")
}

fn epub2_footnotes_inline(dir: &Path) -> Result<PathBuf> {
    let body = "    <p>Man is born free, and everywhere he is in chains.* Those who think themselves the masters of others are indeed greater slaves than they.&#8224;</p>\n\
                \x20   <p>* The Social Contract, Book I, Chapter 1.</p>\n\
                \x20   <p>&#8224; Ibid., same paragraph.</p>\n";
    EpubSpec::new("The Social Contract", EpubVersion::V2, TocVariant::Ncx)
        .author("Jean-Jacques Rousseau")
        .chapter_xhtml("Subject of the First Book", body)
        .write_to(dir, "epub2_footnotes_inline.epub")
}

fn epub2_opf_minimal(dir: &Path) -> Result<PathBuf> {
    let mut spec = EpubSpec::new("", EpubVersion::V2, TocVariant::Ncx)
        .chapter("Untitled", &["A package whose metadata is a single identifier."]);
    spec.title = None;
    spec.author = None;
    spec.language = None;
    spec.write_to(dir, "epub2_opf_minimal.epub")
}

fn epub3_opf_identifier_soup(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("Discourse on the Method", EpubVersion::V3, TocVariant::Nav)
        .author("René Descartes")
        .identifier("978-0-000000-00-0")
        .identifier("calibre:f3b1e9d2-0000-4000-8000-badc0ffee000")
        .chapter("Part I", &["Good sense is, of all things among men, the most equally distributed."])
        .write_to(dir, "epub3_opf_identifier_soup.epub")
}

fn epub2_opf_calibre_meta(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("An Enquiry Concerning Human Understanding", EpubVersion::V2, TocVariant::Ncx)
        .author("David Hume")
        .meta("calibre:series", "Empiricist Classics")
        .meta("calibre:series_index", "2")
        .meta("calibre:timestamp", "2019-07-04T12:00:00+00:00")
        .meta("cover", "cover-image")
        .chapter("Of the Different Species of Philosophy", &["Moral philosophy, or the science of human nature, may be treated after two different manners."])
        .write_to(dir, "epub2_opf_calibre_meta.epub")
}

fn epub3_opf_unicode_whitespace(dir: &Path) -> Result<PathBuf> {
    EpubSpec::new("  Τὰ εἰς ἑαυτόν  ", EpubVersion::V3, TocVariant::Nav)
        .author("\tΜᾶρκος Αὐρήλιος ")
        .chapter("Βιβλίον πρῶτον", &["Παρὰ τοῦ πάππου Οὐήρου τὸ καλόηθες καὶ ἀόργητον."])
        .write_to(dir, "epub3_opf_unicode_whitespace.epub")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> String {
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_mimetype_is_first_and_stored() {
        let tmp = TempDir::new().unwrap();
        let path = epub2_basic(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn test_container_points_at_opf() {
        let tmp = TempDir::new().unwrap();
        let path = epub3_nav_only(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let container = read_entry(&mut archive, "META-INF/container.xml");
        assert!(container.contains("full-path=\"OEBPS/content.opf\""));

        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert!(opf.contains("version=\"3.0\""));
        assert!(opf.contains("properties=\"nav\""));
        assert!(!opf.contains("toc.ncx"));
    }

    #[test]
    fn test_missing_ncx_keeps_dangling_reference() {
        let tmp = TempDir::new().unwrap();
        let path = epub2_ncx_missing(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert!(opf.contains("href=\"toc.ncx\""));
        assert!(opf.contains("<spine toc=\"ncx\">"));
        assert!(archive.by_name("OEBPS/toc.ncx").is_err());
    }

    #[test]
    fn test_semantic_footnotes_markup() {
        let tmp = TempDir::new().unwrap();
        let path = epub3_footnotes_semantic(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let chapter = read_entry(&mut archive, "OEBPS/chap_1.xhtml");
        assert!(chapter.contains("epub:type=\"noteref\""));
        assert!(chapter.contains("epub:type=\"footnote\""));
    }

    #[test]
    fn test_toc_spine_mismatch() {
        let tmp = TempDir::new().unwrap();
        let path = epub3_toc_spine_mismatch(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        let nav = read_entry(&mut archive, "OEBPS/nav.xhtml");

        // Appendix (chap_2) in ToC, not spine; Colophon (chap_3) the reverse
        assert!(nav.contains("chap_2.xhtml"));
        assert!(!opf.contains("<itemref idref=\"chap2\"/>"));
        assert!(opf.contains("<itemref idref=\"chap3\"/>"));
        assert!(!nav.contains("chap_3.xhtml"));
    }

    #[test]
    fn test_nested_nav_structure() {
        let tmp = TempDir::new().unwrap();
        let path = epub3_nested_nav(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let nav = read_entry(&mut archive, "OEBPS/nav.xhtml");
        // Inner list nested inside the first entry
        assert_eq!(nav.matches("<ol>").count(), 2);
    }

    #[test]
    fn test_nested_ncx_depth() {
        let tmp = TempDir::new().unwrap();
        let path = epub2_nested_ncx(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let ncx = read_entry(&mut archive, "OEBPS/toc.ncx");
        assert!(ncx.contains("name=\"dtb:depth\" content=\"2\""));
    }

    #[test]
    fn test_minimal_opf_has_no_title() {
        let tmp = TempDir::new().unwrap();
        let path = epub2_opf_minimal(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert!(!opf.contains("<dc:title>"));
        assert!(!opf.contains("<dc:creator>"));
        assert!(opf.contains("<dc:identifier id=\"pub-id\">"));
    }

    #[test]
    fn test_identifier_soup_keeps_all_three() {
        let tmp = TempDir::new().unwrap();
        let path = epub3_opf_identifier_soup(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert_eq!(opf.matches("<dc:identifier").count(), 3);
        assert!(opf.contains("978-0-000000-00-0"));
    }

    #[test]
    fn test_calibre_meta_tags_present() {
        let tmp = TempDir::new().unwrap();
        let path = epub2_opf_calibre_meta(tmp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let opf = read_entry(&mut archive, "OEBPS/content.opf");
        assert!(opf.contains("calibre:series"));
        assert!(opf.contains("calibre:series_index"));
    }

    #[test]
    fn test_whole_catalog_writes() {
        let tmp = TempDir::new().unwrap();
        for fixture in catalog() {
            let path = fixture.write(tmp.path()).unwrap();
            assert!(path.exists(), "{} not written", fixture.name);
        }
    }
}
