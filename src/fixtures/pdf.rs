//! Synthetic PDF fixtures
//!
//! Built with printpdf's builtin fonts. The pipeline only cares about text
//! extraction behavior (page boundaries, footnote placement, blank pages),
//! so each fixture is a short sequence of `use_text` calls.

use super::{Fixture, FixtureKind};
use crate::error::{Error, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

fn pdf_err(e: printpdf::Error) -> Error {
    Error::Fixture(format!("PDF generation failed: {}", e))
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    font: &'a IndirectFontRef,
}

impl<'a> PageWriter<'a> {
    /// Write lines top-down starting at the top margin
    fn body(&self, page: printpdf::PdfPageIndex, layer: printpdf::PdfLayerIndex, lines: &[&str]) {
        let layer = self.doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT - MARGIN;
        for line in lines {
            layer.use_text(*line, 11.0, Mm(MARGIN), Mm(y), self.font);
            y -= LINE_HEIGHT;
        }
    }

    /// Write lines bottom-up ending at the bottom margin
    fn footer(&self, page: printpdf::PdfPageIndex, layer: printpdf::PdfLayerIndex, lines: &[&str]) {
        let layer = self.doc.get_page(page).get_layer(layer);
        let mut y = MARGIN + LINE_HEIGHT * (lines.len() as f32 - 1.0);
        for line in lines {
            layer.use_text(*line, 9.0, Mm(MARGIN), Mm(y), self.font);
            y -= LINE_HEIGHT;
        }
    }
}

fn save(doc: PdfDocumentReference, path: &Path) -> Result<()> {
    doc.save(&mut BufWriter::new(File::create(path)?))
        .map_err(pdf_err)
}

// ===== Fixture catalog =====

pub fn catalog() -> Vec<Fixture> {
    let p = |name, description, writer| Fixture::new(name, FixtureKind::Pdf, description, writer);
    vec![
        p("pdf_single_page", "One page of plain paragraphs", pdf_single_page),
        p("pdf_multipage", "Five pages with page-number footers", pdf_multipage),
        p(
            "pdf_footnotes",
            "Footnotes separated from the body at the page bottom",
            pdf_footnotes,
        ),
        p("pdf_blank_pages", "A blank page sandwiched between text pages", pdf_blank_pages),
        p("pdf_minimal", "Empty title, one word of content", pdf_minimal),
    ]
}

fn pdf_single_page(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("pdf_single_page.pdf");
    let (doc, page, layer) =
        PdfDocument::new("On Liberty", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::TimesRoman).map_err(pdf_err)?;

    let writer = PageWriter { doc: &doc, font: &font };
    writer.body(
        page,
        layer,
        &[
            "On Liberty",
            "",
            "The subject of this Essay is not the so-called Liberty of the Will,",
            "so unfortunately opposed to the misnamed doctrine of Philosophical",
            "Necessity; but Civil, or Social Liberty: the nature and limits of the",
            "power which can be legitimately exercised by society over the",
            "individual.",
        ],
    );

    save(doc, &path)?;
    Ok(path)
}

fn pdf_multipage(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("pdf_multipage.pdf");
    let (doc, first_page, first_layer) =
        PdfDocument::new("Utilitarianism", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let writer = PageWriter { doc: &doc, font: &font };

    for n in 1..=5 {
        let (page, layer) = if n == 1 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
        };
        let heading = format!("Chapter {}", n);
        let footer = format!("Page {}", n);
        writer.body(
            page,
            layer,
            &[
                heading.as_str(),
                "",
                "The creed which accepts as the foundation of morals, Utility, or the",
                "Greatest Happiness Principle, holds that actions are right in",
                "proportion as they tend to promote happiness.",
            ],
        );
        writer.footer(page, layer, &[footer.as_str()]);
    }

    save(doc, &path)?;
    Ok(path)
}

fn pdf_footnotes(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("pdf_footnotes.pdf");
    let (doc, page, layer) = PdfDocument::new(
        "Beyond Good and Evil",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::TimesRoman).map_err(pdf_err)?;
    let writer = PageWriter { doc: &doc, font: &font };

    writer.body(
        page,
        layer,
        &[
            "Supposing that Truth is a woman -- what then? [1] Is there not ground",
            "for suspecting that all philosophers, in so far as they have been",
            "dogmatists, have failed to understand women? [2]",
        ],
    );
    writer.footer(
        page,
        layer,
        &[
            "_________________________",
            "[1] Preface, first sentence.",
            "[2] The question is rhetorical.",
        ],
    );

    save(doc, &path)?;
    Ok(path)
}

fn pdf_blank_pages(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("pdf_blank_pages.pdf");
    let (doc, first_page, first_layer) =
        PdfDocument::new("Pensées", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::TimesRoman).map_err(pdf_err)?;
    let writer = PageWriter { doc: &doc, font: &font };

    writer.body(
        first_page,
        first_layer,
        &["The heart has its reasons which reason knows nothing of."],
    );

    // Deliberately empty second page
    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let (third_page, third_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    writer.body(
        third_page,
        third_layer,
        &["Man is but a reed, the most feeble thing in nature; but he is a thinking reed."],
    );

    save(doc, &path)?;
    Ok(path)
}

fn pdf_minimal(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("pdf_minimal.pdf");
    let (doc, page, layer) = PdfDocument::new("", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Courier).map_err(pdf_err)?;

    let writer = PageWriter { doc: &doc, font: &font };
    writer.body(page, layer, &["Wovon man nicht sprechen kann."]);

    save(doc, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_is_pdf() {
        let tmp = TempDir::new().unwrap();
        let path = pdf_single_page(tmp.path()).unwrap();

        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_whole_catalog_writes() {
        let tmp = TempDir::new().unwrap();
        for fixture in catalog() {
            let path = fixture.write(tmp.path()).unwrap();
            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"%PDF"), "{} is not a PDF", fixture.name);
        }
    }
}
