//! Synthetic Markdown fixtures
//!
//! Plain text assembly; each file isolates one parsing edge case the
//! pipeline's Markdown path has to handle.

use super::{Fixture, FixtureKind};
use crate::error::Result;
use std::path::{Path, PathBuf};

fn write(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, content)?;
    Ok(path)
}

// ===== Fixture catalog =====

pub fn catalog() -> Vec<Fixture> {
    let m = |name, description, writer| {
        Fixture::new(name, FixtureKind::Markdown, description, writer)
    };
    vec![
        m("md_atx_headings", "ATX headings h1 through h6", md_atx_headings),
        m("md_setext_headings", "Setext-underlined headings", md_setext_headings),
        m("md_front_matter", "YAML front matter block", md_front_matter),
        m(
            "md_footnotes",
            "Reference and inline footnote syntax",
            md_footnotes,
        ),
        m("md_nested_lists", "Lists nested four levels deep", md_nested_lists),
        m("md_gfm_table", "GFM table with alignment markers", md_gfm_table),
        m("md_utf8_bom", "UTF-8 byte order mark before the heading", md_utf8_bom),
        m(
            "md_no_trailing_newline",
            "File ends mid-sentence without a newline",
            md_no_trailing_newline,
        ),
    ]
}

fn md_atx_headings(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_atx_headings.md",
        "# Ethics\n\n\
         ## Book I\n\n\
         ### The Good for Man\n\n\
         #### Subject of Our Inquiry\n\n\
         ##### All Human Activities Aim at Some Good\n\n\
         ###### A Footnote of Structure\n\n\
         Every art and every inquiry, and similarly every action and pursuit,\n\
         is thought to aim at some good.\n",
    )
}

fn md_setext_headings(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_setext_headings.md",
        "Leviathan\n\
         =========\n\n\
         Of Man\n\
         ------\n\n\
         Nature hath made men so equal in the faculties of body and mind that\n\
         the difference between man and man is not so considerable.\n",
    )
}

fn md_front_matter(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_front_matter.md",
        "---\n\
         title: Critique of Pure Reason\n\
         author: Immanuel Kant\n\
         year: 1781\n\
         tags: [epistemology, metaphysics]\n\
         ---\n\n\
         # Introduction\n\n\
         That all our knowledge begins with experience there can be no doubt.\n",
    )
}

fn md_footnotes(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_footnotes.md",
        "# Tractatus\n\n\
         The world is all that is the case.[^1] The world is the totality of\n\
         facts, not of things.^[An inline note, in the Pandoc style.]\n\n\
         What is the case -- a fact -- is the existence of states of affairs.[^long]\n\n\
         [^1]: Proposition 1.\n\n\
         [^long]: Proposition 2. This note runs longer than one line to make\n\
         \x20   sure continuation indentation survives extraction.\n",
    )
}

fn md_nested_lists(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_nested_lists.md",
        "# Taxonomy of Arguments\n\n\
         - Deductive\n\
         \x20 - Valid\n\
         \x20   - Sound\n\
         \x20     - With true premises\n\
         \x20   - Unsound\n\
         \x20 - Invalid\n\
         - Inductive\n\
         \x20 1. Strong\n\
         \x20 2. Weak\n",
    )
}

fn md_gfm_table(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_gfm_table.md",
        "# Schools at a Glance\n\n\
         | School      | Founder   | Core claim                     |\n\
         |:------------|:---------:|-------------------------------:|\n\
         | Stoicism    | Zeno      | Virtue is the only good        |\n\
         | Epicureanism| Epicurus  | Pleasure, rightly understood   |\n\
         | Cynicism    | Antisthenes | Live according to nature     |\n",
    )
}

fn md_utf8_bom(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_utf8_bom.md",
        "\u{feff}# Ἠθικὰ Νικομάχεια\n\nΠᾶσα τέχνη καὶ πᾶσα μέθοδος ἀγαθοῦ τινὸς ἐφίεσθαι δοκεῖ.\n",
    )
}

fn md_no_trailing_newline(dir: &Path) -> Result<PathBuf> {
    write(
        dir,
        "md_no_trailing_newline.md",
        "# An Unfinished Thought\n\nThe file simply stops",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bom_preserved() {
        let tmp = TempDir::new().unwrap();
        let path = md_utf8_bom(tmp.path()).unwrap();

        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = md_no_trailing_newline(tmp.path()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_front_matter_delimited() {
        let tmp = TempDir::new().unwrap();
        let path = md_front_matter(tmp.path()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("---\n"));
        assert_eq!(content.matches("---\n").count(), 2);
    }

    #[test]
    fn test_footnote_defs_present() {
        let tmp = TempDir::new().unwrap();
        let path = md_footnotes(tmp.path()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("[^1]:"));
        assert!(content.contains("[^long]:"));
        assert!(content.contains("^[An inline note"));
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
