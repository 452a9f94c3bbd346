//! Read a rendered guide document back into its inputs.

use super::escape;
use crate::model::{CategoryTable, Section};
use crate::{Error, Result};

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Deserialize;

/// Everything a rendered document carries about its guide.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedGuide {
    pub title: String,
    pub image: String,
    pub categories: CategoryTable,
    pub sections: Vec<Section>,
}

#[derive(Deserialize)]
struct GuideData {
    categories: CategoryTable,
    sections: Vec<Section>,
}

// The data block is hardened against `</script`, so the first closing tag
// after the opener ends it.
const DATA_RE: &str = r#"(?s)<script type="application/json" id="guide-data">(.*?)</script>"#;
const TITLE_RE: &str = r#"(?s)<title>(.*?)</title>"#;
const IMAGE_RE: &str = r#"<img src="([^"]*)"[^>]*class="guide-image""#;

static DATA_PATTERN: OnceCell<Regex> = OnceCell::new();
static TITLE_PATTERN: OnceCell<Regex> = OnceCell::new();
static IMAGE_PATTERN: OnceCell<Regex> = OnceCell::new();

/// Parse a document produced by [`DocumentRenderer`](crate::DocumentRenderer).
///
/// Inverse of rendering: title and image come back unescaped, categories and
/// sections are decoded from the embedded JSON block.
pub fn extract_guide(html: &str) -> Result<ExtractedGuide> {
    let title = capture(pattern(&TITLE_PATTERN, TITLE_RE)?, html, "missing <title>")?;
    let image = capture(pattern(&IMAGE_PATTERN, IMAGE_RE)?, html, "missing guide image")?;
    let data = capture(pattern(&DATA_PATTERN, DATA_RE)?, html, "missing guide data block")?;

    let GuideData {
        categories,
        sections,
    } = serde_json::from_str(data)?;

    Ok(ExtractedGuide {
        title: escape::unescape_html(title).into_owned(),
        image: escape::unescape_html(image).into_owned(),
        categories,
        sections,
    })
}

/// Compiled on first use, shared by every later extraction.
fn pattern(cell: &'static OnceCell<Regex>, source: &str) -> Result<&'static Regex> {
    Ok(cell.get_or_try_init(|| Regex::new(source))?)
}

fn capture<'h>(re: &Regex, html: &'h str, missing: &str) -> Result<&'h str> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::MalformedDocument(missing.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile_once() {
        let first = pattern(&TITLE_PATTERN, TITLE_RE).unwrap();
        let again = pattern(&TITLE_PATTERN, TITLE_RE).unwrap();
        assert!(std::ptr::eq(first, again));

        pattern(&DATA_PATTERN, DATA_RE).unwrap();
        pattern(&IMAGE_PATTERN, IMAGE_RE).unwrap();
    }

    #[test]
    fn plain_html_is_rejected() {
        let err = extract_guide("<html><title>x</title></html>").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn corrupt_data_block_is_an_encoding_error() {
        let html = concat!(
            "<title>t</title>",
            r#"<img src="a.png" alt="" class="guide-image">"#,
            r#"<script type="application/json" id="guide-data">{"sections":</script>"#,
        );
        assert!(matches!(extract_guide(html), Err(Error::Encode(_))));
    }
}
