//! Plain-text extraction from PDF and HTML buffers.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractionError, Result};
use crate::types::SourceType;

/// Extract plain text from a document buffer.
///
/// PDF buffers go through the text layer; HTML buffers are decoded as
/// UTF-8 and reduced to the body's visible text with whitespace collapsed.
/// An empty buffer is an error regardless of type.
pub fn extract_plain_text(bytes: &[u8], source_type: SourceType) -> Result<String> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    match source_type {
        SourceType::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string())),
        SourceType::Html => {
            let html = String::from_utf8_lossy(bytes);
            Ok(html_body_text(&html))
        }
    }
}

/// Body text of an HTML document: tags stripped, script/style/noscript
/// subtrees skipped, runs of whitespace collapsed to single spaces.
fn html_body_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            push_visible_text(body, &mut text);
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(el) = ElementRef::wrap(child) {
            if !matches!(el.value().name(), "script" | "style" | "noscript") {
                push_visible_text(el, out);
            }
        }
    }
}
