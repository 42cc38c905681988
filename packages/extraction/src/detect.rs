//! Source-type detection from the declared media type.

use crate::types::SourceType;

/// Classify an upload by its declared media type.
///
/// Anything whose media type mentions "pdf" is treated as PDF; everything
/// else falls through to HTML. There is deliberately no allow-list: unknown
/// formats are passed to the HTML extractor, which yields empty or garbage
/// text rather than rejecting the upload. This mirrors the behavior
/// downstream consumers already depend on.
pub fn detect_source_type(content_type: &str) -> SourceType {
    if content_type.contains("pdf") {
        SourceType::Pdf
    } else {
        SourceType::Html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_media_types_are_pdf() {
        assert_eq!(detect_source_type("application/pdf"), SourceType::Pdf);
        assert_eq!(detect_source_type("application/x-pdf"), SourceType::Pdf);
        assert_eq!(
            detect_source_type("application/pdf; charset=binary"),
            SourceType::Pdf
        );
    }

    #[test]
    fn everything_else_is_html() {
        assert_eq!(detect_source_type("text/html"), SourceType::Html);
        assert_eq!(detect_source_type("text/plain"), SourceType::Html);
        assert_eq!(detect_source_type("image/png"), SourceType::Html);
        assert_eq!(detect_source_type(""), SourceType::Html);
    }

    #[test]
    fn match_is_case_sensitive() {
        // "PDF" does not match; the comparison follows the declared
        // lowercase convention of media types.
        assert_eq!(detect_source_type("application/PDF"), SourceType::Html);
    }
}
