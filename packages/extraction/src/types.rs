//! Data types flowing through the extraction pipeline.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Deserialize;

/// Classified source format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Pdf,
    Html,
}

/// An uploaded document, buffered in memory for the duration of one import.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Raw file bytes
    pub bytes: Vec<u8>,

    /// Declared media type of the upload (e.g. "application/pdf")
    pub content_type: String,

    /// Original filename, when the client provided one
    pub filename: Option<String>,
}

impl DocumentUpload {
    pub fn new(
        bytes: Vec<u8>,
        content_type: impl Into<String>,
        filename: Option<String>,
    ) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            filename,
        }
    }

    /// Size of the buffered upload in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Raw fields the model is constrained to produce.
///
/// This is the wire shape of the schema-constrained completion: `title`,
/// `summary` and `conclusion` are mandatory strings, everything else is
/// nullable. Field names are the exact JSON keys the prompt demands.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExtractionFields {
    pub title: String,
    pub decision_type: Option<String>,
    pub decision_date: Option<String>,
    pub office: Option<String>,
    pub court: Option<String>,
    pub case_number: Option<String>,
    pub summary: String,
    pub conclusion: String,
}

/// Normalized metadata produced by the pipeline, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMetadata {
    pub title: String,
    pub decision_type: Option<String>,
    pub decision_date: Option<DateTime<Utc>>,
    pub office: Option<String>,
    pub court: Option<String>,
    /// Natural dedup key for upserts. Empty strings are normalized to None
    /// so the store only ever sees a usable key or no key at all.
    pub case_number: Option<String>,
    pub summary: String,
    pub conclusion: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use openai_client::StructuredOutput;

    #[test]
    fn extraction_schema_lists_every_field() {
        let schema = ExtractionFields::openai_schema();
        let required = schema["required"].as_array().unwrap();
        let names: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();
        for field in [
            "title",
            "decision_type",
            "decision_date",
            "office",
            "court",
            "case_number",
            "summary",
            "conclusion",
        ] {
            assert!(names.contains(&field), "schema missing {field}");
        }
    }

    #[test]
    fn extraction_schema_forbids_extra_keys() {
        let schema = ExtractionFields::openai_schema();
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn nullable_fields_accept_null() {
        let parsed: ExtractionFields = serde_json::from_str(
            r#"{"title":"X v. Y","decision_type":null,"decision_date":null,
                "office":null,"court":null,"case_number":null,
                "summary":"s","conclusion":"c"}"#,
        )
        .unwrap();
        assert_eq!(parsed.title, "X v. Y");
        assert!(parsed.decision_date.is_none());
    }
}
