//! Testing utilities including a mock extractor.
//!
//! Useful for exercising import flows without document parsing or
//! network calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{ExtractionError, Result};
use crate::traits::MetadataExtractor;
use crate::types::{DocumentUpload, ExtractedMetadata};

/// A mock extractor returning a preconfigured result.
///
/// Tracks how many times it was invoked so tests can assert on the
/// pipeline being reached (or short-circuited).
#[derive(Default)]
pub struct MockExtractor {
    metadata: RwLock<Option<ExtractedMetadata>>,
    config_error: RwLock<Option<String>>,
    calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this metadata from every `extract` call.
    pub fn with_metadata(self, metadata: ExtractedMetadata) -> Self {
        *self.metadata.write().unwrap() = Some(metadata);
        self
    }

    /// Fail every `extract` call with a configuration fault.
    pub fn with_config_error(self, message: impl Into<String>) -> Self {
        *self.config_error.write().unwrap() = Some(message.into());
        self
    }

    /// Replace the canned metadata after construction.
    pub fn set_metadata(&self, metadata: ExtractedMetadata) {
        *self.metadata.write().unwrap() = Some(metadata);
    }

    /// Number of `extract` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataExtractor for MockExtractor {
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractedMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if document.bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        if let Some(message) = self.config_error.read().unwrap().clone() {
            return Err(ExtractionError::Config(message));
        }

        self.metadata
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| ExtractionError::Schema("no mock metadata configured".to_string()))
    }
}

/// Convenience constructor for metadata used across tests.
pub fn sample_metadata(case_number: Option<&str>) -> ExtractedMetadata {
    ExtractedMetadata {
        title: "X v. Y".to_string(),
        decision_type: Some("Judgment".to_string()),
        decision_date: "2024-03-01T00:00:00Z".parse().ok(),
        office: Some("Grand Chamber".to_string()),
        court: Some("Court of Justice".to_string()),
        case_number: case_number.map(str::to_string),
        summary: "A summary.".to_string(),
        conclusion: "A conclusion.".to_string(),
    }
}
