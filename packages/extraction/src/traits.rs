//! Extractor trait abstraction.
//!
//! Implementations wrap a specific LLM provider; the server only ever
//! talks to the trait, which keeps import handlers testable without
//! network calls.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DocumentUpload, ExtractedMetadata};

/// Turns one uploaded document into normalized case metadata.
///
/// The contract is a single pass over the document: classify, extract
/// text, issue exactly one model call, normalize. No retries.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractedMetadata>;
}
