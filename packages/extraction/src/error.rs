//! Typed errors for the extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while turning an uploaded document into metadata.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The uploaded file carried no bytes
    #[error("file buffer is empty")]
    EmptyDocument,

    /// PDF text-layer extraction failed
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// Required configuration is missing (API credential)
    #[error("config error: {0}")]
    Config(String),

    /// The model reply did not conform to the extraction schema
    #[error("LLM payload did not match extraction schema: {0}")]
    Schema(String),

    /// The upstream completion endpoint failed
    #[error("LLM service error: {0}")]
    Upstream(#[source] openai_client::OpenAIError),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
