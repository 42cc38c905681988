//! Case-Law Document Extraction Pipeline
//!
//! Turns an uploaded decision (PDF or HTML) into normalized, structured
//! case metadata via a schema-constrained LLM call:
//!
//! detect type → extract text → build prompt → call model → normalize date
//!
//! # Usage
//!
//! ```rust,ignore
//! use extraction::{DocumentUpload, MetadataExtractor, OpenAiExtractor};
//!
//! let extractor = OpenAiExtractor::new(Some(api_key.into()), None, timeout);
//! let document = DocumentUpload::new(bytes, "application/pdf", None);
//! let metadata = extractor.extract(&document).await?;
//! ```
//!
//! # Modules
//!
//! - [`detect`] - Source-type classification from the declared media type
//! - [`text`] - PDF/HTML plain-text extraction
//! - [`prompt`] - Extraction prompt construction
//! - [`normalize`] - Decision-date normalization
//! - [`openai`] - OpenAI-backed extractor implementation
//! - [`testing`] - Mock extractor for tests

pub mod detect;
pub mod error;
pub mod normalize;
pub mod openai;
pub mod prompt;
pub mod security;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;

pub use detect::detect_source_type;
pub use error::{ExtractionError, Result};
pub use normalize::normalize_decision_date;
pub use openai::{OpenAiExtractor, DEFAULT_CALL_TIMEOUT, DEFAULT_MODEL};
pub use prompt::{build_prompt, RAW_TEXT_MAX_LENGTH, SYSTEM_PROMPT};
pub use security::SecretString;
pub use text::extract_plain_text;
pub use traits::MetadataExtractor;
pub use types::{DocumentUpload, ExtractedMetadata, ExtractionFields, SourceType};
