//! OpenAI-backed implementation of [`MetadataExtractor`].

use std::time::Duration;

use async_trait::async_trait;
use openai_client::{OpenAIClient, OpenAIError};
use tracing::{debug, error};

use crate::detect::detect_source_type;
use crate::error::{ExtractionError, Result};
use crate::normalize::normalize_decision_date;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::security::SecretString;
use crate::text::extract_plain_text;
use crate::traits::MetadataExtractor;
use crate::types::{DocumentUpload, ExtractedMetadata, ExtractionFields};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Upper bound on a single completion call.
///
/// A hung endpoint fails the import instead of suspending the request
/// forever.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Metadata extractor backed by OpenAI structured output.
///
/// Constructed once at process start and shared. The API credential is
/// optional at construction: its absence surfaces as a configuration
/// fault on the first import that needs it, not as a startup failure.
pub struct OpenAiExtractor {
    client: Option<OpenAIClient>,
    model: String,
}

impl OpenAiExtractor {
    pub fn new(api_key: Option<SecretString>, model: Option<String>, timeout: Duration) -> Self {
        let client = api_key.map(|key| OpenAIClient::with_timeout(key.expose(), timeout));
        Self {
            client,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// The chat model this extractor calls.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn invoke_model(&self, raw_text: &str) -> Result<ExtractionFields> {
        // Checked before any request is attempted.
        let client = self.client.as_ref().ok_or_else(|| {
            ExtractionError::Config("OPENAI_API_KEY is not configured".to_string())
        })?;

        let prompt = build_prompt(raw_text);

        let fields: ExtractionFields = client
            .extract(&self.model, SYSTEM_PROMPT, prompt)
            .await
            .map_err(|e| match e {
                OpenAIError::Config(msg) => ExtractionError::Config(msg),
                OpenAIError::Parse(msg) => {
                    error!(error = %msg, "LLM response did not include structured payload");
                    ExtractionError::Schema(msg)
                }
                other => ExtractionError::Upstream(other),
            })?;

        if fields.title.is_empty() {
            error!("LLM payload has an empty title");
            return Err(ExtractionError::Schema(
                "title must be a non-empty string".to_string(),
            ));
        }

        Ok(fields)
    }
}

#[async_trait]
impl MetadataExtractor for OpenAiExtractor {
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractedMetadata> {
        let source_type = detect_source_type(&document.content_type);
        let raw_text = extract_plain_text(&document.bytes, source_type)?;

        debug!(
            source_type = ?source_type,
            text_len = raw_text.len(),
            filename = document.filename.as_deref().unwrap_or("<unnamed>"),
            "Extracted document text"
        );

        let fields = self.invoke_model(&raw_text).await?;
        let decision_date = normalize_decision_date(fields.decision_date.as_deref());

        Ok(ExtractedMetadata {
            title: fields.title,
            decision_type: fields.decision_type,
            decision_date,
            office: fields.office,
            court: fields.court,
            case_number: fields.case_number.filter(|n| !n.is_empty()),
            summary: fields.summary,
            conclusion: fields.conclusion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_doc() -> DocumentUpload {
        DocumentUpload::new(
            b"<body><p>Judgment of the Court</p></body>".to_vec(),
            "text/html",
            Some("case.html".to_string()),
        )
    }

    #[test]
    fn default_model_is_applied() {
        let extractor = OpenAiExtractor::new(None, None, DEFAULT_CALL_TIMEOUT);
        assert_eq!(extractor.model(), DEFAULT_MODEL);

        let extractor = OpenAiExtractor::new(
            None,
            Some("gpt-4o".to_string()),
            DEFAULT_CALL_TIMEOUT,
        );
        assert_eq!(extractor.model(), "gpt-4o");
    }

    #[tokio::test]
    async fn missing_credential_is_a_config_fault() {
        let extractor = OpenAiExtractor::new(None, None, DEFAULT_CALL_TIMEOUT);
        let err = extractor.extract(&html_doc()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Config(_)));
    }

    #[tokio::test]
    async fn empty_document_fails_before_credential_check() {
        let extractor = OpenAiExtractor::new(None, None, DEFAULT_CALL_TIMEOUT);
        let doc = DocumentUpload::new(Vec::new(), "text/html", None);
        let err = extractor.extract(&doc).await.unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyDocument));
    }
}
