//! Prompt construction for the metadata extraction call.

/// Character budget for the document text embedded in the prompt.
///
/// Longer documents lose trailing content silently. This is an accepted
/// lossy policy, not a bug: the metadata fields live at the head of a
/// decision in practice.
pub const RAW_TEXT_MAX_LENGTH: usize = 15_000;

/// System instruction framing the model as a legal metadata extractor.
pub const SYSTEM_PROMPT: &str =
    "You are a legal analyst that extracts structured metadata from case law documents.";

/// Build the single-shot extraction prompt around the document text.
///
/// No few-shot examples, no prior document history; just the field list,
/// the formatting contract and the (truncated) text.
pub fn build_prompt(raw_text: &str) -> String {
    let truncated = truncate_chars(raw_text, RAW_TEXT_MAX_LENGTH);
    [
        "Extract the following fields from the provided case law document:",
        "title, decision_type, decision_date (ISO 8601), office, court, case_number, \
         summary, conclusion, source_url (if explicitly referenced).",
        "Return a well-formed JSON object with these exact keys. If data is missing, \
         set the value to null.",
        "Here is the document text:",
        truncated,
    ]
    .join("\n\n")
}

/// First `max` characters of `text`, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_embedded_whole() {
        let prompt = build_prompt("short document");
        assert!(prompt.ends_with("short document"));
        assert!(prompt.contains("case_number"));
        assert!(prompt.contains("set the value to null"));
    }

    #[test]
    fn long_text_is_cut_at_exactly_the_budget() {
        let text = "a".repeat(RAW_TEXT_MAX_LENGTH + 500);
        let prompt = build_prompt(&text);
        let embedded = prompt.rsplit("\n\n").next().unwrap();
        assert_eq!(embedded.chars().count(), RAW_TEXT_MAX_LENGTH);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let text = "§".repeat(RAW_TEXT_MAX_LENGTH + 10);
        let prompt = build_prompt(&text);
        let embedded = prompt.rsplit("\n\n").next().unwrap();
        assert_eq!(embedded.chars().count(), RAW_TEXT_MAX_LENGTH);
    }

    #[test]
    fn prompt_names_every_target_field() {
        let prompt = build_prompt("doc");
        for field in [
            "title",
            "decision_type",
            "decision_date",
            "office",
            "court",
            "case_number",
            "summary",
            "conclusion",
            "source_url",
        ] {
            assert!(prompt.contains(field), "prompt missing {field}");
        }
    }
}
