//! Parsing of JSON replies from the language model

use crate::error::{Result, SkillExtractorError};
use log::error;
use serde::de::DeserializeOwned;

/// Outcome of parsing a model reply: the typed value, or the raw text that
/// failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmParse<T> {
    Parsed(T),
    ParseError { raw: String },
}

impl<T> LlmParse<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, LlmParse::Parsed(_))
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            LlmParse::Parsed(value) => Ok(value),
            LlmParse::ParseError { raw } => Err(SkillExtractorError::LlmResponse { raw }),
        }
    }
}

/// Parse a reply as JSON, tolerating a Markdown code fence around it.
pub fn parse_json_response<T: DeserializeOwned>(raw: &str) -> LlmParse<T> {
    match serde_json::from_str(strip_json_fences(raw)) {
        Ok(value) => LlmParse::Parsed(value),
        Err(e) => {
            error!("Failed to parse LLM response as JSON ({}): {}", e, raw);
            LlmParse::ParseError {
                raw: raw.to_string(),
            }
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = if let Some(stripped) = text.strip_prefix("```json") {
        stripped
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
    } else {
        return text;
    };

    let inner = inner.trim_start();
    inner
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        key: String,
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_fenced_response() {
        let parsed: LlmParse<Sample> = parse_json_response("```json\n{\"key\": \"v\"}\n```");
        assert_eq!(
            parsed,
            LlmParse::Parsed(Sample {
                key: "v".to_string()
            })
        );
    }

    #[test]
    fn test_parse_error_keeps_raw_text() {
        let raw = "Sorry, I cannot help with that.";
        let parsed: LlmParse<Sample> = parse_json_response(raw);
        assert_eq!(
            parsed,
            LlmParse::ParseError {
                raw: raw.to_string()
            }
        );

        match parsed.into_result() {
            Err(SkillExtractorError::LlmResponse { raw: r }) => assert_eq!(r, raw),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let parsed: LlmParse<Sample> = parse_json_response("{\"other\": 1}");
        assert!(!parsed.is_parsed());
    }
}
