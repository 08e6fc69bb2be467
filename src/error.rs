//! Error handling for the skill extractor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillExtractorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File size exceeds {limit_mb}MB limit ({actual} bytes)")]
    FileTooLarge { actual: u64, limit_mb: u64 },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    ApiKey(String),

    #[error("Malformed LLM response: {raw}")]
    LlmResponse { raw: String },

    #[error("Job page error: {0}")]
    JobPage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkillExtractorError>;

impl SkillExtractorError {
    /// Message shown to the user when an action fails.
    ///
    /// Input problems are reported verbatim; service and parsing failures
    /// collapse to a generic message, the details go to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::FileTooLarge { .. }
            | Self::UnsupportedFormat(_)
            | Self::InvalidInput(_)
            | Self::ApiKey(_)
            | Self::Configuration(_) => self.to_string(),
            Self::PdfExtraction(_) => "Failed to process PDF. Please try again.".to_string(),
            Self::Network(_) | Self::Api { .. } => {
                "The language model service could not be reached.".to_string()
            }
            Self::LlmResponse { .. } => "Processing failed.".to_string(),
            _ => self.to_string(),
        }
    }
}
