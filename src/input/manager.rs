//! Input manager for résumé files

use crate::config::DEFAULT_MAX_FILE_SIZE_BYTES;
use crate::error::{Result, SkillExtractorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    normalize_text, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    max_file_size_bytes: u64,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = bytes;
        self
    }

    /// Extract the normalized, lower-cased text of a résumé file.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(SkillExtractorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        self.check_file_size(path).await?;

        let raw = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(SkillExtractorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let text = normalize_text(&raw);

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    /// Extract text from PDF bytes already in memory, enforcing the size cap.
    pub async fn extract_pdf_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        self.ensure_within_limit(bytes.len() as u64)?;
        let raw = PdfExtractor.extract_bytes(bytes).await?;
        Ok(normalize_text(&raw))
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .ok_or_else(|| {
                SkillExtractorError::InvalidInput(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })
    }

    async fn check_file_size(&self, path: &Path) -> Result<()> {
        let metadata = tokio::fs::metadata(path).await?;
        self.ensure_within_limit(metadata.len())
    }

    fn ensure_within_limit(&self, actual: u64) -> Result<()> {
        if actual > self.max_file_size_bytes {
            return Err(SkillExtractorError::FileTooLarge {
                actual,
                limit_mb: self.max_file_size_bytes / (1024 * 1024),
            });
        }
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
