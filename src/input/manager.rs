//! Input manager for loading candidate documents

use crate::error::{EvaluatorError, Result};
use crate::input::file_detector::{DocumentRole, FileType};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<(PathBuf, DocumentRole), String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Load a document as plain text for the given role.
    pub async fn load(&mut self, path: &Path, role: DocumentRole) -> Result<String> {
        let key = (path.to_path_buf(), role);

        if let Some(cached_text) = self.cache.get(&key) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(EvaluatorError::InvalidInput(format!(
                "{} file does not exist: {}",
                role,
                path.display()
            )));
        }

        let file_type = Self::detect_file_type(path, role)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Markdown if role.renders_markdown() => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Text | FileType::Markdown => {
                info!("Reading {} file: {}", role, path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(EvaluatorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if text.trim().is_empty() {
            log::warn!("{} file is empty: {}", role, path.display());
        }

        self.cache.insert(key, text.clone());

        Ok(text)
    }

    pub async fn load_analysis(&mut self, path: &Path) -> Result<String> {
        self.load(path, DocumentRole::Analysis).await
    }

    pub async fn load_resume(&mut self, path: &Path) -> Result<String> {
        self.load(path, DocumentRole::Resume).await
    }

    pub async fn load_job_description(&mut self, path: &Path) -> Result<String> {
        self.load(path, DocumentRole::JobDescription).await
    }

    fn detect_file_type(path: &Path, role: DocumentRole) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                EvaluatorError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        let file_type = FileType::from_extension(extension);
        if !role.accepts(file_type) {
            return Err(EvaluatorError::UnsupportedFormat(format!(
                "Unsupported {} file type .{} for {} (allowed: {})",
                role,
                extension,
                path.display(),
                role.allowed_extensions().join(", ")
            )));
        }
        Ok(file_type)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
