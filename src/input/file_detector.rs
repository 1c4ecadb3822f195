//! File type detection

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(FileType::Unknown, Self::from_extension)
    }
}

/// What a document is used for; decides which file types are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRole {
    Analysis,
    Resume,
    JobDescription,
}

impl DocumentRole {
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentRole::Analysis => &["txt", "md"],
            DocumentRole::Resume => &["pdf", "txt", "md"],
            DocumentRole::JobDescription => &["txt", "md"],
        }
    }

    pub fn accepts(&self, file_type: FileType) -> bool {
        match self {
            DocumentRole::Resume => file_type != FileType::Unknown,
            DocumentRole::Analysis | DocumentRole::JobDescription => {
                matches!(file_type, FileType::Text | FileType::Markdown)
            }
        }
    }

    /// Analyses are parsed line by line, so their Markdown is kept as written.
    pub fn renders_markdown(&self) -> bool {
        !matches!(self, DocumentRole::Analysis)
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentRole::Analysis => "analysis",
            DocumentRole::Resume => "resume",
            DocumentRole::JobDescription => "job description",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_by_extension() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("notes.markdown")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("noext")), FileType::Unknown);
    }

    #[test]
    fn test_roles_restrict_types() {
        assert!(DocumentRole::Resume.accepts(FileType::Pdf));
        assert!(!DocumentRole::JobDescription.accepts(FileType::Pdf));
        assert!(!DocumentRole::Analysis.accepts(FileType::Unknown));
        assert!(!DocumentRole::Analysis.renders_markdown());
    }
}
