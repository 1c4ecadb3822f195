//! Error handling for the resume evaluator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    /// The analysis text was empty or missing; there is nothing to evaluate.
    #[error("Analysis parse failure: {0}")]
    AnalysisParseFailure(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, EvaluatorError>;

impl From<regex::Error> for EvaluatorError {
    fn from(err: regex::Error) -> Self {
        EvaluatorError::Processing(format!("Invalid pattern: {}", err))
    }
}

impl From<aho_corasick::BuildError> for EvaluatorError {
    fn from(err: aho_corasick::BuildError) -> Self {
        EvaluatorError::Processing(format!("Failed to build keyword matcher: {}", err))
    }
}
