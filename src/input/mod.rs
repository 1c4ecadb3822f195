//! Input loading
//! Detects file types and extracts plain text for analyses, résumés and job descriptions

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::{DocumentRole, FileType};
pub use manager::InputManager;
