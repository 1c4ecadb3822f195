//! Report structures, formatters and batch summaries

pub mod formatter;
pub mod report;
pub mod summary;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{EvaluationReport, ReportMetadata, ShortlistReport};
pub use summary::ShortlistSummary;
