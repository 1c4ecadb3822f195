//! CLI interface for the resume evaluator

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-evaluator")]
#[command(about = "Score candidates from language-model resume analyses")]
#[command(long_about = "Extract structured candidate fields from a model's free-text resume analysis, \
normalize them, and compute a weighted score and hiring recommendation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a single candidate analysis
    Evaluate {
        /// Path to the model's analysis text (TXT, MD)
        #[arg(short, long)]
        analysis: PathBuf,

        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show every field, reasoning and diagnostics
        #[arg(short, long)]
        detailed: bool,
    },

    /// Evaluate many analyses against one job description and rank them
    Rank {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Directory of resumes, matched to analyses by file stem
        #[arg(short, long)]
        resumes: Option<PathBuf>,

        /// Analysis files to rank
        #[arg(required = true)]
        analyses: Vec<PathBuf>,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show source files for each candidate
        #[arg(short, long)]
        detailed: bool,
    },

    /// List canonical fields and the labels recognized for each
    Fields,

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("README"), &["txt"]).is_err());
    }

    #[test]
    fn test_rank_arguments() {
        let cli = Cli::try_parse_from([
            "resume-evaluator",
            "rank",
            "--job",
            "job.txt",
            "--resumes",
            "cvs",
            "a.txt",
            "b.md",
        ])
        .unwrap();

        match cli.command {
            Commands::Rank { analyses, resumes, .. } => {
                assert_eq!(analyses.len(), 2);
                assert_eq!(resumes, Some(PathBuf::from("cvs")));
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["resume-evaluator", "fields", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Fields));
    }
}
