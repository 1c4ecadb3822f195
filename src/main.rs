//! Resume evaluator: score candidates from language-model resume analyses

use clap::Parser;
use log::{error, info, warn};
use resume_evaluator::cli::{self, Cli, Commands, ConfigAction};
use resume_evaluator::config::{Config, OutputFormat};
use resume_evaluator::error::{EvaluatorError, Result};
use resume_evaluator::input::{DocumentRole, InputManager};
use resume_evaluator::output::{
    save_report_to_file, suggest_filename, EvaluationReport, ReportGenerator, ReportMetadata,
    ShortlistReport, ShortlistSummary,
};
use resume_evaluator::processing::fields::{AliasTable, Field};
use resume_evaluator::processing::{Evaluation, EvaluationInput, Evaluator};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Evaluate {
            analysis,
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let detailed = detailed || config.output.detailed;

            check_extension(&analysis, DocumentRole::Analysis)?;
            if let Some(resume) = &resume {
                check_extension(resume, DocumentRole::Resume)?;
            }
            if let Some(job) = &job {
                check_extension(job, DocumentRole::JobDescription)?;
            }

            info!("Evaluating {}", analysis.display());
            let mut input_manager = InputManager::new();
            let analysis_text = input_manager.load_analysis(&analysis).await?;
            let resume_text = match &resume {
                Some(path) => Some(input_manager.load_resume(path).await?),
                None => None,
            };
            let job_text = match &job {
                Some(path) => Some(input_manager.load_job_description(path).await?),
                None => None,
            };

            let evaluator = Evaluator::new(&config)?;
            let input = EvaluationInput {
                analysis_text: Some(&analysis_text),
                resume_text: resume_text.as_deref(),
                job_description_text: job_text.as_deref(),
            };
            let evaluation = evaluator.evaluate(&input)?;

            let metadata = ReportMetadata::new(
                vec![analysis.display().to_string()],
                resume.as_deref(),
                job.as_deref(),
            );
            let report = EvaluationReport::new(evaluation, &config.scoring.weights, metadata);

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
            let content = generator.generate_evaluation(&report, format)?;

            emit(&content, save.as_deref(), format, &analysis)?;
        }

        Commands::Rank {
            job,
            resumes,
            analyses,
            output,
            save,
            detailed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let detailed = detailed || config.output.detailed;
            let start_time = Instant::now();

            check_extension(&job, DocumentRole::JobDescription)?;
            for analysis in &analyses {
                check_extension(analysis, DocumentRole::Analysis)?;
            }

            let mut input_manager = InputManager::new();
            let job_text = Arc::new(input_manager.load_job_description(&job).await?);

            let mut candidates = Vec::with_capacity(analyses.len());
            for analysis in &analyses {
                let analysis_text = input_manager.load_analysis(analysis).await?;
                let resume_text = match resumes.as_deref().and_then(|dir| find_resume(dir, analysis)) {
                    Some(path) => Some(input_manager.load_resume(&path).await?),
                    None => None,
                };
                candidates.push((analysis.clone(), analysis_text, resume_text));
            }

            info!("Ranking {} candidates against {}", candidates.len(), job.display());
            let evaluations = evaluate_concurrently(Arc::new(Evaluator::new(&config)?), job_text, candidates).await?;

            let summary = ShortlistSummary::from_evaluations(
                evaluations
                    .iter()
                    .map(|(source, evaluation)| (source.as_str(), evaluation)),
            );
            let metadata = ReportMetadata::new(
                evaluations.iter().map(|(source, _)| source.clone()).collect(),
                None,
                Some(job.as_path()),
            )
            .with_processing_time(start_time.elapsed().as_millis() as u64);
            let report = ShortlistReport { summary, metadata };

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
            let content = generator.generate_shortlist(&report, format)?;

            emit(&content, save.as_deref(), format, &job)?;
        }

        Commands::Fields => {
            let aliases = AliasTable::new();
            println!("Canonical fields ({} labels recognized)\n", aliases.len());
            for field in Field::ALL {
                let kind = if field.is_numeric() { " [numeric]" } else { "" };
                println!("{}{}", field.label(), kind);
                println!("    {}", aliases.aliases_for(field).join(", "));
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        EvaluatorError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}\n", path.display());
                    println!("{}", content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Evaluate every candidate on the blocking pool; failures are logged and skipped.
async fn evaluate_concurrently(
    evaluator: Arc<Evaluator>,
    job_text: Arc<String>,
    candidates: Vec<(PathBuf, String, Option<String>)>,
) -> Result<Vec<(String, Evaluation)>> {
    let handles: Vec<_> = candidates
        .into_iter()
        .map(|(path, analysis_text, resume_text)| {
            let evaluator = Arc::clone(&evaluator);
            let job_text = Arc::clone(&job_text);
            tokio::task::spawn_blocking(move || {
                let input = EvaluationInput {
                    analysis_text: Some(&analysis_text),
                    resume_text: resume_text.as_deref(),
                    job_description_text: Some(job_text.as_str()),
                };
                (path, evaluator.evaluate(&input))
            })
        })
        .collect();

    let mut evaluations = Vec::with_capacity(handles.len());
    for handle in handles {
        let (path, result) = handle
            .await
            .map_err(|e| EvaluatorError::Processing(format!("Evaluation task failed: {}", e)))?;
        match result {
            Ok(evaluation) => evaluations.push((path.display().to_string(), evaluation)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    Ok(evaluations)
}

/// Résumé in `dir` sharing the analysis file's stem, preferring PDF.
fn find_resume(dir: &Path, analysis: &Path) -> Option<PathBuf> {
    let stem = analysis.file_stem()?.to_string_lossy();
    let found = ["pdf", "txt", "md"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|candidate| candidate.is_file());
    if found.is_none() {
        warn!("No resume found for {} in {}", analysis.display(), dir.display());
    }
    found
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(EvaluatorError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn check_extension(path: &Path, role: DocumentRole) -> Result<()> {
    cli::validate_file_extension(path, role.allowed_extensions())
        .map_err(|e| EvaluatorError::InvalidInput(format!("{} file {}: {}", role, path.display(), e)))
}

fn emit(content: &str, save: Option<&Path>, format: OutputFormat, source: &Path) -> Result<()> {
    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(format, &source.to_string_lossy(), true))
            } else {
                path.to_path_buf()
            };
            save_report_to_file(content, &path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
