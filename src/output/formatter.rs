//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{EvaluationReport, ShortlistReport};
use crate::processing::fields::Field;
use crate::processing::scoring::Recommendation;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering evaluation and shortlist reports
pub trait OutputFormatter {
    fn format_evaluation(&self, report: &EvaluationReport) -> Result<String>;
    fn format_shortlist(&self, report: &ShortlistReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for downstream tooling
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing with hiring panels
pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Fields shown in the non-detailed console view.
const SUMMARY_FIELDS: [Field; 8] = [
    Field::JobApplyingFor,
    Field::TotalExperienceYears,
    Field::LatestCompany,
    Field::CollegeUniversity,
    Field::NoticePeriod,
    Field::PhoneNumber,
    Field::LinkedInUrl,
    Field::CompetitorExperience,
];

fn band_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::StrongFit => Color::Green,
        Recommendation::GoodFit => Color::BrightGreen,
        Recommendation::Consider => Color::Yellow,
        Recommendation::WeakFit => Color::BrightRed,
        Recommendation::Reject => Color::Red,
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_badge(&self, recommendation: Recommendation) -> String {
        let label = recommendation.label().to_uppercase();
        if self.use_colors {
            format!("[{}]", label.color(band_color(recommendation)).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_bar(&self, score: f64) -> String {
        let filled = (score / 10.0).round().clamp(0.0, 10.0) as usize;
        format!("{}{}", "■".repeat(filled), "·".repeat(10 - filled))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_evaluation(&self, report: &EvaluationReport) -> Result<String> {
        let evaluation = &report.evaluation;
        let record = &evaluation.record;
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("CANDIDATE EVALUATION: {}", evaluation.candidate_name()), 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at_display(),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Verdict", 2));
        output.push_str(&format!(
            "Overall Weighted Score: {} {}\n",
            report.overall_score_display(),
            self.format_badge(evaluation.recommendation)
        ));
        output.push_str(&format!(
            "Recommendation: {}\n",
            self.colorize(&report.verdict(), Color::Cyan)
        ));
        if evaluation.used_fallback() {
            output.push_str(&format!(
                "{}\n",
                self.colorize("Match scores computed from résumé/job skill overlap", Color::Yellow)
            ));
        }

        output.push_str(&self.format_header("Score Breakdown", 2));
        for item in &report.score_breakdown {
            output.push_str(&format!(
                "  {:<14} {:>6.1}  {}  (weight {:>4.0}%, +{:.2})\n",
                item.component.name(),
                item.score,
                self.format_bar(item.score),
                item.weight * 100.0,
                item.contribution
            ));
        }

        output.push_str(&self.format_header("Candidate Details", 2));
        let fields: Vec<Field> = if self.detailed {
            Field::ALL.to_vec()
        } else {
            SUMMARY_FIELDS.to_vec()
        };
        for field in fields {
            let value = record.display(field);
            if value.contains('\n') {
                output.push_str(&format!("  {}:\n", self.colorize(field.label(), Color::White)));
                for line in value.lines() {
                    output.push_str(&format!("    {}\n", line));
                }
            } else {
                output.push_str(&format!("  {}: {}\n", self.colorize(field.label(), Color::White), value));
            }
        }

        if self.detailed && !evaluation.diagnostics.is_empty() {
            output.push_str(&self.format_header("Diagnostics", 3));
            for diagnostic in &evaluation.diagnostics {
                output.push_str(&format!("  • {}\n", self.colorize(&diagnostic.to_string(), Color::Yellow)));
            }
        }

        Ok(output)
    }

    fn format_shortlist(&self, report: &ShortlistReport) -> Result<String> {
        let summary = &report.summary;
        let mut output = String::new();

        output.push_str(&self.format_header("CANDIDATE SHORTLIST", 1));
        output.push_str(&format!("Generated: {}\n", report.metadata.generated_at_display()));
        if let Some(job) = &report.metadata.job_file {
            output.push_str(&format!("Job description: {}\n", job));
        }

        output.push_str(&self.format_header("Overview", 2));
        output.push_str(&format!("Total candidates: {}\n", summary.total_candidates));
        output.push_str(&format!(
            "Recommended for interview: {}\n",
            self.colorize(&summary.recommended_count.to_string(), Color::Green)
        ));
        match summary.average_score {
            Some(avg) => output.push_str(&format!("Average score: {:.1}\n", avg)),
            None => output.push_str("Average score: n/a\n"),
        }
        match summary.average_experience_years {
            Some(avg) => output.push_str(&format!("Average experience: {:.1} years\n", avg)),
            None => output.push_str("Average experience: n/a\n"),
        }

        output.push_str(&self.format_header("Distribution", 2));
        for band in &summary.distribution {
            output.push_str(&format!(
                "  {:<10} {:>3}\n",
                self.colorize(band.recommendation.label(), band_color(band.recommendation)),
                band.count
            ));
        }

        output.push_str(&self.format_header("Ranking", 2));
        for candidate in &summary.candidates {
            let mut flags = Vec::new();
            if candidate.used_fallback {
                flags.push("skill fallback");
            }
            if candidate.degraded {
                flags.push("incomplete analysis");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!("  ({})", flags.join(", "))
            };

            output.push_str(&format!(
                "  {:>2}. {:<28} {:>6.2}  {}{}\n",
                candidate.rank,
                candidate.candidate_name,
                candidate.overall_score,
                self.format_badge(candidate.recommendation),
                flags
            ));
            if self.detailed {
                output.push_str(&format!("      source: {}\n", candidate.source));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_evaluation(&self, report: &EvaluationReport) -> Result<String> {
        self.render(report)
    }

    fn format_shortlist(&self, report: &ShortlistReport) -> Result<String> {
        self.render(report)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn markdown_badge(recommendation: Recommendation) -> &'static str {
        match recommendation {
            Recommendation::StrongFit => "🟢 Strong Fit",
            Recommendation::GoodFit => "🟢 Good Fit",
            Recommendation::Consider => "🟡 Consider",
            Recommendation::WeakFit => "🟠 Weak Fit",
            Recommendation::Reject => "🔴 Reject",
        }
    }

    /// Table cells cannot hold raw newlines or pipes.
    fn cell(value: &str) -> String {
        value.replace('|', "\\|").replace('\n', "<br>")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_evaluation(&self, report: &EvaluationReport) -> Result<String> {
        let evaluation = &report.evaluation;
        let record = &evaluation.record;
        let mut output = String::new();

        output.push_str(&format!("# Candidate Evaluation: {}\n\n", evaluation.candidate_name()));
        if self.include_metadata {
            output.push_str(&format!(
                "*Generated {} by resume-evaluator v{}*\n\n",
                report.metadata.generated_at_display(),
                report.metadata.evaluator_version
            ));
        }

        output.push_str("## Verdict\n\n");
        output.push_str(&format!(
            "**Overall Weighted Score:** {} {}\n\n",
            report.overall_score_display(),
            Self::markdown_badge(evaluation.recommendation)
        ));
        output.push_str(&format!("**Selection Recommendation:** {}\n\n", report.verdict()));
        if evaluation.used_fallback() {
            output.push_str("> Match scores were computed from résumé and job description skill overlap.\n\n");
        }

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight | Contribution |\n");
        output.push_str("|-----------|-------|--------|--------------|\n");
        for item in &report.score_breakdown {
            output.push_str(&format!(
                "| {} | {:.1} | {:.0}% | {:.2} |\n",
                item.component.name(),
                item.score,
                item.weight * 100.0,
                item.contribution
            ));
        }
        output.push('\n');

        output.push_str("## Candidate Details\n\n");
        output.push_str("| Field | Value |\n");
        output.push_str("|-------|-------|\n");
        for (field, _) in record.iter() {
            if !self.detailed && (field == Field::StrongMatchesReasoning || field == Field::PartialMatchesReasoning) {
                continue;
            }
            output.push_str(&format!("| {} | {} |\n", field.label(), Self::cell(record.display(field))));
        }
        output.push('\n');

        if self.detailed && !evaluation.diagnostics.is_empty() {
            output.push_str("## Diagnostics\n\n");
            for diagnostic in &evaluation.diagnostics {
                output.push_str(&format!("- {}\n", diagnostic));
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn format_shortlist(&self, report: &ShortlistReport) -> Result<String> {
        let summary = &report.summary;
        let mut output = String::new();

        output.push_str("# Candidate Shortlist\n\n");
        if self.include_metadata {
            output.push_str(&format!("*Generated {}*\n\n", report.metadata.generated_at_display()));
        }

        output.push_str("## Overview\n\n");
        output.push_str(&format!("- **Total candidates:** {}\n", summary.total_candidates));
        output.push_str(&format!("- **Recommended for interview:** {}\n", summary.recommended_count));
        if let Some(avg) = summary.average_score {
            output.push_str(&format!("- **Average score:** {:.1}\n", avg));
        }
        if let Some(avg) = summary.average_experience_years {
            output.push_str(&format!("- **Average experience:** {:.1} years\n", avg));
        }
        output.push('\n');

        output.push_str("## Distribution\n\n");
        output.push_str("| Recommendation | Candidates |\n");
        output.push_str("|----------------|------------|\n");
        for band in &summary.distribution {
            output.push_str(&format!("| {} | {} |\n", band.recommendation.label(), band.count));
        }
        output.push('\n');

        output.push_str("## Ranking\n\n");
        output.push_str("| # | Candidate | Score | Recommendation | Source |\n");
        output.push_str("|---|-----------|-------|----------------|--------|\n");
        for candidate in &summary.candidates {
            output.push_str(&format!(
                "| {} | {} | {:.2} | {} | {} |\n",
                candidate.rank,
                Self::cell(&candidate.candidate_name),
                candidate.overall_score,
                Self::markdown_badge(candidate.recommendation),
                Self::cell(&candidate.source)
            ));
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_evaluation(&self, report: &EvaluationReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_evaluation(report)
    }

    pub fn generate_shortlist(&self, report: &ShortlistReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_shortlist(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_evaluation{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_evaluation{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_evaluation{}.md", base_name, timestamp_suffix),
    }
}
