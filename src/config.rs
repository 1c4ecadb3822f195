//! Configuration management for the resume evaluator

use crate::error::{EvaluatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub watchlists: WatchlistConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Years of experience the role asks for; the experience curve pivots here.
    pub required_experience_years: f64,
    pub weights: ComponentWeights,
}

/// Weight of each score component in the overall score. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub relevancy: f64,
    pub experience: f64,
    pub stability: f64,
    pub college: f64,
    pub leadership: f64,
    pub international: f64,
    pub competitor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistConfig {
    /// Organizations whose past employment is flagged, in match priority order.
    pub competitors: Vec<String>,
    /// Competitors that earn the full competitor score.
    pub premium_competitors: Vec<String>,
    /// Institutions rated "Premium" when the analysis gives no college rating.
    pub premium_institutions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_experience_years: 3.0,
            weights: ComponentWeights::default(),
        }
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            relevancy: 0.40,
            experience: 0.15,
            stability: 0.12,
            college: 0.10,
            leadership: 0.10,
            international: 0.08,
            competitor: 0.05,
        }
    }
}

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.relevancy
            + self.experience
            + self.stability
            + self.college
            + self.leadership
            + self.international
            + self.competitor
    }

    fn all(&self) -> [f64; 7] {
        [
            self.relevancy,
            self.experience,
            self.stability,
            self.college,
            self.leadership,
            self.international,
            self.competitor,
        ]
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            competitors: vec![
                "Anaplan", "Workday Adaptive Planning", "Oracle EPM", "Oracle Hyperion",
                "SAP BPC", "IBM Planning Analytics", "TM1", "Prophix", "Vena Solutions",
                "Jedox", "OneStream", "Board", "Centage", "Solver", "Kepion", "Host Analytics",
                "CCH Tagetik", "Infor CPM", "Syntellis", "Longview",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            premium_competitors: vec!["Anaplan", "Workday", "Oracle", "SAP", "OneStream"]
                .into_iter()
                .map(String::from)
                .collect(),
            premium_institutions: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the configuration from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::read(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load the configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EvaluatorError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| EvaluatorError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| EvaluatorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-evaluator")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weights = &self.scoring.weights;
        if weights.all().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EvaluatorError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if (weights.sum() - 1.0).abs() > 1e-6 {
            return Err(EvaluatorError::Configuration(format!(
                "Scoring weights must sum to 1.0 (got {:.4})",
                weights.sum()
            )));
        }

        let required = self.scoring.required_experience_years;
        if !required.is_finite() || required <= 0.0 {
            return Err(EvaluatorError::Configuration(format!(
                "required_experience_years must be positive (got {})",
                required
            )));
        }

        if self.watchlists.competitors.iter().any(|c| c.trim().is_empty()) {
            return Err(EvaluatorError::Configuration(
                "Competitor names must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
