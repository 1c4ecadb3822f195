//! Resume evaluator library
//!
//! Turns a language model's free-text candidate assessment into a normalized
//! record, a weighted score and a hiring recommendation.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{EvaluatorError, Result};
pub use processing::{Evaluation, EvaluationInput, Evaluator};
