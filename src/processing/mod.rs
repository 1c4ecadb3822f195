//! Candidate evaluation engine
//!
//! Analysis text flows through [`extractor`] (driven by the alias table in
//! [`fields`]), then [`normalizer`], then optionally [`skill_matcher`], and is
//! finally scored by [`scoring`]. [`evaluator`] wires the stages together.

pub mod contact;
pub mod diagnostics;
pub mod evaluator;
pub mod extractor;
pub mod fields;
pub mod keywords;
pub mod normalizer;
pub mod record;
pub mod scoring;
pub mod skill_matcher;
pub mod text_cleaner;

pub use evaluator::{Evaluation, EvaluationInput, Evaluator};
