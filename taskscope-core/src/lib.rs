//! Requirements analysis and task decomposition.
//!
//! Turns free-form task descriptions into a structured report: decomposed
//! requirements with category, priority, actors, complexity, and
//! testability, plus aggregate complexity, dependencies, work packages,
//! risks, clarification questions, and a confidence score.

pub mod analyst;
pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod models;
pub mod patterns;
pub mod segmenter;

// Re-export commonly used types
pub use analyst::Analyst;
pub use analyzer::{AggregateAnalyzer, GENERIC_RISK, NO_CLARIFICATION, NO_DEPENDENCIES};
pub use classifier::RequirementClassifier;
pub use error::{AnalysisError, PatternsError};
pub use models::{
    Actor, AnalysisMetadata, AnalysisReport, Category, Complexity, Priority, Requirement,
};
pub use patterns::{
    default_patterns_path, CategoryPattern, DecompositionTemplate, DependencySignal, DomainRule,
    PatternTables, TEMPLATE_ANALYSIS, TEMPLATE_DEVELOPMENT, TEMPLATE_INTEGRATION,
    TEMPLATE_SPEECH_PIPELINE,
};
pub use segmenter::{split_sentences, MIN_SENTENCE_CHARS};
