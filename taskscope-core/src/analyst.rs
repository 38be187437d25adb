//! Analysis orchestrator.
//!
//! Sequences segmentation, classification, and aggregate scoring into one
//! report. An `Analyst` holds nothing but the immutable pattern tables, so
//! one instance can serve concurrent callers without locking.

use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::analyzer::AggregateAnalyzer;
use crate::classifier::RequirementClassifier;
use crate::error::AnalysisError;
use crate::models::{AnalysisMetadata, AnalysisReport, Requirement};
use crate::patterns::PatternTables;
use crate::segmenter::split_sentences;

/// Requirements analyst: the single entry point of the pipeline
///
/// The pipeline either completes and returns a full report or fails
/// outright; it never returns a partially populated report.
pub struct Analyst {
    tables: PatternTables,
}

impl Default for Analyst {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyst {
    /// Creates an analyst with the built-in pattern tables
    pub fn new() -> Self {
        let tables = PatternTables::default();
        info!(
            categories = tables.categories.len(),
            templates = tables.templates.len(),
            "analyst initialized"
        );
        Self { tables }
    }

    /// Creates an analyst with custom pattern tables, validating them first
    pub fn with_tables(tables: PatternTables) -> Result<Self, AnalysisError> {
        tables.validate()?;
        info!(
            categories = tables.categories.len(),
            templates = tables.templates.len(),
            "analyst initialized with custom tables"
        );
        Ok(Self { tables })
    }

    /// Returns the pattern tables in use
    pub fn tables(&self) -> &PatternTables {
        &self.tables
    }

    /// Analyzes the input text and returns the full report
    pub fn analyze(&self, input: &str) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_context(input, None)
    }

    /// Analyzes the input text with an optional caller context
    ///
    /// The context must be a JSON object. Its content is currently inert; it
    /// is accepted so future scoring signals can consume it without changing
    /// the call contract.
    pub fn analyze_with_context(
        &self,
        input: &str,
        context: Option<&Value>,
    ) -> Result<AnalysisReport, AnalysisError> {
        if let Some(context) = context {
            if !context.is_object() {
                return Err(AnalysisError::InvalidContext(
                    json_type_name(context).to_string(),
                ));
            }
        }

        let start = Instant::now();

        let requirements = self.extract_requirements(input);

        let analyzer = AggregateAnalyzer::new(&self.tables);
        let complexity = analyzer.overall_complexity(&requirements);
        let dependencies = analyzer.dependencies(input, &requirements);
        let work_packages = analyzer.work_packages(&requirements);
        let risks = analyzer.risks(complexity, &dependencies, &requirements);
        let clarification_questions = analyzer.clarification_questions(&requirements);
        let confidence = analyzer.confidence(&requirements);

        let metadata = AnalysisMetadata {
            input_length: input.chars().count(),
            requirements_count: requirements.len(),
            analysis_timestamp: Utc::now(),
            analysis_id: Uuid::new_v4(),
        };

        let report = AnalysisReport {
            requirements,
            complexity,
            dependencies,
            work_packages,
            risks,
            clarification_questions,
            confidence,
            processing_time: start.elapsed().as_secs_f64(),
            metadata,
        };

        info!(
            requirements = report.metadata.requirements_count,
            confidence = report.confidence,
            "requirements analysis completed"
        );
        Ok(report)
    }

    /// Segments the input and classifies each qualifying sentence
    fn extract_requirements(&self, input: &str) -> Vec<Requirement> {
        let classifier = RequirementClassifier::new(&self.tables);
        split_sentences(input)
            .iter()
            .enumerate()
            .map(|(index, sentence)| classifier.classify(index + 1, sentence))
            .collect()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{GENERIC_RISK, NO_CLARIFICATION, NO_DEPENDENCIES};
    use crate::models::{Category, Complexity, Priority};
    use serde_json::json;

    #[test]
    fn test_empty_input_produces_well_formed_report() {
        let analyst = Analyst::new();
        let report = analyst.analyze("").unwrap();

        assert!(report.requirements.is_empty());
        assert_eq!(report.complexity, Complexity::Low);
        assert_eq!(report.confidence, 0.85);
        assert_eq!(report.dependencies, vec![NO_DEPENDENCIES.to_string()]);
        assert_eq!(report.risks, vec![GENERIC_RISK.to_string()]);
        assert_eq!(
            report.clarification_questions,
            vec![NO_CLARIFICATION.to_string()]
        );
        assert_eq!(report.work_packages.len(), 1);
        assert_eq!(report.metadata.input_length, 0);
        assert_eq!(report.metadata.requirements_count, 0);
    }

    #[test]
    fn test_performance_requirement_scenario() {
        let analyst = Analyst::new();
        let report = analyst
            .analyze("The system must respond in less than 200ms.")
            .unwrap();

        assert_eq!(report.requirements.len(), 1);
        let req = &report.requirements[0];
        assert_eq!(req.priority, Priority::High);
        assert!(req.testable);
        assert_eq!(req.category, Category::NonFunctional);
        assert_eq!(report.metadata.requirements_count, 1);
    }

    #[test]
    fn test_requirement_ids_are_sequential_and_gap_free() {
        let analyst = Analyst::new();
        let text = "Build the importer module. no. Validate uploads against the schema. \
                    Notify the user when processing finishes.";
        let report = analyst.analyze(text).unwrap();

        let ids: Vec<&str> = report.requirements.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["REQ-001", "REQ-002", "REQ-003"]);
    }

    #[test]
    fn test_gui_dependency_scenario() {
        let analyst = Analyst::new();
        let report = analyst
            .analyze("Hook up the gui so users can play back their recordings.")
            .unwrap();

        assert!(report
            .dependencies
            .iter()
            .any(|dep| dep.contains("GUI interface")));
    }

    #[test]
    fn test_unknown_category_raises_clarification_question() {
        let analyst = Analyst::new();
        let report = analyst.analyze("Sort out the remaining odds and ends.").unwrap();

        assert_eq!(report.requirements[0].category, Category::Unknown);
        let id = &report.requirements[0].id;
        assert!(report
            .clarification_questions
            .iter()
            .any(|q| q.starts_with("Clarify") && q.contains(id.as_str())));
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyst = Analyst::new();
        let text = "Migrate the legacy docs. The import must finish within 5 minutes. \
                    Admins should see a progress bar in the gui.";

        let first = analyst.analyze(text).unwrap();
        let second = analyst.analyze(text).unwrap();

        assert_eq!(first.requirements, second.requirements);
        assert_eq!(first.complexity, second.complexity);
        assert_eq!(first.dependencies, second.dependencies);
        assert_eq!(first.work_packages, second.work_packages);
        assert_eq!(first.risks, second.risks);
        assert_eq!(
            first.clarification_questions,
            second.clarification_questions
        );
        assert_eq!(first.confidence, second.confidence);
    }

    #[test]
    fn test_confidence_always_within_bounds() {
        let analyst = Analyst::new();
        let inputs = [
            "",
            "Short one.",
            "Sort out the remaining odds and ends. Tidy the rest of the loose parts too.",
            "The pipeline must process at least 1000 events per second. \
             Latency stays below 50ms. Every branch is covered by a test.",
        ];

        for input in inputs {
            let report = analyst.analyze(input).unwrap();
            assert!(
                (0.5..=1.0).contains(&report.confidence),
                "confidence {} out of bounds for {:?}",
                report.confidence,
                input
            );
            // Exactly two decimals survive a round trip
            let rounded = (report.confidence * 100.0).round() / 100.0;
            assert_eq!(rounded, report.confidence);
        }
    }

    #[test]
    fn test_context_must_be_an_object() {
        let analyst = Analyst::new();

        let err = analyst
            .analyze_with_context("Ship the feature toggle cleanup.", Some(&json!([1, 2])))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidContext(_)));

        let err = analyst
            .analyze_with_context("Ship the feature toggle cleanup.", Some(&json!("notes")))
            .unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_object_context_is_accepted_and_inert() {
        let analyst = Analyst::new();
        let text = "Ship the feature toggle cleanup.";

        let plain = analyst.analyze(text).unwrap();
        let with_context = analyst
            .analyze_with_context(text, Some(&json!({"sprint": 14, "team": "core"})))
            .unwrap();

        assert_eq!(plain.requirements, with_context.requirements);
        assert_eq!(plain.confidence, with_context.confidence);
    }

    #[test]
    fn test_input_length_counts_characters() {
        let analyst = Analyst::new();
        let report = analyst.analyze("Grüße übersetzen für alle Nutzer.").unwrap();
        assert_eq!(report.metadata.input_length, 33);
    }

    #[test]
    fn test_with_tables_rejects_invalid_tables() {
        let mut tables = PatternTables::default();
        tables.templates.clear();

        let result = Analyst::with_tables(tables);
        assert!(matches!(result, Err(AnalysisError::Patterns(_))));
    }

    #[test]
    fn test_processing_time_is_non_negative() {
        let analyst = Analyst::new();
        let report = analyst.analyze("Measure how long this takes.").unwrap();
        assert!(report.processing_time >= 0.0);
    }
}
