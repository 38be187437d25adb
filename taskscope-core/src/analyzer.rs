//! Aggregate scoring over the classified requirement set.
//!
//! Everything here is derived purely from the requirement records and the
//! original input text; nothing is mutated. The list-valued report fields are
//! never empty: each has a sentinel entry for the "none found" case.

use crate::models::{Category, Complexity, Requirement};
use crate::patterns::{contains_any, PatternTables, TEMPLATE_DEVELOPMENT};

/// Sentinel dependency entry when no signal group matched
pub const NO_DEPENDENCIES: &str = "No explicit dependencies detected";
/// Sentinel clarification entry when no requirement raised a question
pub const NO_CLARIFICATION: &str = "No clarification needed";
/// Standing first entry of every risk list
pub const GENERIC_RISK: &str = "Generic risk: unclear requirement wording";

/// Base value of the confidence score before adjustments
const BASE_CONFIDENCE: f64 = 0.85;
/// Penalty weight for requirements with an unknown category
const UNKNOWN_PENALTY: f64 = 0.2;
/// Boost weight for requirements phrased in a testable way
const TESTABLE_BOOST: f64 = 0.1;

/// Derives the report-level fields from the classified requirements
pub struct AggregateAnalyzer<'a> {
    tables: &'a PatternTables,
}

impl<'a> AggregateAnalyzer<'a> {
    /// Creates an analyzer over the given pattern tables
    pub fn new(tables: &'a PatternTables) -> Self {
        Self { tables }
    }

    /// Overall complexity: high when more than half the requirements are
    /// high, medium when any is, low otherwise (including zero requirements)
    pub fn overall_complexity(&self, requirements: &[Requirement]) -> Complexity {
        let high_count = requirements
            .iter()
            .filter(|req| req.complexity == Complexity::High)
            .count();

        if high_count as f64 > requirements.len() as f64 * 0.5 {
            Complexity::High
        } else if high_count > 0 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }

    /// Scans the full input text for dependency signals
    ///
    /// Each matching signal group contributes its fixed description once.
    /// More than one requirement adds an interconnection note; no matches at
    /// all yields the sentinel entry.
    pub fn dependencies(&self, text: &str, requirements: &[Requirement]) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut dependencies = Vec::new();

        for signal in &self.tables.dependency_signals {
            if contains_any(&lower, &signal.triggers) {
                dependencies.push(signal.description.clone());
            }
        }

        if requirements.len() > 1 {
            dependencies.push(format!(
                "Intra-requirement dependencies: {} interconnected requirements",
                requirements.len()
            ));
        }

        if dependencies.is_empty() {
            dependencies.push(NO_DEPENDENCIES.to_string());
        }
        dependencies
    }

    /// Selects and truncates a decomposition template
    ///
    /// The domain template applies only when the *first* requirement's text
    /// contains the domain trigger; everything else gets the development
    /// template. The template is cut to `requirement_count + 1` phases.
    pub fn work_packages(&self, requirements: &[Requirement]) -> Vec<String> {
        let use_domain = requirements
            .first()
            .map(|req| req.text.to_lowercase().contains(&self.tables.domain_rule.trigger))
            .unwrap_or(false);

        let name = if use_domain {
            self.tables.domain_rule.template.as_str()
        } else {
            TEMPLATE_DEVELOPMENT
        };

        // Both names are guaranteed present by table validation
        let Some(template) = self.tables.template(name) else {
            return Vec::new();
        };

        let count = template.phases.len().min(requirements.len() + 1);
        template.phases[..count].to_vec()
    }

    /// Builds the risk list, always leading with the standing generic risk
    pub fn risks(
        &self,
        overall: Complexity,
        dependencies: &[String],
        requirements: &[Requirement],
    ) -> Vec<String> {
        let mut risks = vec![GENERIC_RISK.to_string()];

        if overall == Complexity::High {
            risks.push("High technical complexity across the task".to_string());
        }
        if dependencies.len() > 1 {
            risks.push(format!(
                "Dependency risk: {} external components involved",
                dependencies.len()
            ));
        }
        if requirements.iter().any(|req| !req.testable) {
            risks.push(
                "Not all requirements are testable (missing measurable criteria)".to_string(),
            );
        }
        risks
    }

    /// Emits one question per ambiguity, each citing the requirement id
    pub fn clarification_questions(&self, requirements: &[Requirement]) -> Vec<String> {
        let mut questions = Vec::new();

        for req in requirements {
            if req.category == Category::Unknown {
                questions.push(format!(
                    "Clarify {}: which category does it belong to (functional/technical)?",
                    req.id
                ));
            }
            if !req.testable {
                questions.push(format!(
                    "Make {} testable: which measurable criteria apply (e.g. a latency threshold)?",
                    req.id
                ));
            }
            if req.actors.is_empty() {
                questions.push(format!(
                    "Who is involved in {} (user, admin, system)?",
                    req.id
                ));
            }
        }

        if questions.is_empty() {
            questions.push(NO_CLARIFICATION.to_string());
        }
        questions
    }

    /// Confidence in [0.5, 1.0], rounded to 2 decimals
    ///
    /// Unknown categories push the score down, testable requirements push it
    /// up. With zero requirements both adjustment terms are zero.
    pub fn confidence(&self, requirements: &[Requirement]) -> f64 {
        let count = requirements.len();
        let unknown_count = requirements
            .iter()
            .filter(|req| req.category == Category::Unknown)
            .count();
        let testable_count = requirements.iter().filter(|req| req.testable).count();

        let mut confidence =
            BASE_CONFIDENCE - (unknown_count as f64 / count.max(1) as f64) * UNKNOWN_PENALTY;
        if count > 0 {
            confidence += (testable_count as f64 / count as f64) * TESTABLE_BOOST;
        }

        (confidence.clamp(0.5, 1.0) * 100.0).round() / 100.0
    }
}
