//! Per-sentence requirement classification.
//!
//! Every check runs on the lowercased sentence against the injected pattern
//! tables. Category, priority, and complexity resolution is first-match-wins
//! in table order.

use crate::models::{Actor, Category, Complexity, Priority, Requirement};
use crate::patterns::{contains_any, PatternTables};

/// Word-count fallback thresholds for complexity estimation
const HIGH_WORD_COUNT: usize = 15;
const MEDIUM_WORD_COUNT: usize = 8;

/// Classifies qualifying sentences into requirement records
pub struct RequirementClassifier<'a> {
    tables: &'a PatternTables,
}

impl<'a> RequirementClassifier<'a> {
    /// Creates a classifier over the given pattern tables
    pub fn new(tables: &'a PatternTables) -> Self {
        Self { tables }
    }

    /// Builds the requirement record for one qualifying sentence
    ///
    /// `position` is the 1-based index of the sentence in the qualifying
    /// (post-filter) sequence and determines the requirement id.
    pub fn classify(&self, position: usize, sentence: &str) -> Requirement {
        let lower = sentence.to_lowercase();

        Requirement {
            id: Requirement::sequence_id(position),
            text: sentence.to_string(),
            category: self.categorize(&lower),
            priority: self.priority(&lower),
            actors: self.actors(&lower),
            complexity: self.complexity(&lower),
            testable: self.is_testable(&lower),
        }
    }

    /// First category whose keywords or indicators match wins
    fn categorize(&self, lower: &str) -> Category {
        for pattern in &self.tables.categories {
            if contains_any(lower, &pattern.keywords) || contains_any(lower, &pattern.indicators)
            {
                return pattern.category;
            }
        }
        Category::Unknown
    }

    /// First priority tier with a matching marker wins; default is medium
    fn priority(&self, lower: &str) -> Priority {
        for pattern in &self.tables.priorities {
            if contains_any(lower, &pattern.markers) {
                return pattern.priority;
            }
        }
        Priority::Medium
    }

    /// All actor groups are checked independently; output order = check order
    fn actors(&self, lower: &str) -> Vec<Actor> {
        let mut actors = Vec::new();
        for pattern in &self.tables.actors {
            if contains_any(lower, &pattern.markers) && !actors.contains(&pattern.actor) {
                actors.push(pattern.actor);
            }
        }
        actors
    }

    /// Complexity keywords in table order, then a word-count fallback
    fn complexity(&self, lower: &str) -> Complexity {
        for pattern in &self.tables.complexity_levels {
            if contains_any(lower, &pattern.keywords) {
                return pattern.level;
            }
        }

        let word_count = lower.split_whitespace().count();
        if word_count > HIGH_WORD_COUNT {
            Complexity::High
        } else if word_count > MEDIUM_WORD_COUNT {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }

    /// A sentence is testable if it carries any measurability marker
    fn is_testable(&self, lower: &str) -> bool {
        contains_any(lower, &self.tables.testability_markers)
    }
}
