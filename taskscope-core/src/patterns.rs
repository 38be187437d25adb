//! Pattern tables driving classification and aggregation.
//!
//! The tables are the only "knowledge" in the pipeline. Matching is
//! case-insensitive substring search, and table order is significant:
//! category, priority, and complexity resolution is first-match-wins over
//! the stored order, so reordering entries changes results.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PatternsError;
use crate::models::{Actor, Category, Complexity, Priority};

/// Template name for generic development tasks
pub const TEMPLATE_DEVELOPMENT: &str = "development";
/// Template name for analysis tasks
pub const TEMPLATE_ANALYSIS: &str = "analysis";
/// Template name for integration tasks
pub const TEMPLATE_INTEGRATION: &str = "integration";
/// Template name for speech-pipeline tasks
pub const TEMPLATE_SPEECH_PIPELINE: &str = "speech_pipeline";

/// Keyword and indicator sets for one requirement category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPattern {
    pub category: Category,
    /// Domain nouns that place a sentence in this category
    pub keywords: Vec<String>,
    /// Verb phrases and markers that hint at this category
    pub indicators: Vec<String>,
}

/// Markers for one priority tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityPattern {
    pub priority: Priority,
    pub markers: Vec<String>,
}

/// Markers identifying one actor group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorPattern {
    pub actor: Actor,
    pub markers: Vec<String>,
}

/// Keywords for one complexity level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityPattern {
    pub level: Complexity,
    pub keywords: Vec<String>,
}

/// A group of substrings signalling a dependency on an external component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySignal {
    pub triggers: Vec<String>,
    /// Fixed description emitted once when any trigger matches
    pub description: String,
}

/// A named decomposition template: an ordered list of work package names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompositionTemplate {
    pub name: String,
    pub phases: Vec<String>,
}

/// Selects the domain-specific template when the first requirement's text
/// contains the trigger substring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRule {
    pub trigger: String,
    pub template: String,
}

/// The complete, immutable pattern configuration for one analyst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTables {
    pub categories: Vec<CategoryPattern>,
    pub priorities: Vec<PriorityPattern>,
    pub actors: Vec<ActorPattern>,
    pub complexity_levels: Vec<ComplexityPattern>,
    pub testability_markers: Vec<String>,
    pub dependency_signals: Vec<DependencySignal>,
    pub templates: Vec<DecompositionTemplate>,
    pub domain_rule: DomainRule,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Returns true if `text` contains any of the needles as a substring
///
/// `text` is expected to be lowercased already; needles are normalized to
/// lowercase when tables are built or loaded.
pub(crate) fn contains_any(text: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| text.contains(needle.as_str()))
}

impl Default for PatternTables {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryPattern {
                    category: Category::Functional,
                    keywords: strings(&[
                        "function",
                        "feature",
                        "behavior",
                        "behaviour",
                        "action",
                        "process",
                        "workflow",
                    ]),
                    indicators: strings(&[
                        "shall",
                        "enables",
                        "allows",
                        "performs",
                        "executes",
                        "supports",
                        "hook",
                        "integrate",
                    ]),
                },
                CategoryPattern {
                    category: Category::NonFunctional,
                    keywords: strings(&[
                        "performance",
                        "security",
                        "usability",
                        "scalability",
                        "availability",
                        "latency",
                        "respond",
                        "throughput",
                        "confidence",
                    ]),
                    indicators: strings(&[
                        "fast",
                        "secure",
                        "user-friendly",
                        "stable",
                        "reliable",
                    ]),
                },
                CategoryPattern {
                    category: Category::Technical,
                    keywords: strings(&[
                        "api",
                        "database",
                        "server",
                        "client",
                        "protocol",
                        "architecture",
                        "whisper",
                        "sentiment",
                    ]),
                    indicators: strings(&[
                        "implements",
                        "uses",
                        "based on",
                        "integrates",
                        "migrate",
                        "import",
                    ]),
                },
                CategoryPattern {
                    category: Category::Business,
                    keywords: strings(&[
                        "business",
                        "customer",
                        "revenue",
                        "cost",
                        "roi",
                        "market",
                        "stakeholder",
                    ]),
                    indicators: strings(&["increases", "reduces", "improves", "optimizes"]),
                },
            ],
            priorities: vec![
                PriorityPattern {
                    priority: Priority::High,
                    markers: strings(&["must", "critical", "mandatory", "essential", "urgent"]),
                },
                PriorityPattern {
                    priority: Priority::Medium,
                    markers: strings(&["should", "important", "preferred"]),
                },
                PriorityPattern {
                    priority: Priority::Low,
                    markers: strings(&["could", "optional", "nice to have"]),
                },
            ],
            actors: vec![
                ActorPattern {
                    actor: Actor::UserDeveloper,
                    markers: strings(&["user", "developer", "dev", "engineer"]),
                },
                ActorPattern {
                    actor: Actor::Administrator,
                    markers: strings(&["admin", "administrator", "operator"]),
                },
                ActorPattern {
                    actor: Actor::System,
                    markers: strings(&["system", "service", "pipeline", "gui"]),
                },
            ],
            // Checked in this order; an overlap resolves to the earlier level
            complexity_levels: vec![
                ComplexityPattern {
                    level: Complexity::Low,
                    keywords: strings(&[
                        "simple",
                        "basic",
                        "straightforward",
                        "quick",
                        "direct",
                        "stub",
                    ]),
                },
                ComplexityPattern {
                    level: Complexity::Medium,
                    keywords: strings(&[
                        "complex",
                        "multiple",
                        "integration",
                        "coordination",
                        "hooks",
                    ]),
                },
                ComplexityPattern {
                    level: Complexity::High,
                    keywords: strings(&[
                        "very complex",
                        "critical",
                        "enterprise",
                        "scalable",
                        "highly available",
                        "unified pipeline",
                    ]),
                },
            ],
            testability_markers: strings(&[
                "less than",
                "greater than",
                "more than",
                "exactly",
                "within",
                "at most",
                "at least",
                "maximum",
                "minimum",
                ">",
                "<",
                "==",
                "test",
            ]),
            dependency_signals: vec![
                DependencySignal {
                    triggers: strings(&["whisper", "vosk", "vader", "sentiment", "speech"]),
                    description:
                        "Dependency on speech/NLP tooling (transcription and sentiment analysis)"
                            .to_string(),
                },
                DependencySignal {
                    triggers: strings(&["docs", "migrate", ".txt", "legacy"]),
                    description: "Dependency on legacy docs/ files for migration".to_string(),
                },
                DependencySignal {
                    triggers: strings(&["gui", "button", "play"]),
                    description: "Dependency on GUI interface components".to_string(),
                },
            ],
            templates: vec![
                DecompositionTemplate {
                    name: TEMPLATE_DEVELOPMENT.to_string(),
                    phases: strings(&[
                        "Requirements analysis and specification",
                        "Architecture and design",
                        "Implementation",
                        "Testing and quality assurance",
                        "Deployment and integration",
                        "Documentation and training",
                    ]),
                },
                DecompositionTemplate {
                    name: TEMPLATE_ANALYSIS.to_string(),
                    phases: strings(&[
                        "Problem identification",
                        "Data collection and analysis",
                        "Evaluation of solution alternatives",
                        "Recommendation development",
                        "Implementation planning",
                    ]),
                },
                DecompositionTemplate {
                    name: TEMPLATE_INTEGRATION.to_string(),
                    phases: strings(&[
                        "System analysis",
                        "Interface definition",
                        "Data model harmonization",
                        "Connector implementation",
                        "Testing and validation",
                    ]),
                },
                DecompositionTemplate {
                    name: TEMPLATE_SPEECH_PIPELINE.to_string(),
                    phases: strings(&[
                        "Migrate legacy transcripts into the speech modules",
                        "Fix imports and integration hooks",
                        "Build the unified audio pipeline",
                        "Run the test suite and GUI checks",
                        "Add retry and fallback handling",
                    ]),
                },
            ],
            domain_rule: DomainRule {
                trigger: "speech".to_string(),
                template: TEMPLATE_SPEECH_PIPELINE.to_string(),
            },
        }
    }
}

impl PatternTables {
    /// Looks up a decomposition template by name
    pub fn template(&self, name: &str) -> Option<&DecompositionTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Loads pattern tables from a YAML file
    ///
    /// Needles are normalized to lowercase so user-edited tables match the
    /// same way the built-in ones do. The loaded tables are validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatternsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PatternsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tables: PatternTables =
            serde_yaml::from_str(&content).map_err(|source| PatternsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tables.normalize();
        tables.validate()?;
        Ok(tables)
    }

    /// Saves the pattern tables to a YAML file, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PatternsError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).map_err(|source| PatternsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PatternsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| PatternsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the built-in tables to `path` if no file exists there yet
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<(), PatternsError> {
        if path.as_ref().exists() {
            return Ok(());
        }
        PatternTables::default().save(path)
    }

    /// Lowercases every needle in every table
    fn normalize(&mut self) {
        for pattern in &mut self.categories {
            lowercase_all(&mut pattern.keywords);
            lowercase_all(&mut pattern.indicators);
        }
        for pattern in &mut self.priorities {
            lowercase_all(&mut pattern.markers);
        }
        for pattern in &mut self.actors {
            lowercase_all(&mut pattern.markers);
        }
        for pattern in &mut self.complexity_levels {
            lowercase_all(&mut pattern.keywords);
        }
        lowercase_all(&mut self.testability_markers);
        for signal in &mut self.dependency_signals {
            lowercase_all(&mut signal.triggers);
        }
        self.domain_rule.trigger = self.domain_rule.trigger.to_lowercase();
    }

    /// Checks the structural invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), PatternsError> {
        if self.categories.is_empty() {
            return Err(PatternsError::Validation(
                "category table is empty".to_string(),
            ));
        }
        if self.priorities.is_empty() {
            return Err(PatternsError::Validation(
                "priority table is empty".to_string(),
            ));
        }
        if self.complexity_levels.is_empty() {
            return Err(PatternsError::Validation(
                "complexity table is empty".to_string(),
            ));
        }
        if self.templates.is_empty() {
            return Err(PatternsError::Validation(
                "no decomposition templates defined".to_string(),
            ));
        }
        for template in &self.templates {
            if template.phases.is_empty() {
                return Err(PatternsError::Validation(format!(
                    "template '{}' has no phases",
                    template.name
                )));
            }
        }
        if self.template(TEMPLATE_DEVELOPMENT).is_none() {
            return Err(PatternsError::Validation(format!(
                "required template '{}' is missing",
                TEMPLATE_DEVELOPMENT
            )));
        }
        if self.template(&self.domain_rule.template).is_none() {
            return Err(PatternsError::Validation(format!(
                "domain rule references unknown template '{}'",
                self.domain_rule.template
            )));
        }
        Ok(())
    }
}

fn lowercase_all(needles: &mut [String]) {
    for needle in needles {
        *needle = needle.to_lowercase();
    }
}

/// Gets the path to the user's pattern table file
///
/// Honors the TASKSCOPE_PATTERNS environment variable, falling back to
/// `~/.taskscope/patterns.yaml`.
pub fn default_patterns_path() -> Result<PathBuf, PatternsError> {
    if let Ok(path) = env::var("TASKSCOPE_PATTERNS") {
        return Ok(PathBuf::from(path));
    }

    let home_dir = dirs::home_dir().ok_or(PatternsError::NoHomeDir)?;
    Ok(home_dir.join(".taskscope").join("patterns.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert!(PatternTables::default().validate().is_ok());
    }

    #[test]
    fn test_category_table_order_is_fixed() {
        let tables = PatternTables::default();
        let order: Vec<Category> = tables.categories.iter().map(|p| p.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Functional,
                Category::NonFunctional,
                Category::Technical,
                Category::Business,
            ]
        );
    }

    #[test]
    fn test_complexity_table_checks_low_first() {
        let tables = PatternTables::default();
        let order: Vec<Complexity> = tables.complexity_levels.iter().map(|p| p.level).collect();
        assert_eq!(
            order,
            vec![Complexity::Low, Complexity::Medium, Complexity::High]
        );
    }

    #[test]
    fn test_template_lookup() {
        let tables = PatternTables::default();
        assert!(tables.template(TEMPLATE_DEVELOPMENT).is_some());
        assert!(tables.template(TEMPLATE_ANALYSIS).is_some());
        assert!(tables.template("nonexistent").is_none());

        let domain = tables.template(&tables.domain_rule.template).unwrap();
        assert_eq!(domain.name, TEMPLATE_SPEECH_PIPELINE);
    }

    #[test]
    fn test_contains_any() {
        let needles = strings(&["less than", "test"]);
        assert!(contains_any("respond in less than 200ms", &needles));
        assert!(!contains_any("respond quickly", &needles));
        assert!(!contains_any("anything", &[]));
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");

        let tables = PatternTables::default();
        tables.save(&path).unwrap();

        let loaded = PatternTables::load(&path).unwrap();
        assert_eq!(loaded.categories.len(), tables.categories.len());
        assert_eq!(loaded.templates.len(), tables.templates.len());
        assert_eq!(loaded.domain_rule.trigger, "speech");
    }

    #[test]
    fn test_load_normalizes_needles_to_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.yaml");

        let mut tables = PatternTables::default();
        tables.priorities[0].markers = strings(&["MUST", "Critical"]);
        tables.save(&path).unwrap();

        let loaded = PatternTables::load(&path).unwrap();
        assert_eq!(loaded.priorities[0].markers, strings(&["must", "critical"]));
    }

    #[test]
    fn test_create_default_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("patterns.yaml");

        PatternTables::create_default(&path).unwrap();
        assert!(path.exists());

        // Second call leaves the existing file alone
        PatternTables::create_default(&path).unwrap();
        assert!(PatternTables::load(&path).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_categories() {
        let mut tables = PatternTables::default();
        tables.categories.clear();
        assert!(matches!(
            tables.validate(),
            Err(PatternsError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_dangling_domain_template() {
        let mut tables = PatternTables::default();
        tables.domain_rule.template = "missing".to_string();
        assert!(matches!(
            tables.validate(),
            Err(PatternsError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_template_without_phases() {
        let mut tables = PatternTables::default();
        tables.templates[0].phases.clear();
        assert!(matches!(
            tables.validate(),
            Err(PatternsError::Validation(_))
        ));
    }

    #[test]
    fn test_default_patterns_path_honors_env_override() {
        env::set_var("TASKSCOPE_PATTERNS", "/tmp/custom-patterns.yaml");
        let path = default_patterns_path().unwrap();
        env::remove_var("TASKSCOPE_PATTERNS");
        assert_eq!(path, PathBuf::from("/tmp/custom-patterns.yaml"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PatternTables::load(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(PatternsError::Io { .. })));
    }
}
