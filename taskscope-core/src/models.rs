use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Represents the nature of a requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Functional,
    NonFunctional,
    Technical,
    Business,
    /// No category pattern matched
    Unknown,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Functional => write!(f, "Functional"),
            Category::NonFunctional => write!(f, "Non-Functional"),
            Category::Technical => write!(f, "Technical"),
            Category::Business => write!(f, "Business"),
            Category::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Represents the priority of a requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Estimated implementation complexity, per requirement and overall
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Low => write!(f, "Low"),
            Complexity::Medium => write!(f, "Medium"),
            Complexity::High => write!(f, "High"),
        }
    }
}

/// An actor or stakeholder mentioned by a requirement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Actor {
    /// End users and developers working with the system
    #[serde(rename = "user/developer")]
    UserDeveloper,
    #[serde(rename = "administrator")]
    Administrator,
    /// The system itself or one of its components
    #[serde(rename = "system")]
    System,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::UserDeveloper => write!(f, "User/Developer"),
            Actor::Administrator => write!(f, "Administrator"),
            Actor::System => write!(f, "System"),
        }
    }
}

/// Represents a single requirement decomposed from the input text
///
/// Created once by the extraction pass and immutable afterwards; the
/// aggregate scoring only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Requirement {
    /// Sequential identifier within one analysis run (e.g., "REQ-001")
    pub id: String,

    /// The trimmed sentence this requirement was extracted from
    pub text: String,

    /// Category of the requirement
    pub category: Category,

    /// Priority level of the requirement
    pub priority: Priority,

    /// Actors or stakeholders involved; may be empty
    pub actors: Vec<Actor>,

    /// Estimated implementation complexity
    pub complexity: Complexity,

    /// Whether the requirement is phrased in a measurable way
    pub testable: bool,
}

impl Requirement {
    /// Formats a sequential requirement ID (1-based position)
    pub fn sequence_id(position: usize) -> String {
        format!("REQ-{:03}", position)
    }
}

/// Metadata recorded alongside one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Length of the input text in characters
    pub input_length: usize,

    /// Number of requirements extracted from the input
    pub requirements_count: usize,

    /// When the analysis completed
    pub analysis_timestamp: DateTime<Utc>,

    /// Unique identifier for this analysis run
    pub analysis_id: Uuid,
}

/// The complete output of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Extracted requirements in order of appearance in the source text
    pub requirements: Vec<Requirement>,

    /// Aggregate complexity rating across all requirements
    pub complexity: Complexity,

    /// Detected external and internal dependencies; never empty
    pub dependencies: Vec<String>,

    /// Suggested work packages drawn from a decomposition template
    pub work_packages: Vec<String>,

    /// Identified risks; never empty
    pub risks: Vec<String>,

    /// Open questions to resolve ambiguities; never empty
    pub clarification_questions: Vec<String>,

    /// Confidence score in [0.5, 1.0], rounded to 2 decimals
    pub confidence: f64,

    /// Wall-clock duration of the analysis in seconds
    pub processing_time: f64,

    /// Run metadata
    pub metadata: AnalysisMetadata,
}
