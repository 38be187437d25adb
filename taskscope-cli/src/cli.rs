use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Analyze a task description into requirements, work packages, and risks"
)]
pub struct Cli {
    /// Text of the task or feature request to analyze
    #[clap(long, short = 'i', conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the task description from a file instead
    #[clap(long, short = 'f')]
    pub input_file: Option<PathBuf>,

    /// Output format (json, text)
    #[clap(long, short = 'o', default_value = "json")]
    pub output: String,

    /// Path to a custom pattern table YAML file
    #[clap(long)]
    pub patterns: Option<PathBuf>,

    /// Optional analysis context as a JSON object, e.g. '{"sprint": 14}'
    #[clap(long, short = 'c')]
    pub context: Option<String>,

    /// Write the built-in pattern tables to the patterns path and exit
    #[clap(long)]
    pub init_patterns: bool,
}
