mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use taskscope_core::{
    default_patterns_path, Analyst, AnalysisReport, Complexity, PatternTables, Priority,
};

use crate::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.init_patterns {
        return init_patterns(cli.patterns.as_deref());
    }

    let analyst = build_analyst(cli.patterns.as_deref())?;
    let input = resolve_input(&cli)?;
    let context = parse_context(cli.context.as_deref())?;

    let report = analyst
        .analyze_with_context(&input, context.as_ref())
        .context("Analysis failed")?;

    match cli.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text_report(&report),
        other => anyhow::bail!(
            "Unknown output format '{}', expected 'json' or 'text'",
            other
        ),
    }

    Ok(())
}

/// Builds the analyst from the first pattern source that applies:
/// an explicit --patterns path, the user's default pattern file if present,
/// or the built-in tables
fn build_analyst(patterns: Option<&Path>) -> Result<Analyst> {
    if let Some(path) = patterns {
        let tables = PatternTables::load(path)
            .with_context(|| format!("Failed to load pattern tables from {:?}", path))?;
        return Ok(Analyst::with_tables(tables)?);
    }

    let default_path = default_patterns_path()?;
    if default_path.exists() {
        let tables = PatternTables::load(&default_path)
            .with_context(|| format!("Failed to load pattern tables from {:?}", default_path))?;
        return Ok(Analyst::with_tables(tables)?);
    }

    Ok(Analyst::new())
}

/// Resolves the input text from --input, --input-file, or an interactive
/// prompt when neither is given
fn resolve_input(cli: &Cli) -> Result<String> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }

    if let Some(path) = &cli.input_file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {:?}", path));
    }

    prompts::prompt_input_text()
}

fn parse_context(raw: Option<&str>) -> Result<Option<serde_json::Value>> {
    match raw {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("Failed to parse --context as JSON")?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Writes the built-in pattern tables to the default (or given) path so
/// users can edit them
fn init_patterns(patterns: Option<&Path>) -> Result<()> {
    let path: PathBuf = match patterns {
        Some(path) => path.to_path_buf(),
        None => default_patterns_path()?,
    };

    if path.exists() {
        println!("Pattern file already exists: {}", path.display());
        return Ok(());
    }

    PatternTables::create_default(&path)?;
    println!("{}", "Default pattern tables written!".green());
    println!("Path: {}", path.display());
    Ok(())
}

fn print_text_report(report: &AnalysisReport) {
    println!(
        "Requirements: {} | Complexity: {} | Confidence: {:.2}",
        report.metadata.requirements_count,
        complexity_colored(report.complexity),
        report.confidence
    );

    for req in &report.requirements {
        let actors = if req.actors.is_empty() {
            "-".to_string()
        } else {
            req.actors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!();
        println!("{} [{}] {}", req.id.bold(), priority_colored(req.priority), req.text);
        println!(
            "        {} | complexity: {} | actors: {} | testable: {}",
            req.category,
            req.complexity,
            actors,
            if req.testable {
                "yes".green()
            } else {
                "no".yellow()
            }
        );
    }

    print_section("Work packages", &report.work_packages);
    print_section("Dependencies", &report.dependencies);
    print_section("Risks", &report.risks);
    print_section("Clarification questions", &report.clarification_questions);

    println!();
    println!("Processed in {:.3}s", report.processing_time);
}

fn print_section(title: &str, entries: &[String]) {
    println!();
    println!("{}", title.bold());
    for (index, entry) in entries.iter().enumerate() {
        println!("  {}. {}", index + 1, entry);
    }
}

fn priority_colored(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::High => priority.to_string().red(),
        Priority::Medium => priority.to_string().yellow(),
        Priority::Low => priority.to_string().green(),
    }
}

fn complexity_colored(complexity: Complexity) -> colored::ColoredString {
    match complexity {
        Complexity::High => complexity.to_string().red(),
        Complexity::Medium => complexity.to_string().yellow(),
        Complexity::Low => complexity.to_string().green(),
    }
}
