use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use swatch_validator::SpecSummary;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Spec file or directory (defaults to the configured spec directory)
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.input {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_spec_dir(cwd),
    };

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        find_spec_files(&input, &config)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    let summaries: Vec<SpecSummary> = files.iter().map(|file| validate_file(file)).collect();
    let failed = summaries.iter().filter(|s| !s.is_valid()).count();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => print_text(&summaries, failed),
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} specs have errors", failed, summaries.len()));
    }
    Ok(())
}

/// Validate one file. A document that does not parse is reported as a summary whose
/// only error is the parse error.
fn validate_file(file: &Path) -> SpecSummary {
    let source = file.display().to_string();
    match swatch_schema::load(file) {
        Ok(spec) => swatch_validator::validate(&spec, &source),
        Err(err) => SpecSummary {
            id: String::new(),
            title: String::new(),
            description: None,
            tokens: BTreeSet::new(),
            source,
            errors: vec![err.to_string()],
        },
    }
}

fn print_text(summaries: &[SpecSummary], failed: usize) {
    for summary in summaries {
        if summary.is_valid() {
            println!(
                "{} {} ({}, {} tokens)",
                "✓".green(),
                summary.source,
                summary.id,
                summary.tokens.len()
            );
            continue;
        }

        println!("{} {}", "✗".red(), summary.source);
        for error in &summary.errors {
            println!("  {} {}", "error".red().bold(), error);
        }
    }

    println!();
    if failed == 0 {
        println!("{} {} specs valid", "✅".green(), summaries.len());
    } else {
        println!(
            "{} {} specs, {} with errors",
            "⚠️".yellow(),
            summaries.len(),
            failed
        );
    }
}

fn find_spec_files(dir: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| config.is_spec_file(path))
        .collect();

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Found spec files");
    files
}
