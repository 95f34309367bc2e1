//! Output module for rendering audit results
//!
//! This module handles:
//! - Rendering a report as plain text, Markdown, or JSON
//! - Writing rendered output to a file
//! - Listing stored audit history

mod markdown;
mod text;

pub use markdown::format_markdown_report;
pub use text::{format_history, format_text_report};

use crate::analysis::AnalysisOutcome;
use std::path::Path;
use thiserror::Error;

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Report rendering formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Renders an audit outcome
///
/// JSON output is the serialized outcome itself, so a failed audit renders
/// as `{"error": "..."}`.
pub fn render(outcome: &AnalysisOutcome, format: OutputFormat) -> OutputResult<String> {
    match (format, outcome) {
        (OutputFormat::Json, _) => Ok(serde_json::to_string_pretty(outcome)? + "\n"),
        (OutputFormat::Text, AnalysisOutcome::Report(report)) => Ok(format_text_report(report)),
        (OutputFormat::Markdown, AnalysisOutcome::Report(report)) => {
            Ok(format_markdown_report(report))
        }
        (OutputFormat::Text, AnalysisOutcome::Error { error }) => Ok(format!("Error: {}\n", error)),
        (OutputFormat::Markdown, AnalysisOutcome::Error { error }) => {
            Ok(format!("# Sitemap Audit Report\n\n**Error**: {}\n", error))
        }
    }
}

/// Writes rendered output to a file, replacing any existing content
pub fn write_report(content: &str, path: &Path) -> OutputResult<()> {
    std::fs::write(path, content)?;
    Ok(())
}
