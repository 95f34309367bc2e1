//! Sitemap Auditor main entry point
//!
//! This is the command-line interface for the sitemap auditor.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use sitemap_auditor::analysis::Analyzer;
use sitemap_auditor::config::{load_config_with_hash, Config};
use sitemap_auditor::output::{format_history, render, write_report, OutputFormat};
use sitemap_auditor::storage::AuditStorage;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Sitemap Auditor: find broken, orphaned, and under-described pages
///
/// Locates a site's sitemap from a bare domain, a robots.txt URL, or a
/// sitemap URL, then checks every declared page for liveness and a meta
/// description, and crawls the site to find declared pages nothing links to.
#[derive(Parser, Debug)]
#[command(name = "sitemap-auditor")]
#[command(version)]
#[command(about = "Audit a website against its sitemap", long_about = None)]
struct Cli {
    /// Site, robots.txt, or sitemap URL to audit
    #[arg(value_name = "SEED_URL", required_unless_present = "history")]
    seed: Option<String>,

    /// Path to TOML configuration file (defaults are used if omitted)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Record the audit into a SQLite history database
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Show past audits from the history database and exit
    #[arg(long, requires = "database", conflicts_with = "resolve_only")]
    history: bool,

    /// Only locate the sitemap source and print it
    #[arg(long)]
    resolve_only: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.history {
        if let Some(database) = &cli.database {
            handle_history(database)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let seed = cli
        .seed
        .as_deref()
        .context("a seed URL is required")?;

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let analyzer = Analyzer::new(&config).context("Failed to build HTTP client")?;

    if cli.resolve_only {
        return handle_resolve_only(&analyzer, seed, &cli).await;
    }

    handle_audit(&analyzer, seed, config_hash.as_deref(), &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_auditor=info,warn"),
            1 => EnvFilter::new("sitemap_auditor=debug,info"),
            2 => EnvFilter::new("sitemap_auditor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --history mode: lists past audits from the database
fn handle_history(database: &Path) -> Result<()> {
    let storage = AuditStorage::new(database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;

    let audits = storage.list_audits()?;
    print!("{}", format_history(&audits));

    Ok(())
}

/// Handles the --resolve-only mode: runs the sitemap locator and prints the source
async fn handle_resolve_only(analyzer: &Analyzer, seed: &str, cli: &Cli) -> Result<ExitCode> {
    let (_, _, source) = analyzer.resolve(seed).await?;

    let rendered = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&source)? + "\n",
        OutputFormat::Text | OutputFormat::Markdown => {
            format!("{} ({})\n", source.url, source.resolved_by)
        }
    };
    emit(&rendered, cli.output.as_deref())?;

    Ok(ExitCode::SUCCESS)
}

/// Handles the main audit operation
async fn handle_audit(
    analyzer: &Analyzer,
    seed: &str,
    config_hash: Option<&str>,
    cli: &Cli,
) -> Result<ExitCode> {
    let started_at = Utc::now();
    let outcome = analyzer.analyze_outcome(seed).await;
    let finished_at = Utc::now();

    if let Some(database) = &cli.database {
        let mut storage = AuditStorage::new(database)
            .with_context(|| format!("Failed to open database {}", database.display()))?;
        let audit_id = storage.record_audit(seed, config_hash, started_at, finished_at, &outcome)?;
        tracing::info!("Recorded audit {} in {}", audit_id, database.display());
    }

    let rendered = render(&outcome, cli.format)?;
    emit(&rendered, cli.output.as_deref())?;

    if outcome.is_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_report(content, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
