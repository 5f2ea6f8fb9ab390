//! # CLI
//!
//! clap command tree and the `cmd_*` functions behind each subcommand.
//! Commands print plain text by default and JSON with the global `--json`
//! flag; results go to stdout and logs to stderr.

use crate::api;
use crate::config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use crate::preflight::{self, PreflightReport};
use clap::{Parser, Subcommand};
use maturity_core::compositor::Compositor;
use maturity_core::engine::{self, GovernanceAdjustment, MaturityLabel};
use maturity_core::{Category, Dimension, MaturityError, Year};
use serde::Serialize;
use std::net::IpAddr;
use std::path::Path;
use thiserror::Error;

// =============================================================================
// COMMAND TREE
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "maturity",
    version,
    about = "GenAI Security Maturity Explorer: dashboard server and assessment queries"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        help = "Log filter directive (overrides RUST_LOG), e.g. debug or maturity=trace"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the dashboard and JSON API.
    Serve {
        #[arg(long, env = "MATURITY_HOST", default_value_t = DEFAULT_HOST)]
        host: IpAddr,

        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Requests per second across all clients; 0 disables limiting.
        #[arg(long, env = "MATURITY_RATE_LIMIT", default_value_t = 0)]
        rate_limit: u32,

        /// Disable permissive CORS headers.
        #[arg(long, default_value_t = false)]
        no_cors: bool,
    },
    /// Print the maturity matrix for a year.
    Matrix {
        #[arg(short, long, default_value = "2025")]
        year: String,

        /// Governance improvement level (0-4).
        #[arg(short, long, default_value_t = 0)]
        adjustment: i64,
    },
    /// Print the protection gap per category.
    Gaps {
        #[arg(short, long, default_value = "2025")]
        year: String,
    },
    /// Print per-dimension averages and the overall gap.
    Summary {
        #[arg(short, long, default_value = "2025")]
        year: String,

        /// Apply the governance simulation before averaging.
        #[arg(short, long)]
        adjustment: Option<i64>,
    },
    /// Print the evidence dossier for a category.
    Detail {
        /// Category name or slug, e.g. "Prompt Injection" or prompt-injection.
        category: String,
    },
    /// Map a score to its maturity label.
    Classify {
        #[arg(allow_hyphen_values = true)]
        score: String,
    },
    /// Run pre-deployment checks against a project root.
    Check {
        #[arg(long, default_value = ".")]
        root: String,
    },
}

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Maturity(#[from] MaturityError),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Telemetry(String),
}

pub type CliResult<T> = Result<T, CliError>;

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// `serve`
pub async fn cmd_serve(host: IpAddr, port: u16, rate_limit: u32, no_cors: bool) -> CliResult<()> {
    let config = ServerConfig::new(host, port, rate_limit, !no_cors);
    api::serve(config).await?;
    Ok(())
}

/// `matrix`
pub fn cmd_matrix(year: &str, adjustment: i64, json: bool) -> CliResult<()> {
    let year: Year = year.parse()?;
    let adjustment = GovernanceAdjustment::new(adjustment)?;
    let view = Compositor::heatmap(year, adjustment);
    tracing::debug!(%year, %adjustment, "matrix");

    if json {
        return print_json(&view);
    }

    println!("{}", view.year_label);
    if !adjustment.is_none() {
        println!("Governance improvement: +{adjustment}");
    }
    println!();
    print!("{:<24}", "Category");
    for dimension in Dimension::ALL {
        print!("{:>26}", dimension.name());
    }
    println!();
    for row in &view.rows {
        print!("{:<24}", row.category.name());
        for cell in &row.cells {
            print!("{:>26}", format!("{:.1} {}", cell.score, cell.label.short_name()));
        }
        println!();
    }
    Ok(())
}

/// `gaps`
pub fn cmd_gaps(year: &str, json: bool) -> CliResult<()> {
    let year: Year = year.parse()?;
    let gaps = engine::gap_analysis(year);

    if json {
        return print_json(&gaps);
    }

    println!("Protection gaps, {}", year.label());
    println!();
    println!(
        "{:<24}{:>8}{:>12}{:>8}  Severity",
        "Category", "Threat", "Protection", "Gap"
    );
    for entry in &gaps {
        println!(
            "{:<24}{:>8.1}{:>12.2}{:>8.2}  {}",
            entry.category.name(),
            entry.threat_level,
            entry.average_protection,
            entry.gap,
            entry.severity.name()
        );
    }
    Ok(())
}

/// `summary`
pub fn cmd_summary(year: &str, adjustment: Option<i64>, json: bool) -> CliResult<()> {
    let year: Year = year.parse()?;
    let adjustment = adjustment.map(GovernanceAdjustment::new).transpose()?;
    let summary = engine::summary_statistics(year, adjustment);

    if json {
        return print_json(&summary);
    }

    println!("Summary, {}", year.label());
    if let Some(adjustment) = adjustment {
        println!("Governance improvement: +{adjustment}");
    }
    println!();
    println!("  Threat Maturity:        {:.1}", summary.avg_threat);
    println!("  Technical Controls:     {:.1}", summary.avg_technical);
    println!("  Governance:             {:.1}", summary.avg_governance);
    println!("  Stakeholder Protection: {:.1}", summary.avg_stakeholder);
    println!("  Overall Gap:            {:.1}", summary.overall_gap);
    Ok(())
}

/// `detail`
pub fn cmd_detail(category: &str, json: bool) -> CliResult<()> {
    let category: Category = category.parse()?;
    let detail = Compositor::detail(category);

    if json {
        return print_json(&detail);
    }

    println!("{}", detail.category);
    println!();
    println!("{}", detail.description);
    println!();
    println!("  \"{}\"", detail.thesis_quote);
    println!("      - {}", detail.attribution);
    for card in &detail.dimensions {
        println!();
        println!(
            "{} (Level {:.1}, {})",
            card.dimension,
            card.level,
            MaturityLabel::classify(card.level)
        );
        println!("  {}", card.description);
        for line in card.evidence {
            println!("  - {line}");
        }
        println!("  References: {}", card.references.join(", "));
    }
    println!();
    println!("Real-World Incidents");
    for incident in detail.incidents {
        println!("  - {incident}");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct Classification {
    score: f64,
    label: MaturityLabel,
    level: u8,
    color: String,
}

/// `classify`
pub fn cmd_classify(score: &str, json: bool) -> CliResult<()> {
    let score = parse_score(score)?;
    let label = MaturityLabel::classify(score);

    if json {
        return print_json(&Classification {
            score,
            label,
            level: label.ordinal(),
            color: engine::heat_color(score),
        });
    }

    println!("{score:.1} -> {label} (level {})", label.ordinal());
    Ok(())
}

/// Parse a score for classification. Any finite number is accepted.
pub fn parse_score(raw: &str) -> CliResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(CliError::InvalidScore(raw.to_string())),
    }
}

/// `check`
///
/// Prints the report and returns it; the caller decides the exit code.
pub fn cmd_check(root: &Path, json: bool) -> CliResult<PreflightReport> {
    let report = preflight::run(root);

    if json {
        print_json(&report)?;
        return Ok(report);
    }

    println!("{}", "=".repeat(50));
    println!("PRE-DEPLOYMENT COMPATIBILITY CHECK");
    println!("{}", "=".repeat(50));
    for check in &report.checks {
        println!();
        println!("{}", check.name);
        println!("{}", "-".repeat(50));
        for detail in &check.details {
            println!("  {detail}");
        }
    }
    println!();
    println!("{}", "=".repeat(50));
    println!("SUMMARY");
    println!("{}", "=".repeat(50));
    for check in &report.checks {
        let status = if check.passed { "PASS" } else { "FAIL" };
        println!("{status:<6}{}", check.name);
    }
    println!();
    println!("Score: {}/{} checks passed", report.passed, report.total);
    if report.all_passed() {
        println!("Ready for deployment");
    } else {
        println!("Issues detected; review the failures above before deploying");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_defaults() {
        let cli = Cli::try_parse_from(["maturity", "serve"]).expect("parse");
        assert!(matches!(cli.command, Commands::Serve { no_cors: false, .. }));
        if let Commands::Serve {
            port, rate_limit, ..
        } = cli.command
        {
            // PORT may be set in the environment running the tests
            if std::env::var_os("PORT").is_none() {
                assert_eq!(port, DEFAULT_PORT);
            }
            if std::env::var_os("MATURITY_RATE_LIMIT").is_none() {
                assert_eq!(rate_limit, 0);
            }
        }
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["maturity", "gaps", "--year", "2027", "--json"])
            .expect("parse");
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Gaps { ref year } if year == "2027"));
    }

    #[test]
    fn classify_accepts_negative_scores() {
        let cli = Cli::try_parse_from(["maturity", "classify", "-1"]).expect("parse");
        assert!(matches!(cli.command, Commands::Classify { ref score } if score == "-1"));
    }

    #[test]
    fn score_parsing() {
        assert_eq!(parse_score("2.5").ok(), Some(2.5));
        assert_eq!(parse_score("-3").ok(), Some(-3.0));
        assert!(matches!(parse_score("inf"), Err(CliError::InvalidScore(_))));
        assert!(matches!(parse_score("two"), Err(CliError::InvalidScore(_))));
    }
}
