//! # Preflight
//!
//! Pre-deployment checks run by `maturity check`. Each check inspects a
//! project root independently and yields a [`CheckOutcome`]; the report
//! passes only when every check passes.

use maturity_core::evidence::{self, KEY_FINDINGS};
use maturity_core::{Category, Dimension, Year};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;
use toml::{Table, Value};
use std::process::Command;

/// Oldest toolchain the workspace builds with.
pub const MIN_TOOLCHAIN: Version = Version::new(1, 85, 0);

/// Files a deployable checkout is expected to carry.
pub const DEPLOYMENT_FILES: [(&str, &str); 6] = [
    ("Cargo.toml", "Workspace manifest"),
    ("Cargo.lock", "Locked dependency versions"),
    ("Procfile", "Process configuration"),
    ("render.yaml", "Render.com configuration"),
    ("Dockerfile", "Container build"),
    ("rust-toolchain.toml", "Toolchain pin"),
];

/// Result of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    /// Human-readable findings, one per line.
    pub details: Vec<String>,
}

impl CheckOutcome {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            passed: true,
            details: Vec::new(),
        }
    }

    fn pass(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }

    fn fail(&mut self, detail: impl Into<String>) {
        self.passed = false;
        self.details.push(detail.into());
    }
}

/// Outcome of every check.
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    pub checks: Vec<CheckOutcome>,
    pub passed: usize,
    pub total: usize,
}

impl PreflightReport {
    fn from_checks(checks: Vec<CheckOutcome>) -> Self {
        let passed = checks.iter().filter(|c| c.passed).count();
        let total = checks.len();
        Self {
            checks,
            passed,
            total,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Run every check against `root`.
pub fn run(root: &Path) -> PreflightReport {
    tracing::info!(root = %root.display(), "running preflight checks");
    let checks = vec![
        check_toolchain(root),
        check_manifest(root),
        check_dataset(),
        check_deployment_files(root),
        check_dependency_tree(root),
    ];
    let report = PreflightReport::from_checks(checks);
    tracing::info!(passed = report.passed, total = report.total, "preflight finished");
    report
}

// =============================================================================
// TOOLCHAIN
// =============================================================================

/// Toolchain pin present and recent enough.
pub fn check_toolchain(root: &Path) -> CheckOutcome {
    let mut outcome = CheckOutcome::new("Toolchain Pin");

    let pin = ["rust-toolchain.toml", "rust-toolchain"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file());

    let Some(path) = pin else {
        outcome.fail("no rust-toolchain.toml or rust-toolchain file found");
        return outcome;
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            outcome.fail(format!("cannot read {}: {e}", path.display()));
            return outcome;
        }
    };

    match toolchain_channel(&contents) {
        Ok(Some(channel)) if channel_supported(&channel) => {
            outcome.pass(format!("pinned channel {channel}"));
        }
        Ok(Some(channel)) => outcome.fail(format!(
            "pinned channel {channel}, expected stable or >= {MIN_TOOLCHAIN}"
        )),
        Ok(None) => outcome.fail(format!("no channel in {}", path.display())),
        Err(e) => outcome.fail(format!("invalid {}: {e}", path.display())),
    }
    tracing::debug!(passed = outcome.passed, "toolchain check");
    outcome
}

/// `rust-toolchain.toml` layout.
#[derive(Debug, Deserialize)]
struct ToolchainFile {
    toolchain: Toolchain,
}

#[derive(Debug, Deserialize)]
struct Toolchain {
    channel: Option<String>,
}

/// Channel named by a toolchain file, in either the TOML form
/// (`channel = "1.85"` under `[toolchain]`) or the legacy single-line form.
pub fn toolchain_channel(contents: &str) -> Result<Option<String>, toml::de::Error> {
    let mut lines = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));
    if let (Some(single), None) = (lines.next(), lines.next()) {
        if !single.contains(['=', '[']) {
            return Ok(Some(single.to_string()));
        }
    }

    let file: ToolchainFile = toml::from_str(contents)?;
    Ok(file.toolchain.channel.filter(|c| !c.trim().is_empty()))
}

/// `stable`, or a numeric channel not older than [`MIN_TOOLCHAIN`].
#[must_use]
pub fn channel_supported(channel: &str) -> bool {
    if channel == "stable" || channel.starts_with("stable-") {
        return true;
    }
    channel_version(channel).is_some_and(|version| version >= MIN_TOOLCHAIN)
}

/// Version named by a numeric channel. `1.85` is read as `1.85.0`.
fn channel_version(channel: &str) -> Option<Version> {
    Version::parse(channel)
        .or_else(|_| Version::parse(&format!("{channel}.0")))
        .ok()
}

// =============================================================================
// MANIFEST
// =============================================================================

/// `Cargo.toml` and `Cargo.lock` present.
pub fn check_manifest(root: &Path) -> CheckOutcome {
    let mut outcome = CheckOutcome::new("Manifest");

    match std::fs::read_to_string(root.join("Cargo.toml")) {
        Ok(manifest) => match count_dependencies(&manifest) {
            Ok(count) => {
                outcome.pass("Cargo.toml found");
                outcome.pass(format!("dependencies specified: {count}"));
            }
            Err(e) => outcome.fail(format!("Cargo.toml is not valid TOML: {e}")),
        },
        Err(_) => outcome.fail("Cargo.toml not found"),
    }

    if root.join("Cargo.lock").is_file() {
        outcome.pass("Cargo.lock found");
    } else {
        outcome.fail("Cargo.lock not found");
    }
    tracing::debug!(passed = outcome.passed, "manifest check");
    outcome
}

/// Number of entries across every `*dependencies` table of a manifest,
/// including `[workspace.dependencies]` and `[target.*.dependencies]`.
pub fn count_dependencies(manifest: &str) -> Result<usize, toml::de::Error> {
    let table: Table = toml::from_str(manifest)?;
    Ok(count_dependency_entries(&table))
}

fn count_dependency_entries(table: &Table) -> usize {
    table
        .iter()
        .map(|(key, value)| match value {
            Value::Table(inner) if key.ends_with("dependencies") => inner.len(),
            Value::Table(inner) => count_dependency_entries(inner),
            _ => 0,
        })
        .sum()
}

// =============================================================================
// DATASET
// =============================================================================

/// Embedded dataset is internally consistent.
pub fn check_dataset() -> CheckOutcome {
    let mut outcome = CheckOutcome::new("Dataset Integrity");
    let problems = dataset_problems();
    if problems.is_empty() {
        outcome.pass(format!(
            "{} years x {} categories x {} dimensions in range",
            Year::ALL.len(),
            Category::ALL.len(),
            Dimension::ALL.len()
        ));
        outcome.pass("evidence levels match the 2025 baseline");
        outcome.pass(format!("{} key findings", KEY_FINDINGS.len()));
    } else {
        for problem in problems {
            outcome.fail(problem);
        }
    }
    tracing::debug!(passed = outcome.passed, "dataset check");
    outcome
}

/// Every inconsistency found in the embedded dataset.
#[must_use]
pub fn dataset_problems() -> Vec<String> {
    let mut problems = Vec::new();

    for year in Year::ALL {
        for (category, row) in year.base_matrix().iter() {
            for (dimension, score) in row.iter() {
                if !(0.0..=4.0).contains(&score) {
                    problems.push(format!(
                        "{year} {category} / {dimension}: score {score} out of range"
                    ));
                }
            }
        }
    }

    let baseline = Year::BASELINE.base_matrix();
    for category in Category::ALL {
        let dossier = evidence::dossier(category);
        if dossier.incidents.is_empty() {
            problems.push(format!("{category}: no incidents"));
        }
        if dossier.description.is_empty() || dossier.thesis_quote.is_empty() {
            problems.push(format!("{category}: missing description or quote"));
        }
        for (dimension, record) in dossier.records() {
            let expected = baseline.score(category, dimension);
            if (record.level - expected).abs() > f64::EPSILON {
                problems.push(format!(
                    "{category} / {dimension}: evidence level {} differs from baseline {expected}",
                    record.level
                ));
            }
            if record.evidence.is_empty() || record.references.is_empty() {
                problems.push(format!("{category} / {dimension}: incomplete evidence"));
            }
        }
    }

    problems
}

// =============================================================================
// DEPLOYMENT
// =============================================================================

/// Every entry of [`DEPLOYMENT_FILES`] exists under `root`.
pub fn check_deployment_files(root: &Path) -> CheckOutcome {
    let mut outcome = CheckOutcome::new("Deployment Files");
    for (file, description) in DEPLOYMENT_FILES {
        if root.join(file).exists() {
            outcome.pass(format!("{file}: {description}"));
        } else {
            outcome.fail(format!("{file}: {description} (MISSING)"));
        }
    }
    tracing::debug!(passed = outcome.passed, "deployment check");
    outcome
}

/// `cargo tree --duplicates` reports nothing.
pub fn check_dependency_tree(root: &Path) -> CheckOutcome {
    let mut outcome = CheckOutcome::new("Dependency Tree");

    let output = Command::new("cargo")
        .args(["tree", "--duplicates", "--quiet"])
        .current_dir(root)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let duplicates: Vec<&str> = stdout
                .lines()
                .filter(|l| !l.trim().is_empty() && !l.starts_with(' '))
                .filter(|l| !l.starts_with(['├', '└', '│']))
                .collect();
            if duplicates.is_empty() {
                outcome.pass("no duplicate dependency versions");
            } else {
                outcome.fail(format!(
                    "{} duplicate crate versions in the tree",
                    duplicates.len()
                ));
                for line in duplicates {
                    outcome.fail(line.to_string());
                }
            }
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            outcome.fail(format!(
                "cargo tree failed: {}",
                stderr.lines().next().unwrap_or("unknown error")
            ));
        }
        Err(e) => outcome.fail(format!("could not run cargo tree: {e}")),
    }
    tracing::debug!(passed = outcome.passed, "dependency tree check");
    outcome
}
