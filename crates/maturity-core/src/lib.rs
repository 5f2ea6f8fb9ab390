//! # Maturity Core
//!
//! The derived-metrics engine behind the GenAI Security Maturity Explorer.
//!
//! The crate owns a fixed, hand-authored assessment dataset (four threat
//! categories scored along four dimensions for three assessment years) and
//! the pure functions that turn it into display-ready values:
//!
//! - [`engine::adjusted_matrix`]: "what-if" governance simulation
//! - [`MaturityLabel::classify`]: score to maturity band
//! - [`engine::protection_gap`]: threat score minus average protection
//! - [`engine::summary_statistics`]: column means and overall gap
//! - [`SeverityBucket::from_gap`]: gap severity with a color token
//!
//! The [`compositor`] assembles those values into a single
//! [`compositor::DashboardSnapshot`] for the presentation layer.
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌─────────────────────┐
//! │   dataset    │ ───► │    engine    │ ───► │     compositor      │
//! │  (statics)   │      │ (pure fns)   │      │ (DashboardSnapshot) │
//! └──────────────┘      └──────────────┘      └─────────────────────┘
//!        ▲                                              │
//!        └──────────── evidence (statics) ◄─────────────┘
//! ```
//!
//! Nothing in this crate performs I/O or holds mutable state. Every call is
//! reproducible from its explicit arguments.

pub mod compositor;
pub mod dataset;
pub mod engine;
pub mod evidence;

pub use dataset::{Category, Dimension, DimensionScores, ScoreMatrix, Year};
pub use engine::{GovernanceAdjustment, MaturityLabel, SeverityBucket, SummaryStatistics};
pub use evidence::{CategoryDossier, EvidenceRecord};

use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors raised by the engine.
///
/// Every variant is an out-of-domain key or parameter. Lookups never fall
/// back to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaturityError {
    /// The requested assessment year is not part of the dataset.
    #[error("unsupported assessment year: {0}")]
    UnknownYear(String),

    /// The requested threat category does not exist.
    #[error("unknown threat category: {0}")]
    UnknownCategory(String),

    /// The requested assessment dimension does not exist.
    #[error("unknown assessment dimension: {0}")]
    UnknownDimension(String),

    /// Governance adjustment outside `0..=4`.
    #[error("governance adjustment {0} out of range 0..=4")]
    AdjustmentOutOfRange(i64),

    /// Governance adjustment that is not an integer.
    #[error("governance adjustment is not an integer: {0}")]
    InvalidAdjustment(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, MaturityError>;
