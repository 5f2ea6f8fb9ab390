//! # Evidence Module
//!
//! Static reference material behind every heatmap cell: a per-category
//! dossier (description, real-world incidents, a quote from the source
//! assessment) and a per-dimension evidence record (level, description,
//! evidence bullets, bibliographic references).
//!
//! The records are read-only. Nothing here is derived; the engine only reads
//! them for hover text and the detail view. Recorded levels mirror the 2025
//! baseline matrix.

use crate::dataset::{Category, Dimension};
use serde::Serialize;

/// Evidence for one (category, dimension) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvidenceRecord {
    /// Baseline level recorded alongside the evidence.
    pub level: f64,
    /// One-line assessment of the cell.
    pub description: &'static str,
    /// Supporting evidence bullets.
    pub evidence: &'static [&'static str],
    /// Bibliographic references.
    pub references: &'static [&'static str],
}

impl EvidenceRecord {
    /// The first `n` evidence bullets (used for hover text).
    #[must_use]
    pub fn leading_evidence(&self, n: usize) -> &'static [&'static str] {
        &self.evidence[..n.min(self.evidence.len())]
    }

    /// The first `n` references (used for hover text).
    #[must_use]
    pub fn leading_references(&self, n: usize) -> &'static [&'static str] {
        &self.references[..n.min(self.references.len())]
    }
}

/// Everything the detail view shows for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryDossier {
    pub category: Category,
    pub description: &'static str,
    pub incidents: &'static [&'static str],
    pub thesis_quote: &'static str,
    /// Records in [`Dimension::ALL`] order.
    dimensions: [EvidenceRecord; 4],
}

impl CategoryDossier {
    /// Evidence record for a dimension of this category.
    #[must_use]
    pub const fn record(&self, dimension: Dimension) -> &EvidenceRecord {
        let idx = match dimension {
            Dimension::ThreatMaturity => 0,
            Dimension::TechnicalControls => 1,
            Dimension::GovernanceEnforcement => 2,
            Dimension::StakeholderProtections => 3,
        };
        &self.dimensions[idx]
    }

    /// `(dimension, record)` pairs in display order.
    pub fn records(&self) -> impl Iterator<Item = (Dimension, &EvidenceRecord)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.record(d)))
    }
}

/// The dossier for a category.
#[must_use]
pub fn dossier(category: Category) -> &'static CategoryDossier {
    &DOSSIERS[category.index()]
}

/// Shortcut for a single cell's evidence.
#[must_use]
pub fn cell_evidence(category: Category, dimension: Dimension) -> &'static EvidenceRecord {
    dossier(category).record(dimension)
}

/// Headline figures from the source assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyFinding {
    pub value: &'static str,
    pub title: &'static str,
    pub caption: &'static str,
    /// Tone used by the presentation layer (danger, warning, success, info).
    pub tone: &'static str,
}

/// Static key-findings panel.
pub static KEY_FINDINGS: [KeyFinding; 4] = [
    KeyFinding {
        value: "3.5",
        title: "Maximum Gap",
        caption: "Political Integrity: threat vs. protection",
        tone: "danger",
    },
    KeyFinding {
        value: "0.5",
        title: "Avg Stakeholder Protection",
        caption: "For GenAI-specific threats (excl. Privacy)",
        tone: "warning",
    },
    KeyFinding {
        value: "1.5",
        title: "Privacy Advantage",
        caption: "Pre-existing law narrows protection gap",
        tone: "success",
    },
    KeyFinding {
        value: "46",
        title: "Sources Reviewed",
        caption: "Academic, regulatory, incident data",
        tone: "info",
    },
];

/// Attribution shown with quotes and in the footer.
pub const SOURCE_ATTRIBUTION: &str = "Cabagnot (2025)";

// =============================================================================
// CONSTANT TABLES
// =============================================================================

static DOSSIERS: [CategoryDossier; 4] = [
    CategoryDossier {
        category: Category::PromptInjection,
        description: "Attacks that manipulate LLM behavior through crafted inputs, including direct and indirect injection techniques that can compromise system integrity and user trust.",
        incidents: &[
            "EchoLeak CVE-2025-32711: First real-world zero-click prompt injection in production LLM (Reddy & Gujral, 2025)",
            "Bing Chat Sydney persona leak via prompt injection (Edwards, 2023)",
            "Chevrolet dealership chatbot manipulation - offered $1 car deal (Knight, 2024)",
        ],
        thesis_quote: "The exploitation pathway from laboratory proof-of-concept to weaponized zero-click vulnerability took less than two years—far outpacing protective response capabilities.",
        dimensions: [
            EvidenceRecord {
                level: 4.0,
                description: "Fully mature threat with automated exploitation tools",
                evidence: &[
                    "Indirect prompt injection compromises real-world LLM applications (Greshake et al., 2023)",
                    "Zero-click exploits now targeting production systems (Reddy & Gujral, 2025)",
                    "Exploitation pathway from lab to weaponized attack took <2 years",
                ],
                references: &["Greshake et al., 2023", "Reddy & Gujral, 2025", "Wang et al., 2025"],
            },
            EvidenceRecord {
                level: 2.5,
                description: "Partial defenses exist but easily bypassed",
                evidence: &[
                    "Input sanitization and output filtering implemented by major providers",
                    "Defenses routinely bypassed by novel injection techniques",
                    "No provably robust defense against adaptive adversaries",
                ],
                references: &["Das et al., 2025", "Wang et al., 2025", "Ferrag et al., 2025"],
            },
            EvidenceRecord {
                level: 2.0,
                description: "Guidelines exist but enforcement is weak",
                evidence: &[
                    "OWASP Top 10 for LLMs addresses prompt injection (OWASP, 2025)",
                    "EU AI Act requires security measures but implementation unclear",
                    "No mandatory security testing requirements for LLM deployments",
                ],
                references: &["OWASP Foundation, 2025", "European Commission, 2024", "NIST, 2024"],
            },
            EvidenceRecord {
                level: 0.5,
                description: "Almost no legal standing or remedy for victims",
                evidence: &[
                    "Non-users have no recourse when affected by LLM outputs",
                    "Section 230 shields platforms from most liability in US",
                    "Burden of proof on affected individuals is prohibitive",
                ],
                references: &["Citron & Chesney, 2025", "Li et al., 2025", "NTIA, 2024"],
            },
        ],
    },
    CategoryDossier {
        category: Category::AutonomyHarms,
        description: "Threats to human agency, decision-making autonomy, and cognitive independence from AI systems, including skill atrophy, over-reliance, and manipulation.",
        incidents: &[
            "Documented skill atrophy in developers over-relying on AI coding assistants",
            "ChatGPT influence on student critical thinking and learning processes",
            "AI-generated content flooding information ecosystems affecting human judgment",
        ],
        thesis_quote: "Autonomy harms represent a uniquely insidious category where the affected individuals may not recognize their own diminished agency.",
        dimensions: [
            EvidenceRecord {
                level: 4.0,
                description: "Widespread autonomy erosion across domains",
                evidence: &[
                    "Documented skill atrophy in professionals using AI assistants",
                    "Educational integrity concerns reported across institutions globally",
                    "Cognitive offloading reducing human critical thinking capacity",
                ],
                references: &["Bernstein et al., 2025", "Shelby et al., 2023", "Weidinger et al., 2022"],
            },
            EvidenceRecord {
                level: 2.0,
                description: "Limited technical solutions for autonomy protection",
                evidence: &[
                    "AI detection tools have high false positive rates",
                    "No effective technical barriers to over-reliance",
                    "Friction-adding UX patterns largely unexplored",
                ],
                references: &["Bernstein et al., 2025", "Bommasani et al., 2024"],
            },
            EvidenceRecord {
                level: 2.0,
                description: "Emerging policies but no enforcement mechanisms",
                evidence: &[
                    "Educational institutions creating AI use policies",
                    "Professional bodies issuing guidance without enforcement",
                    "No regulatory framework for cognitive autonomy protection",
                ],
                references: &["European Commission, 2024", "NIST, 2024", "OECD, 2024"],
            },
            EvidenceRecord {
                level: 0.5,
                description: "No recognized right to cognitive autonomy",
                evidence: &[
                    "No legal framework protecting against autonomy harms",
                    "Affected individuals may not recognize their own diminished agency",
                    "Collective harms not actionable individually",
                ],
                references: &["Citron & Chesney, 2025", "Bommasani et al., 2024", "AWO International, 2023"],
            },
        ],
    },
    CategoryDossier {
        category: Category::PoliticalIntegrity,
        description: "Threats to democratic processes, electoral systems, and political discourse from AI-generated content including deepfakes, synthetic media, and coordinated disinformation.",
        incidents: &[
            "Biden robocall deepfake urging voters to skip NH primary (NPR, 2024)",
            "AI-generated political disinformation campaigns in multiple countries",
            "Synthetic media targeting election integrity in 2024 cycles",
        ],
        thesis_quote: "The 3.5-level gap between threat maturity and stakeholder protection in political integrity represents perhaps the most acute democratic vulnerability in the generative AI era.",
        dimensions: [
            EvidenceRecord {
                level: 4.0,
                description: "Active exploitation in electoral contexts globally",
                evidence: &[
                    "Documented use in 2024 election cycles across multiple countries",
                    "AI robocalls directly targeting voter behavior and turnout",
                    "Synthetic candidates and AI-generated campaign materials deployed",
                ],
                references: &["NPR, 2024", "Li et al., 2025", "Trend Micro, 2024"],
            },
            EvidenceRecord {
                level: 1.0,
                description: "Detection tools unreliable for sophisticated fakes",
                evidence: &[
                    "Deepfake detection accuracy varies widely and lags generation",
                    "Real-time verification not feasible at scale",
                    "Watermarking standards (C2PA) adoption remains minimal",
                ],
                references: &["Ferrag et al., 2025", "Golda et al., 2024", "Radanliev et al., 2025"],
            },
            EvidenceRecord {
                level: 0.5,
                description: "Minimal regulation of AI in political contexts",
                evidence: &[
                    "Few jurisdictions require AI disclosure in political ads",
                    "First Amendment concerns limit US government action",
                    "Cross-border enforcement nearly impossible",
                ],
                references: &["NCSL, 2025", "Citron & Chesney, 2025", "European Commission, 2024"],
            },
            EvidenceRecord {
                level: 0.5,
                description: "Voters and candidates lack effective remedies",
                evidence: &[
                    "No rapid response mechanism for electoral deepfakes",
                    "Damage occurs before content can be debunked",
                    "No cause of action for diffuse democratic harms",
                ],
                references: &["NPR, 2024", "Li et al., 2025", "AWO International, 2023"],
            },
        ],
    },
    CategoryDossier {
        category: Category::Privacy,
        description: "Baseline comparison category showing traditional privacy protections that pre-date generative AI, demonstrating that established legal frameworks substantially narrow protection gaps.",
        incidents: &[
            "ChatGPT data breach exposing user conversations (OpenAI, 2023)",
            "Samsung employees leaking proprietary code via ChatGPT (Milmo, 2023)",
            "Training data extraction attacks revealing personal information",
        ],
        thesis_quote: "Privacy serves as a crucial baseline comparator, demonstrating that when legal frameworks predate the technology, protection gaps are substantially narrower—a key finding for policy development.",
        dimensions: [
            EvidenceRecord {
                level: 4.0,
                description: "Sophisticated privacy attacks well-documented",
                evidence: &[
                    "Membership inference and model inversion attacks mature",
                    "Training data extraction demonstrated at scale (Carlini et al.)",
                    "Unintentional memorization creates persistent privacy risks",
                ],
                references: &["Carlini et al., 2024", "Liu et al., 2024", "Das et al., 2025"],
            },
            EvidenceRecord {
                level: 2.0,
                description: "Differential privacy and access controls exist",
                evidence: &[
                    "Major providers implementing privacy-preserving techniques",
                    "Effectiveness varies significantly across implementations",
                    "Trade-offs between privacy and model utility persist",
                ],
                references: &["Liu et al., 2024", "Das et al., 2025", "Golda et al., 2024"],
            },
            EvidenceRecord {
                level: 2.0,
                description: "GDPR and emerging AI regulations apply",
                evidence: &[
                    "GDPR provides baseline protections in EU",
                    "EDPB guidance specifically addresses LLM privacy risks",
                    "Enforcement actions beginning against AI companies",
                ],
                references: &["EDPB, 2025", "European Commission, 2024", "Veale & Borgesius, 2023"],
            },
            EvidenceRecord {
                level: 2.0,
                description: "Established privacy rights provide some recourse",
                evidence: &[
                    "Data subject rights under GDPR enforceable",
                    "Class action mechanisms available in some jurisdictions",
                    "Pre-existing legal frameworks reduce protection gap by 1.5 levels",
                ],
                references: &["EDPB, 2025", "Veale & Borgesius, 2023", "OECD, 2024"],
            },
        ],
    },
];

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Year;

    #[test]
    fn dossiers_are_indexed_by_category() {
        for category in Category::ALL {
            assert_eq!(dossier(category).category, category);
        }
    }

    #[test]
    fn recorded_levels_match_baseline() {
        let baseline = Year::BASELINE.base_matrix();
        for category in Category::ALL {
            for (dimension, record) in dossier(category).records() {
                assert_eq!(
                    record.level,
                    baseline.score(category, dimension),
                    "{category} / {dimension}"
                );
            }
        }
    }

    #[test]
    fn every_record_is_populated() {
        for category in Category::ALL {
            let d = dossier(category);
            assert!(!d.description.is_empty());
            assert!(!d.incidents.is_empty());
            assert!(!d.thesis_quote.is_empty());
            for (_, record) in d.records() {
                assert!(!record.evidence.is_empty());
                assert!(!record.references.is_empty());
            }
        }
    }

    #[test]
    fn leading_slices_are_bounded() {
        let record = cell_evidence(Category::AutonomyHarms, Dimension::TechnicalControls);
        assert_eq!(record.leading_evidence(2).len(), 2);
        assert_eq!(record.leading_references(5).len(), 2);
    }
}
