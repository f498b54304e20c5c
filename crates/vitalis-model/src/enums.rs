//! Closed enums shared across the analysis core.
//!
//! Every severity/confidence/category dimension in the system is a fixed, total
//! enumeration rather than a loosely-typed string, per the redesign guidance to
//! replace "severity as strings with implicit ordering" with an enum carrying an
//! explicit total order.

use serde::{Deserialize, Serialize};

/// Biological sex used for scoring adjustments. Distinct from self-reported
/// gender, which is carried separately as free text on the user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// One of the six ordered score bands a biomarker value resolves into.
///
/// Declaration order is significant: bands are checked in this order and the
/// first match wins (no interpolation between bands, a deliberate clinical
/// step function).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRange {
    /// Ideal clinical range.
    Optimal,
    /// Normal but not optimal.
    Normal,
    /// Borderline, worth monitoring.
    Borderline,
    /// High, clinically notable.
    High,
    /// Very high, clinically significant.
    VeryHigh,
    /// Critical, immediate attention warranted.
    Critical,
}

impl ScoreRange {
    /// Maps a band to its fixed point score. No interpolation is ever performed.
    pub const fn points(self) -> f64 {
        match self {
            Self::Optimal => 100.0,
            Self::Normal => 90.0,
            Self::Borderline => 70.0,
            Self::High => 50.0,
            Self::VeryHigh => 30.0,
            Self::Critical => 10.0,
        }
    }
}

/// Categorical confidence used throughout scoring (distinct from the bounded
/// `f64` confidence used by clustering and insights — see SPEC_FULL.md §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Low confidence in the computed result.
    Low,
    /// Medium confidence.
    Medium,
    /// High confidence.
    High,
}

/// Severity of a cluster or insight finding, with an explicit total order:
/// `Normal < Mild < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No notable finding.
    Normal,
    /// Mild finding.
    Mild,
    /// Moderate finding.
    Moderate,
    /// High severity finding.
    High,
    /// Critical finding.
    Critical,
}

impl Severity {
    /// Normalizes a free-form legacy severity string to a closed [`Severity`],
    /// per the documented mapping table in SPEC_FULL.md §7. Unknown strings
    /// fall back to [`Severity::Moderate`] rather than panicking.
    pub fn from_legacy_str(s: &str) -> Self {
        match s {
            "normal" | "protective_factor" | "info" => Self::Normal,
            "mild" | "low_risk" => Self::Mild,
            "moderate" | "moderate_risk" | "warning" => Self::Moderate,
            "high" | "high_risk" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Moderate,
        }
    }
}

/// Health systems the scoring and clustering engines operate over. Iteration
/// order here is the fixed declared order used whenever a biomarker is
/// flattened out of a per-system map (see DESIGN.md, Open Question 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthSystem {
    /// Metabolic system (glucose, insulin, HbA1c).
    Metabolic,
    /// Cardiovascular system (lipids).
    Cardiovascular,
    /// Inflammatory system (CRP).
    Inflammatory,
    /// Hormonal system.
    Hormonal,
    /// Nutritional system.
    Nutritional,
    /// Kidney system.
    Kidney,
    /// Liver system.
    Liver,
    /// Complete blood count system.
    Cbc,
}

impl HealthSystem {
    /// All health systems in their fixed declared order.
    pub const ALL: [HealthSystem; 8] = [
        HealthSystem::Metabolic,
        HealthSystem::Cardiovascular,
        HealthSystem::Inflammatory,
        HealthSystem::Hormonal,
        HealthSystem::Nutritional,
        HealthSystem::Kidney,
        HealthSystem::Liver,
        HealthSystem::Cbc,
    ];

    /// Canonical lowercase name used as a map key and in JSON output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Metabolic => "metabolic",
            Self::Cardiovascular => "cardiovascular",
            Self::Inflammatory => "inflammatory",
            Self::Hormonal => "hormonal",
            Self::Nutritional => "nutritional",
            Self::Kidney => "kidney",
            Self::Liver => "liver",
            Self::Cbc => "cbc",
        }
    }

    /// Title-cased display name (used for health-system-grouping cluster names).
    pub const fn title(self) -> &'static str {
        match self {
            Self::Metabolic => "Metabolic",
            Self::Cardiovascular => "Cardiovascular",
            Self::Inflammatory => "Inflammatory",
            Self::Hormonal => "Hormonal",
            Self::Nutritional => "Nutritional",
            Self::Kidney => "Kidney",
            Self::Liver => "Liver",
            Self::Cbc => "Cbc",
        }
    }
}

/// Clustering algorithm selectable per analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringAlgorithm {
    /// Rule-based clustering (the principal algorithm).
    RuleBased,
    /// One cluster per health system.
    HealthSystemGrouping,
    /// Hard-coded weighted-correlation grouping.
    WeightedCorrelation,
}

impl Default for ClusteringAlgorithm {
    fn default() -> Self {
        Self::RuleBased
    }
}

/// Discrete level for a lifestyle factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleLevel {
    /// Excellent.
    Excellent,
    /// Good.
    Good,
    /// Average.
    Average,
    /// Poor.
    Poor,
    /// Very poor.
    VeryPoor,
}

/// Smoking status, used both directly and as a derived lifestyle factor level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    /// Never smoked.
    Never,
    /// Former smoker.
    Former,
    /// Current smoker.
    Current,
}

/// Severity of a missing-biomarker gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    /// Missing optional biomarker, least urgent.
    Low,
    /// Missing optional biomarker of a weighted system.
    Medium,
    /// Missing required biomarker of an unweighted or low-priority system.
    High,
    /// Missing required biomarker of a weighted system.
    Critical,
}

/// Priority of a generated recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
    /// Critical priority.
    Critical,
}

/// Category a recommendation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    /// Recommends collecting more biomarker data.
    DataCompleteness,
    /// Recommends a lifestyle change.
    Lifestyle,
    /// Recommends clinical follow-up.
    ClinicalFollowUp,
    /// General guidance.
    General,
}

/// Severity level of a cluster validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLevel {
    /// Informational, non-blocking.
    Info,
    /// Worth noting, non-blocking.
    Warning,
    /// Invalidates the cluster set.
    Critical,
}

/// Overall quality tier of a validated cluster set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterQuality {
    /// At least one critical issue; the cluster set is invalid.
    Invalid,
    /// Coherence below 0.4.
    Poor,
    /// Coherence at least 0.4.
    Fair,
    /// Coherence at least 0.6 with at most two warnings.
    Good,
    /// Coherence at least 0.8 with zero warnings.
    Excellent,
}
