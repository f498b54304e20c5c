//! Subject profile and final result types (§3, §6).

use serde::{Deserialize, Serialize};

use crate::clustering::BiomarkerCluster;
use crate::enums::Sex;
use crate::insight::InsightOutcome;
use crate::scoring::BiomarkerScore;

/// The current result format version emitted in every [`AnalysisResult`].
pub const RESULT_VERSION: &str = "1.0.0";

/// Demographic and identity data about the subject of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque user identifier.
    pub user_id: String,
    /// Age in years, if known.
    pub age: Option<u32>,
    /// Biological sex used for scoring adjustments, if known.
    pub sex: Option<Sex>,
    /// Height in centimeters, if known.
    pub height_cm: Option<f64>,
    /// Weight in kilograms, if known.
    pub weight_kg: Option<f64>,
    /// Self-reported ethnicity, if known.
    pub ethnicity: Option<String>,
}

/// The final, immutable output of an analysis (§6). Field order here is the
/// stable field order of the JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Echoes the analysis request's caller-supplied identifier.
    pub analysis_id: String,
    /// Every biomarker score produced, flattened across health systems.
    pub biomarkers: Vec<BiomarkerScore>,
    /// Clusters produced by the selected clustering algorithm.
    pub clusters: Vec<BiomarkerCluster>,
    /// Outcomes from every registered insight module.
    pub insights: Vec<InsightOutcome>,
    /// Overall score in `[0, 100]`, after lifestyle overlay.
    pub overall_score: f64,
    /// ISO-8601 UTC creation timestamp.
    pub created_at: String,
    /// Result format version, always [`RESULT_VERSION`].
    pub result_version: String,
}
