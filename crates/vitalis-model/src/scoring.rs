//! Scoring result value types (§3, §4.3).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceLevel, HealthSystem, ScoreRange};

/// The resolved score for a single biomarker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerScore {
    /// Canonical biomarker name.
    pub name: String,
    /// Raw (possibly age/sex adjusted) value that was scored.
    pub value: f64,
    /// Score in `[0, 100]`, always one of `{10, 30, 50, 70, 90, 100}`.
    pub score: f64,
    /// The band the value resolved into.
    pub score_range: ScoreRange,
    /// Confidence in this individual score.
    pub confidence: ConfidenceLevel,
}

/// Aggregated score for one health system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSystemScore {
    /// Which system this is.
    pub system: HealthSystem,
    /// Weighted-average score in `[0, 100]`.
    pub overall_score: f64,
    /// Confidence in the system score.
    pub confidence: ConfidenceLevel,
    /// Per-biomarker scores that contributed.
    pub biomarker_scores: Vec<BiomarkerScore>,
    /// Canonical names of biomarkers this system expected but did not receive.
    pub missing_biomarkers: Vec<String>,
    /// Free-text recommendations generated for this system.
    pub recommendations: Vec<String>,
}

/// Top-level scoring output (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Overall score in `[0, 100]`, after lifestyle overlay if one was supplied.
    pub overall_score: f64,
    /// Overall confidence.
    pub confidence: ConfidenceLevel,
    /// Per-system scores, keyed by [`HealthSystem::name`].
    pub health_system_scores: BTreeMap<String, HealthSystemScore>,
    /// Deduplicated, sorted list of all missing biomarkers across systems.
    pub missing_biomarkers: Vec<String>,
    /// Deduplicated, sorted list of all recommendations across systems.
    pub recommendations: Vec<String>,
    /// Human-readable descriptions of lifestyle adjustments applied, in the
    /// order they were applied (diet, sleep, exercise, alcohol, smoking, stress).
    pub lifestyle_adjustments: Vec<String>,
}

impl ScoringResult {
    /// Flattens every biomarker score across all systems into a single map,
    /// iterating systems in [`HealthSystem::ALL`] order so that a biomarker
    /// scored by more than one system deterministically keeps the last
    /// system's score in that fixed order (DESIGN.md, Open Question 1).
    pub fn flatten_biomarker_scores(&self) -> BTreeMap<String, BiomarkerScore> {
        let mut flat = BTreeMap::new();
        for system in HealthSystem::ALL {
            if let Some(system_score) = self.health_system_scores.get(system.name()) {
                for bs in &system_score.biomarker_scores {
                    let _ = flat.insert(bs.name.clone(), bs.clone());
                }
            }
        }
        flat
    }
}
