//! Scoring rule definitions: score bands and per-health-system rule sets.

use serde::{Deserialize, Serialize};

use crate::enums::HealthSystem;

/// A half-closed interval `[min, max)` used to bound a [`crate::ScoreRange`]
/// band. A value exactly on the upper edge falls into the *next* band, never
/// this one — matching the boundary rule in SPEC_FULL.md §8.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl ScoreBand {
    /// Builds a band `[min, max)`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` falls within this half-closed band.
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// The six ordered score bands for one biomarker, plus adjustment flags and
/// weighting. For inverted biomarkers (higher is better, e.g. HDL
/// cholesterol) the bands are declared in the reverse numeric order but the
/// declaration order itself (optimal → critical) is unchanged — matching rule
/// matching always proceeds declaration order first, exactly as the source
/// rules module iterates the six named bands in fixed order regardless of
/// polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerRule {
    /// Canonical biomarker name this rule scores.
    pub canonical_name: String,
    /// Expected measurement unit.
    pub unit: String,
    /// Weight used in per-system weighted aggregation.
    pub weight: f64,
    /// Whether higher values are clinically worse (`false`) or better (`true`).
    pub inverted: bool,
    /// Whether an age-based adjustment may apply to this biomarker.
    pub age_adjustment: bool,
    /// Whether a sex-based adjustment may apply to this biomarker.
    pub sex_adjustment: bool,
    /// Optimal band.
    pub optimal: ScoreBand,
    /// Normal band.
    pub normal: ScoreBand,
    /// Borderline band.
    pub borderline: ScoreBand,
    /// High band.
    pub high: ScoreBand,
    /// Very-high band.
    pub very_high: ScoreBand,
    /// Critical band.
    pub critical: ScoreBand,
}

impl BiomarkerRule {
    /// The six bands in declared match order: optimal, normal, borderline,
    /// high, very_high, critical. The first band whose interval contains the
    /// (possibly adjusted) value wins.
    pub fn bands_in_order(&self) -> [(crate::ScoreRange, ScoreBand); 6] {
        use crate::ScoreRange::*;
        [
            (Optimal, self.optimal),
            (Normal, self.normal),
            (Borderline, self.borderline),
            (High, self.high),
            (VeryHigh, self.very_high),
            (Critical, self.critical),
        ]
    }
}

/// The ordered set of [`BiomarkerRule`]s for one health system, plus the
/// minimum biomarker count required for a confident system score and the
/// system's weight in overall aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSystemRules {
    /// Which health system these rules belong to.
    pub system: HealthSystem,
    /// Ordered biomarker rules.
    pub rules: Vec<BiomarkerRule>,
    /// Minimum number of scored biomarkers for a non-low system confidence.
    pub min_biomarkers_required: usize,
    /// Weight used in overall score aggregation.
    pub system_weight: f64,
}

impl HealthSystemRules {
    /// Looks up the rule for a given canonical biomarker name.
    pub fn rule_for(&self, canonical_name: &str) -> Option<&BiomarkerRule> {
        self.rules.iter().find(|r| r.canonical_name == canonical_name)
    }
}
