//! Insight result value types (§3, §4.5, §9).
//!
//! The "never raises" contract of the source insight modules is modeled at
//! the type level: `analyze` is a total function returning [`InsightOutcome`],
//! never a `Result` that a caller could propagate as fatal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// A single piece of supporting evidence attached to an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvidenceValue {
    /// A numeric sub-score or measurement.
    Number(f64),
    /// A descriptive flag or label.
    Text(String),
    /// A boolean flag.
    Flag(bool),
}

/// The payload of a successfully computed insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightData {
    /// Insight module identifier (e.g. "metabolic_age").
    pub insight_id: String,
    /// Module version string.
    pub version: String,
    /// Canonical names of biomarkers that contributed to this insight.
    pub biomarkers_involved: Vec<String>,
    /// Named numeric drivers, rounded per-insight (HOMA-IR to 2dp, etc).
    pub drivers: BTreeMap<String, f64>,
    /// Structured evidence (sub-scores, ratios, flags).
    pub evidence: BTreeMap<String, EvidenceValue>,
    /// Resolved severity.
    pub severity: Severity,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-text recommendations.
    pub recommendations: Vec<String>,
}

/// Sum type replacing the source's runtime-optional-field `InsightResult`
/// (SPEC_FULL.md §9): a module either succeeds, reports which required
/// biomarkers were missing, or reports that its own calculation failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsightOutcome {
    /// The module computed a result.
    Success(InsightData),
    /// One or more required biomarkers were absent.
    MissingInputs {
        /// Which module reported this.
        insight_id: String,
        /// Module version string.
        version: String,
        /// Canonical names of the missing required biomarkers.
        missing: Vec<String>,
    },
    /// The module's internal calculation failed (e.g. a value outside any
    /// representable clinical range). Modules catch every internal failure
    /// mode themselves; this variant is never constructed by a panic.
    CalculationFailed {
        /// Which module reported this.
        insight_id: String,
        /// Module version string.
        version: String,
        /// Human-readable failure detail.
        detail: String,
    },
}

impl InsightOutcome {
    /// The insight_id regardless of which variant this is.
    pub fn insight_id(&self) -> &str {
        match self {
            Self::Success(d) => &d.insight_id,
            Self::MissingInputs { insight_id, .. } => insight_id,
            Self::CalculationFailed { insight_id, .. } => insight_id,
        }
    }
}
