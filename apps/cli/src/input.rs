//! JSON shapes for the `analyze` command's input/output files
//! (SPEC_FULL.md §6's orchestrator input contract).

use std::collections::BTreeMap;

use serde::Deserialize;
use vitalis_model::Sex;

/// One biomarker value: either a bare number, or a number with a unit. The
/// unit is accepted for input fidelity but not currently consumed — the
/// analysis core scores by canonical name, not by declared unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BiomarkerInput {
    /// A bare numeric value.
    Number(f64),
    /// A value with an explicit unit.
    WithUnit {
        /// The numeric value.
        value: f64,
        /// The unit string (accepted, not interpreted).
        #[serde(default)]
        #[allow(dead_code)]
        unit: String,
    },
}

impl BiomarkerInput {
    /// Extracts the numeric value regardless of which variant this is.
    pub fn numeric(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::WithUnit { value, .. } => *value,
        }
    }
}

/// Subject demographics as they appear on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    /// Opaque user identifier.
    pub user_id: String,
    /// Age in years, if known.
    #[serde(default)]
    pub age: Option<u32>,
    /// Biological sex, if known.
    #[serde(default)]
    pub sex: Option<Sex>,
    /// Height in centimeters, if known.
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Weight in kilograms, if known.
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Self-reported ethnicity, if known.
    #[serde(default)]
    pub ethnicity: Option<String>,
}

/// The full `analyze` input file.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeInput {
    /// Unique analysis identifier.
    pub analysis_id: String,
    /// Raw biomarker map, keyed by canonical name or alias.
    pub biomarkers: BTreeMap<String, BiomarkerInput>,
    /// Subject demographics.
    pub user: UserInput,
    /// Raw questionnaire responses, if a questionnaire was submitted.
    #[serde(default)]
    pub questionnaire: Option<BTreeMap<String, String>>,
    /// Clustering algorithm override.
    #[serde(default)]
    pub clustering_algorithm: Option<String>,
    /// Clinical weight profile override.
    #[serde(default)]
    pub clinical_weight_profile: Option<String>,
}
