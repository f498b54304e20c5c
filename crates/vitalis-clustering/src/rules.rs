//! Rule-based clustering rule table (SPEC_FULL.md §4.4).

use std::collections::BTreeMap;

/// One clustering rule: required/optional biomarkers, per-biomarker score
/// thresholds (closed `[min, max]` intervals, inclusive), minimum matched
/// required count to fire, and firing priority (lower fires first).
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDefinition {
    /// Stable cluster id used when this rule fires.
    pub cluster_id: &'static str,
    /// Human-readable cluster name.
    pub name: &'static str,
    /// Free-text description.
    pub description: &'static str,
    /// Biomarkers that must be present and within threshold for the rule to
    /// be eligible to fire.
    pub required: &'static [&'static str],
    /// Biomarkers added to the cluster if present and within threshold, once
    /// the rule has already fired.
    pub optional: &'static [&'static str],
    /// Inclusive `[min, max]` score threshold per biomarker; a biomarker with
    /// no entry here is unconstrained once present.
    pub thresholds: &'static [(&'static str, f64, f64)],
    /// Minimum number of matched required biomarkers needed to fire.
    pub min_cluster_size: usize,
    /// Firing priority; lower fires first.
    pub priority: u32,
}

impl RuleDefinition {
    /// Looks up the `[min, max]` threshold for `biomarker`, if declared.
    pub fn threshold_for(&self, biomarker: &str) -> Option<(f64, f64)> {
        self.thresholds
            .iter()
            .find(|(name, _, _)| *name == biomarker)
            .map(|(_, min, max)| (*min, *max))
    }
}

/// Returns the default rule table, sorted by ascending priority.
pub fn default_clustering_rules() -> Vec<RuleDefinition> {
    let mut rules = vec![
        RuleDefinition {
            cluster_id: "metabolic_dysfunction",
            name: "Metabolic Dysfunction",
            description: "Glucose regulation markers trending toward dysfunction.",
            required: &["glucose", "hba1c"],
            optional: &["insulin", "bmi", "waist_circumference"],
            thresholds: &[
                ("glucose", 0.0, 70.0),
                ("hba1c", 0.0, 70.0),
                ("insulin", 0.0, 70.0),
                ("bmi", 0.0, 70.0),
                ("waist_circumference", 0.0, 70.0),
            ],
            min_cluster_size: 2,
            priority: 10,
        },
        RuleDefinition {
            cluster_id: "cardiovascular_risk",
            name: "Cardiovascular Risk",
            description: "Lipid markers trending toward elevated cardiovascular risk.",
            required: &["total_cholesterol", "ldl_cholesterol", "hdl_cholesterol"],
            optional: &["triglycerides", "apob", "systolic_bp", "diastolic_bp"],
            thresholds: &[
                ("total_cholesterol", 0.0, 70.0),
                ("ldl_cholesterol", 0.0, 70.0),
                ("hdl_cholesterol", 0.0, 70.0),
                ("triglycerides", 0.0, 70.0),
                ("apob", 0.0, 70.0),
                ("systolic_bp", 0.0, 70.0),
                ("diastolic_bp", 0.0, 70.0),
            ],
            min_cluster_size: 2,
            priority: 20,
        },
        RuleDefinition {
            cluster_id: "inflammatory_burden",
            name: "Inflammatory Burden",
            description: "Markers indicating an elevated systemic inflammatory burden.",
            required: &["crp"],
            optional: &["neutrophils", "lymphocytes", "ferritin"],
            thresholds: &[
                ("crp", 0.0, 70.0),
                ("neutrophils", 0.0, 70.0),
                ("lymphocytes", 0.0, 70.0),
                ("ferritin", 0.0, 70.0),
            ],
            min_cluster_size: 1,
            priority: 30,
        },
        RuleDefinition {
            cluster_id: "organ_function",
            name: "Organ Function",
            description: "Kidney and liver markers trending toward reduced organ function.",
            required: &["creatinine", "alt"],
            optional: &["egfr", "bun", "ast", "ggt", "alp", "bilirubin"],
            thresholds: &[
                ("creatinine", 0.0, 70.0),
                ("alt", 0.0, 70.0),
                ("egfr", 0.0, 70.0),
                ("bun", 0.0, 70.0),
                ("ast", 0.0, 70.0),
                ("ggt", 0.0, 70.0),
                ("alp", 0.0, 70.0),
                ("bilirubin", 0.0, 70.0),
            ],
            min_cluster_size: 2,
            priority: 40,
        },
        RuleDefinition {
            cluster_id: "nutritional_deficiency",
            name: "Nutritional Deficiency",
            description: "Markers indicating a micronutrient deficiency pattern.",
            required: &["b12", "folate"],
            optional: &["ferritin", "transferrin_saturation"],
            thresholds: &[
                ("b12", 0.0, 70.0),
                ("folate", 0.0, 70.0),
                ("ferritin", 0.0, 70.0),
                ("transferrin_saturation", 0.0, 70.0),
            ],
            min_cluster_size: 1,
            priority: 50,
        },
        RuleDefinition {
            cluster_id: "hormonal_imbalance",
            name: "Hormonal Imbalance",
            description: "Thyroid and adrenal markers trending toward imbalance.",
            required: &["tsh"],
            optional: &["ft4", "ft3", "cortisol"],
            thresholds: &[
                ("tsh", 0.0, 70.0),
                ("ft4", 0.0, 70.0),
                ("ft3", 0.0, 70.0),
                ("cortisol", 0.0, 70.0),
            ],
            min_cluster_size: 1,
            priority: 60,
        },
    ];
    rules.sort_by_key(|r| r.priority);
    rules
}

/// Score thresholds are evaluated against this map: canonical biomarker name
/// to its resolved score, as produced by
/// `vitalis_model::ScoringResult::flatten_biomarker_scores`.
pub type ScoreMap = BTreeMap<String, f64>;
