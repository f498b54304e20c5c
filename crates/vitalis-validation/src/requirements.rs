//! Per-health-system biomarker requirements used by completeness and gap
//! analysis. Intentionally independent of `vitalis-scoring`'s `BiomarkerRule`
//! tables (which carry full score bands) — this crate only needs which
//! biomarkers are critical vs optional per system, and each system's weight.

use vitalis_model::HealthSystem;

/// The critical/optional biomarker requirement list for one health system,
/// plus the weight used in overall completeness aggregation. Grounded on
/// `backend/core/validation/gaps.py`'s per-system requirement tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRequirements {
    /// The health system these requirements describe.
    pub system: HealthSystem,
    /// Biomarkers whose absence blocks readiness for this system.
    pub critical: Vec<&'static str>,
    /// Biomarkers that improve confidence but are not required.
    pub optional: Vec<&'static str>,
    /// Weight used identically to the scoring engine's `system_weight`.
    pub weight: f64,
}

/// The default requirement table for all eight health systems, mirroring the
/// biomarker sets scored by `vitalis-scoring`'s default rule tables.
pub fn default_requirements() -> Vec<SystemRequirements> {
    vec![
        SystemRequirements {
            system: HealthSystem::Metabolic,
            critical: vec!["glucose", "hba1c"],
            optional: vec!["insulin", "bmi", "waist_circumference"],
            weight: 1.0,
        },
        SystemRequirements {
            system: HealthSystem::Cardiovascular,
            critical: vec!["total_cholesterol", "ldl_cholesterol", "hdl_cholesterol"],
            optional: vec!["triglycerides", "apob", "systolic_bp", "diastolic_bp"],
            weight: 1.0,
        },
        SystemRequirements {
            system: HealthSystem::Inflammatory,
            critical: vec!["crp"],
            optional: vec!["neutrophils", "lymphocytes", "ferritin"],
            weight: 0.8,
        },
        SystemRequirements {
            system: HealthSystem::Hormonal,
            critical: vec!["tsh"],
            optional: vec!["ft4", "ft3", "cortisol"],
            weight: 0.7,
        },
        SystemRequirements {
            system: HealthSystem::Nutritional,
            critical: vec!["b12", "folate"],
            optional: vec!["ferritin", "transferrin_saturation"],
            weight: 0.6,
        },
        SystemRequirements {
            system: HealthSystem::Kidney,
            critical: vec!["creatinine", "egfr"],
            optional: vec!["bun"],
            weight: 0.9,
        },
        SystemRequirements {
            system: HealthSystem::Liver,
            critical: vec!["alt", "ast"],
            optional: vec!["ggt", "alp", "bilirubin", "albumin"],
            weight: 0.9,
        },
        SystemRequirements {
            system: HealthSystem::Cbc,
            critical: vec!["hemoglobin", "hematocrit", "white_blood_cells", "platelets"],
            optional: vec![],
            weight: 0.8,
        },
    ]
}
