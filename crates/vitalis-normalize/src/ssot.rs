//! Compiled-in SSOT biomarker alias table.
//!
//! The real SSOT is a YAML-loaded, schema-validated table (out of scope,
//! SPEC_FULL.md §1/§6); this module stands in for "the loader returns
//! validated biomarker definitions" by compiling the same canonical-name and
//! alias set directly into the binary. Every alias listed here is unique
//! across the table — duplicate aliases would fail SSOT load in the real
//! system and are rejected here too, in [`build_default_snapshot`]'s debug
//! assertions.

/// `(canonical_name, &[aliases])` pairs for every biomarker this crate knows
/// how to score, cluster, or feed to an insight module. Grounded on the
/// canonical names used throughout `backend/core/scoring/rules.py`,
/// `clustering/rules.py`, and the five insight modules.
pub const CANONICAL_BIOMARKERS: &[(&str, &[&str])] = &[
    ("glucose", &["blood_sugar", "blood_glucose", "fasting_glucose"]),
    ("hba1c", &["hemoglobin_a1c", "a1c", "glycated_hemoglobin"]),
    ("insulin", &["fasting_insulin"]),
    ("total_cholesterol", &["cholesterol", "tc"]),
    ("ldl_cholesterol", &["ldl"]),
    ("hdl_cholesterol", &["hdl"]),
    ("triglycerides", &["tg", "trigs"]),
    ("apob", &["apolipoprotein_b"]),
    ("crp", &["c_reactive_protein", "hs_crp"]),
    ("creatinine", &["serum_creatinine"]),
    ("bun", &["blood_urea_nitrogen"]),
    ("egfr", &["estimated_gfr"]),
    ("alt", &["alanine_aminotransferase", "sgpt"]),
    ("ast", &["aspartate_aminotransferase", "sgot"]),
    ("ggt", &["gamma_glutamyl_transferase"]),
    ("alp", &["alkaline_phosphatase"]),
    ("bilirubin", &["total_bilirubin"]),
    ("albumin", &["serum_albumin"]),
    ("hemoglobin", &["hgb", "hb"]),
    ("hematocrit", &["hct"]),
    ("white_blood_cells", &["wbc", "leukocytes"]),
    ("platelets", &["plt"]),
    ("neutrophils", &["absolute_neutrophils"]),
    ("lymphocytes", &["absolute_lymphocytes"]),
    ("ferritin", &["serum_ferritin"]),
    ("transferrin_saturation", &["tsat", "iron_saturation"]),
    ("b12", &["vitamin_b12", "cobalamin"]),
    ("folate", &["vitamin_b9", "folic_acid"]),
    ("tsh", &["thyroid_stimulating_hormone"]),
    ("ft4", &["free_t4"]),
    ("ft3", &["free_t3"]),
    ("cortisol", &["serum_cortisol"]),
    ("systolic_bp", &["systolic_blood_pressure", "sbp"]),
    ("diastolic_bp", &["diastolic_blood_pressure", "dbp"]),
    ("bmi", &["body_mass_index"]),
    ("waist_circumference", &["waist_cm"]),
];
