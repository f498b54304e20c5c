//! Default `BiomarkerRule`/`HealthSystemRules` tables for all eight health
//! systems. Band edges are reconstructed from standard clinical reference
//! ranges (lab reference intervals for each analyte); exact literal
//! thresholds from the original rule tables were not preserved verbatim
//! through this transformation, so these bands are a faithful from-scratch
//! encoding of the same six-band, half-closed-interval shape described in
//! SPEC_FULL.md §3/§4.3, not a byte-for-byte transcription of a specific
//! source file.

use vitalis_model::{BiomarkerRule, HealthSystem, HealthSystemRules, ScoreBand};

const NEG_INF: f64 = f64::MIN;
const POS_INF: f64 = f64::MAX;

fn rule(
    name: &str,
    unit: &str,
    weight: f64,
    inverted: bool,
    age_adjustment: bool,
    sex_adjustment: bool,
    bands: [(f64, f64); 6],
) -> BiomarkerRule {
    BiomarkerRule {
        canonical_name: name.to_string(),
        unit: unit.to_string(),
        weight,
        inverted,
        age_adjustment,
        sex_adjustment,
        optimal: ScoreBand::new(bands[0].0, bands[0].1),
        normal: ScoreBand::new(bands[1].0, bands[1].1),
        borderline: ScoreBand::new(bands[2].0, bands[2].1),
        high: ScoreBand::new(bands[3].0, bands[3].1),
        very_high: ScoreBand::new(bands[4].0, bands[4].1),
        critical: ScoreBand::new(bands[5].0, bands[5].1),
    }
}

/// The complete default rule table, one [`HealthSystemRules`] per
/// [`HealthSystem`], in `HealthSystem::ALL` order.
pub fn default_health_system_rules() -> Vec<HealthSystemRules> {
    vec![
        HealthSystemRules {
            system: HealthSystem::Metabolic,
            min_biomarkers_required: 3,
            system_weight: 1.0,
            rules: vec![
                rule(
                    "glucose", "mg/dL", 1.0, false, true, false,
                    [(NEG_INF, 90.0), (90.0, 100.0), (100.0, 126.0), (126.0, 140.0), (140.0, 200.0), (200.0, POS_INF)],
                ),
                rule(
                    "hba1c", "%", 1.0, false, false, false,
                    [(NEG_INF, 5.4), (5.4, 5.7), (5.7, 6.2), (6.2, 6.5), (6.5, 8.0), (8.0, POS_INF)],
                ),
                rule(
                    "insulin", "uIU/mL", 0.7, false, false, false,
                    [(NEG_INF, 8.0), (8.0, 12.0), (12.0, 20.0), (20.0, 25.0), (25.0, 35.0), (35.0, POS_INF)],
                ),
                rule(
                    "bmi", "kg/m^2", 0.6, false, false, false,
                    [(NEG_INF, 25.0), (25.0, 27.5), (27.5, 30.0), (30.0, 35.0), (35.0, 40.0), (40.0, POS_INF)],
                ),
                rule(
                    "waist_circumference", "cm", 0.5, false, false, true,
                    [(NEG_INF, 90.0), (90.0, 100.0), (100.0, 110.0), (110.0, 120.0), (120.0, 140.0), (140.0, POS_INF)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Cardiovascular,
            min_biomarkers_required: 3,
            system_weight: 1.0,
            rules: vec![
                rule(
                    "total_cholesterol", "mg/dL", 0.8, false, false, false,
                    [(NEG_INF, 180.0), (180.0, 200.0), (200.0, 240.0), (240.0, 280.0), (280.0, 320.0), (320.0, POS_INF)],
                ),
                rule(
                    "ldl_cholesterol", "mg/dL", 1.0, false, false, false,
                    [(NEG_INF, 100.0), (100.0, 130.0), (130.0, 160.0), (160.0, 190.0), (190.0, 220.0), (220.0, POS_INF)],
                ),
                rule(
                    "hdl_cholesterol", "mg/dL", 0.9, true, false, true,
                    [(60.0, POS_INF), (50.0, 60.0), (40.0, 50.0), (35.0, 40.0), (30.0, 35.0), (NEG_INF, 30.0)],
                ),
                rule(
                    "triglycerides", "mg/dL", 0.8, false, false, false,
                    [(NEG_INF, 100.0), (100.0, 150.0), (150.0, 200.0), (200.0, 500.0), (500.0, 1000.0), (1000.0, POS_INF)],
                ),
                rule(
                    "apob", "mg/dL", 0.7, false, false, false,
                    [(NEG_INF, 60.0), (60.0, 80.0), (80.0, 100.0), (100.0, 120.0), (120.0, 140.0), (140.0, POS_INF)],
                ),
                rule(
                    "systolic_bp", "mmHg", 0.6, false, false, false,
                    [(NEG_INF, 120.0), (120.0, 130.0), (130.0, 140.0), (140.0, 160.0), (160.0, 180.0), (180.0, POS_INF)],
                ),
                rule(
                    "diastolic_bp", "mmHg", 0.6, false, false, false,
                    [(NEG_INF, 80.0), (80.0, 85.0), (85.0, 90.0), (90.0, 100.0), (100.0, 110.0), (110.0, POS_INF)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Inflammatory,
            min_biomarkers_required: 2,
            system_weight: 0.8,
            rules: vec![
                rule(
                    "crp", "mg/L", 1.0, false, false, false,
                    [(NEG_INF, 1.0), (1.0, 3.0), (3.0, 5.0), (5.0, 10.0), (10.0, 20.0), (20.0, POS_INF)],
                ),
                rule(
                    "neutrophils", "10^3/uL", 0.5, false, false, false,
                    [(NEG_INF, 6.0), (6.0, 7.0), (7.0, 8.0), (8.0, 10.0), (10.0, 15.0), (15.0, POS_INF)],
                ),
                rule(
                    "lymphocytes", "10^3/uL", 0.4, true, false, false,
                    [(2.0, POS_INF), (1.5, 2.0), (1.0, 1.5), (0.7, 1.0), (0.5, 0.7), (NEG_INF, 0.5)],
                ),
                rule(
                    "ferritin", "ng/mL", 0.6, false, false, true,
                    [(NEG_INF, 150.0), (150.0, 300.0), (300.0, 400.0), (400.0, 500.0), (500.0, 1000.0), (1000.0, POS_INF)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Hormonal,
            min_biomarkers_required: 2,
            system_weight: 0.7,
            rules: vec![
                rule(
                    "tsh", "mIU/L", 1.0, false, false, false,
                    [(NEG_INF, 2.5), (2.5, 4.0), (4.0, 6.0), (6.0, 8.0), (8.0, 12.0), (12.0, POS_INF)],
                ),
                rule(
                    "ft4", "ng/dL", 0.6, true, false, false,
                    [(1.0, POS_INF), (0.9, 1.0), (0.8, 0.9), (0.7, 0.8), (0.5, 0.7), (NEG_INF, 0.5)],
                ),
                rule(
                    "ft3", "pg/mL", 0.5, true, false, false,
                    [(2.5, POS_INF), (2.3, 2.5), (2.0, 2.3), (1.7, 2.0), (1.3, 1.7), (NEG_INF, 1.3)],
                ),
                rule(
                    "cortisol", "ug/dL", 0.4, false, false, false,
                    [(NEG_INF, 15.0), (15.0, 20.0), (20.0, 25.0), (25.0, 30.0), (30.0, 40.0), (40.0, POS_INF)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Nutritional,
            min_biomarkers_required: 2,
            system_weight: 0.6,
            rules: vec![
                rule(
                    "b12", "pg/mL", 0.8, true, false, false,
                    [(500.0, POS_INF), (300.0, 500.0), (250.0, 300.0), (200.0, 250.0), (150.0, 200.0), (NEG_INF, 150.0)],
                ),
                rule(
                    "folate", "ng/mL", 0.7, true, false, false,
                    [(10.0, POS_INF), (6.0, 10.0), (4.0, 6.0), (3.0, 4.0), (2.0, 3.0), (NEG_INF, 2.0)],
                ),
                rule(
                    "ferritin", "ng/mL", 0.6, true, false, true,
                    [(50.0, POS_INF), (30.0, 50.0), (20.0, 30.0), (15.0, 20.0), (10.0, 15.0), (NEG_INF, 10.0)],
                ),
                rule(
                    "transferrin_saturation", "%", 0.5, true, false, false,
                    [(25.0, POS_INF), (20.0, 25.0), (15.0, 20.0), (10.0, 15.0), (5.0, 10.0), (NEG_INF, 5.0)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Kidney,
            min_biomarkers_required: 2,
            system_weight: 0.9,
            rules: vec![
                rule(
                    "creatinine", "mg/dL", 1.0, false, true, false,
                    [(NEG_INF, 1.1), (1.1, 1.3), (1.3, 1.5), (1.5, 2.0), (2.0, 3.0), (3.0, POS_INF)],
                ),
                rule(
                    "egfr", "mL/min/1.73m^2", 1.0, true, false, false,
                    [(90.0, POS_INF), (60.0, 90.0), (45.0, 60.0), (30.0, 45.0), (15.0, 30.0), (NEG_INF, 15.0)],
                ),
                rule(
                    "bun", "mg/dL", 0.5, false, false, false,
                    [(NEG_INF, 20.0), (20.0, 25.0), (25.0, 30.0), (30.0, 40.0), (40.0, 60.0), (60.0, POS_INF)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Liver,
            min_biomarkers_required: 2,
            system_weight: 0.9,
            rules: vec![
                rule(
                    "alt", "U/L", 1.0, false, false, false,
                    [(NEG_INF, 30.0), (30.0, 40.0), (40.0, 55.0), (55.0, 80.0), (80.0, 120.0), (120.0, POS_INF)],
                ),
                rule(
                    "ast", "U/L", 1.0, false, false, false,
                    [(NEG_INF, 30.0), (30.0, 40.0), (40.0, 55.0), (55.0, 80.0), (80.0, 120.0), (120.0, POS_INF)],
                ),
                rule(
                    "ggt", "U/L", 0.6, false, false, false,
                    [(NEG_INF, 40.0), (40.0, 55.0), (55.0, 70.0), (70.0, 100.0), (100.0, 150.0), (150.0, POS_INF)],
                ),
                rule(
                    "alp", "U/L", 0.5, false, false, false,
                    [(NEG_INF, 100.0), (100.0, 120.0), (120.0, 140.0), (140.0, 180.0), (180.0, 250.0), (250.0, POS_INF)],
                ),
                rule(
                    "bilirubin", "mg/dL", 0.5, false, false, false,
                    [(NEG_INF, 1.0), (1.0, 1.2), (1.2, 1.5), (1.5, 2.0), (2.0, 3.0), (3.0, POS_INF)],
                ),
                rule(
                    "albumin", "g/dL", 0.6, true, false, false,
                    [(4.0, POS_INF), (3.5, 4.0), (3.2, 3.5), (3.0, 3.2), (2.5, 3.0), (NEG_INF, 2.5)],
                ),
            ],
        },
        HealthSystemRules {
            system: HealthSystem::Cbc,
            min_biomarkers_required: 3,
            system_weight: 0.8,
            rules: vec![
                rule(
                    "hemoglobin", "g/dL", 1.0, true, false, true,
                    [(13.0, POS_INF), (12.0, 13.0), (11.0, 12.0), (10.0, 11.0), (8.0, 10.0), (NEG_INF, 8.0)],
                ),
                rule(
                    "hematocrit", "%", 0.8, true, false, true,
                    [(39.0, POS_INF), (36.0, 39.0), (33.0, 36.0), (30.0, 33.0), (24.0, 30.0), (NEG_INF, 24.0)],
                ),
                rule(
                    "white_blood_cells", "10^3/uL", 0.7, false, false, false,
                    [(4.0, 8.0), (3.5, 4.0), (8.0, 11.0), (11.0, POS_INF), (2.0, 3.5), (NEG_INF, 2.0)],
                ),
                rule(
                    "platelets", "10^3/uL", 0.7, false, false, false,
                    [(150.0, 450.0), (100.0, 150.0), (450.0, 600.0), (600.0, POS_INF), (50.0, 100.0), (NEG_INF, 50.0)],
                ),
            ],
        },
    ]
}
