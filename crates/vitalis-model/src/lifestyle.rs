//! Lifestyle and medical history inputs to the scoring overlay (§3).

use serde::{Deserialize, Serialize};

use crate::enums::{LifestyleLevel, SmokingStatus};

/// Self-reported or questionnaire-derived lifestyle factors consumed by the
/// scoring engine's overlay (§4.3). All numeric fields are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifestyleProfile {
    /// Diet quality level.
    pub diet_level: LifestyleLevel,
    /// Average nightly sleep, in hours.
    pub sleep_hours: f64,
    /// Weekly exercise volume, in minutes.
    pub exercise_minutes_per_week: u32,
    /// Weekly alcohol consumption, in standard units.
    pub alcohol_units_per_week: u32,
    /// Smoking status.
    pub smoking_status: SmokingStatus,
    /// Stress level.
    pub stress_level: LifestyleLevel,
}

impl LifestyleProfile {
    /// A neutral, "average across the board" profile used as a default when
    /// no questionnaire data is available.
    pub fn average() -> Self {
        Self {
            diet_level: LifestyleLevel::Average,
            sleep_hours: 7.0,
            exercise_minutes_per_week: 150,
            alcohol_units_per_week: 5,
            smoking_status: SmokingStatus::Never,
            stress_level: LifestyleLevel::Average,
        }
    }
}

/// Medical history derived from the questionnaire mapper. Threaded through
/// the orchestrator's output for the caller's benefit; consumed by none of
/// the scoring/clustering/insight math (SPEC_FULL.md §3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    /// Chronic conditions reported.
    pub conditions: Vec<String>,
    /// Current medications reported.
    pub medications: Vec<String>,
    /// Family history entries reported.
    pub family_history: Vec<String>,
    /// Supplements reported.
    pub supplements: Vec<String>,
    /// Sleep disorders reported.
    pub sleep_disorders: Vec<String>,
    /// Allergies/food sensitivities reported.
    pub allergies: Vec<String>,
    /// QRISK3-style cardiovascular risk flag: atrial fibrillation.
    pub atrial_fibrillation: bool,
    /// QRISK3-style cardiovascular risk flag: rheumatoid arthritis.
    pub rheumatoid_arthritis: bool,
    /// QRISK3-style cardiovascular risk flag: systemic lupus erythematosus.
    pub systemic_lupus: bool,
    /// QRISK3-style cardiovascular risk flag: corticosteroid use.
    pub corticosteroids: bool,
    /// QRISK3-style cardiovascular risk flag: atypical antipsychotic use.
    pub atypical_antipsychotics: bool,
    /// QRISK3-style cardiovascular risk flag: HIV/AIDS treatment.
    pub hiv_treatments: bool,
    /// QRISK3-style cardiovascular risk flag: regular migraines.
    pub migraines: bool,
}
