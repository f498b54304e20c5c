//! Questionnaire-to-lifestyle/demographics mapping (SPEC_FULL.md §4.6, step 3).
//!
//! The real questionnaire schema is a large, versioned form (out of scope);
//! this module stands in for "the mapper returns a validated lifestyle
//! profile and medical history" by recognizing a fixed set of question ids
//! and failing soft (a warning, not an error) on anything it cannot parse.

use std::collections::BTreeMap;

use tracing::debug;
use vitalis_model::{LifestyleLevel, LifestyleProfile, MedicalHistory, Sex, SmokingStatus};

/// Demographic fields a questionnaire can override on the subject's
/// [`vitalis_model::UserProfile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemographicOverrides {
    /// Overridden age in years, if the questionnaire supplied one.
    pub age: Option<u32>,
    /// Overridden biological sex, if the questionnaire supplied one.
    pub sex: Option<Sex>,
    /// Overridden height in centimeters, if the questionnaire supplied one.
    pub height_cm: Option<f64>,
}

/// The result of mapping a raw questionnaire response map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionnaireOutcome {
    /// Derived lifestyle profile, present whenever at least one lifestyle
    /// question was recognized.
    pub lifestyle: Option<LifestyleProfile>,
    /// Derived medical history, always present (empty if nothing was
    /// reported) once a questionnaire is supplied at all.
    pub medical_history: MedicalHistory,
    /// Demographic fields to merge into the user record.
    pub demographics: DemographicOverrides,
    /// Non-fatal validation warnings for entries that could not be parsed.
    pub warnings: Vec<String>,
}

fn parse_lifestyle_level(raw: &str) -> Option<LifestyleLevel> {
    match raw {
        "excellent" => Some(LifestyleLevel::Excellent),
        "good" => Some(LifestyleLevel::Good),
        "average" => Some(LifestyleLevel::Average),
        "poor" => Some(LifestyleLevel::Poor),
        "very_poor" => Some(LifestyleLevel::VeryPoor),
        _ => None,
    }
}

fn parse_smoking_status(raw: &str) -> Option<SmokingStatus> {
    match raw {
        "never" => Some(SmokingStatus::Never),
        "former" => Some(SmokingStatus::Former),
        "current" => Some(SmokingStatus::Current),
        _ => None,
    }
}

fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps a raw questionnaire response map into a [`QuestionnaireOutcome`].
/// Unrecognized keys are ignored; recognized keys with unparseable values
/// produce a warning and fall back to the corresponding default.
pub fn map_questionnaire(responses: &BTreeMap<String, String>) -> QuestionnaireOutcome {
    let mut lifestyle = LifestyleProfile::average();
    let mut has_lifestyle_answer = false;
    let mut warnings = Vec::new();
    let mut demographics = DemographicOverrides::default();
    let mut medical_history = MedicalHistory::default();

    for (key, value) in responses {
        match key.as_str() {
            "diet_level" => match parse_lifestyle_level(value) {
                Some(level) => {
                    lifestyle.diet_level = level;
                    has_lifestyle_answer = true;
                }
                None => warnings.push(format!("unrecognized diet_level value: {value:?}")),
            },
            "sleep_hours" => match value.parse::<f64>() {
                Ok(hours) if hours >= 0.0 => {
                    lifestyle.sleep_hours = hours;
                    has_lifestyle_answer = true;
                }
                _ => warnings.push(format!("invalid sleep_hours value: {value:?}")),
            },
            "exercise_minutes_per_week" => match value.parse::<u32>() {
                Ok(minutes) => {
                    lifestyle.exercise_minutes_per_week = minutes;
                    has_lifestyle_answer = true;
                }
                Err(_) => warnings.push(format!("invalid exercise_minutes_per_week value: {value:?}")),
            },
            "alcohol_units_per_week" => match value.parse::<u32>() {
                Ok(units) => {
                    lifestyle.alcohol_units_per_week = units;
                    has_lifestyle_answer = true;
                }
                Err(_) => warnings.push(format!("invalid alcohol_units_per_week value: {value:?}")),
            },
            "smoking_status" => match parse_smoking_status(value) {
                Some(status) => {
                    lifestyle.smoking_status = status;
                    has_lifestyle_answer = true;
                }
                None => warnings.push(format!("unrecognized smoking_status value: {value:?}")),
            },
            "stress_level" => match parse_lifestyle_level(value) {
                Some(level) => {
                    lifestyle.stress_level = level;
                    has_lifestyle_answer = true;
                }
                None => warnings.push(format!("unrecognized stress_level value: {value:?}")),
            },
            "age" => match value.parse::<u32>() {
                Ok(age) => demographics.age = Some(age),
                Err(_) => warnings.push(format!("invalid age value: {value:?}")),
            },
            "sex" => match value.as_str() {
                "male" => demographics.sex = Some(Sex::Male),
                "female" => demographics.sex = Some(Sex::Female),
                _ => warnings.push(format!("unrecognized sex value: {value:?}")),
            },
            "height_cm" => match value.parse::<f64>() {
                Ok(height) if height > 0.0 => demographics.height_cm = Some(height),
                _ => warnings.push(format!("invalid height_cm value: {value:?}")),
            },
            "conditions" => medical_history.conditions = parse_csv_list(value),
            "medications" => medical_history.medications = parse_csv_list(value),
            "family_history" => medical_history.family_history = parse_csv_list(value),
            "supplements" => medical_history.supplements = parse_csv_list(value),
            "sleep_disorders" => medical_history.sleep_disorders = parse_csv_list(value),
            "allergies" => medical_history.allergies = parse_csv_list(value),
            "atrial_fibrillation" => medical_history.atrial_fibrillation = value == "true",
            "rheumatoid_arthritis" => medical_history.rheumatoid_arthritis = value == "true",
            "systemic_lupus" => medical_history.systemic_lupus = value == "true",
            "corticosteroids" => medical_history.corticosteroids = value == "true",
            "atypical_antipsychotics" => medical_history.atypical_antipsychotics = value == "true",
            "hiv_treatments" => medical_history.hiv_treatments = value == "true",
            "migraines" => medical_history.migraines = value == "true",
            other => warnings.push(format!("unrecognized questionnaire key: {other:?}")),
        }
    }

    if !warnings.is_empty() {
        debug!(warnings = warnings.len(), "questionnaire mapping produced non-fatal warnings");
    }

    QuestionnaireOutcome {
        lifestyle: has_lifestyle_answer.then_some(lifestyle),
        medical_history,
        demographics,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_lifestyle_keys_populate_a_profile() {
        let mut responses = BTreeMap::new();
        let _ = responses.insert("diet_level".to_string(), "excellent".to_string());
        let _ = responses.insert("sleep_hours".to_string(), "8".to_string());
        let outcome = map_questionnaire(&responses);
        let lifestyle = outcome.lifestyle.expect("lifestyle profile");
        assert_eq!(lifestyle.diet_level, LifestyleLevel::Excellent);
        assert!((lifestyle.sleep_hours - 8.0).abs() < 1e-9);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn unparseable_value_produces_warning_not_error() {
        let mut responses = BTreeMap::new();
        let _ = responses.insert("diet_level".to_string(), "not_a_real_level".to_string());
        let outcome = map_questionnaire(&responses);
        assert!(outcome.lifestyle.is_none());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn demographic_overrides_are_parsed() {
        let mut responses = BTreeMap::new();
        let _ = responses.insert("age".to_string(), "42".to_string());
        let _ = responses.insert("sex".to_string(), "female".to_string());
        let _ = responses.insert("height_cm".to_string(), "168.0".to_string());
        let outcome = map_questionnaire(&responses);
        assert_eq!(outcome.demographics.age, Some(42));
        assert_eq!(outcome.demographics.sex, Some(Sex::Female));
        assert_eq!(outcome.demographics.height_cm, Some(168.0));
    }

    #[test]
    fn empty_responses_yield_no_lifestyle_and_no_warnings() {
        let outcome = map_questionnaire(&BTreeMap::new());
        assert!(outcome.lifestyle.is_none());
        assert!(outcome.warnings.is_empty());
    }
}
