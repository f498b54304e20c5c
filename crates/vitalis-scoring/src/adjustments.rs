//! Age/sex value adjustments applied before band matching (SPEC_FULL.md §4.3).
//!
//! Note on the hba1c rule's `age_adjustment` flag (DESIGN.md, Open Question
//! 5): the flag on a [`vitalis_model::BiomarkerRule`] is declarative metadata
//! only. Which biomarkers actually receive the age multiplier is hard-matched
//! by name below, exactly as the reference rule table declares the flag on
//! hba1c without ever applying a multiplier to it.

use vitalis_model::Sex;

/// Applies the age-based multiplier: values for `glucose`/`creatinine` are
/// multiplied by 1.1 when `age > 65`.
pub fn apply_age_adjustment(canonical_name: &str, value: f64, age: Option<u32>) -> f64 {
    match age {
        Some(age) if age > 65 && matches!(canonical_name, "glucose" | "creatinine") => value * 1.1,
        _ => value,
    }
}

/// Applies the sex-based multiplier: for female subjects, `hemoglobin`/
/// `hematocrit` are multiplied by 0.9 and `hdl_cholesterol` by 1.1.
pub fn apply_sex_adjustment(canonical_name: &str, value: f64, sex: Option<Sex>) -> f64 {
    match sex {
        Some(Sex::Female) if matches!(canonical_name, "hemoglobin" | "hematocrit") => value * 0.9,
        Some(Sex::Female) if canonical_name == "hdl_cholesterol" => value * 1.1,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_adjustment_only_applies_past_65_to_named_biomarkers() {
        assert_eq!(apply_age_adjustment("glucose", 100.0, Some(70)), 110.0);
        assert_eq!(apply_age_adjustment("glucose", 100.0, Some(60)), 100.0);
        assert_eq!(apply_age_adjustment("hba1c", 5.0, Some(70)), 5.0);
    }

    #[test]
    fn sex_adjustment_only_applies_to_female() {
        assert_eq!(apply_sex_adjustment("hemoglobin", 14.0, Some(Sex::Female)), 12.6);
        assert_eq!(apply_sex_adjustment("hemoglobin", 14.0, Some(Sex::Male)), 14.0);
        assert_eq!(apply_sex_adjustment("hdl_cholesterol", 50.0, Some(Sex::Female)), 55.0);
    }
}
