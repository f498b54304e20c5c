//! `fatigue_root_cause`: classifies up to five candidate root causes of
//! fatigue (SPEC_FULL.md §4.5).

use std::collections::BTreeMap;

use vitalis_model::{BiomarkerPanel, InsightData, InsightOutcome};

use crate::common::confidence_with_bonus;
use crate::module::{InsightModule, Subject};

const VERSION: &str = "1.0.0";
const REQUIRED: &[&str] = &["hemoglobin", "tsh"];
const OPTIONAL: &[&str] = &["ferritin", "ft4", "ft3", "b12", "folate", "crp", "cortisol"];

/// Classifies candidate fatigue root causes: iron deficiency, hypo/hyper-
/// thyroidism, vitamin deficiency, inflammatory fatigue, adrenal
/// insufficiency/hypercortisolism.
pub struct FatigueRootCause;

fn hemoglobin_threshold(sex: Option<vitalis_model::Sex>) -> f64 {
    match sex {
        Some(Sex::Female) => 12.0,
        _ => 13.5,
    }
}

impl InsightModule for FatigueRootCause {
    fn insight_id(&self) -> &'static str {
        "fatigue_root_cause"
    }

    fn version(&self) -> &'static str {
        VERSION
    }

    fn required_biomarkers(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn optional_biomarkers(&self) -> &'static [&'static str] {
        OPTIONAL
    }

    fn analyze(&self, panel: &BiomarkerPanel, subject: Subject) -> InsightOutcome {
        let hemoglobin = panel.numeric("hemoglobin").unwrap_or(0.0);
        let tsh = panel.numeric("tsh").unwrap_or(0.0);

        let mut causes = Vec::new();

        let low_ferritin = panel.numeric("ferritin").is_some_and(|f| f < 30.0);
        if hemoglobin < hemoglobin_threshold(subject.sex) || low_ferritin {
            causes.push("iron_deficiency".to_string());
        }

        if tsh > 4.0 {
            causes.push("hypothyroidism".to_string());
        } else if tsh < 0.4 {
            causes.push("hyperthyroidism".to_string());
        }

        let low_b12 = panel.numeric("b12").is_some_and(|v| v < 200.0);
        let low_folate = panel.numeric("folate").is_some_and(|v| v < 3.0);
        if low_b12 || low_folate {
            causes.push("vitamin_deficiency".to_string());
        }

        if panel.numeric("crp").is_some_and(|v| v > 3.0) {
            causes.push("inflammatory_fatigue".to_string());
        }

        if let Some(cortisol) = panel.numeric("cortisol") {
            if cortisol < 5.0 {
                causes.push("adrenal_insufficiency".to_string());
            } else if cortisol > 25.0 {
                causes.push("hypercortisolism".to_string());
            }
        }

        let severity = match causes.len() {
            0 => vitalis_model::Severity::Normal,
            1 => vitalis_model::Severity::Moderate,
            2 => vitalis_model::Severity::High,
            _ => vitalis_model::Severity::Critical,
        };

        let optional_present = OPTIONAL.iter().filter(|b| panel.numeric(b).is_some()).count();
        let confidence = confidence_with_bonus(0.6, optional_present);

        let mut drivers = BTreeMap::new();
        let _ = drivers.insert("hemoglobin".to_string(), (hemoglobin * 10.0).round() / 10.0);
        let _ = drivers.insert("tsh".to_string(), (tsh * 100.0).round() / 100.0);
        let _ = drivers.insert("root_cause_count".to_string(), causes.len() as f64);

        let recommendations = causes
            .iter()
            .map(|cause| format!("Investigate '{cause}' as a contributing fatigue root cause."))
            .collect();

        InsightOutcome::Success(InsightData {
            insight_id: self.insight_id().to_string(),
            version: VERSION.to_string(),
            biomarkers_involved: REQUIRED
                .iter()
                .chain(OPTIONAL.iter())
                .filter(|b| panel.numeric(b).is_some())
                .map(|b| (*b).to_string())
                .collect(),
            drivers,
            evidence: causes.into_iter().map(|c| (c, vitalis_model::EvidenceValue::Flag(true))).collect(),
            severity,
            confidence,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_model::{BiomarkerValue, Sex};

    fn panel(values: &[(&str, f64)]) -> BiomarkerPanel {
        let mut map = BTreeMap::new();
        for (name, v) in values {
            let _ = map.insert((*name).to_string(), BiomarkerValue::numeric(*name, *v));
        }
        BiomarkerPanel::from_canonical_map(map)
    }

    #[test]
    fn zero_causes_is_normal_not_mild() {
        let panel = panel(&[("hemoglobin", 15.0), ("tsh", 2.0)]);
        let outcome = FatigueRootCause.analyze(&panel, Subject { age: None, sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => assert_eq!(data.severity, vitalis_model::Severity::Normal),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn three_or_more_causes_is_critical() {
        let panel = panel(&[
            ("hemoglobin", 10.0),
            ("tsh", 6.0),
            ("b12", 150.0),
            ("crp", 5.0),
        ]);
        let outcome = FatigueRootCause.analyze(&panel, Subject { age: None, sex: Some(Sex::Female), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => assert_eq!(data.severity, vitalis_model::Severity::Critical),
            other => panic!("expected success, got {other:?}"),
        }
    }
}
