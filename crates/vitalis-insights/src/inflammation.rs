//! `inflammation`: ascending systemic inflammatory burden score
//! (SPEC_FULL.md §4.5).

use std::collections::BTreeMap;

use vitalis_model::{BiomarkerPanel, InsightData, InsightOutcome};

use crate::common::confidence_with_bonus;
use crate::module::{InsightModule, Subject};

const VERSION: &str = "1.0.0";
const REQUIRED: &[&str] = &["crp"];
const OPTIONAL: &[&str] = &["neutrophils", "lymphocytes", "ferritin", "white_blood_cells"];

/// Starts a "burden" score at 0 and adds points for CRP, NLR (neutrophil to
/// lymphocyte ratio), sex-dependent ferritin, and WBC.
pub struct Inflammation;

fn ferritin_threshold(sex: Option<vitalis_model::Sex>) -> (f64, f64) {
    match sex {
        Some(Sex::Female) => (150.0, 300.0),
        _ => (300.0, 500.0),
    }
}

impl InsightModule for Inflammation {
    fn insight_id(&self) -> &'static str {
        "inflammation"
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
        let crp = panel.numeric("crp").unwrap_or(0.0);

        let mut burden = 0.0;
        let mut flags = Vec::new();

        if crp > 10.0 {
            burden += 40.0;
            flags.push("crp_high".to_string());
        } else if crp > 3.0 {
            burden += 20.0;
            flags.push("crp_elevated".to_string());
        } else if crp > 1.0 {
            burden += 8.0;
            flags.push("crp_borderline".to_string());
        }

        let nlr = match (panel.numeric("neutrophils"), panel.numeric("lymphocytes")) {
            (Some(neutrophils), Some(lymphocytes)) if lymphocytes > 0.0 => Some(neutrophils / lymphocytes),
            _ => None,
        };
        if let Some(nlr) = nlr {
            if nlr > 3.0 {
                burden += 25.0;
                flags.push("nlr_high".to_string());
            } else if nlr > 2.0 {
                burden += 10.0;
                flags.push("nlr_elevated".to_string());
            }
        }

        if let Some(ferritin) = panel.numeric("ferritin") {
            let (elevated, high) = ferritin_threshold(subject.sex);
            if ferritin > high {
                burden += 20.0;
                flags.push("ferritin_high".to_string());
            } else if ferritin > elevated {
                burden += 10.0;
                flags.push("ferritin_elevated".to_string());
            }
        }

        if let Some(wbc) = panel.numeric("white_blood_cells") {
            if wbc > 11.0 {
                burden += 15.0;
                flags.push("wbc_high".to_string());
            } else if wbc > 9.5 {
                burden += 7.0;
                flags.push("wbc_elevated".to_string());
            }
        }

        let burden = burden.clamp(0.0, 100.0);

        let severity = if burden >= 70.0 {
            vitalis_model::Severity::Critical
        } else if burden >= 45.0 {
            vitalis_model::Severity::High
        } else if burden >= 25.0 {
            vitalis_model::Severity::Moderate
        } else if burden > 0.0 {
            vitalis_model::Severity::Mild
        } else {
            vitalis_model::Severity::Normal
        };

        let optional_present = OPTIONAL.iter().filter(|b| panel.numeric(b).is_some()).count();
        let confidence = confidence_with_bonus(0.65, optional_present);

        let mut drivers = BTreeMap::new();
        let _ = drivers.insert("crp".to_string(), (crp * 10.0).round() / 10.0);
        if let Some(nlr) = nlr {
            let _ = drivers.insert("nlr".to_string(), (nlr * 100.0).round() / 100.0);
        }
        let _ = drivers.insert("inflammation_burden_score".to_string(), (burden * 10.0).round() / 10.0);

        let recommendations = flags
            .iter()
            .map(|f| format!("Flagged '{f}'; consider a follow-up inflammatory panel."))
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
            evidence: flags.into_iter().map(|f| (f, vitalis_model::EvidenceValue::Flag(true))).collect(),
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
    fn scenario_c_high_inflammation_is_critical() {
        let panel = panel(&[("crp", 15.0), ("neutrophils", 8.0), ("lymphocytes", 1.5), ("ferritin", 450.0)]);
        let outcome = Inflammation.analyze(&panel, Subject { age: None, sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => {
                assert_eq!(data.severity, vitalis_model::Severity::Critical);
                assert!(data.drivers["inflammation_burden_score"] >= 70.0);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn nlr_is_skipped_when_lymphocytes_zero() {
        let panel = panel(&[("crp", 0.5), ("neutrophils", 8.0), ("lymphocytes", 0.0)]);
        let outcome = Inflammation.analyze(&panel, Subject::default());
        match outcome {
            InsightOutcome::Success(data) => assert!(!data.drivers.contains_key("nlr")),
            other => panic!("expected success, got {other:?}"),
        }
    }
}
