//! `metabolic_age`: HOMA-IR-driven estimate of metabolic age (SPEC_FULL.md
//! §4.5).

use std::collections::BTreeMap;

use vitalis_model::{BiomarkerPanel, InsightData, InsightOutcome};

use crate::common::confidence_with_bonus;
use crate::module::{InsightModule, Subject};

const VERSION: &str = "1.0.0";
const REQUIRED: &[&str] = &["glucose", "insulin", "hba1c", "total_cholesterol", "hdl_cholesterol"];
const OPTIONAL: &[&str] = &["triglycerides", "bmi", "waist_circumference"];

/// Estimates a subject's metabolic age from glucose-regulation and lipid
/// markers.
pub struct MetabolicAge;

/// `HOMA-IR = glucose * insulin / 405`; `0.0` (not an error) if either input
/// is absent or zero, matching the reference behavior.
fn homa_ir(glucose: f64, insulin: f64) -> f64 {
    if glucose <= 0.0 || insulin <= 0.0 {
        return 0.0;
    }
    glucose * insulin / 405.0
}

fn age_adjustment(homa: f64, hba1c: f64, tc_hdl: f64, tg_hdl: Option<f64>, bmi: Option<f64>, wthr: Option<f64>) -> f64 {
    let mut adjustment = 0.0;

    if homa > 4.0 {
        adjustment += 6.0;
    } else if homa > 2.5 {
        adjustment += 3.0;
    }

    if hba1c > 6.5 {
        adjustment += 8.0;
    } else if hba1c > 5.7 {
        adjustment += 5.0;
    } else if hba1c > 5.4 {
        adjustment += 2.0;
    }

    if tc_hdl > 4.0 {
        adjustment += 4.0;
    } else if tc_hdl > 3.5 {
        adjustment += 2.0;
    }

    if let Some(tg_hdl) = tg_hdl {
        if tg_hdl > 2.0 {
            adjustment += 3.0;
        }
    }

    if let Some(bmi) = bmi {
        if bmi > 30.0 {
            adjustment += 4.0;
        } else if bmi > 25.0 {
            adjustment += 2.0;
        }
    }

    if let Some(wthr) = wthr {
        if wthr > 0.5 {
            adjustment += 3.0;
        }
    }

    adjustment
}

impl InsightModule for MetabolicAge {
    fn insight_id(&self) -> &'static str {
        "metabolic_age"
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
        let Some(chronological_age) = subject.age else {
            return InsightOutcome::CalculationFailed {
                insight_id: self.insight_id().to_string(),
                version: VERSION.to_string(),
                detail: "chronological age is required to compute a metabolic age".to_string(),
            };
        };

        let glucose = panel.numeric("glucose").unwrap_or(0.0);
        let insulin = panel.numeric("insulin").unwrap_or(0.0);
        let hba1c = panel.numeric("hba1c").unwrap_or(0.0);
        let total_cholesterol = panel.numeric("total_cholesterol").unwrap_or(0.0);
        let hdl = panel.numeric("hdl_cholesterol").unwrap_or(0.0);

        if hdl <= 0.0 {
            return InsightOutcome::CalculationFailed {
                insight_id: self.insight_id().to_string(),
                version: VERSION.to_string(),
                detail: "hdl_cholesterol must be positive to compute a TC/HDL ratio".to_string(),
            };
        }

        let homa = homa_ir(glucose, insulin);
        let tc_hdl = total_cholesterol / hdl;
        let tg_hdl = panel.numeric("triglycerides").map(|tg| tg / hdl);
        let bmi = panel.numeric("bmi");
        let wthr = match (panel.numeric("waist_circumference"), subject.height_cm) {
            (Some(waist), Some(height)) if height > 0.0 => Some(waist / height),
            _ => None,
        };

        let adjustment = age_adjustment(homa, hba1c, tc_hdl, tg_hdl, bmi, wthr);
        let metabolic_age = (chronological_age as f64 + adjustment).max(chronological_age as f64);
        let delta = metabolic_age - chronological_age as f64;

        let severity = if delta >= 10.0 || homa > 4.0 {
            vitalis_model::Severity::Critical
        } else if delta >= 6.0 || homa > 2.5 {
            vitalis_model::Severity::High
        } else if delta >= 3.0 || hba1c > 5.7 {
            vitalis_model::Severity::Moderate
        } else if delta > 0.0 {
            vitalis_model::Severity::Mild
        } else {
            vitalis_model::Severity::Normal
        };

        let optional_present = OPTIONAL.iter().filter(|b| panel.numeric(b).is_some()).count();
        let confidence = confidence_with_bonus(0.7, optional_present);

        let mut drivers = BTreeMap::new();
        let _ = drivers.insert("homa_ir".to_string(), (homa * 100.0).round() / 100.0);
        let _ = drivers.insert("tc_hdl_ratio".to_string(), (tc_hdl * 100.0).round() / 100.0);
        let _ = drivers.insert("metabolic_age".to_string(), (metabolic_age * 10.0).round() / 10.0);
        let _ = drivers.insert("delta_years".to_string(), (delta * 10.0).round() / 10.0);

        let mut recommendations = Vec::new();
        if homa > 2.5 {
            recommendations.push("Discuss insulin resistance screening with a clinician.".to_string());
        }
        if hba1c > 5.7 {
            recommendations.push("HbA1c is in the prediabetic range; consider dietary carbohydrate review.".to_string());
        }
        if tc_hdl > 3.5 {
            recommendations.push("TC/HDL ratio is elevated; consider lipid panel follow-up.".to_string());
        }

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
            evidence: BTreeMap::new(),
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
    fn homa_ir_is_zero_when_insulin_absent() {
        assert_eq!(homa_ir(100.0, 0.0), 0.0);
    }

    #[test]
    fn scenario_a_metabolic_age_stays_at_or_below_chronological() {
        let panel = panel(&[
            ("glucose", 85.0),
            ("insulin", 6.0),
            ("hba1c", 5.0),
            ("total_cholesterol", 180.0),
            ("hdl_cholesterol", 60.0),
        ]);
        let outcome = MetabolicAge.analyze(&panel, Subject { age: Some(35), sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => {
                let metabolic_age = data.drivers["metabolic_age"];
                assert!(metabolic_age <= 35.0, "metabolic age {}", metabolic_age);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn scenario_b_metabolic_age_is_elevated() {
        let panel = panel(&[
            ("glucose", 110.0),
            ("insulin", 15.0),
            ("hba1c", 6.0),
            ("total_cholesterol", 240.0),
            ("hdl_cholesterol", 35.0),
        ]);
        let outcome = MetabolicAge.analyze(&panel, Subject { age: Some(40), sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => {
                let metabolic_age = data.drivers["metabolic_age"];
                assert!(metabolic_age >= 44.0, "metabolic age {}", metabolic_age);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn missing_age_fails_calculation_not_the_pipeline() {
        let panel = panel(&[
            ("glucose", 85.0),
            ("insulin", 6.0),
            ("hba1c", 5.0),
            ("total_cholesterol", 180.0),
            ("hdl_cholesterol", 60.0),
        ]);
        let outcome = MetabolicAge.analyze(&panel, Subject::default());
        assert!(matches!(outcome, InsightOutcome::CalculationFailed { .. }));
    }
}
