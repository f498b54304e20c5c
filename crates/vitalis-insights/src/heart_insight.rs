//! `heart_insight`: lipid-ratio-driven cardiovascular risk score
//! (SPEC_FULL.md §4.5).

use std::collections::BTreeMap;

use vitalis_model::{BiomarkerPanel, InsightData, InsightOutcome};

use crate::common::{clamp_score, confidence_with_bonus, severity_from_score};
use crate::module::{InsightModule, Subject};

const VERSION: &str = "1.0.0";
const REQUIRED: &[&str] = &["total_cholesterol", "ldl_cholesterol", "hdl_cholesterol"];
const OPTIONAL: &[&str] = &["triglycerides", "apob", "crp", "systolic_bp", "diastolic_bp"];

/// Deducts penalty points from 100 for each elevated lipid ratio and,
/// when present, ApoB / CRP / blood pressure.
pub struct HeartInsight;

impl InsightModule for HeartInsight {
    fn insight_id(&self) -> &'static str {
        "heart_insight"
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

    fn analyze(&self, panel: &BiomarkerPanel, _subject: Subject) -> InsightOutcome {
        let total_cholesterol = panel.numeric("total_cholesterol").unwrap_or(0.0);
        let ldl = panel.numeric("ldl_cholesterol").unwrap_or(0.0);
        let hdl = panel.numeric("hdl_cholesterol").unwrap_or(0.0);

        if hdl <= 0.0 {
            return InsightOutcome::CalculationFailed {
                insight_id: self.insight_id().to_string(),
                version: VERSION.to_string(),
                detail: "hdl_cholesterol must be positive to compute lipid ratios".to_string(),
            };
        }

        let ldl_hdl = ldl / hdl;
        let tc_hdl = total_cholesterol / hdl;
        let tg_hdl = panel.numeric("triglycerides").map(|tg| tg / hdl);

        let mut score = 100.0;
        let mut risk_factors = Vec::new();

        if ldl_hdl > 3.5 {
            score -= 15.0;
            risk_factors.push("ldl_hdl_ratio_high".to_string());
        } else if ldl_hdl > 2.5 {
            score -= 8.0;
            risk_factors.push("ldl_hdl_ratio_borderline".to_string());
        }

        if tc_hdl > 5.0 {
            score -= 15.0;
            risk_factors.push("tc_hdl_ratio_high".to_string());
        } else if tc_hdl > 4.0 {
            score -= 8.0;
            risk_factors.push("tc_hdl_ratio_borderline".to_string());
        }

        if let Some(tg_hdl) = tg_hdl {
            if tg_hdl > 3.0 {
                score -= 12.0;
                risk_factors.push("tg_hdl_ratio_high".to_string());
            } else if tg_hdl > 2.0 {
                score -= 6.0;
                risk_factors.push("tg_hdl_ratio_borderline".to_string());
            }
        }

        if let Some(apob) = panel.numeric("apob") {
            if apob > 130.0 {
                score -= 10.0;
                risk_factors.push("apob_high".to_string());
            } else if apob > 100.0 {
                score -= 5.0;
                risk_factors.push("apob_borderline".to_string());
            }
        }

        if let Some(crp) = panel.numeric("crp") {
            if crp > 3.0 {
                score -= 10.0;
                risk_factors.push("crp_high".to_string());
            } else if crp > 1.0 {
                score -= 5.0;
                risk_factors.push("crp_borderline".to_string());
            }
        }

        let bp = match (panel.numeric("systolic_bp"), panel.numeric("diastolic_bp")) {
            (Some(systolic), Some(diastolic)) => Some((systolic, diastolic)),
            _ => None,
        };
        if let Some((systolic, diastolic)) = bp {
            if systolic >= 140.0 || diastolic >= 90.0 {
                score -= 12.0;
                risk_factors.push("blood_pressure_high".to_string());
            } else if systolic >= 130.0 || diastolic >= 85.0 {
                score -= 6.0;
                risk_factors.push("blood_pressure_elevated".to_string());
            }
        }

        let score = clamp_score(score);
        let optional_present = OPTIONAL.iter().filter(|b| panel.numeric(b).is_some()).count();
        let confidence = confidence_with_bonus(0.7, optional_present);

        let mut drivers = BTreeMap::new();
        let _ = drivers.insert("ldl_hdl_ratio".to_string(), (ldl_hdl * 100.0).round() / 100.0);
        let _ = drivers.insert("tc_hdl_ratio".to_string(), (tc_hdl * 100.0).round() / 100.0);
        if let Some(tg_hdl) = tg_hdl {
            let _ = drivers.insert("tg_hdl_ratio".to_string(), (tg_hdl * 100.0).round() / 100.0);
        }
        let _ = drivers.insert("cardiovascular_score".to_string(), (score * 10.0).round() / 10.0);

        let recommendations = risk_factors
            .iter()
            .map(|factor| format!("Discuss '{factor}' with a clinician."))
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
            evidence: risk_factors
                .into_iter()
                .map(|f| (f, vitalis_model::EvidenceValue::Flag(true)))
                .collect(),
            severity: severity_from_score(score),
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
    fn scenario_a_is_not_critical() {
        let panel = panel(&[("total_cholesterol", 180.0), ("ldl_cholesterol", 90.0), ("hdl_cholesterol", 60.0)]);
        let outcome = HeartInsight.analyze(&panel, Subject { age: Some(35), sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => assert_ne!(data.severity, vitalis_model::Severity::Critical),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn scenario_c_not_critical_without_enough_cardio_markers() {
        let panel = panel(&[("total_cholesterol", 180.0), ("ldl_cholesterol", 90.0), ("hdl_cholesterol", 60.0)]);
        let outcome = HeartInsight.analyze(&panel, Subject::default());
        match outcome {
            InsightOutcome::Success(data) => assert_ne!(data.severity, vitalis_model::Severity::Critical),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn missing_hdl_is_calculation_failure() {
        let panel = panel(&[("total_cholesterol", 180.0), ("ldl_cholesterol", 90.0), ("hdl_cholesterol", 0.0)]);
        let outcome = HeartInsight.analyze(&panel, Subject::default());
        assert!(matches!(outcome, InsightOutcome::CalculationFailed { .. }));
    }
}
