//! `detox_filtration`: independent liver and kidney function scores
//! (SPEC_FULL.md §4.5).

use std::collections::BTreeMap;

use vitalis_model::{BiomarkerPanel, InsightData, InsightOutcome, Sex};

use crate::common::{clamp_score, confidence_with_bonus};
use crate::module::{InsightModule, Subject};

const VERSION: &str = "1.0.0";
const REQUIRED: &[&str] = &["creatinine", "alt"];
const OPTIONAL: &[&str] = &["egfr", "ast", "ggt", "bun"];

/// Computes `liver_score` and `kidney_score` independently (each starting at
/// 100, deducted by rule) plus a BUN/creatinine ratio check; the module's
/// overall severity is the worse of the two.
pub struct DetoxFiltration;

/// Simplified MDRD formula: `175 * creatinine^-1.154 * age^-0.203 * (0.742 if
/// female else 1.0)`.
fn estimate_egfr(creatinine: f64, age: f64, sex: Option<Sex>) -> f64 {
    if creatinine <= 0.0 || age <= 0.0 {
        return 0.0;
    }
    let sex_factor = if sex == Some(Sex::Female) { 0.742 } else { 1.0 };
    175.0 * creatinine.powf(-1.154) * age.powf(-0.203) * sex_factor
}

impl InsightModule for DetoxFiltration {
    fn insight_id(&self) -> &'static str {
        "detox_filtration"
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
        let creatinine = panel.numeric("creatinine").unwrap_or(0.0);
        let alt = panel.numeric("alt").unwrap_or(0.0);

        let mut liver_score: f64 = 100.0;
        let mut kidney_score: f64 = 100.0;
        let mut flags = Vec::new();

        if alt > 80.0 {
            liver_score -= 30.0;
            flags.push("alt_high".to_string());
        } else if alt > 40.0 {
            liver_score -= 15.0;
            flags.push("alt_elevated".to_string());
        }

        if let Some(ast) = panel.numeric("ast") {
            if ast > 80.0 {
                liver_score -= 25.0;
                flags.push("ast_high".to_string());
            } else if ast > 40.0 {
                liver_score -= 12.0;
                flags.push("ast_elevated".to_string());
            }
        }

        if let Some(ggt) = panel.numeric("ggt") {
            if ggt > 65.0 {
                liver_score -= 15.0;
                flags.push("ggt_high".to_string());
            } else if ggt > 40.0 {
                liver_score -= 8.0;
                flags.push("ggt_elevated".to_string());
            }
        }

        let egfr = match panel.numeric("egfr") {
            Some(direct) => direct,
            None => estimate_egfr(creatinine, subject.age.map(f64::from).unwrap_or(0.0), subject.sex),
        };

        if egfr > 0.0 {
            if egfr < 30.0 {
                kidney_score -= 50.0;
                flags.push("egfr_severely_reduced".to_string());
            } else if egfr < 60.0 {
                kidney_score -= 25.0;
                flags.push("egfr_reduced".to_string());
            } else if egfr < 90.0 {
                kidney_score -= 10.0;
                flags.push("egfr_mildly_reduced".to_string());
            }
        }

        if creatinine > 1.3 {
            kidney_score -= 15.0;
            flags.push("creatinine_elevated".to_string());
        }

        if let Some(bun) = panel.numeric("bun") {
            if creatinine > 0.0 {
                let ratio = bun / creatinine;
                if !(10.0..=20.0).contains(&ratio) {
                    kidney_score -= 10.0;
                    flags.push("bun_creatinine_ratio_abnormal".to_string());
                }
            }
        }

        let liver_score = clamp_score(liver_score);
        let kidney_score = clamp_score(kidney_score);
        let worst_score = liver_score.min(kidney_score);

        let severity = if worst_score < 30.0 {
            vitalis_model::Severity::Critical
        } else if worst_score < 50.0 {
            vitalis_model::Severity::High
        } else if worst_score < 70.0 {
            vitalis_model::Severity::Moderate
        } else if worst_score < 85.0 {
            vitalis_model::Severity::Mild
        } else {
            vitalis_model::Severity::Normal
        };

        let optional_present = OPTIONAL.iter().filter(|b| panel.numeric(b).is_some()).count() + usize::from(subject.age.is_some());
        let confidence = confidence_with_bonus(0.65, optional_present);

        let mut drivers = BTreeMap::new();
        let _ = drivers.insert("liver_score".to_string(), (liver_score * 10.0).round() / 10.0);
        let _ = drivers.insert("kidney_score".to_string(), (kidney_score * 10.0).round() / 10.0);
        let _ = drivers.insert("egfr".to_string(), (egfr * 10.0).round() / 10.0);

        let recommendations = flags
            .iter()
            .map(|f| format!("Flagged '{f}'; consider a follow-up organ function panel."))
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
    fn egfr_estimated_when_not_supplied() {
        let panel = panel(&[("creatinine", 0.9), ("alt", 20.0)]);
        let outcome = DetoxFiltration.analyze(&panel, Subject { age: Some(40), sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => assert!(data.drivers["egfr"] > 0.0),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn severely_reduced_egfr_is_critical_or_high() {
        let panel = panel(&[("creatinine", 0.9), ("alt", 20.0), ("egfr", 20.0)]);
        let outcome = DetoxFiltration.analyze(&panel, Subject { age: Some(60), sex: Some(Sex::Male), height_cm: None });
        match outcome {
            InsightOutcome::Success(data) => {
                assert!(matches!(
                    data.severity,
                    vitalis_model::Severity::Critical | vitalis_model::Severity::High
                ));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
