//! The scoring engine proper: per-biomarker, per-system, and overall
//! aggregation, plus lifestyle overlay (SPEC_FULL.md §4.3).

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, trace};
use vitalis_model::{
    BiomarkerPanel, BiomarkerRule, BiomarkerScore, ConfidenceLevel, HealthSystemRules,
    HealthSystemScore, LifestyleProfile, ScoringResult, Sex,
};

use crate::adjustments::{apply_age_adjustment, apply_sex_adjustment};
use crate::overlay::apply_overlay;

/// Errors the scoring engine can surface.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    /// The supplied rule table contained no health systems at all.
    #[error("scoring rule table is empty")]
    EmptyRuleTable,
}

/// Scores one biomarker's raw value against its rule, applying age/sex
/// adjustments first. Returns `None` if no band matches (unreachable for a
/// well-formed, range-covering rule table, but handled rather than panicking).
pub fn score_biomarker(
    rule: &BiomarkerRule,
    raw_value: f64,
    age: Option<u32>,
    sex: Option<Sex>,
) -> Option<BiomarkerScore> {
    let adjusted = apply_sex_adjustment(
        &rule.canonical_name,
        apply_age_adjustment(&rule.canonical_name, raw_value, age),
        sex,
    );

    let band = rule
        .bands_in_order()
        .into_iter()
        .find(|(_, band)| band.contains(adjusted))?;

    trace!(biomarker = %rule.canonical_name, raw_value, adjusted, score = band.0.points(), "biomarker scored");

    Some(BiomarkerScore {
        name: rule.canonical_name.clone(),
        value: adjusted,
        score: band.0.points(),
        score_range: band.0,
        confidence: ConfidenceLevel::High,
    })
}

fn system_confidence(scores: &[BiomarkerScore], min_required: usize) -> ConfidenceLevel {
    if scores.len() < min_required || scores.is_empty() {
        return ConfidenceLevel::Low;
    }
    let total = scores.len() as f64;
    let optimal_or_normal = scores
        .iter()
        .filter(|s| matches!(s.score_range, vitalis_model::ScoreRange::Optimal | vitalis_model::ScoreRange::Normal))
        .count() as f64;
    let critical = scores
        .iter()
        .filter(|s| s.score_range == vitalis_model::ScoreRange::Critical)
        .count() as f64;

    if optimal_or_normal / total >= 0.8 && critical / total < 0.2 {
        ConfidenceLevel::High
    } else if optimal_or_normal / total >= 0.5 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Scores a full health system against a panel.
pub fn score_system(
    rules: &HealthSystemRules,
    panel: &BiomarkerPanel,
    age: Option<u32>,
    sex: Option<Sex>,
) -> HealthSystemScore {
    let mut biomarker_scores = Vec::new();
    let mut missing_biomarkers = Vec::new();

    for rule in &rules.rules {
        match panel.numeric(&rule.canonical_name) {
            Some(raw) => {
                if let Some(score) = score_biomarker(rule, raw, age, sex) {
                    biomarker_scores.push(score);
                }
            }
            None => missing_biomarkers.push(rule.canonical_name.clone()),
        }
    }

    let weight_total: f64 = rules
        .rules
        .iter()
        .filter(|r| biomarker_scores.iter().any(|s| s.name == r.canonical_name))
        .map(|r| r.weight)
        .sum();

    let overall_score = if weight_total > 0.0 {
        biomarker_scores
            .iter()
            .map(|s| {
                let weight = rules
                    .rule_for(&s.name)
                    .map_or(0.0, |r| r.weight);
                s.score * weight
            })
            .sum::<f64>()
            / weight_total
    } else {
        0.0
    };

    let confidence = system_confidence(&biomarker_scores, rules.min_biomarkers_required);

    let recommendations = missing_biomarkers
        .iter()
        .map(|b| format!("Collect {} to improve {} confidence.", b, rules.system.name()))
        .collect();

    debug!(system = rules.system.name(), overall_score, missing = missing_biomarkers.len(), "system scored");

    HealthSystemScore {
        system: rules.system,
        overall_score,
        confidence,
        biomarker_scores,
        missing_biomarkers,
        recommendations,
    }
}

/// Runs the full scoring pipeline: every health system, overall aggregation,
/// and (if a profile is supplied) the lifestyle overlay.
pub fn run_scoring(
    rule_tables: &[HealthSystemRules],
    panel: &BiomarkerPanel,
    age: Option<u32>,
    sex: Option<Sex>,
    lifestyle: Option<&LifestyleProfile>,
) -> Result<ScoringResult, ScoringError> {
    if rule_tables.is_empty() {
        return Err(ScoringError::EmptyRuleTable);
    }

    let mut health_system_scores = BTreeMap::new();
    let mut missing_biomarkers = std::collections::BTreeSet::new();
    let mut recommendations = std::collections::BTreeSet::new();

    for rules in rule_tables {
        let system_score = score_system(rules, panel, age, sex);
        for m in &system_score.missing_biomarkers {
            let _ = missing_biomarkers.insert(m.clone());
        }
        for r in &system_score.recommendations {
            let _ = recommendations.insert(r.clone());
        }
        let _ = health_system_scores.insert(rules.system.name().to_string(), system_score);
    }

    let contributing: Vec<(&HealthSystemScore, f64)> = rule_tables
        .iter()
        .filter_map(|rules| {
            let score = health_system_scores.get(rules.system.name())?;
            if score.overall_score > 0.0 {
                Some((score, rules.system_weight))
            } else {
                None
            }
        })
        .collect();

    let weight_total: f64 = contributing.iter().map(|(_, w)| *w).sum();
    let pre_overlay_overall = if weight_total > 0.0 {
        contributing.iter().map(|(s, w)| s.overall_score * *w).sum::<f64>() / weight_total
    } else {
        0.0
    };

    let high_confidence_fraction = if health_system_scores.is_empty() {
        0.0
    } else {
        health_system_scores
            .values()
            .filter(|s| s.confidence == ConfidenceLevel::High)
            .count() as f64
            / health_system_scores.len() as f64
    };

    let overall_confidence = if pre_overlay_overall >= 80.0 && high_confidence_fraction >= 0.5 {
        ConfidenceLevel::High
    } else if pre_overlay_overall >= 50.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    let (overall_score, lifestyle_adjustments) = match lifestyle {
        Some(profile) => {
            let (adjusted, adjustments) = apply_overlay(pre_overlay_overall, profile);
            (
                adjusted,
                adjustments
                    .into_iter()
                    .map(|a| format!("{}: {:?} (x{:.2})", a.factor, a.level, a.multiplier))
                    .collect(),
            )
        }
        None => (pre_overlay_overall.clamp(0.0, 100.0), Vec::new()),
    };

    debug!(overall_score, ?overall_confidence, "overall scoring complete");

    Ok(ScoringResult {
        overall_score: (overall_score * 10.0).round() / 10.0,
        confidence: overall_confidence,
        health_system_scores,
        missing_biomarkers: missing_biomarkers.into_iter().collect(),
        recommendations: recommendations.into_iter().collect(),
        lifestyle_adjustments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::default_health_system_rules;
    use std::collections::BTreeMap as Map;
    use vitalis_model::BiomarkerValue;

    fn scenario_a_panel() -> BiomarkerPanel {
        let mut map = Map::new();
        let values: &[(&str, f64)] = &[
            ("glucose", 85.0),
            ("hba1c", 5.0),
            ("insulin", 6.0),
            ("total_cholesterol", 180.0),
            ("ldl_cholesterol", 90.0),
            ("hdl_cholesterol", 60.0),
            ("triglycerides", 100.0),
            ("crp", 0.5),
            ("creatinine", 0.9),
            ("alt", 25.0),
            ("hemoglobin", 14.5),
        ];
        for (name, v) in values {
            let _ = map.insert((*name).to_string(), BiomarkerValue::numeric(*name, *v));
        }
        BiomarkerPanel::from_canonical_map(map)
    }

    #[test]
    fn scenario_a_overall_and_metabolic_scores() {
        let rules = default_health_system_rules();
        let panel = scenario_a_panel();
        let result = run_scoring(&rules, &panel, Some(35), Some(Sex::Male), None).expect("scoring");
        assert!(result.overall_score >= 85.0, "overall {}", result.overall_score);
        let metabolic = result.health_system_scores.get("metabolic").expect("metabolic");
        assert!(metabolic.overall_score >= 90.0, "metabolic {}", metabolic.overall_score);
        let inflammatory = result.health_system_scores.get("inflammatory").expect("inflammatory");
        assert!((inflammatory.overall_score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn empty_panel_yields_zero_overall_and_low_confidence() {
        let rules = default_health_system_rules();
        let panel = BiomarkerPanel::empty();
        let result = run_scoring(&rules, &panel, None, None, None).expect("scoring");
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.confidence, ConfidenceLevel::Low);
        for system_score in result.health_system_scores.values() {
            assert!(!system_score.missing_biomarkers.is_empty());
        }
    }

    #[test]
    fn band_boundary_falls_into_lower_band() {
        let rules = default_health_system_rules();
        let cardio = rules.iter().find(|r| r.system.name() == "cardiovascular").expect("cardio");
        let tc_rule = cardio.rule_for("total_cholesterol").expect("tc rule");
        let score = score_biomarker(tc_rule, 180.0, None, None).expect("score");
        assert_eq!(score.score_range, vitalis_model::ScoreRange::Normal);
    }

    #[test]
    fn score_is_always_one_of_the_six_fixed_points() {
        let rules = default_health_system_rules();
        for system in &rules {
            for rule in &system.rules {
                for probe in [-1000.0, 0.0, 50.0, 500.0, 5000.0] {
                    if let Some(score) = score_biomarker(rule, probe, None, None) {
                        assert!([10.0, 30.0, 50.0, 70.0, 90.0, 100.0].contains(&score.score));
                    }
                }
            }
        }
    }
}
