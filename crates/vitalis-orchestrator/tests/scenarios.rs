//! End-to-end scenario tests (SPEC_FULL.md §8, Scenarios A-F).
//!
//! Each scenario exercises the orchestrator for the fields its output
//! contract actually carries (`overall_score`, `clusters`, `insights`), and
//! calls the relevant lower-level crate directly for assertions about
//! per-health-system scores or a single insight module's outcome, since
//! those are not part of the stable `AnalysisResult` JSON contract.

use std::collections::BTreeMap;

use vitalis_clustering::{profile_by_name, run_clustering};
use vitalis_insights::{HeartInsight, InsightModule, Inflammation, MetabolicAge, Subject};
use vitalis_model::{
    BiomarkerPanel, BiomarkerValue, InsightOutcome, LifestyleLevel, LifestyleProfile, Sex, Severity,
    ValueKind,
};
use vitalis_normalize::ResolverSnapshot;
use vitalis_orchestrator::{run_analysis, AnalysisRequest, OrchestratorConfig};
use vitalis_scoring::{run_scoring, tables::default_health_system_rules};

fn panel(values: &[(&str, f64)]) -> BiomarkerPanel {
    let mut map = BTreeMap::new();
    for (name, value) in values {
        let _ = map.insert(
            (*name).to_string(),
            BiomarkerValue {
                name: (*name).to_string(),
                value: ValueKind::Numeric(*value),
                unit: String::new(),
                timestamp: None,
            },
        );
    }
    BiomarkerPanel::from_canonical_map(map)
}

fn request(values: &[(&str, f64)], age: Option<u32>, sex: Option<Sex>) -> AnalysisRequest {
    let mut map = BTreeMap::new();
    for (name, value) in values {
        let _ = map.insert((*name).to_string(), *value);
    }
    AnalysisRequest {
        analysis_id: "scenario".to_string(),
        biomarkers: map,
        user: vitalis_model::UserProfile {
            user_id: "subject".to_string(),
            age,
            sex,
            height_cm: None,
            weight_kg: None,
            ethnicity: None,
        },
        questionnaire: None,
    }
}

const SCENARIO_A: &[(&str, f64)] = &[
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

#[test]
fn scenario_a_healthy_young_adult() {
    let snapshot = ResolverSnapshot::default_snapshot();
    let config = OrchestratorConfig::default();
    let req = request(SCENARIO_A, Some(35), Some(Sex::Male));
    let result = run_analysis(&snapshot, &req, &config, "2024-01-01T00:00:00Z").expect("analysis");

    assert!(result.overall_score >= 85.0, "overall_score = {}", result.overall_score);
    assert!(result.clusters.is_empty(), "clusters = {:?}", result.clusters);

    let rule_tables = default_health_system_rules();
    let panel = panel(SCENARIO_A);
    let scoring = run_scoring(&rule_tables, &panel, Some(35), Some(Sex::Male), None).expect("scoring");
    let metabolic = scoring
        .health_system_scores
        .get(vitalis_model::HealthSystem::Metabolic.name())
        .expect("metabolic system score");
    assert!(metabolic.overall_score >= 90.0, "metabolic score = {}", metabolic.overall_score);
    let inflammatory = scoring
        .health_system_scores
        .get(vitalis_model::HealthSystem::Inflammatory.name())
        .expect("inflammatory system score");
    assert!((inflammatory.overall_score - 100.0).abs() < 1e-9);

    let metabolic_age_outcome = MetabolicAge.analyze(
        &panel,
        Subject {
            age: Some(35),
            sex: Some(Sex::Male),
            height_cm: None,
        },
    );
    if let InsightOutcome::Success(data) = metabolic_age_outcome {
        let estimated = data.drivers.get("metabolic_age").copied().unwrap_or(f64::MAX);
        assert!(estimated <= 35.0, "metabolic_age = {estimated}");
    } else {
        panic!("expected a successful metabolic_age outcome: {metabolic_age_outcome:?}");
    }
}

const SCENARIO_B: &[(&str, f64)] = &[
    ("glucose", 110.0),
    ("hba1c", 6.0),
    ("insulin", 15.0),
    ("total_cholesterol", 240.0),
    ("ldl_cholesterol", 160.0),
    ("hdl_cholesterol", 35.0),
    ("triglycerides", 200.0),
    ("crp", 2.5),
];

#[test]
fn scenario_b_early_dysfunction_clusters() {
    let snapshot = ResolverSnapshot::default_snapshot();
    let config = OrchestratorConfig::default();
    let req = request(SCENARIO_B, Some(40), Some(Sex::Male));
    let result = run_analysis(&snapshot, &req, &config, "2024-01-01T00:00:00Z").expect("analysis");

    let metabolic_cluster = result
        .clusters
        .iter()
        .find(|c| c.cluster_id == "metabolic_dysfunction")
        .expect("metabolic_dysfunction cluster");
    assert!(metabolic_cluster.biomarkers.contains(&"glucose".to_string()));
    assert!(metabolic_cluster.biomarkers.contains(&"hba1c".to_string()));

    let cardiovascular_cluster = result
        .clusters
        .iter()
        .find(|c| c.cluster_id == "cardiovascular_risk")
        .expect("cardiovascular_risk cluster");
    for name in ["total_cholesterol", "ldl_cholesterol", "hdl_cholesterol"] {
        assert!(
            cardiovascular_cluster.biomarkers.contains(&name.to_string()),
            "missing {name} in cardiovascular_risk cluster"
        );
    }

    let panel = panel(SCENARIO_B);
    let outcome = MetabolicAge.analyze(
        &panel,
        Subject {
            age: Some(40),
            sex: Some(Sex::Male),
            height_cm: None,
        },
    );
    if let InsightOutcome::Success(data) = outcome {
        let estimated = data.drivers.get("metabolic_age").copied().unwrap_or(0.0);
        assert!(estimated >= 44.0, "metabolic_age = {estimated}, expected >= chronological + 4");
    } else {
        panic!("expected a successful metabolic_age outcome: {outcome:?}");
    }
}

#[test]
fn scenario_c_acute_inflammation() {
    let values = [("crp", 15.0), ("neutrophils", 8.0), ("lymphocytes", 1.5), ("ferritin", 450.0)];
    let p = panel(&values);
    let subject = Subject {
        age: None,
        sex: Some(Sex::Male),
        height_cm: None,
    };

    let inflammation_outcome = Inflammation.analyze(&p, subject);
    match inflammation_outcome {
        InsightOutcome::Success(data) => {
            assert_eq!(data.severity, Severity::Critical);
            let burden = data.drivers.get("inflammation_burden_score").copied().unwrap_or(0.0);
            assert!(burden >= 70.0, "inflammation_burden_score = {burden}");
        }
        other => panic!("expected a successful inflammation outcome: {other:?}"),
    }

    let heart_outcome = HeartInsight.analyze(&p, subject);
    let heart_severity = match &heart_outcome {
        InsightOutcome::Success(data) => Some(data.severity),
        InsightOutcome::MissingInputs { .. } | InsightOutcome::CalculationFailed { .. } => None,
    };
    assert_ne!(heart_severity, Some(Severity::Critical));
}

#[test]
fn scenario_d_strict_mode_vs_assume_canonical() {
    let snapshot = ResolverSnapshot::default_snapshot();
    let values = [("blood_sugar", 95.0)];

    let strict_config = OrchestratorConfig {
        assume_canonical: false,
        ..OrchestratorConfig::default()
    };
    let strict_req = request(&values, None, None);
    let err = run_analysis(&snapshot, &strict_req, &strict_config, "2024-01-01T00:00:00Z").unwrap_err();
    match err {
        vitalis_orchestrator::OrchestratorError::NonCanonicalInput(offenders) => {
            assert!(offenders.contains(&"blood_sugar".to_string()));
        }
        other => panic!("expected NonCanonicalInput, got {other:?}"),
    }

    let lenient_config = OrchestratorConfig {
        assume_canonical: true,
        ..OrchestratorConfig::default()
    };
    let lenient_req = request(&values, None, None);
    let result = run_analysis(&snapshot, &lenient_req, &lenient_config, "2024-01-01T00:00:00Z")
        .expect("lenient analysis");
    assert!(result.biomarkers.iter().any(|b| b.name == "glucose"));
}

#[test]
fn scenario_e_lifestyle_overlay_moves_score_both_directions() {
    let rule_tables = default_health_system_rules();
    let p = panel(SCENARIO_A);

    let excellent = LifestyleProfile {
        diet_level: LifestyleLevel::Excellent,
        sleep_hours: 8.0,
        exercise_minutes_per_week: 300,
        alcohol_units_per_week: 0,
        smoking_status: vitalis_model::SmokingStatus::Never,
        stress_level: LifestyleLevel::Excellent,
    };
    let poor = LifestyleProfile {
        diet_level: LifestyleLevel::VeryPoor,
        sleep_hours: 4.0,
        exercise_minutes_per_week: 0,
        alcohol_units_per_week: 30,
        smoking_status: vitalis_model::SmokingStatus::Current,
        stress_level: LifestyleLevel::VeryPoor,
    };

    let baseline = run_scoring(&rule_tables, &p, Some(35), Some(Sex::Male), None).expect("baseline");
    let with_excellent =
        run_scoring(&rule_tables, &p, Some(35), Some(Sex::Male), Some(&excellent)).expect("excellent");
    let with_poor = run_scoring(&rule_tables, &p, Some(35), Some(Sex::Male), Some(&poor)).expect("poor");

    assert!(with_excellent.overall_score >= baseline.overall_score);
    assert!(with_poor.overall_score <= baseline.overall_score);
    for result in [&baseline, &with_excellent, &with_poor] {
        assert!((0.0..=100.0).contains(&result.overall_score));
    }
}

#[test]
fn scenario_f_overlapping_rules_merge_into_one_cluster() {
    let panel_biomarkers: std::collections::BTreeSet<String> = [
        "glucose",
        "hba1c",
        "insulin",
        "total_cholesterol",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let scores: BTreeMap<String, f64> = [
        ("glucose", 30.0),
        ("hba1c", 30.0),
        ("insulin", 30.0),
        ("total_cholesterol", 30.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let weight_profile = profile_by_name("comprehensive_health");
    let result = run_clustering(
        vitalis_model::ClusteringAlgorithm::RuleBased,
        &panel_biomarkers,
        &scores,
        &[],
        &weight_profile,
    );

    let merged = result
        .clusters
        .iter()
        .find(|c| c.biomarkers.contains(&"glucose".to_string()) && c.biomarkers.contains(&"total_cholesterol".to_string()));
    assert!(merged.is_some(), "expected overlapping rules to merge into one cluster: {:?}", result.clusters);
}
