//! The seven-step orchestration pipeline (SPEC_FULL.md §4.6).

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use vitalis_clustering::{profile_by_name, run_clustering};
use vitalis_insights::{default_modules, run_all, Subject};
use vitalis_model::{AnalysisResult, ClusteringAlgorithm, HealthSystem, RESULT_VERSION, UserProfile};
use vitalis_normalize::{assert_canonical_only, normalize_biomarkers, ResolverSnapshot};
use vitalis_scoring::{run_scoring, tables::default_health_system_rules};
use vitalis_validation::{analyze_gaps, assess_completeness, build_recommendations, default_requirements};

use crate::error::OrchestratorError;
use crate::questionnaire::map_questionnaire;

/// Configuration supplied at analysis entry (SPEC_FULL.md §5 — never read
/// from globals).
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// When `false`, every input biomarker key must already be canonical or
    /// the pipeline fails before normalization runs.
    pub assume_canonical: bool,
    /// Which clustering algorithm this analysis should use.
    pub clustering_algorithm: ClusteringAlgorithm,
    /// Named clinical weight profile, resolved via
    /// [`vitalis_clustering::profile_by_name`].
    pub clinical_weight_profile: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            assume_canonical: false,
            clustering_algorithm: ClusteringAlgorithm::RuleBased,
            clinical_weight_profile: "comprehensive_health".to_string(),
        }
    }
}

/// Raw input to a single analysis (SPEC_FULL.md §6's orchestrator input
/// contract, with the biomarker map simplified to numeric-only values — the
/// shape every crate downstream of normalization actually consumes).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Unique analysis identifier, echoed in the result.
    pub analysis_id: String,
    /// Raw biomarker map, keyed by canonical name or alias.
    pub biomarkers: BTreeMap<String, f64>,
    /// Subject demographics.
    pub user: UserProfile,
    /// Raw questionnaire responses, if a questionnaire was submitted.
    pub questionnaire: Option<BTreeMap<String, String>>,
}

/// Runs the full seven-step pipeline and returns an immutable
/// [`AnalysisResult`]. `created_at` is supplied by the caller rather than
/// read from the wall clock here, preserving the purely-functional
/// determinism guarantee of SPEC_FULL.md §5.
pub fn run_analysis(
    snapshot: &ResolverSnapshot,
    request: &AnalysisRequest,
    config: &OrchestratorConfig,
    created_at: &str,
) -> Result<AnalysisResult, OrchestratorError> {
    if snapshot.canonical_biomarkers().is_empty() {
        return Err(OrchestratorError::SsotUnavailable);
    }

    // Step 1: strict-mode canonical-key enforcement.
    if !config.assume_canonical {
        assert_canonical_only(snapshot, &request.biomarkers).map_err(|err| match err {
            vitalis_normalize::NormalizeError::NonCanonicalKeys(offenders) => {
                OrchestratorError::NonCanonicalInput(offenders)
            }
            other => OrchestratorError::Normalization(other),
        })?;
    }

    // Step 2: normalize to a BiomarkerPanel.
    let (panel, unmapped) = normalize_biomarkers(snapshot, &request.biomarkers)?;
    if !unmapped.is_empty() {
        warn!(?unmapped, "input contained keys not recognized by the SSOT");
    }

    // Step 3: questionnaire mapping, demographics merge, non-fatal warnings.
    // Medical history is collected by the mapper but has no consumer in this
    // pipeline today (no insight module or scoring rule reads it); it is
    // parsed and validated here regardless so a future module can be wired to
    // it without touching the questionnaire contract.
    let mut user = request.user.clone();
    let mut lifestyle_profile = None;
    if let Some(responses) = &request.questionnaire {
        let outcome = map_questionnaire(responses);
        if let Some(age) = outcome.demographics.age {
            user.age = Some(age);
        }
        if let Some(sex) = outcome.demographics.sex {
            user.sex = Some(sex);
        }
        if let Some(height) = outcome.demographics.height_cm {
            user.height_cm = Some(height);
        }
        lifestyle_profile = outcome.lifestyle;
        debug!(
            conditions = outcome.medical_history.conditions.len(),
            "questionnaire medical history parsed"
        );
        for warning in &outcome.warnings {
            warn!(%warning, "questionnaire validation warning");
        }
    }

    // Completeness/gap analysis gates nothing in this crate (the orchestrator
    // scores and synthesizes insights from whatever the panel actually
    // contains), but is still run on every analysis so its warnings reach the
    // log the same way the source orchestrator always computed them.
    let requirements = default_requirements();
    let completeness = assess_completeness(&panel, &requirements);
    let gaps = analyze_gaps(&panel, &requirements, &completeness);
    let recommendation_set = build_recommendations(&gaps, completeness.overall_score * 100.0);
    if !gaps.analysis_ready {
        warn!(
            blockers = ?gaps.analysis_blockers,
            "panel is not analysis-ready by completeness/gap standards"
        );
    }
    debug!(
        recommendations = recommendation_set.recommendations.len(),
        "data-completeness recommendations generated"
    );

    // Step 4: scoring.
    let rule_tables = default_health_system_rules();
    let scoring_result = run_scoring(
        &rule_tables,
        &panel,
        user.age,
        user.sex,
        lifestyle_profile.as_ref(),
    )?;

    // Step 5: clustering.
    let panel_biomarkers: BTreeSet<String> = panel.biomarkers().keys().cloned().collect();
    let flat_scores: BTreeMap<String, f64> = scoring_result
        .flatten_biomarker_scores()
        .into_iter()
        .map(|(name, score)| (name, score.score))
        .collect();
    let system_biomarkers: Vec<(HealthSystem, Vec<String>)> = HealthSystem::ALL
        .iter()
        .filter_map(|system| {
            let system_score = scoring_result.health_system_scores.get(system.name())?;
            let names: Vec<String> = system_score
                .biomarker_scores
                .iter()
                .map(|s| s.name.clone())
                .collect();
            if names.is_empty() {
                None
            } else {
                Some((*system, names))
            }
        })
        .collect();
    let weight_profile = profile_by_name(&config.clinical_weight_profile);
    let clustering_result = run_clustering(
        config.clustering_algorithm,
        &panel_biomarkers,
        &flat_scores,
        &system_biomarkers,
        &weight_profile,
    );
    debug!(
        clusters = clustering_result.clusters.len(),
        valid = clustering_result.validation.is_valid,
        "clustering step complete"
    );

    // Step 6: insight modules.
    let subject = Subject {
        age: user.age,
        sex: user.sex,
        height_cm: user.height_cm,
    };
    let insights = run_all(&default_modules(), &panel, subject);

    // Step 7: emit the immutable result.
    let biomarkers: Vec<_> = scoring_result.flatten_biomarker_scores().into_values().collect();
    let result = AnalysisResult {
        analysis_id: request.analysis_id.clone(),
        biomarkers,
        clusters: clustering_result.clusters,
        insights,
        overall_score: scoring_result.overall_score,
        created_at: created_at.to_string(),
        result_version: RESULT_VERSION.to_string(),
    };

    info!(
        analysis_id = %result.analysis_id,
        overall_score = result.overall_score,
        "analysis complete"
    );

    Ok(result)
}
