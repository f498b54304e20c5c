//! Top-level clustering dispatch (SPEC_FULL.md §4.4).

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::debug;
use vitalis_model::{ClusteringAlgorithm, ClusteringResult, HealthSystem};

use crate::algorithms::{health_system_grouping_clusters, rule_based_clusters, weighted_correlation_clusters};
use crate::rules::ScoreMap;
use crate::validator::validate_clusters;
use crate::weights::ClinicalWeightProfile;

/// Runs the requested algorithm end to end and validates the result.
///
/// `system_biomarkers` supplies the per-system scored biomarker lists needed
/// by [`ClusteringAlgorithm::HealthSystemGrouping`]; it is ignored by the
/// other two algorithms.
pub fn run_clustering(
    algorithm: ClusteringAlgorithm,
    panel_biomarkers: &BTreeSet<String>,
    scores: &ScoreMap,
    system_biomarkers: &[(HealthSystem, Vec<String>)],
    weight_profile: &ClinicalWeightProfile,
) -> ClusteringResult {
    let started = Instant::now();

    let clusters = match algorithm {
        ClusteringAlgorithm::RuleBased => rule_based_clusters(panel_biomarkers, scores),
        ClusteringAlgorithm::HealthSystemGrouping => health_system_grouping_clusters(system_biomarkers, scores),
        ClusteringAlgorithm::WeightedCorrelation => {
            weighted_correlation_clusters(panel_biomarkers, scores, weight_profile)
        }
    };

    let validation = validate_clusters(&clusters, scores, panel_biomarkers.len());

    let confidence_score = if clusters.is_empty() {
        0.0
    } else {
        clusters.iter().map(|c| c.confidence).sum::<f64>() / clusters.len() as f64
    };

    let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    debug!(?algorithm, clusters = clusters.len(), confidence_score, "clustering complete");

    ClusteringResult {
        clusters,
        algorithm_used: algorithm,
        confidence_score,
        validation,
        processing_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::comprehensive_health;

    #[test]
    fn rule_based_dispatch_runs_end_to_end() {
        let panel: BTreeSet<String> = ["glucose".to_string(), "hba1c".to_string()].into_iter().collect();
        let scores: ScoreMap = [("glucose".to_string(), 50.0), ("hba1c".to_string(), 50.0)].into_iter().collect();
        let result = run_clustering(ClusteringAlgorithm::RuleBased, &panel, &scores, &[], &comprehensive_health());
        assert_eq!(result.algorithm_used, ClusteringAlgorithm::RuleBased);
        assert_eq!(result.clusters.len(), 1);
    }

    #[test]
    fn empty_panel_yields_no_clusters_and_zero_confidence() {
        let panel = BTreeSet::new();
        let scores = ScoreMap::new();
        let result = run_clustering(ClusteringAlgorithm::RuleBased, &panel, &scores, &[], &comprehensive_health());
        assert!(result.clusters.is_empty());
        assert_eq!(result.confidence_score, 0.0);
    }
}
