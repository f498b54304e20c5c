//! Cluster validator (SPEC_FULL.md §4.4).

use std::collections::BTreeMap;

use vitalis_model::{BiomarkerCluster, ClusterQuality, IssueLevel, ValidationIssue, ValidationSummary};

use crate::rules::ScoreMap;

fn optimal_cluster_count(panel_size: usize) -> usize {
    ((panel_size as f64).sqrt().round() as usize).clamp(2, 8)
}

fn cluster_coherence(cluster: &BiomarkerCluster, scores: &ScoreMap) -> f64 {
    let values: Vec<f64> = cluster.biomarkers.iter().filter_map(|b| scores.get(b).copied()).collect();
    if values.len() < 2 {
        return 1.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    (1.0 - variance / 2500.0).clamp(0.0, 1.0)
}

fn z_scores_within_bounds(cluster: &BiomarkerCluster, scores: &ScoreMap) -> bool {
    let values: Vec<f64> = cluster.biomarkers.iter().filter_map(|b| scores.get(b).copied()).collect();
    if values.len() < 2 {
        return true;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return true;
    }
    values.iter().all(|v| ((v - mean) / std_dev).abs() <= 2.5)
}

/// Validates `clusters` against the fixed rule set, returning an aggregate
/// [`ValidationSummary`].
pub fn validate_clusters(clusters: &[BiomarkerCluster], scores: &ScoreMap, panel_size: usize) -> ValidationSummary {
    let mut issues = Vec::new();
    let mut seen_biomarkers: BTreeMap<&str, &str> = BTreeMap::new();
    let mut coherences = Vec::new();

    for cluster in clusters {
        if cluster.biomarkers.len() < 2 {
            issues.push(ValidationIssue {
                level: IssueLevel::Critical,
                message: format!("cluster '{}' has fewer than 2 biomarkers", cluster.cluster_id),
            });
        } else if cluster.biomarkers.len() > 10 {
            issues.push(ValidationIssue {
                level: IssueLevel::Warning,
                message: format!("cluster '{}' has more than 10 biomarkers", cluster.cluster_id),
            });
        }

        let coherence = cluster_coherence(cluster, scores);
        coherences.push(coherence);
        if coherence < 0.6 {
            issues.push(ValidationIssue {
                level: IssueLevel::Warning,
                message: format!("cluster '{}' has low internal coherence ({:.2})", cluster.cluster_id, coherence),
            });
        }

        if !z_scores_within_bounds(cluster, scores) {
            issues.push(ValidationIssue {
                level: IssueLevel::Warning,
                message: format!("cluster '{}' contains an outlier biomarker (z-score > 2.5)", cluster.cluster_id),
            });
        }

        for biomarker in &cluster.biomarkers {
            if let Some(other) = seen_biomarkers.insert(biomarker.as_str(), cluster.cluster_id.as_str()) {
                issues.push(ValidationIssue {
                    level: IssueLevel::Critical,
                    message: format!(
                        "biomarker '{}' appears in both '{}' and '{}'",
                        biomarker, other, cluster.cluster_id
                    ),
                });
            }
        }
    }

    let optimal_count = optimal_cluster_count(panel_size);
    let count_low = optimal_count.saturating_sub(1);
    let count_high = optimal_count + 1;
    if !(count_low..=count_high).contains(&clusters.len()) {
        issues.push(ValidationIssue {
            level: IssueLevel::Warning,
            message: format!(
                "cluster count {} falls outside the expected range [{}, {}]",
                clusters.len(),
                count_low,
                count_high
            ),
        });
    }

    let critical_count = issues.iter().filter(|i| i.level == IssueLevel::Critical).count();
    let warning_count = issues.iter().filter(|i| i.level == IssueLevel::Warning).count();
    let avg_coherence = if coherences.is_empty() {
        1.0
    } else {
        coherences.iter().sum::<f64>() / coherences.len() as f64
    };

    let quality = if critical_count > 0 {
        ClusterQuality::Invalid
    } else if avg_coherence >= 0.8 && warning_count == 0 {
        ClusterQuality::Excellent
    } else if avg_coherence >= 0.6 && warning_count <= 2 {
        ClusterQuality::Good
    } else if avg_coherence >= 0.4 {
        ClusterQuality::Fair
    } else {
        ClusterQuality::Poor
    };

    ValidationSummary {
        issues,
        quality,
        is_valid: critical_count == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_model::Severity;

    fn cluster(id: &str, members: &[&str]) -> BiomarkerCluster {
        BiomarkerCluster {
            cluster_id: id.to_string(),
            name: id.to_string(),
            biomarkers: members.iter().map(|m| (*m).to_string()).collect(),
            description: String::new(),
            severity: Severity::Mild,
            confidence: 0.9,
        }
    }

    #[test]
    fn undersized_cluster_is_critical_and_invalid() {
        let scores: ScoreMap = [("glucose".to_string(), 90.0)].into_iter().collect();
        let clusters = vec![cluster("small", &["glucose"])];
        let summary = validate_clusters(&clusters, &scores, 4);
        assert_eq!(summary.quality, ClusterQuality::Invalid);
        assert!(!summary.is_valid);
    }

    #[test]
    fn duplicate_biomarker_across_clusters_is_critical() {
        let scores: ScoreMap = [("glucose".to_string(), 90.0), ("hba1c".to_string(), 90.0), ("insulin".to_string(), 90.0)]
            .into_iter()
            .collect();
        let clusters = vec![cluster("a", &["glucose", "hba1c"]), cluster("b", &["glucose", "insulin"])];
        let summary = validate_clusters(&clusters, &scores, 4);
        assert!(!summary.is_valid);
        assert!(summary.issues.iter().any(|i| i.message.contains("appears in both")));
    }

    #[test]
    fn coherent_clusters_rate_excellent() {
        let scores: ScoreMap = [
            ("glucose".to_string(), 90.0),
            ("hba1c".to_string(), 92.0),
            ("insulin".to_string(), 88.0),
            ("total_cholesterol".to_string(), 91.0),
        ]
        .into_iter()
        .collect();
        let clusters = vec![cluster("a", &["glucose", "hba1c", "insulin", "total_cholesterol"])];
        let summary = validate_clusters(&clusters, &scores, 4);
        assert_eq!(summary.quality, ClusterQuality::Excellent);
        assert!(summary.is_valid);
    }
}
