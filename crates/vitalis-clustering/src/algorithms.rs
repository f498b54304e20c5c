//! The three clustering algorithms (SPEC_FULL.md §4.4).

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};
use vitalis_model::{BiomarkerCluster, HealthSystem, Severity};

use crate::rules::{default_clustering_rules, ScoreMap};

fn avg_score(members: &[String], scores: &ScoreMap) -> f64 {
    let values: Vec<f64> = members.iter().filter_map(|m| scores.get(m).copied()).collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn severity_from_avg_score(avg: f64) -> Severity {
    if avg < 30.0 {
        Severity::Critical
    } else if avg < 50.0 {
        Severity::High
    } else if avg < 70.0 {
        Severity::Moderate
    } else if avg < 85.0 {
        Severity::Mild
    } else {
        Severity::Normal
    }
}

fn confidence_from_members(members: &[String], scores: &ScoreMap) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let values: Vec<f64> = members.iter().filter_map(|m| scores.get(m).copied()).collect();
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let coherence = (1.0 - variance / 2500.0).clamp(0.0, 1.0);
    (coherence + (0.05 * values.len() as f64).min(0.2)).clamp(0.0, 1.0)
}

/// Applies [`default_clustering_rules`] in priority order against `panel` and
/// `scores`, enforcing the disjoint-consumption constraint, then runs the
/// overlapping-cluster merge pass.
pub fn rule_based_clusters(panel_biomarkers: &BTreeSet<String>, scores: &ScoreMap) -> Vec<BiomarkerCluster> {
    let rules = default_clustering_rules();
    let mut consumed: HashSet<String> = HashSet::new();
    let mut fired = Vec::new();

    for rule in &rules {
        let matched_required: Vec<String> = rule
            .required
            .iter()
            .filter(|b| {
                panel_biomarkers.contains(*b)
                    && !consumed.contains(*b)
                    && rule
                        .threshold_for(b)
                        .map(|(min, max)| scores.get(*b).is_some_and(|s| *s >= min && *s <= max))
                        .unwrap_or(true)
            })
            .map(|b| (*b).to_string())
            .collect();

        if matched_required.len() < rule.min_cluster_size {
            trace!(rule = rule.cluster_id, "rule did not meet minimum cluster size");
            continue;
        }

        let matched_optional: Vec<String> = rule
            .optional
            .iter()
            .filter(|b| {
                panel_biomarkers.contains(*b)
                    && !consumed.contains(*b)
                    && rule
                        .threshold_for(b)
                        .map(|(min, max)| scores.get(*b).is_some_and(|s| *s >= min && *s <= max))
                        .unwrap_or(true)
            })
            .map(|b| (*b).to_string())
            .collect();

        let mut members: Vec<String> = matched_required.into_iter().chain(matched_optional).collect();
        members.sort();
        members.dedup();

        for m in &members {
            let _ = consumed.insert(m.clone());
        }

        let avg = avg_score(&members, scores);
        debug!(rule = rule.cluster_id, members = members.len(), avg, "rule fired");

        fired.push(BiomarkerCluster {
            cluster_id: rule.cluster_id.to_string(),
            name: rule.name.to_string(),
            biomarkers: members.clone(),
            description: rule.description.to_string(),
            severity: severity_from_avg_score(avg),
            confidence: confidence_from_members(&members, scores),
        });
    }

    merge_clusters(&fired)
}

/// Merges clusters where `|intersection| > 0.5 * min(|A|, |B|)`; merged
/// severity is the max of the two; confidence is the min; biomarker list is
/// the union; id is a `blake3` hash of the sorted union, domain-tagged.
pub fn merge_clusters(clusters: &[BiomarkerCluster]) -> Vec<BiomarkerCluster> {
    let mut result: Vec<BiomarkerCluster> = clusters.to_vec();
    let mut merged_any = true;

    while merged_any {
        merged_any = false;
        'outer: for i in 0..result.len() {
            for j in (i + 1)..result.len() {
                let a: BTreeSet<&String> = result[i].biomarkers.iter().collect();
                let b: BTreeSet<&String> = result[j].biomarkers.iter().collect();
                let intersection = a.intersection(&b).count();
                let threshold = a.len().min(b.len());
                if intersection > 0 && intersection * 2 > threshold * 2 {
                    let merged = merge_two(&result[i], &result[j]);
                    let mut next: Vec<BiomarkerCluster> = result
                        .iter()
                        .enumerate()
                        .filter(|(idx, _)| *idx != i && *idx != j)
                        .map(|(_, c)| c.clone())
                        .collect();
                    next.push(merged);
                    result = next;
                    merged_any = true;
                    break 'outer;
                }
            }
        }
    }

    result
}

fn merge_two(a: &BiomarkerCluster, b: &BiomarkerCluster) -> BiomarkerCluster {
    let mut biomarkers: BTreeSet<String> = a.biomarkers.iter().cloned().collect();
    biomarkers.extend(b.biomarkers.iter().cloned());
    let biomarkers: Vec<String> = biomarkers.into_iter().collect();

    let mut hasher = blake3::Hasher::new();
    hasher.update(b"merged:");
    for name in &biomarkers {
        hasher.update(name.as_bytes());
        hasher.update(b",");
    }
    let digest = hasher.finalize();
    let cluster_id = format!("merged-{}", hex::encode(&digest.as_bytes()[..8]));

    BiomarkerCluster {
        cluster_id,
        name: "Merged Health Pattern".to_string(),
        biomarkers,
        description: format!("Merged from '{}' and '{}'.", a.name, b.name),
        severity: a.severity.max(b.severity),
        confidence: a.confidence.min(b.confidence),
    }
}

/// `"{system}_{n}_biomarkers"` cluster per health system with ≥ 2 scored
/// biomarkers present in `system_biomarkers`.
pub fn health_system_grouping_clusters(
    system_biomarkers: &[(HealthSystem, Vec<String>)],
    scores: &ScoreMap,
) -> Vec<BiomarkerCluster> {
    let mut clusters = Vec::new();
    for (system, members) in system_biomarkers {
        if members.len() < 2 {
            continue;
        }
        let mut sorted_members = members.clone();
        sorted_members.sort();
        let avg = avg_score(&sorted_members, scores);
        clusters.push(BiomarkerCluster {
            cluster_id: format!("{}_{}_biomarkers", system.name(), sorted_members.len()),
            name: format!("{} Health Pattern", system.title()),
            biomarkers: sorted_members.clone(),
            description: format!("All scored biomarkers within the {} system.", system.title()),
            severity: severity_from_avg_score(avg),
            confidence: confidence_from_members(&sorted_members, scores),
        });
    }
    clusters
}

/// Hard-coded health-system → biomarker mapping used by the
/// weighted-correlation algorithm. `white_blood_cells` is the normalized name
/// used throughout (DESIGN.md, Open Question 7 — the source's `wbc` alias is
/// never used here).
pub fn weighted_correlation_groups() -> Vec<(HealthSystem, Vec<&'static str>)> {
    vec![
        (HealthSystem::Metabolic, vec!["glucose", "hba1c", "insulin", "bmi"]),
        (
            HealthSystem::Cardiovascular,
            vec!["total_cholesterol", "ldl_cholesterol", "hdl_cholesterol", "triglycerides"],
        ),
        (HealthSystem::Inflammatory, vec!["crp", "neutrophils", "lymphocytes", "ferritin"]),
        (HealthSystem::Kidney, vec!["creatinine", "egfr", "bun"]),
        (HealthSystem::Liver, vec!["alt", "ast", "ggt", "alp"]),
        (HealthSystem::Cbc, vec!["hemoglobin", "hematocrit", "white_blood_cells", "platelets"]),
        (HealthSystem::Hormonal, vec!["tsh", "ft4", "ft3", "cortisol"]),
        (HealthSystem::Nutritional, vec!["b12", "folate", "transferrin_saturation"]),
    ]
}

/// Groups biomarkers by [`weighted_correlation_groups`], emitting one cluster
/// per group with ≥ 2 present biomarkers. Engine weights influence which
/// groups are considered but never per-cluster scoring (SPEC_FULL.md §4.4).
pub fn weighted_correlation_clusters(
    panel_biomarkers: &BTreeSet<String>,
    scores: &ScoreMap,
    engine_weights: &crate::weights::ClinicalWeightProfile,
) -> Vec<BiomarkerCluster> {
    let mut clusters = Vec::new();
    for (system, candidates) in weighted_correlation_groups() {
        if engine_weights.weight_for(system) <= 0.0 {
            continue;
        }
        let present: Vec<String> = candidates
            .iter()
            .filter(|b| panel_biomarkers.contains(*b))
            .map(|b| (*b).to_string())
            .collect();
        if present.len() < 2 {
            continue;
        }
        let avg = avg_score(&present, scores);
        clusters.push(BiomarkerCluster {
            cluster_id: format!("weighted_{}", system.name()),
            name: format!("{} Correlation Pattern", system.title()),
            biomarkers: present.clone(),
            description: format!("Weighted-correlation grouping for the {} system.", system.title()),
            severity: severity_from_avg_score(avg),
            confidence: confidence_from_members(&present, scores),
        });
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn scenario_f_merge() {
        let cluster_a = BiomarkerCluster {
            cluster_id: "rule_one".to_string(),
            name: "Rule One".to_string(),
            biomarkers: vec!["glucose".to_string(), "hba1c".to_string(), "insulin".to_string()],
            description: String::new(),
            severity: Severity::Moderate,
            confidence: 0.8,
        };
        let cluster_b = BiomarkerCluster {
            cluster_id: "rule_two".to_string(),
            name: "Rule Two".to_string(),
            biomarkers: vec!["glucose".to_string(), "hba1c".to_string(), "total_cholesterol".to_string()],
            description: String::new(),
            severity: Severity::High,
            confidence: 0.7,
        };
        let merged = merge_clusters(&[cluster_a, cluster_b]);
        assert_eq!(merged.len(), 1);
        let mut biomarkers = merged[0].biomarkers.clone();
        biomarkers.sort();
        assert_eq!(
            biomarkers,
            vec!["glucose".to_string(), "hba1c".to_string(), "insulin".to_string(), "total_cholesterol".to_string()]
        );
        assert_eq!(merged[0].severity, Severity::High);
        assert!((merged[0].confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn exact_half_overlap_does_not_merge() {
        let cluster_a = BiomarkerCluster {
            cluster_id: "a".to_string(),
            name: "A".to_string(),
            biomarkers: vec!["x".to_string(), "y".to_string()],
            description: String::new(),
            severity: Severity::Mild,
            confidence: 0.9,
        };
        let cluster_b = BiomarkerCluster {
            cluster_id: "b".to_string(),
            name: "B".to_string(),
            biomarkers: vec!["y".to_string(), "z".to_string()],
            description: String::new(),
            severity: Severity::Mild,
            confidence: 0.9,
        };
        let merged = merge_clusters(&[cluster_a, cluster_b]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn health_system_grouping_requires_two_members() {
        let scores: BTreeMap<String, f64> = [("glucose".to_string(), 90.0), ("hba1c".to_string(), 90.0)]
            .into_iter()
            .collect();
        let systems = vec![(HealthSystem::Metabolic, vec!["glucose".to_string(), "hba1c".to_string()])];
        let clusters = health_system_grouping_clusters(&systems, &scores);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].cluster_id, "metabolic_2_biomarkers");
    }
}
