//! Data-completeness assessment (SPEC_FULL.md §4.2).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitalis_model::{BiomarkerPanel, ConfidenceLevel};

use crate::requirements::SystemRequirements;

/// Per-system and overall completeness of a biomarker panel against a
/// requirement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessResult {
    /// Coverage percentage (`[0, 1]`) per health system, keyed by system name.
    pub per_system_coverage: BTreeMap<String, f64>,
    /// Weighted overall completeness score in `[0, 1]`.
    pub overall_score: f64,
    /// Missing critical biomarkers, grouped by system name.
    pub missing_critical: BTreeMap<String, Vec<String>>,
    /// Missing optional biomarkers, grouped by system name.
    pub missing_optional: BTreeMap<String, Vec<String>>,
    /// Derived confidence in the completeness assessment itself.
    pub confidence_level: ConfidenceLevel,
    /// Whether the panel, completeness-wise alone, is ready for analysis.
    pub analysis_ready: bool,
}

/// Assesses a panel's completeness against `requirements`.
///
/// Per-system completeness = `(present_critical + 0.5 * present_optional) /
/// (total_critical + 0.5 * total_optional)`, clamped to `[0, 1]`; a system
/// with no requirements at all is reported at `1.0` coverage (fully assessed
/// trivially) and excluded from missing lists.
pub fn assess_completeness(
    panel: &BiomarkerPanel,
    requirements: &[SystemRequirements],
) -> CompletenessResult {
    let mut per_system_coverage = BTreeMap::new();
    let mut missing_critical = BTreeMap::new();
    let mut missing_optional = BTreeMap::new();
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut any_critical_missing = false;

    for req in requirements {
        let system_name = req.system.name().to_string();
        let total_critical = req.critical.len() as f64;
        let total_optional = req.optional.len() as f64;
        let denom = total_critical + 0.5 * total_optional;

        let present_critical: Vec<String> = req
            .critical
            .iter()
            .filter(|b| panel.biomarkers().contains_key(**b))
            .map(|b| (*b).to_string())
            .collect();
        let present_optional: Vec<String> = req
            .optional
            .iter()
            .filter(|b| panel.biomarkers().contains_key(**b))
            .map(|b| (*b).to_string())
            .collect();

        let coverage = if denom > 0.0 {
            ((present_critical.len() as f64) + 0.5 * (present_optional.len() as f64)) / denom
        } else {
            1.0
        }
        .clamp(0.0, 1.0);

        debug!(system = %system_name, coverage, "system completeness computed");
        let _ = per_system_coverage.insert(system_name.clone(), coverage);

        let missing_crit: Vec<String> = req
            .critical
            .iter()
            .filter(|b| !panel.biomarkers().contains_key(**b))
            .map(|b| (*b).to_string())
            .collect();
        let missing_opt: Vec<String> = req
            .optional
            .iter()
            .filter(|b| !panel.biomarkers().contains_key(**b))
            .map(|b| (*b).to_string())
            .collect();

        if !missing_crit.is_empty() && req.weight > 0.0 {
            any_critical_missing = true;
        }
        if !missing_crit.is_empty() {
            let _ = missing_critical.insert(system_name.clone(), missing_crit);
        }
        if !missing_opt.is_empty() {
            let _ = missing_optional.insert(system_name.clone(), missing_opt);
        }

        weighted_sum += coverage * req.weight;
        weight_total += req.weight;
    }

    let overall_score = if weight_total > 0.0 {
        (weighted_sum / weight_total).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let confidence_level = if !any_critical_missing && overall_score >= 0.8 {
        ConfidenceLevel::High
    } else if overall_score >= 0.5 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    let analysis_ready = !any_critical_missing && overall_score >= 0.5;

    CompletenessResult {
        per_system_coverage,
        overall_score,
        missing_critical,
        missing_optional,
        confidence_level,
        analysis_ready,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap as Map;
    use vitalis_model::BiomarkerValue;

    #[test]
    fn empty_panel_is_not_ready() {
        let requirements = crate::requirements::default_requirements();
        let panel = BiomarkerPanel::empty();
        let result = assess_completeness(&panel, &requirements);
        assert!(!result.analysis_ready);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert!(!result.missing_critical.is_empty());
    }

    #[test]
    fn full_panel_is_ready_and_high_confidence() {
        let requirements = crate::requirements::default_requirements();
        let mut map = Map::new();
        for req in &requirements {
            for b in req.critical.iter().chain(req.optional.iter()) {
                let _ = map.insert((*b).to_string(), BiomarkerValue::numeric(*b, 1.0));
            }
        }
        let panel = BiomarkerPanel::from_canonical_map(map);
        let result = assess_completeness(&panel, &requirements);
        assert!(result.analysis_ready);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert!(result.missing_critical.is_empty());
        assert!((result.overall_score - 1.0).abs() < 1e-9);
    }
}
