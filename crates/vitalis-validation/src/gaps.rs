//! Gap analysis and analysis-blocker detection (SPEC_FULL.md §4.2).
//!
//! Grounded on `backend/core/validation/gaps.py`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitalis_model::{BiomarkerPanel, GapSeverity};

use crate::completeness::CompletenessResult;
use crate::requirements::SystemRequirements;

/// A single missing-biomarker gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// The health system the gap belongs to.
    pub system: String,
    /// The missing biomarker's canonical name.
    pub biomarker: String,
    /// Gap severity.
    pub severity: GapSeverity,
}

/// Full gap analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysisResult {
    /// All gaps, sorted by descending severity then by system/biomarker name.
    pub gaps: Vec<Gap>,
    /// Human-readable descriptions of conditions blocking analysis.
    pub analysis_blockers: Vec<String>,
    /// Unified readiness: `analysis_blockers.is_empty() && completeness.analysis_ready`
    /// (DESIGN.md, Open Question 3).
    pub analysis_ready: bool,
}

/// Runs gap analysis given a panel, the same requirement table used for
/// completeness, and the already-computed [`CompletenessResult`].
pub fn analyze_gaps(
    panel: &BiomarkerPanel,
    requirements: &[SystemRequirements],
    completeness: &CompletenessResult,
) -> GapAnalysisResult {
    let mut gaps = Vec::new();

    for req in requirements {
        let system_name = req.system.name().to_string();
        for biomarker in &req.critical {
            if !panel.biomarkers().contains_key(*biomarker) {
                let severity = if req.weight > 0.0 {
                    GapSeverity::Critical
                } else {
                    GapSeverity::High
                };
                gaps.push(Gap {
                    system: system_name.clone(),
                    biomarker: (*biomarker).to_string(),
                    severity,
                });
            }
        }
        for biomarker in &req.optional {
            if !panel.biomarkers().contains_key(*biomarker) {
                gaps.push(Gap {
                    system: system_name.clone(),
                    biomarker: (*biomarker).to_string(),
                    severity: GapSeverity::Medium,
                });
            }
        }
    }

    gaps.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.system.cmp(&b.system))
            .then_with(|| a.biomarker.cmp(&b.biomarker))
    });

    let weighted_systems: Vec<&SystemRequirements> =
        requirements.iter().filter(|r| r.weight > 0.0).collect();

    let mut analysis_blockers = Vec::new();

    let zero_coverage_weighted_with_critical: Vec<&SystemRequirements> = weighted_systems
        .iter()
        .filter(|r| {
            !r.critical.is_empty()
                && completeness
                    .per_system_coverage
                    .get(r.system.name())
                    .copied()
                    .unwrap_or(0.0)
                    == 0.0
        })
        .copied()
        .collect();
    for req in &zero_coverage_weighted_with_critical {
        analysis_blockers.push(format!(
            "{} has zero present biomarkers and at least one critical requirement",
            req.system.title()
        ));
    }

    if completeness.overall_score < 0.3 {
        analysis_blockers.push(format!(
            "overall completeness score {:.2} is below the 0.3 minimum",
            completeness.overall_score
        ));
    }

    let zero_coverage_weighted_count = weighted_systems
        .iter()
        .filter(|r| {
            completeness
                .per_system_coverage
                .get(r.system.name())
                .copied()
                .unwrap_or(0.0)
                == 0.0
        })
        .count();
    if !weighted_systems.is_empty() && zero_coverage_weighted_count * 2 > weighted_systems.len() {
        analysis_blockers.push(format!(
            "{} of {} weighted health systems report zero coverage",
            zero_coverage_weighted_count,
            weighted_systems.len()
        ));
    }

    debug!(blockers = analysis_blockers.len(), gaps = gaps.len(), "gap analysis complete");

    let analysis_ready = analysis_blockers.is_empty() && completeness.analysis_ready;

    GapAnalysisResult {
        gaps,
        analysis_blockers,
        analysis_ready,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completeness::assess_completeness;

    #[test]
    fn empty_panel_produces_blockers() {
        let requirements = crate::requirements::default_requirements();
        let panel = BiomarkerPanel::empty();
        let completeness = assess_completeness(&panel, &requirements);
        let result = analyze_gaps(&panel, &requirements, &completeness);
        assert!(!result.analysis_blockers.is_empty());
        assert!(!result.analysis_ready);
    }

    #[test]
    fn gaps_sorted_by_descending_severity() {
        let requirements = crate::requirements::default_requirements();
        let panel = BiomarkerPanel::empty();
        let completeness = assess_completeness(&panel, &requirements);
        let result = analyze_gaps(&panel, &requirements, &completeness);
        for pair in result.gaps.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }
}
