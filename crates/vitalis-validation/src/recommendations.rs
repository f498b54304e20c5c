//! Recommendation engine (SPEC_FULL.md §4.2).
//!
//! Grounded on `backend/core/validation/recommendations.py`.

use serde::{Deserialize, Serialize};
use vitalis_model::{GapSeverity, RecommendationCategory, RecommendationPriority};

use crate::gaps::{Gap, GapAnalysisResult};

/// A single actionable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommendation priority.
    pub priority: RecommendationPriority,
    /// Category this recommendation addresses.
    pub category: RecommendationCategory,
    /// Human-readable next step.
    pub next_step: String,
}

/// An ordered set of recommendations plus a single estimated-improvement
/// summary string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Recommendations ordered by descending priority.
    pub recommendations: Vec<Recommendation>,
    /// A pure function of current overall score and gap severity distribution.
    pub estimated_improvement: String,
}

/// Builds a [`RecommendationSet`] from gap analysis output and the current
/// overall completeness score.
pub fn build_recommendations(gaps: &GapAnalysisResult, overall_score: f64) -> RecommendationSet {
    let mut recommendations: Vec<Recommendation> = gaps
        .gaps
        .iter()
        .map(recommendation_for_gap)
        .collect();

    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.next_step.cmp(&b.next_step))
    });
    recommendations.dedup_by(|a, b| a.next_step == b.next_step);

    let has_critical_gap = gaps.gaps.iter().any(|g| g.severity == GapSeverity::Critical);

    let estimated_improvement = if has_critical_gap {
        "Addressing the critical gaps above would bring coverage to 70% or higher and enable a \
         full analysis."
            .to_string()
    } else if overall_score < 80.0 {
        "Filling the remaining optional gaps would raise coverage to 85% or higher.".to_string()
    } else {
        "This panel is already well-suited to analysis; only incremental improvements remain."
            .to_string()
    };

    RecommendationSet {
        recommendations,
        estimated_improvement,
    }
}

fn recommendation_for_gap(gap: &Gap) -> Recommendation {
    let priority = match gap.severity {
        GapSeverity::Critical => RecommendationPriority::Critical,
        GapSeverity::High => RecommendationPriority::High,
        GapSeverity::Medium => RecommendationPriority::Medium,
        GapSeverity::Low => RecommendationPriority::Low,
    };
    Recommendation {
        priority,
        category: RecommendationCategory::DataCompleteness,
        next_step: format!("Obtain a {} measurement for the {} panel.", gap.biomarker, gap.system),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completeness::assess_completeness;
    use crate::gaps::analyze_gaps;
    use vitalis_model::BiomarkerPanel;

    #[test]
    fn critical_gap_promises_seventy_percent() {
        let requirements = crate::requirements::default_requirements();
        let panel = BiomarkerPanel::empty();
        let completeness = assess_completeness(&panel, &requirements);
        let gap_result = analyze_gaps(&panel, &requirements, &completeness);
        let recs = build_recommendations(&gap_result, completeness.overall_score * 100.0);
        assert!(recs.estimated_improvement.contains("70%"));
    }

    #[test]
    fn recommendations_sorted_by_descending_priority() {
        let requirements = crate::requirements::default_requirements();
        let panel = BiomarkerPanel::empty();
        let completeness = assess_completeness(&panel, &requirements);
        let gap_result = analyze_gaps(&panel, &requirements, &completeness);
        let recs = build_recommendations(&gap_result, completeness.overall_score * 100.0);
        for pair in recs.recommendations.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }
}
