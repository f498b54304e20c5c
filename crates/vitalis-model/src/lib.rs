/*!
# vitalis-model

**Purpose:** Immutable value types shared across the biomarker analysis core.

**Determinism guarantees:**
- Every type here is a plain value; mutation is always by constructing a new value.
- `BTreeMap`/sorted `Vec` are used wherever iteration order is externally observable,
  so two analyses over identical input produce byte-identical serialized output.
- No type in this crate performs I/O, randomness, or wall-clock reads.

**How it affects replay:** since every downstream crate (`vitalis-normalize`,
`vitalis-scoring`, `vitalis-clustering`, `vitalis-insights`, `vitalis-orchestrator`)
builds and consumes only these types, a fixed sequence of inputs produces a
fixed `AnalysisResult` regardless of when or how many times it is run.
*/

pub mod biomarker;
pub mod clustering;
pub mod context;
pub mod enums;
pub mod insight;
pub mod lifestyle;
pub mod rules;
pub mod scoring;

pub use biomarker::{BiomarkerPanel, BiomarkerValue, ValueKind};
pub use clustering::{BiomarkerCluster, ClusteringResult, ValidationIssue, ValidationSummary};
pub use context::{AnalysisResult, UserProfile, RESULT_VERSION};
pub use enums::{
    ClusterQuality, ClusteringAlgorithm, ConfidenceLevel, GapSeverity, HealthSystem, IssueLevel,
    LifestyleLevel, RecommendationCategory, RecommendationPriority, ScoreRange, Severity, Sex,
    SmokingStatus,
};
pub use insight::{EvidenceValue, InsightData, InsightOutcome};
pub use lifestyle::{LifestyleProfile, MedicalHistory};
pub use rules::{BiomarkerRule, HealthSystemRules, ScoreBand};
pub use scoring::{BiomarkerScore, HealthSystemScore, ScoringResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_range_points_are_fixed() {
        assert_eq!(ScoreRange::Optimal.points(), 100.0);
        assert_eq!(ScoreRange::Critical.points(), 10.0);
    }

    #[test]
    fn severity_total_order() {
        assert!(Severity::Normal < Severity::Mild);
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn score_band_half_closed() {
        let band = ScoreBand::new(70.0, 100.0);
        assert!(band.contains(70.0));
        assert!(!band.contains(100.0));
    }

    #[test]
    fn panel_roundtrips_through_json() {
        let mut map = std::collections::BTreeMap::new();
        let _ = map.insert("glucose".to_string(), BiomarkerValue::numeric("glucose", 85.0));
        let panel = BiomarkerPanel::from_canonical_map(map);
        let json = serde_json::to_string(&panel).expect("serialize panel");
        let back: BiomarkerPanel = serde_json::from_str(&json).expect("deserialize panel");
        assert_eq!(panel, back);
    }

    #[test]
    fn health_system_order_is_fixed() {
        assert_eq!(HealthSystem::ALL[0], HealthSystem::Metabolic);
        assert_eq!(HealthSystem::ALL[7], HealthSystem::Cbc);
    }
}
