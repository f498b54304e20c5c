//! LLM collaborator contract (SPEC_FULL.md §6) and its deterministic
//! fallback.
//!
//! The orchestrator owns this capability only as an injected trait object —
//! it never constructs a concrete LLM client, and no field of
//! [`vitalis_model::AnalysisResult`] depends on a synthesizer ever being
//! called. This module exists so the contract is expressible in the crate
//! even though insight-to-free-text synthesis itself is out of scope.

use thiserror::Error;

use vitalis_model::{BiomarkerCluster, Severity};

/// A request to synthesize free-text insights for one category of clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// The category this request covers (e.g. a health system name).
    pub category: String,
    /// Clusters relevant to this category.
    pub clusters: Vec<BiomarkerCluster>,
}

/// One synthesized insight, matching the LLM collaborator's expected JSON
/// shape (SPEC_FULL.md §6).
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedInsight {
    /// Category this insight addresses.
    pub category: String,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Resolved severity.
    pub severity: Severity,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Supporting evidence strings.
    pub evidence: Vec<String>,
    /// Free-text recommendations.
    pub recommendations: Vec<String>,
}

/// The synthesizer's response: zero or more synthesized insights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SynthesisResponse {
    /// Synthesized insights, in the order the collaborator returned them.
    pub insights: Vec<SynthesizedInsight>,
}

/// Errors a synthesizer call can fail with. Any error here triggers the
/// deterministic fallback; it never aborts the pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum SynthesisError {
    /// The collaborator's response did not match the expected schema, or the
    /// call itself failed (timeout, transport error, etc).
    #[error("insight synthesis failed: {0}")]
    Failed(String),
}

/// An injected capability matching "prompt in, structured insights or an
/// error out" (SPEC_FULL.md §9's LLM client composition guidance).
pub trait InsightSynthesizer: Send + Sync {
    /// Synthesizes free-text insights for one category of clusters.
    fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResponse, SynthesisError>;
}

/// Builds insights directly from clusters with no network call, ever. The
/// core falls back to this whenever an external collaborator is absent or
/// its call fails, so analytical correctness never depends on LLM success.
pub struct FallbackSynthesizer;

impl InsightSynthesizer for FallbackSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResponse, SynthesisError> {
        let insights = request
            .clusters
            .iter()
            .map(|cluster| SynthesizedInsight {
                category: request.category.clone(),
                title: cluster.name.clone(),
                description: cluster.description.clone(),
                severity: cluster.severity,
                confidence: cluster.confidence,
                evidence: cluster.biomarkers.clone(),
                recommendations: vec![format!(
                    "Review the {} cluster with a clinician.",
                    cluster.name
                )],
            })
            .collect();
        Ok(SynthesisResponse { insights })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster() -> BiomarkerCluster {
        BiomarkerCluster {
            cluster_id: "metabolic_dysfunction".to_string(),
            name: "Metabolic Dysfunction".to_string(),
            biomarkers: vec!["glucose".to_string(), "hba1c".to_string()],
            description: "Elevated glucose-regulation markers.".to_string(),
            severity: Severity::Moderate,
            confidence: 0.8,
        }
    }

    #[test]
    fn fallback_never_fails() {
        let request = SynthesisRequest {
            category: "metabolic".to_string(),
            clusters: vec![cluster()],
        };
        let response = FallbackSynthesizer.synthesize(&request).expect("fallback synthesis");
        assert_eq!(response.insights.len(), 1);
        assert_eq!(response.insights[0].severity, Severity::Moderate);
    }

    #[test]
    fn fallback_on_no_clusters_yields_no_insights() {
        let request = SynthesisRequest {
            category: "metabolic".to_string(),
            clusters: vec![],
        };
        let response = FallbackSynthesizer.synthesize(&request).expect("fallback synthesis");
        assert!(response.insights.is_empty());
    }
}
