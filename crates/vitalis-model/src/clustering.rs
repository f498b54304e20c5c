//! Clustering result value types (§3, §4.4).

use serde::{Deserialize, Serialize};

use crate::enums::{ClusteringAlgorithm, ClusterQuality, IssueLevel, Severity};

/// A group of biomarkers identified as correlated by one of the clustering
/// algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerCluster {
    /// Stable for rule-produced clusters (the rule name); opaque
    /// (blake3-derived) for dynamically merged clusters.
    pub cluster_id: String,
    /// Human-readable name.
    pub name: String,
    /// Canonical biomarker names, unique within the cluster.
    pub biomarkers: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// Cluster severity.
    pub severity: Severity,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

/// One issue surfaced by the cluster validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub level: IssueLevel,
    /// Human-readable explanation.
    pub message: String,
}

/// Full validation outcome for a set of clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// All issues found, across all clusters and the global checks.
    pub issues: Vec<ValidationIssue>,
    /// Resolved quality tier.
    pub quality: ClusterQuality,
    /// `false` iff any issue has [`IssueLevel::Critical`].
    pub is_valid: bool,
}

/// Top-level clustering output (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
    /// Clusters produced, in the order the algorithm emitted them.
    pub clusters: Vec<BiomarkerCluster>,
    /// Which algorithm produced this result.
    pub algorithm_used: ClusteringAlgorithm,
    /// Overall confidence across the cluster set.
    pub confidence_score: f64,
    /// Validation outcome for the cluster set.
    pub validation: ValidationSummary,
    /// Wall-clock time spent clustering, in milliseconds.
    pub processing_time_ms: f64,
}
