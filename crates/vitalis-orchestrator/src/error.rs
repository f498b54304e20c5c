//! Orchestrator-level error types (SPEC_FULL.md §7).

use thiserror::Error;

use vitalis_normalize::NormalizeError;
use vitalis_scoring::ScoringError;

/// Errors that can abort the orchestration pipeline before an
/// [`vitalis_model::AnalysisResult`] is produced. Per SPEC_FULL.md §7, the
/// orchestrator fails fast only on non-canonical input under strict mode and
/// on a missing/empty SSOT snapshot; every other failure mode is absorbed
/// and surfaced inside the result instead.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Strict mode (`assume_canonical = true` not set) rejected input
    /// containing non-canonical biomarker keys.
    #[error("non-canonical biomarker keys under strict mode: {0:?}")]
    NonCanonicalInput(Vec<String>),
    /// The supplied SSOT snapshot has no canonical biomarkers at all.
    #[error("SSOT snapshot is empty or failed to load")]
    SsotUnavailable,
    /// Normalization failed for a reason other than strict-mode rejection.
    #[error("biomarker normalization failed: {0}")]
    Normalization(#[from] NormalizeError),
    /// The scoring engine rejected an empty or malformed rule table.
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}
