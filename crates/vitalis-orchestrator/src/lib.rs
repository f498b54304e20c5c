/*!
# vitalis-orchestrator

**Purpose:** Wires normalization, scoring, clustering, and insight modules
into the single seven-step analysis pipeline (SPEC_FULL.md §4.6). This is
the only crate in the workspace that depends on every other analysis crate;
nothing downstream of it exists.

**Determinism guarantees:**
- [`run_analysis`] is a pure function of its four arguments: an immutable
  [`vitalis_normalize::ResolverSnapshot`], an [`AnalysisRequest`], an
  [`OrchestratorConfig`], and a caller-supplied timestamp string. It never
  reads the wall clock, environment variables, or any other process-global
  state.
- Two calls with identical arguments produce a bit-for-bit identical
  [`vitalis_model::AnalysisResult`] (see `pipeline::tests::determinism_same_input_same_output`).

**How it affects replay:** because `created_at` is an input rather than
something the pipeline generates, a stored `AnalysisRequest` plus its
original timestamp can be replayed byte-for-byte against a later build of
this crate to confirm the analysis core has not drifted.
*/

mod error;
mod pipeline;
mod questionnaire;
mod synthesizer;

pub use error::OrchestratorError;
pub use pipeline::{run_analysis, AnalysisRequest, OrchestratorConfig};
pub use questionnaire::{map_questionnaire, DemographicOverrides, QuestionnaireOutcome};
pub use synthesizer::{
    FallbackSynthesizer, InsightSynthesizer, SynthesisError, SynthesisRequest, SynthesisResponse,
    SynthesizedInsight,
};
