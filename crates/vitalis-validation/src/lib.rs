/*!
# vitalis-validation

**Purpose:** completeness assessment, gap analysis, and recommendation
generation over a normalized biomarker panel (SPEC_FULL.md §4.2).

**Determinism guarantees:**
- Every function here is a pure function of its panel/requirement-table
  inputs; no clock, randomness, or I/O.
- Maps keyed by health-system name are `BTreeMap`; lists are explicitly
  sorted before being returned, so two runs over the same panel produce
  byte-identical output.

**How it affects replay:** the orchestrator calls
[`assess_completeness`], then [`analyze_gaps`], then
[`build_recommendations`] in that order every time; none of the three
functions have side effects that could make a second call observe a
different requirement table.
*/

pub mod completeness;
pub mod gaps;
pub mod recommendations;
pub mod requirements;

pub use completeness::{assess_completeness, CompletenessResult};
pub use gaps::{analyze_gaps, Gap, GapAnalysisResult};
pub use recommendations::{build_recommendations, Recommendation, RecommendationSet};
pub use requirements::{default_requirements, SystemRequirements};
