/*!
# vitalis-scoring

**Purpose:** per-biomarker scoring against fixed clinical bands, per-health-
system aggregation, overall aggregation, and the six-factor lifestyle overlay
(SPEC_FULL.md §4.3).

**Determinism guarantees:**
- Band matching is a pure step function: no interpolation, ever.
- Aggregation iterates the fixed `HealthSystem::ALL` order and sums over
  explicit weights; no hash-based iteration appears anywhere in this crate.
- The lifestyle overlay is a product of six independently-derived
  multipliers, each a pure function of the corresponding `LifestyleProfile`
  field.

**How it affects replay:** `run_scoring` called twice on identical
`(rule_tables, panel, age, sex, lifestyle)` always returns a bit-identical
`ScoringResult` — there is no floating iteration order or random tie-break
anywhere in the aggregation path.
*/

pub mod adjustments;
pub mod engine;
pub mod overlay;
pub mod tables;

pub use adjustments::{apply_age_adjustment, apply_sex_adjustment};
pub use engine::{run_scoring, score_biomarker, score_system, ScoringError};
pub use overlay::{alcohol_level, apply_overlay, exercise_level, sleep_level, LifestyleAdjustment};
pub use tables::default_health_system_rules;
