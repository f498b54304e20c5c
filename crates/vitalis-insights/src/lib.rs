/*!
# vitalis-insights

**Purpose:** five deterministic insight modules (metabolic_age, heart_insight,
inflammation, fatigue_root_cause, detox_filtration), each a total function
from a biomarker panel to an [`vitalis_model::InsightOutcome`]
(SPEC_FULL.md §4.5, §9).

**Determinism guarantees:**
- Every module is a pure function of its inputs: no I/O, no randomness, no
  wall-clock reads.
- A module never panics. Missing required biomarkers and internal
  calculation failures are both modeled as outcome variants, not errors a
  caller could propagate as fatal — this is the "total function" design
  note from SPEC_FULL.md §9 made concrete at the type level.

**How it affects replay:** [`module::run_all`] called twice on an identical
`(modules, panel, age, sex)` tuple returns a bit-identical outcome list, in
the same module order every time.
*/

pub mod common;
pub mod detox_filtration;
pub mod fatigue_root_cause;
pub mod heart_insight;
pub mod inflammation;
pub mod metabolic_age;
pub mod module;

pub use detox_filtration::DetoxFiltration;
pub use fatigue_root_cause::FatigueRootCause;
pub use heart_insight::HeartInsight;
pub use inflammation::Inflammation;
pub use metabolic_age::MetabolicAge;
pub use module::{default_modules, missing_required, run_all, InsightModule, Subject};
