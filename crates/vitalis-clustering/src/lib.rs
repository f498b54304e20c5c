/*!
# vitalis-clustering

**Purpose:** groups biomarkers into correlated clusters via three
algorithms — rule-based, health-system-grouping, and weighted-correlation —
then validates the resulting cluster set (SPEC_FULL.md §4.4).

**Determinism guarantees:**
- Rule-based firing walks a fixed, priority-sorted rule table and tracks
  consumption with an explicit set; the same panel and scores always fire
  the same rules in the same order.
- Every cluster's biomarker list is sorted before it is returned.
- Merged-cluster ids are derived from a `blake3` hash of the sorted member
  list, never from insertion order or a random seed.

**How it affects replay:** `run_clustering` called twice on identical inputs
always returns bit-identical `clusters`, `algorithm_used`, and `validation`
(order, ids, and the issue list included). `processing_time_ms` is excluded
from this guarantee — it is a wall-clock measurement of the call itself and
varies by construction.
*/

pub mod algorithms;
pub mod engine;
pub mod rules;
pub mod validator;
pub mod weights;

pub use algorithms::{
    health_system_grouping_clusters, merge_clusters, rule_based_clusters, weighted_correlation_clusters,
    weighted_correlation_groups,
};
pub use engine::run_clustering;
pub use rules::{default_clustering_rules, RuleDefinition, ScoreMap};
pub use validator::validate_clusters;
pub use weights::{
    cardiovascular_focus, comprehensive_health, metabolic_focus, organ_function_focus, profile_by_name,
    wellness_optimization, ClinicalWeightProfile,
};
