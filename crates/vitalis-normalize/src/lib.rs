/*!
# vitalis-normalize

**Purpose:** Canonical normalization of arbitrary biomarker keys against the
SSOT alias table (SPEC_FULL.md §4.1).

**Why it exists:** inbound biomarker data may use lab-specific or historical
aliases (`blood_sugar`) instead of the canonical name (`glucose`) the rest of
the analysis core requires. Every other crate in this workspace only ever
accepts a [`vitalis_model::BiomarkerPanel`], which is only constructible
through a canonical key set — the normalizer is the sole gate enforcing that.

**Determinism guarantees:**
- The alias→canonical index is built once from a fixed, compiled-in table
  and never mutated; rebuilding it (e.g. a hot SSOT reload) produces a new,
  independent [`ResolverSnapshot`] value rather than mutating one in place.
- `normalize_biomarkers` is a pure function of (snapshot, input map).
*/

mod ssot;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use vitalis_model::{BiomarkerPanel, BiomarkerValue, ValueKind};

/// Errors the normalizer can surface. None of them are ever panics — every
/// failure mode the source raises as a bare `ValueError` is represented here
/// as a typed variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Strict mode (`assume_canonical = false`) rejected input containing
    /// keys that are not already canonical.
    #[error("non-canonical biomarker keys found: {0:?}")]
    NonCanonicalKeys(Vec<String>),
    /// After normalization, the resulting panel would still contain
    /// non-canonical keys (an internal consistency failure, not expected to
    /// occur given a well-formed [`ResolverSnapshot`]).
    #[error("non-canonical biomarker keys survived normalization: {0:?}")]
    PostNormalizationNonCanonical(Vec<String>),
}

/// An immutable, read-only snapshot of the SSOT alias→canonical index.
///
/// Shared by `Arc` across concurrently running analyses (SPEC_FULL.md §5):
/// rebuilding the SSOT produces a brand new snapshot value; any analysis
/// already holding a clone of the old `Arc` keeps using it unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSnapshot {
    alias_to_canonical: BTreeMap<String, String>,
    canonical_names: BTreeSet<String>,
}

impl ResolverSnapshot {
    /// Builds a snapshot from `(canonical, aliases)` pairs. Panics only via
    /// a debug assertion on malformed *compiled-in* table data (duplicate
    /// aliases), which would be a bug in this crate, not user input.
    pub fn build(table: &[(&str, &[&str])]) -> Self {
        let mut alias_to_canonical = BTreeMap::new();
        let mut canonical_names = BTreeSet::new();
        for (canonical, aliases) in table {
            let _ = canonical_names.insert((*canonical).to_string());
            let _ = alias_to_canonical.insert((*canonical).to_string(), (*canonical).to_string());
            for alias in *aliases {
                let prior = alias_to_canonical.insert((*alias).to_string(), (*canonical).to_string());
                debug_assert!(
                    prior.is_none() || prior.as_deref() == Some(*canonical),
                    "duplicate SSOT alias {alias} maps to two canonical names"
                );
            }
        }
        Self {
            alias_to_canonical,
            canonical_names,
        }
    }

    /// The default compiled-in snapshot (see `ssot.rs`).
    pub fn default_snapshot() -> Arc<Self> {
        Arc::new(Self::build(ssot::CANONICAL_BIOMARKERS))
    }

    /// Resolves a single key to its canonical name. Keys not present in the
    /// index at all resolve to themselves (the caller decides whether an
    /// unresolved key is acceptable).
    pub fn resolve(&self, key: &str) -> String {
        self.alias_to_canonical
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Whether `name` is a canonical biomarker name known to this snapshot.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical_names.contains(name)
    }

    /// All canonical biomarker names, sorted.
    pub fn canonical_biomarkers(&self) -> Vec<String> {
        self.canonical_names.iter().cloned().collect()
    }
}

/// Canonicalizes a raw biomarker map into a [`BiomarkerPanel`].
///
/// Returns `(panel, unmapped_keys)`: `unmapped_keys` are input keys that
/// resolved to themselves but are not in the canonical set (SPEC_FULL.md
/// §4.1) — they are dropped from the panel rather than included under a
/// non-canonical key.
pub fn normalize_biomarkers(
    snapshot: &ResolverSnapshot,
    raw: &BTreeMap<String, f64>,
) -> Result<(BiomarkerPanel, Vec<String>), NormalizeError> {
    let mut canonical_map = BTreeMap::new();
    let mut unmapped = Vec::new();

    for (key, value) in raw {
        let canonical = snapshot.resolve(key);
        if snapshot.is_canonical(&canonical) {
            debug!(input_key = %key, canonical = %canonical, "resolved biomarker key");
            let _ = canonical_map.insert(
                canonical.clone(),
                BiomarkerValue {
                    name: canonical,
                    value: ValueKind::Numeric(*value),
                    unit: String::new(),
                    timestamp: None,
                },
            );
        } else {
            unmapped.push(key.clone());
        }
    }

    if !unmapped.is_empty() {
        unmapped.sort();
        warn!(unmapped = ?unmapped, "unmapped biomarker keys during normalization");
    }

    let panel = BiomarkerPanel::from_canonical_map(canonical_map);
    let offenders: Vec<String> = panel
        .biomarkers()
        .keys()
        .filter(|k| !snapshot.is_canonical(k))
        .cloned()
        .collect();
    if !offenders.is_empty() {
        return Err(NormalizeError::PostNormalizationNonCanonical(offenders));
    }

    Ok((panel, unmapped))
}

/// Strict-mode check used by the orchestrator before normalization ever
/// runs: every input key must already resolve to itself (i.e. already be
/// canonical). Grounded on `orchestrator.py::_assert_canonical_only`.
pub fn assert_canonical_only(
    snapshot: &ResolverSnapshot,
    raw: &BTreeMap<String, f64>,
) -> Result<(), NormalizeError> {
    let mut offenders: Vec<String> = raw
        .keys()
        .filter(|k| snapshot.resolve(k) != **k)
        .cloned()
        .collect();
    if offenders.is_empty() {
        Ok(())
    } else {
        offenders.sort();
        Err(NormalizeError::NonCanonicalKeys(offenders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Arc<ResolverSnapshot> {
        ResolverSnapshot::default_snapshot()
    }

    #[test]
    fn resolves_known_alias() {
        let snap = snapshot();
        assert_eq!(snap.resolve("blood_sugar"), "glucose");
    }

    #[test]
    fn canonical_key_resolves_to_itself() {
        let snap = snapshot();
        assert_eq!(snap.resolve("glucose"), "glucose");
        assert!(snap.is_canonical("glucose"));
    }

    #[test]
    fn unknown_key_is_unmapped() {
        let snap = snapshot();
        let mut raw = BTreeMap::new();
        let _ = raw.insert("totally_unknown_marker".to_string(), 1.0);
        let (panel, unmapped) = normalize_biomarkers(&snap, &raw).expect("normalize");
        assert!(panel.is_empty());
        assert_eq!(unmapped, vec!["totally_unknown_marker".to_string()]);
    }

    #[test]
    fn strict_mode_rejects_alias() {
        let snap = snapshot();
        let mut raw = BTreeMap::new();
        let _ = raw.insert("blood_sugar".to_string(), 95.0);
        let err = assert_canonical_only(&snap, &raw).unwrap_err();
        assert_eq!(err, NormalizeError::NonCanonicalKeys(vec!["blood_sugar".to_string()]));
    }

    #[test]
    fn strict_mode_accepts_canonical() {
        let snap = snapshot();
        let mut raw = BTreeMap::new();
        let _ = raw.insert("glucose".to_string(), 95.0);
        assert!(assert_canonical_only(&snap, &raw).is_ok());
    }

    #[test]
    fn normalize_is_idempotent() {
        let snap = snapshot();
        let mut raw = BTreeMap::new();
        let _ = raw.insert("blood_sugar".to_string(), 95.0);
        let (panel, _) = normalize_biomarkers(&snap, &raw).expect("normalize");
        let mut second_raw = BTreeMap::new();
        for (k, v) in panel.biomarkers() {
            if let Some(n) = v.value.as_numeric() {
                let _ = second_raw.insert(k.clone(), n);
            }
        }
        let (panel2, unmapped2) = normalize_biomarkers(&snap, &second_raw).expect("normalize again");
        assert_eq!(panel, panel2);
        assert!(unmapped2.is_empty());
    }
}
