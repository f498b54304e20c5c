//! Measured biomarker values and panels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The measured value carried by a [`BiomarkerValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueKind {
    /// A numeric measurement.
    Numeric(f64),
    /// A categorical label.
    Categorical(String),
    /// A boolean flag.
    Boolean(bool),
}

impl ValueKind {
    /// Returns the numeric value if this is a [`ValueKind::Numeric`].
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }
}

/// A single measured biomarker value. Invariant: `name` is always canonical —
/// never an alias. Enforced by construction in `vitalis-normalize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerValue {
    /// Canonical biomarker name.
    pub name: String,
    /// Measured value.
    pub value: ValueKind,
    /// Measurement unit.
    pub unit: String,
    /// Optional collection timestamp, ISO-8601.
    pub timestamp: Option<String>,
}

impl BiomarkerValue {
    /// Convenience constructor for a bare numeric value with no unit/timestamp
    /// metadata, used pervasively by scoring and clustering which only need
    /// the number.
    pub fn numeric(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: ValueKind::Numeric(value),
            unit: String::new(),
            timestamp: None,
        }
    }
}

/// Canonical-name → value mapping. Invariant: every key is canonical; a panel
/// is only ever constructed by `vitalis-normalize`, which owns the canonical
/// name set needed to enforce that invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerPanel {
    biomarkers: BTreeMap<String, BiomarkerValue>,
}

impl BiomarkerPanel {
    /// Builds a panel from an already-canonical map. Callers outside
    /// `vitalis-normalize` must only use this with keys they know are
    /// canonical (e.g. in tests); production code should go through the
    /// normalizer.
    pub fn from_canonical_map(biomarkers: BTreeMap<String, BiomarkerValue>) -> Self {
        Self { biomarkers }
    }

    /// The empty panel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read-only view of the underlying map.
    pub fn biomarkers(&self) -> &BTreeMap<String, BiomarkerValue> {
        &self.biomarkers
    }

    /// Looks up a biomarker's numeric value by canonical name.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.biomarkers.get(name).and_then(|v| v.value.as_numeric())
    }

    /// True if the panel has no entries.
    pub fn is_empty(&self) -> bool {
        self.biomarkers.is_empty()
    }

    /// Number of biomarkers present.
    pub fn len(&self) -> usize {
        self.biomarkers.len()
    }
}
