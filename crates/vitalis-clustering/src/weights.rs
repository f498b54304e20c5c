//! Clinical weight profiles for the weighted-correlation algorithm
//! (SPEC_FULL.md §4.4).

use std::collections::BTreeMap;

use vitalis_model::HealthSystem;

/// A named set of per-health-system weights, normalized to sum to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalWeightProfile {
    /// Profile name, e.g. `"metabolic_focus"`.
    pub name: &'static str,
    weights: BTreeMap<&'static str, f64>,
}

impl ClinicalWeightProfile {
    /// Builds a profile from raw (possibly non-normalized) weights, then
    /// renormalizes them to sum to 1.0. A system absent from `raw` has
    /// weight `0.0` and is excluded from clustering consideration.
    pub fn new(name: &'static str, raw: &[(HealthSystem, f64)]) -> Self {
        let total: f64 = raw.iter().map(|(_, w)| w).sum();
        let mut weights = BTreeMap::new();
        for (system, w) in raw {
            let normalized = if total > 0.0 { w / total } else { 0.0 };
            let _ = weights.insert(system.name(), normalized);
        }
        Self { name, weights }
    }

    /// The normalized weight for `system`, or `0.0` if unlisted.
    pub fn weight_for(&self, system: HealthSystem) -> f64 {
        self.weights.get(system.name()).copied().unwrap_or(0.0)
    }

    /// Scales every weight by `factor` and renormalizes back to sum to 1.0.
    /// A `factor` of `1.0` is a no-op; this exists so a caller can boost one
    /// system's influence before renormalization without hand-computing the
    /// rest of the table.
    pub fn boosted(&self, system: HealthSystem, factor: f64) -> Self {
        let raw: Vec<(HealthSystem, f64)> = HealthSystem::ALL
            .iter()
            .map(|s| {
                let base = self.weight_for(*s);
                let boosted = if *s == system { base * factor } else { base };
                (*s, boosted)
            })
            .collect();
        Self::new(self.name, &raw)
    }
}

/// Focuses on glucose regulation; other systems retain minor residual weight.
pub fn metabolic_focus() -> ClinicalWeightProfile {
    ClinicalWeightProfile::new(
        "metabolic_focus",
        &[
            (HealthSystem::Metabolic, 0.5),
            (HealthSystem::Cardiovascular, 0.15),
            (HealthSystem::Nutritional, 0.1),
            (HealthSystem::Inflammatory, 0.1),
            (HealthSystem::Hormonal, 0.05),
            (HealthSystem::Kidney, 0.05),
            (HealthSystem::Liver, 0.05),
        ],
    )
}

/// Focuses on lipid and blood-pressure markers.
pub fn cardiovascular_focus() -> ClinicalWeightProfile {
    ClinicalWeightProfile::new(
        "cardiovascular_focus",
        &[
            (HealthSystem::Cardiovascular, 0.5),
            (HealthSystem::Metabolic, 0.2),
            (HealthSystem::Inflammatory, 0.15),
            (HealthSystem::Kidney, 0.1),
            (HealthSystem::Hormonal, 0.05),
        ],
    )
}

/// Equal weight across every health system.
pub fn comprehensive_health() -> ClinicalWeightProfile {
    ClinicalWeightProfile::new(
        "comprehensive_health",
        &HealthSystem::ALL.iter().map(|s| (*s, 1.0)).collect::<Vec<_>>(),
    )
}

/// Focuses on kidney and liver function.
pub fn organ_function_focus() -> ClinicalWeightProfile {
    ClinicalWeightProfile::new(
        "organ_function_focus",
        &[
            (HealthSystem::Kidney, 0.4),
            (HealthSystem::Liver, 0.4),
            (HealthSystem::Cbc, 0.1),
            (HealthSystem::Metabolic, 0.1),
        ],
    )
}

/// Focuses on the lifestyle-adjacent systems: hormonal, cbc (fatigue), and
/// nutritional.
pub fn wellness_optimization() -> ClinicalWeightProfile {
    ClinicalWeightProfile::new(
        "wellness_optimization",
        &[
            (HealthSystem::Hormonal, 0.3),
            (HealthSystem::Cbc, 0.25),
            (HealthSystem::Nutritional, 0.25),
            (HealthSystem::Inflammatory, 0.2),
        ],
    )
}

/// Resolves a profile by name, falling back to [`comprehensive_health`] for
/// an unrecognized name.
pub fn profile_by_name(name: &str) -> ClinicalWeightProfile {
    match name {
        "metabolic_focus" => metabolic_focus(),
        "cardiovascular_focus" => cardiovascular_focus(),
        "organ_function_focus" => organ_function_focus(),
        "wellness_optimization" => wellness_optimization(),
        _ => comprehensive_health(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_normalize_to_one() {
        for profile in [
            metabolic_focus(),
            cardiovascular_focus(),
            comprehensive_health(),
            organ_function_focus(),
            wellness_optimization(),
        ] {
            let total: f64 = HealthSystem::ALL.iter().map(|s| profile.weight_for(*s)).sum();
            assert!((total - 1.0).abs() < 1e-9, "{} summed to {}", profile.name, total);
        }
    }

    #[test]
    fn boosted_still_normalizes() {
        let base = comprehensive_health();
        let boosted = base.boosted(HealthSystem::Metabolic, 3.0);
        let total: f64 = HealthSystem::ALL.iter().map(|s| boosted.weight_for(*s)).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(boosted.weight_for(HealthSystem::Metabolic) > base.weight_for(HealthSystem::Metabolic));
    }

    #[test]
    fn unknown_profile_name_falls_back_to_comprehensive() {
        let fallback = profile_by_name("does-not-exist");
        assert_eq!(fallback.name, "comprehensive_health");
    }
}
