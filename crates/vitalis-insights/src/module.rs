//! The `InsightModule` trait and the default module registry
//! (SPEC_FULL.md §4.5, §9).

use vitalis_model::{BiomarkerPanel, InsightOutcome, Sex};

/// Non-biomarker subject demographics an insight module may need, mirroring
/// the fields of `vitalis_model::UserProfile` that scoring/insights consume.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Subject {
    /// Age in years, if known.
    pub age: Option<u32>,
    /// Biological sex, if known.
    pub sex: Option<Sex>,
    /// Height in centimeters, if known (used for waist-to-height ratio).
    pub height_cm: Option<f64>,
}

/// A single deterministic insight computation. Implementations must never
/// panic: any internal failure is reported via
/// [`InsightOutcome::CalculationFailed`], modeling the "total function"
/// contract at the type level rather than via a `Result` a caller could
/// propagate as fatal.
pub trait InsightModule: Send + Sync {
    /// Stable identifier, e.g. `"metabolic_age"`.
    fn insight_id(&self) -> &'static str;
    /// Module version string, embedded in every outcome it produces.
    fn version(&self) -> &'static str;
    /// Canonical biomarker names without which the module cannot run.
    fn required_biomarkers(&self) -> &'static [&'static str];
    /// Canonical biomarker names that improve confidence if present, but are
    /// not required.
    fn optional_biomarkers(&self) -> &'static [&'static str];
    /// Runs the module against `panel`, returning one outcome.
    fn analyze(&self, panel: &BiomarkerPanel, subject: Subject) -> InsightOutcome;
}

/// Returns the module's required biomarkers missing from `panel`.
pub fn missing_required(module: &dyn InsightModule, panel: &BiomarkerPanel) -> Vec<String> {
    module
        .required_biomarkers()
        .iter()
        .filter(|b| panel.numeric(b).is_none())
        .map(|b| (*b).to_string())
        .collect()
}

/// The five default modules (SPEC_FULL.md §4.5), in the fixed order they are
/// always reported.
pub fn default_modules() -> Vec<Box<dyn InsightModule>> {
    vec![
        Box::new(crate::metabolic_age::MetabolicAge),
        Box::new(crate::heart_insight::HeartInsight),
        Box::new(crate::inflammation::Inflammation),
        Box::new(crate::fatigue_root_cause::FatigueRootCause),
        Box::new(crate::detox_filtration::DetoxFiltration),
    ]
}

/// Runs every module in `modules` against `panel`. Total: always returns one
/// outcome per module, in module order, never empty for a non-empty registry
/// (Invariant 7).
pub fn run_all(modules: &[Box<dyn InsightModule>], panel: &BiomarkerPanel, subject: Subject) -> Vec<InsightOutcome> {
    modules
        .iter()
        .map(|module| {
            let missing = missing_required(module.as_ref(), panel);
            if !missing.is_empty() {
                tracing::debug!(insight = module.insight_id(), ?missing, "required biomarkers missing");
                return InsightOutcome::MissingInputs {
                    insight_id: module.insight_id().to_string(),
                    version: module.version().to_string(),
                    missing,
                };
            }
            module.analyze(panel, subject)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vitalis_model::BiomarkerValue;

    #[test]
    fn run_all_is_total_for_empty_panel() {
        let modules = default_modules();
        let panel = BiomarkerPanel::empty();
        let outcomes = run_all(&modules, &panel, Subject::default());
        assert_eq!(outcomes.len(), modules.len());
        for outcome in &outcomes {
            assert!(matches!(outcome, InsightOutcome::MissingInputs { .. }));
        }
    }

    #[test]
    fn run_all_preserves_module_order() {
        let modules = default_modules();
        let mut map = BTreeMap::new();
        let _ = map.insert("glucose".to_string(), BiomarkerValue::numeric("glucose", 85.0));
        let panel = BiomarkerPanel::from_canonical_map(map);
        let outcomes = run_all(&modules, &panel, Subject { age: Some(35), ..Subject::default() });
        let ids: Vec<&str> = outcomes.iter().map(|o| o.insight_id()).collect();
        assert_eq!(
            ids,
            vec!["metabolic_age", "heart_insight", "inflammation", "fatigue_root_cause", "detox_filtration"]
        );
    }
}
