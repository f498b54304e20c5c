//! Lifestyle overlay: six factor multipliers applied to the overall score
//! after aggregation (SPEC_FULL.md §4.3).

use vitalis_model::{LifestyleLevel, LifestyleProfile, SmokingStatus};

/// Multiplier for one lifestyle level, identical for every factor: each
/// level maps to a fixed point in `[0.7, 1.1]`.
fn level_multiplier(level: LifestyleLevel) -> f64 {
    match level {
        LifestyleLevel::Excellent => 1.1,
        LifestyleLevel::Good => 1.05,
        LifestyleLevel::Average => 1.0,
        LifestyleLevel::Poor => 0.85,
        LifestyleLevel::VeryPoor => 0.7,
    }
}

fn smoking_multiplier(status: SmokingStatus) -> f64 {
    match status {
        SmokingStatus::Never => 1.1,
        SmokingStatus::Former => 1.05,
        SmokingStatus::Current => 0.7,
    }
}

fn smoking_level(status: SmokingStatus) -> LifestyleLevel {
    match status {
        SmokingStatus::Never => LifestyleLevel::Excellent,
        SmokingStatus::Former => LifestyleLevel::Good,
        SmokingStatus::Current => LifestyleLevel::VeryPoor,
    }
}

/// Derives the sleep lifestyle level from hours slept, using the explicit
/// boundaries in SPEC_FULL.md §4.3.
pub fn sleep_level(hours: f64) -> LifestyleLevel {
    if hours >= 7.0 {
        LifestyleLevel::Excellent
    } else if hours >= 6.0 {
        LifestyleLevel::Good
    } else if hours >= 5.0 {
        LifestyleLevel::Average
    } else if hours >= 4.0 {
        LifestyleLevel::Poor
    } else {
        LifestyleLevel::VeryPoor
    }
}

/// Derives the exercise lifestyle level from weekly minutes.
pub fn exercise_level(minutes_per_week: u32) -> LifestyleLevel {
    if minutes_per_week >= 300 {
        LifestyleLevel::Excellent
    } else if minutes_per_week >= 150 {
        LifestyleLevel::Good
    } else if minutes_per_week >= 75 {
        LifestyleLevel::Average
    } else if minutes_per_week > 0 {
        LifestyleLevel::Poor
    } else {
        LifestyleLevel::VeryPoor
    }
}

/// Derives the alcohol lifestyle level from weekly units.
pub fn alcohol_level(units_per_week: u32) -> LifestyleLevel {
    if units_per_week == 0 {
        LifestyleLevel::Excellent
    } else if units_per_week <= 7 {
        LifestyleLevel::Good
    } else if units_per_week <= 14 {
        LifestyleLevel::Average
    } else if units_per_week <= 21 {
        LifestyleLevel::Poor
    } else {
        LifestyleLevel::VeryPoor
    }
}

/// One named lifestyle adjustment and its resulting multiplier, retained for
/// the orchestrator's `lifestyle_adjustment_descriptions` output.
#[derive(Debug, Clone, PartialEq)]
pub struct LifestyleAdjustment {
    /// The factor this adjustment applies to (e.g. "sleep").
    pub factor: &'static str,
    /// The resolved level.
    pub level: LifestyleLevel,
    /// The multiplier contributed by this factor.
    pub multiplier: f64,
}

/// Applies the six-factor lifestyle overlay to `overall_score`, returning the
/// adjusted score (clamped to `[0, 100]`) and the per-factor adjustments
/// applied, in a fixed declaration order (diet, sleep, exercise, alcohol,
/// smoking, stress).
pub fn apply_overlay(
    overall_score: f64,
    profile: &LifestyleProfile,
) -> (f64, Vec<LifestyleAdjustment>) {
    let sleep = sleep_level(profile.sleep_hours);
    let exercise = exercise_level(profile.exercise_minutes_per_week);
    let alcohol = alcohol_level(profile.alcohol_units_per_week);

    let adjustments = vec![
        LifestyleAdjustment {
            factor: "diet",
            level: profile.diet_level,
            multiplier: level_multiplier(profile.diet_level),
        },
        LifestyleAdjustment {
            factor: "sleep",
            level: sleep,
            multiplier: level_multiplier(sleep),
        },
        LifestyleAdjustment {
            factor: "exercise",
            level: exercise,
            multiplier: level_multiplier(exercise),
        },
        LifestyleAdjustment {
            factor: "alcohol",
            level: alcohol,
            multiplier: level_multiplier(alcohol),
        },
        LifestyleAdjustment {
            factor: "smoking",
            level: smoking_level(profile.smoking_status),
            multiplier: smoking_multiplier(profile.smoking_status),
        },
        LifestyleAdjustment {
            factor: "stress",
            level: profile.stress_level,
            multiplier: level_multiplier(profile.stress_level),
        },
    ];

    let product: f64 = adjustments.iter().map(|a| a.multiplier).product();
    let adjusted = (overall_score * product).clamp(0.0, 100.0);
    (adjusted, adjustments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best_profile() -> LifestyleProfile {
        LifestyleProfile {
            diet_level: LifestyleLevel::Excellent,
            sleep_hours: 8.0,
            exercise_minutes_per_week: 300,
            alcohol_units_per_week: 0,
            smoking_status: SmokingStatus::Never,
            stress_level: LifestyleLevel::Excellent,
        }
    }

    fn worst_profile() -> LifestyleProfile {
        LifestyleProfile {
            diet_level: LifestyleLevel::VeryPoor,
            sleep_hours: 3.0,
            exercise_minutes_per_week: 0,
            alcohol_units_per_week: 30,
            smoking_status: SmokingStatus::Current,
            stress_level: LifestyleLevel::VeryPoor,
        }
    }

    #[test]
    fn best_profile_raises_score_above_base() {
        let (adjusted, _) = apply_overlay(80.0, &best_profile());
        assert!(adjusted > 80.0);
    }

    #[test]
    fn worst_profile_lowers_score_below_base() {
        let (adjusted, _) = apply_overlay(80.0, &worst_profile());
        assert!(adjusted < 80.0);
    }

    #[test]
    fn result_always_clamped() {
        let (adjusted_high, _) = apply_overlay(99.0, &best_profile());
        assert!(adjusted_high <= 100.0);
        let (adjusted_low, _) = apply_overlay(1.0, &worst_profile());
        assert!(adjusted_low >= 0.0);
    }
}
