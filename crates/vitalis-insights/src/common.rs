//! Shared scoring idiom used by every insight module (SPEC_FULL.md §4.5):
//! start from a base, subtract penalty points per risk factor, clamp to
//! `[0, 100]`, then derive severity from fixed bands.

use vitalis_model::Severity;

/// Severity from a `[0, 100]` score: critical < 30, high < 50, moderate < 70,
/// mild < 85, else normal.
pub fn severity_from_score(score: f64) -> Severity {
    if score < 30.0 {
        Severity::Critical
    } else if score < 50.0 {
        Severity::High
    } else if score < 70.0 {
        Severity::Moderate
    } else if score < 85.0 {
        Severity::Mild
    } else {
        Severity::Normal
    }
}

/// `base` confidence (0.6-0.8) plus a bonus for each of `optional_present`
/// optional biomarkers, capped at 0.95.
pub fn confidence_with_bonus(base: f64, optional_present: usize) -> f64 {
    (base + 0.05 * optional_present as f64).min(0.95)
}

/// Clamps a penalty-point score into `[0, 100]`.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bands_match_fixed_points() {
        assert_eq!(severity_from_score(10.0), Severity::Critical);
        assert_eq!(severity_from_score(40.0), Severity::High);
        assert_eq!(severity_from_score(60.0), Severity::Moderate);
        assert_eq!(severity_from_score(80.0), Severity::Mild);
        assert_eq!(severity_from_score(95.0), Severity::Normal);
    }

    #[test]
    fn confidence_is_capped() {
        assert_eq!(confidence_with_bonus(0.8, 10), 0.95);
    }
}
