//! Effort model: estimated hours -> score. Less effort scores higher
//! ("quick wins").

/// Score for a non-numeric or non-positive estimate.
pub const INVALID_EFFORT: f64 = 0.5;

pub fn effort_score(hours: Option<f64>) -> f64 {
    let h = match hours {
        Some(h) if h.is_finite() && h > 0.0 => h,
        _ => return INVALID_EFFORT,
    };

    if h <= 1.0 {
        1.0
    } else if h <= 4.0 {
        1.0 - (h - 1.0) / 3.0 * 0.3
    } else if h <= 8.0 {
        0.7 - (h - 4.0) / 4.0 * 0.3
    } else {
        // Long tasks bottom out at 0.1 (reached at 24h).
        (0.4 - (h - 8.0) / 16.0 * 0.3).max(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn lower_effort_scores_higher() {
        let s1 = effort_score(Some(1.0));
        let s4 = effort_score(Some(4.0));
        let s8 = effort_score(Some(8.0));
        assert!(s1 > s4);
        assert!(s4 > s8);
    }

    #[test]
    fn segment_boundaries() {
        assert_eq!(effort_score(Some(0.25)), 1.0);
        assert!(approx(effort_score(Some(4.0)), 0.7));
        assert!(approx(effort_score(Some(8.0)), 0.4));
        assert!(approx(effort_score(Some(24.0)), 0.1));
        assert!(approx(effort_score(Some(100.0)), 0.1));
    }

    #[test]
    fn invalid_estimates_are_neutral() {
        assert_eq!(effort_score(None), INVALID_EFFORT);
        assert_eq!(effort_score(Some(0.0)), INVALID_EFFORT);
        assert_eq!(effort_score(Some(-3.0)), INVALID_EFFORT);
    }
}
