//! Importance model: 1-10 rating -> 0.0..=1.0.

/// Score for a non-numeric rating.
pub const INVALID_IMPORTANCE: f64 = 0.5;

/// Truncate, clamp to 1..=10, then map linearly (1 -> 0.0, 10 -> 1.0).
pub fn importance_score(rating: Option<f64>) -> f64 {
    match rating {
        Some(r) if r.is_finite() => (r.trunc().clamp(1.0, 10.0) - 1.0) / 9.0,
        _ => INVALID_IMPORTANCE,
    }
}
