//! Penalty and severity math shared by every posture rule.
//!
//! ## Directional angle bands
//!
//! [`angle_penalty`] reads `(good, bad)` as a direction:
//!
//! - `good <= bad`: values above `good` are penalized, scaled over `bad - good`
//! - `good > bad`: values below `good` are penalized, with the excess taken
//!   relative to `bad`
//!
//! Callers pick "too much" or "too little" purely by argument order.

/// Penalty for a value outside a directional angle band.
///
/// Result is clamped to `[0, max_penalty]`.
pub fn angle_penalty(value: f64, good: f64, bad: f64, max_penalty: i32) -> i32 {
    let inverted = good > bad;

    if (!inverted && value <= good) || (inverted && value >= good) {
        return 0;
    }

    let excess = if inverted { value - bad } else { value - good };
    scale_excess(excess, (bad - good).abs(), max_penalty)
}

/// Penalty for a distance outside `[min, max]`, proportional to the gap to
/// the nearer bound and clamped to `max_penalty`.
pub fn distance_penalty(value: f64, min: f64, max: f64, max_penalty: i32) -> i32 {
    if value >= min && value <= max {
        return 0;
    }

    let excess = if value < min { min - value } else { value - max };
    scale_excess(excess, max - min, max_penalty)
}

/// Normalized penalty in [0, 1] for visualization
pub fn severity(penalty: i32, max_penalty: i32) -> f64 {
    if max_penalty == 0 {
        return 0.0;
    }
    let normalized = penalty as f64 / max_penalty as f64;
    if !normalized.is_finite() {
        return 0.0;
    }
    normalized.clamp(0.0, 1.0)
}

fn scale_excess(excess: f64, range: f64, max_penalty: i32) -> i32 {
    let max_penalty = max_penalty.max(0);
    if range <= 0.0 {
        return if excess > 0.0 { max_penalty } else { 0 };
    }

    let penalty = (excess / range * max_penalty as f64).floor();
    if penalty.is_nan() {
        return 0;
    }
    penalty.clamp(0.0, max_penalty as f64) as i32
}
