//! Strength metric formulas and numeric coercion
//!
//! Pure numeric building blocks: estimated-1RM formulas, step rounding, and
//! the coerce-or-zero parsing applied to form input at the save boundary.
//! Epley is the formula the engine progresses and projects against; Brzycki
//! and Lombardi are exposed for comparison only.

/// Epley estimated one-rep max: `weight * (1 + reps/30)`.
/// Returns 0 for non-positive weight or zero reps, never a negative or
/// undefined estimate.
pub fn e1rm(weight: f64, reps: u32) -> f64 {
  if weight <= 0.0 || reps == 0 {
    return 0.0;
  }
  weight * (1.0 + reps as f64 / 30.0)
}

/// Brzycki estimate: `weight * 36 / (37 - reps)`.
/// The denominator crosses zero at 37 reps; at or past that the estimate is
/// meaningless, so it collapses to 0.
pub fn brzycki(weight: f64, reps: u32) -> f64 {
  if weight <= 0.0 || reps == 0 || reps >= 37 {
    return 0.0;
  }
  weight * 36.0 / (37.0 - reps as f64)
}

/// Lombardi estimate: `weight * reps^0.1`
pub fn lombardi(weight: f64, reps: u32) -> f64 {
  if weight <= 0.0 || reps == 0 {
    return 0.0;
  }
  weight * (reps as f64).powf(0.1)
}

/// Round to the nearest multiple of `step`, halves rounding up.
/// A non-positive step returns the value unchanged.
pub fn round_to(value: f64, step: f64) -> f64 {
  if step <= 0.0 {
    return value;
  }
  (value / step).round() * step
}

/// ---------------------------------------------------------------------------
/// Coerce-or-zero parsing
/// ---------------------------------------------------------------------------

/// Parse a weight field from the input draft. Empty, malformed, negative,
/// or non-finite input degrades to 0 rather than failing the save.
pub fn coerce_weight(raw: &str) -> f64 {
  match raw.trim().parse::<f64>() {
    Ok(value) if value.is_finite() && value > 0.0 => value,
    _ => 0.0,
  }
}

/// Parse a rep (or timed-duration) count, accepting decimal input by
/// truncation. Anything unparseable or non-positive becomes 0.
pub fn coerce_count(raw: &str) -> u32 {
  match raw.trim().parse::<f64>() {
    Ok(value) if value.is_finite() && value > 0.0 => value as u32,
    _ => 0,
  }
}

/// RPE stays unset on empty/invalid input; parsed values clamp to the 0-10
/// scale.
pub fn coerce_rpe(raw: &str) -> Option<f64> {
  match raw.trim().parse::<f64>() {
    Ok(value) if value.is_finite() => Some(value.clamp(0.0, 10.0)),
    _ => None,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
