//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock data factories
//! - Time helpers
//! - Tracing setup
//! - Helper assertions

use chrono::{Duration, NaiveDate, Utc};

use crate::models::{
  RepRange, Session, SessionExerciseEntry, SessionSet, SetKind, Settings, TemplateExercise,
};

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a finalized set for testing
pub fn mock_set(weight: f64, reps: u32) -> SessionSet {
  SessionSet {
    weight,
    reps,
    rpe: None,
    notes: String::new(),
    set_kind: SetKind::Normal,
    group: None,
  }
}

/// Create a session exercise entry for testing
pub fn mock_entry(name: &str, sets: Vec<SessionSet>) -> SessionExerciseEntry {
  SessionExerciseEntry {
    exercise_id: uuid::Uuid::new_v4().to_string(),
    exercise_name: name.to_string(),
    sets,
  }
}

/// Create a logged session N days in the past
pub fn mock_session(days_ago: i64, entries: Vec<SessionExerciseEntry>) -> Session {
  Session::new(date_days_ago(days_ago), "mock-template", "Mock Day", entries)
}

/// Create a template exercise with workable defaults (3 sets of 8-12)
pub fn mock_exercise(name: &str) -> TemplateExercise {
  TemplateExercise::new(name, 3, RepRange::new(8, 12))
}

/// Create default settings for testing (lb, strict progression)
pub fn mock_settings() -> Settings {
  Settings::default()
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Create a date N days ago from today
pub fn date_days_ago(days: i64) -> NaiveDate {
  Utc::now().date_naive() - Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Tracing Setup
/// ---------------------------------------------------------------------------

/// Install a test-writer subscriber so traced events show up in failing
/// test output. Safe to call from multiple tests; only the first wins.
pub fn init_test_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_test_writer()
    .with_max_level(tracing::Level::DEBUG)
    .try_init();
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance.
/// `f64::abs` keeps the expansion typed when both arguments are bare literals.
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = f64::abs($left - $right);
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
  ($left:expr, $right:expr) => {
    $crate::assert_approx_eq!($left, $right, 1e-6);
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_session_dates_recede() {
    let newer = mock_session(1, vec![]);
    let older = mock_session(10, vec![]);
    assert!(newer.date > older.date);
  }

  #[test]
  fn test_mock_entries_get_unique_ids() {
    let a = mock_entry("Bench Press", vec![]);
    let b = mock_entry("Bench Press", vec![]);
    assert_ne!(a.exercise_id, b.exercise_id);
  }

  #[test]
  fn test_approx_eq_tolerance() {
    assert_approx_eq!(1.0, 1.0);
    assert_approx_eq!(133.33, 133.333, 0.01);
  }
}
