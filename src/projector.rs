//! Goal Projection
//!
//! Extrapolates per-exercise e1RM targets from recent history: fit a linear
//! per-week slope over the most recent records, project it over the goal
//! horizon, and clamp the projected growth to a sane band so thin or noisy
//! history still yields a usable target.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::history::ExerciseHistory;
use crate::metrics::round_to;
use crate::models::{Goal, GoalMetric, GoalStatus};

/// How many of the most recent records feed the slope fit.
const PROJECTION_WINDOW: usize = 6;
/// Exercises with fewer records than this are not projected.
const MIN_RECORDS: usize = 3;
/// Projected growth over the horizon, as a fraction of the current e1RM.
const MIN_GROWTH: f64 = 0.02;
const MAX_GROWTH: f64 = 0.10;

// ---------------------------------------------------------------------------
/// Projection output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
  pub exercise: String,
  /// Best top-set e1RM inside the window, the baseline the target grows from
  pub base: f64,
  /// Fitted e1RM change per week across the window
  pub per_week: f64,
  /// Growth fraction after clamping, applied to the base
  pub growth_pct: f64,
  pub target_value: f64,
  pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
  pub current: f64,
  pub target: f64,
  /// 0 to 100, capped at the target
  pub pct: f64,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project an e1RM goal for every exercise with enough history.
///
/// Records are windowed to the most recent [`PROJECTION_WINDOW`], the elapsed
/// span is floored at one week, and growth over the horizon is clamped to
/// [`MIN_GROWTH`]..[`MAX_GROWTH`] of the current e1RM.
pub fn project_goals(history: &ExerciseHistory, horizon_weeks: u32) -> Vec<GoalProjection> {
  let today = Utc::now().date_naive();
  history
    .exercise_names()
    .filter_map(|name| project_exercise(history, name, horizon_weeks, today))
    .collect()
}

fn project_exercise(
  history: &ExerciseHistory,
  exercise: &str,
  horizon_weeks: u32,
  today: NaiveDate,
) -> Option<GoalProjection> {
  let records = history.for_exercise(exercise);
  if records.len() < MIN_RECORDS {
    return None;
  }

  // Records are newest-first; the window reads oldest to newest.
  let window: Vec<_> = records.iter().take(PROJECTION_WINDOW).rev().collect();
  let first = window.first()?;
  let last = window.last()?;

  // The baseline is the best e1RM in the window, not necessarily the newest.
  let base = window.iter().map(|r| r.top_e1rm).fold(0.0_f64, f64::max);
  if base <= 0.0 {
    return None;
  }

  // A same-day or very tight cluster still counts as a week of training.
  let elapsed_days = (last.date - first.date).num_days().max(7);
  let weeks = elapsed_days as f64 / 7.0;
  let per_week = (last.top_e1rm - first.top_e1rm) / weeks;

  let growth_pct = (per_week * f64::from(horizon_weeks) / base).clamp(MIN_GROWTH, MAX_GROWTH);
  let target_value = round_to(base * (1.0 + growth_pct), 0.5);
  let due_date = today + Duration::days(i64::from(horizon_weeks) * 7);

  Some(GoalProjection {
    exercise: exercise.to_string(),
    base,
    per_week,
    growth_pct,
    target_value,
    due_date,
  })
}

// ---------------------------------------------------------------------------
// Goal reconciliation
// ---------------------------------------------------------------------------

/// Merge projections into an existing goal list.
///
/// Active auto-style (e1RM) goals for a projected exercise are replaced by
/// the fresh projection; everything else, including done and archived goals,
/// is kept as-is.
pub fn apply_auto_goals(goals: &[Goal], projections: &[GoalProjection]) -> Vec<Goal> {
  let mut merged: Vec<Goal> = goals
    .iter()
    .filter(|goal| {
      let superseded = goal.metric == GoalMetric::E1rm
        && goal.status == GoalStatus::Active
        && projections.iter().any(|p| p.exercise == goal.exercise);
      !superseded
    })
    .cloned()
    .collect();

  for projection in projections {
    merged.push(Goal::new(
      &projection.exercise,
      GoalMetric::E1rm,
      projection.target_value,
      Some(projection.due_date),
    ));
  }

  merged
}

/// Best-so-far value for the goal's metric, measured against its target.
pub fn goal_progress(goal: &Goal, history: &ExerciseHistory) -> GoalProgress {
  let records = history.for_exercise(&goal.exercise);
  let current = records
    .iter()
    .map(|record| match goal.metric {
      GoalMetric::E1rm => record.top_e1rm,
      GoalMetric::TopSetWeight => record.top_set.weight,
      GoalMetric::Volume => record.volume,
    })
    .fold(0.0_f64, f64::max);

  let pct = if goal.target_value > 0.0 {
    (current / goal.target_value * 100.0).clamp(0.0, 100.0)
  } else {
    0.0
  };

  GoalProgress {
    current,
    target: goal.target_value,
    pct,
  }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::test_utils::{mock_entry, mock_session, mock_set};

  /// One session per (days_ago, e1RM) point. Thirty-rep sets make the Epley
  /// factor exactly 2, so the stored e1RM is exactly the requested value.
  fn e1rm_history(points: &[(i64, f64)]) -> ExerciseHistory {
    let sessions: Vec<_> = points
      .iter()
      .map(|(days_ago, e1rm)| {
        mock_session(
          *days_ago,
          vec![mock_entry("Bench Press", vec![mock_set(e1rm / 2.0, 30)])],
        )
      })
      .collect();
    ExerciseHistory::compute(&sessions)
  }

  #[test]
  fn test_fast_progress_clamps_at_max_growth() {
    // e1RM 200 -> 210 -> 220 over four weeks projects far past 10%
    let history = e1rm_history(&[(28, 200.0), (14, 210.0), (0, 220.0)]);

    let projections = project_goals(&history, 6);

    assert_eq!(projections.len(), 1);
    let p = &projections[0];
    assert_approx_eq!(p.base, 220.0);
    assert_approx_eq!(p.growth_pct, 0.10);
    assert_approx_eq!(p.target_value, 242.0);
  }

  #[test]
  fn test_flat_progress_clamps_at_min_growth() {
    let history = e1rm_history(&[(28, 200.0), (14, 200.0), (0, 200.0)]);

    let projections = project_goals(&history, 6);

    let p = &projections[0];
    assert_approx_eq!(p.growth_pct, 0.02);
    assert_approx_eq!(p.target_value, 204.0);
  }

  #[test]
  fn test_declining_history_still_projects_positive_growth() {
    let history = e1rm_history(&[(28, 220.0), (14, 210.0), (0, 200.0)]);

    let projections = project_goals(&history, 6);

    let p = &projections[0];
    assert_approx_eq!(p.growth_pct, 0.02);
    assert!(p.target_value > p.base);
  }

  #[test]
  fn test_moderate_progress_is_unclamped() {
    // 1 per week over six weeks, 6/220 sits inside the clamp band
    let history = e1rm_history(&[(42, 214.0), (21, 217.0), (0, 220.0)]);

    let projections = project_goals(&history, 6);

    let p = &projections[0];
    assert_approx_eq!(p.per_week, 1.0);
    assert_approx_eq!(p.target_value, 226.0);
  }

  #[test]
  fn test_elapsed_span_floors_at_one_week() {
    // Three sessions inside three days read as one week, not a fraction
    let history = e1rm_history(&[(3, 214.0), (1, 217.0), (0, 220.0)]);

    let projections = project_goals(&history, 6);

    assert_approx_eq!(projections[0].per_week, 6.0);
  }

  #[test]
  fn test_window_ignores_older_records() {
    // Two ancient outliers beyond the six-record window must not skew the fit
    let history = e1rm_history(&[
      (120, 500.0),
      (110, 500.0),
      (42, 214.0),
      (35, 215.0),
      (28, 216.0),
      (21, 217.0),
      (14, 218.0),
      (0, 220.0),
    ]);

    let projections = project_goals(&history, 6);

    assert_approx_eq!(projections[0].per_week, 1.0);
  }

  #[test]
  fn test_too_few_records_is_not_projected() {
    let history = e1rm_history(&[(14, 210.0), (0, 220.0)]);
    assert!(project_goals(&history, 6).is_empty());
  }

  #[test]
  fn test_due_date_matches_horizon() {
    let history = e1rm_history(&[(28, 200.0), (14, 210.0), (0, 220.0)]);

    let projections = project_goals(&history, 6);

    let expected = Utc::now().date_naive() + Duration::days(42);
    assert_eq!(projections[0].due_date, expected);
  }

  #[test]
  fn test_apply_auto_goals_replaces_active_e1rm_goals() {
    let history = e1rm_history(&[(28, 200.0), (14, 210.0), (0, 220.0)]);
    let projections = project_goals(&history, 6);

    let stale = Goal::new("Bench Press", GoalMetric::E1rm, 205.0, None);
    let mut done = Goal::new("Bench Press", GoalMetric::E1rm, 180.0, None);
    done.mark_done();
    let volume = Goal::new("Bench Press", GoalMetric::Volume, 10_000.0, None);
    let other = Goal::new("Squat", GoalMetric::E1rm, 300.0, None);

    let merged = apply_auto_goals(&[stale, done.clone(), volume.clone(), other.clone()], &projections);

    // Stale active goal replaced; done, volume, and other-exercise goals kept
    assert_eq!(merged.len(), 4);
    assert!(merged.iter().any(|g| g.id == done.id));
    assert!(merged.iter().any(|g| g.id == volume.id));
    assert!(merged.iter().any(|g| g.id == other.id));
    let fresh = merged
      .iter()
      .find(|g| g.exercise == "Bench Press" && g.metric == GoalMetric::E1rm && g.status == GoalStatus::Active)
      .unwrap();
    assert_approx_eq!(fresh.target_value, 242.0);
  }

  #[test]
  fn test_goal_progress_uses_best_value_for_metric() {
    // Top-set weight peaked mid-history at 220
    let sessions = vec![
      mock_session(28, vec![mock_entry("Bench Press", vec![mock_set(200.0, 5)])]),
      mock_session(14, vec![mock_entry("Bench Press", vec![mock_set(220.0, 3)])]),
      mock_session(0, vec![mock_entry("Bench Press", vec![mock_set(210.0, 5)])]),
    ];
    let history = ExerciseHistory::compute(&sessions);

    let goal = Goal::new("Bench Press", GoalMetric::TopSetWeight, 240.0, None);
    let progress = goal_progress(&goal, &history);

    assert_approx_eq!(progress.current, 220.0);
    assert_approx_eq!(progress.pct, 220.0 / 240.0 * 100.0);
  }

  #[test]
  fn test_goal_progress_caps_at_one_hundred() {
    let sessions = vec![
      mock_session(14, vec![mock_entry("Bench Press", vec![mock_set(250.0, 3)])]),
      mock_session(0, vec![mock_entry("Bench Press", vec![mock_set(260.0, 3)])]),
    ];
    let history = ExerciseHistory::compute(&sessions);

    let goal = Goal::new("Bench Press", GoalMetric::TopSetWeight, 240.0, None);
    let progress = goal_progress(&goal, &history);

    assert_approx_eq!(progress.pct, 100.0);
  }

  #[test]
  fn test_goal_progress_with_zero_target_is_zero() {
    let history = e1rm_history(&[(0, 200.0)]);
    let goal = Goal::new("Bench Press", GoalMetric::E1rm, 0.0, None);

    assert_approx_eq!(goal_progress(&goal, &history).pct, 0.0);
  }
}
