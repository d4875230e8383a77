use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ---------------------------------------------------------------------------
/// Goal Metric
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMetric {
  /// Estimated one-rep max (the metric auto-goals project)
  E1rm,
  /// Heaviest weight in a single top set
  TopSetWeight,
  /// Total weight x reps in one session entry
  Volume,
}

impl std::fmt::Display for GoalMetric {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::E1rm => write!(f, "e1rm"),
      Self::TopSetWeight => write!(f, "top_set_weight"),
      Self::Volume => write!(f, "volume"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Goal Status: one-way lifecycle
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum GoalStatus {
  #[default]
  Active,
  Done,
  Archived,
}

impl std::fmt::Display for GoalStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Active => write!(f, "active"),
      Self::Done => write!(f, "done"),
      Self::Archived => write!(f, "archived"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Goal
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
  pub id: String,
  /// Target exercise, matched by name against the history
  pub exercise: String,
  pub metric: GoalMetric,
  pub target_value: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub due_date: Option<NaiveDate>,
  #[serde(default)]
  pub status: GoalStatus,
}

impl Goal {
  pub fn new(
    exercise: impl Into<String>,
    metric: GoalMetric,
    target_value: f64,
    due_date: Option<NaiveDate>,
  ) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      exercise: exercise.into(),
      metric,
      target_value,
      due_date,
      status: GoalStatus::Active,
    }
  }

  /// Active -> Done. Returns false when the transition is not allowed
  /// (status moves are one-way; there is no un-archiving).
  pub fn mark_done(&mut self) -> bool {
    if self.status == GoalStatus::Active {
      self.status = GoalStatus::Done;
      true
    } else {
      false
    }
  }

  /// Active or Done -> Archived
  pub fn archive(&mut self) -> bool {
    if self.status == GoalStatus::Archived {
      false
    } else {
      self.status = GoalStatus::Archived;
      true
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_goal_starts_active() {
    let goal = Goal::new("Bench Press", GoalMetric::E1rm, 250.0, None);
    assert_eq!(goal.status, GoalStatus::Active);
  }

  #[test]
  fn test_status_transitions_are_one_way() {
    let mut goal = Goal::new("Bench Press", GoalMetric::E1rm, 250.0, None);

    assert!(goal.mark_done());
    assert_eq!(goal.status, GoalStatus::Done);
    // Already done, no second transition
    assert!(!goal.mark_done());

    assert!(goal.archive());
    assert_eq!(goal.status, GoalStatus::Archived);
    // Archived is terminal
    assert!(!goal.archive());
    assert!(!goal.mark_done());
    assert_eq!(goal.status, GoalStatus::Archived);
  }

  #[test]
  fn test_archive_straight_from_active() {
    let mut goal = Goal::new("Deadlift", GoalMetric::Volume, 8000.0, None);
    assert!(goal.archive());
    assert_eq!(goal.status, GoalStatus::Archived);
  }

  #[test]
  fn test_metric_serializes_snake_case() {
    let json = serde_json::to_string(&GoalMetric::TopSetWeight).unwrap();
    assert_eq!(json, r#""top_set_weight""#);
    assert_eq!(GoalMetric::TopSetWeight.to_string(), "top_set_weight");
  }
}
