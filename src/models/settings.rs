use serde::{Deserialize, Serialize};

use super::schedule::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum WeightUnit {
  Kg,
  #[default]
  Lb,
}

impl WeightUnit {
  /// Default jump for barbell compound lifts (smallest sensible plate pair)
  pub fn compound_increment(&self) -> f64 {
    match self {
      Self::Kg => 2.5,
      Self::Lb => 5.0,
    }
  }

  /// Default jump for isolation and machine work
  pub fn isolation_increment(&self) -> f64 {
    match self {
      Self::Kg => 1.25,
      Self::Lb => 2.5,
    }
  }
}

impl std::fmt::Display for WeightUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Kg => write!(f, "kg"),
      Self::Lb => write!(f, "lb"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
  pub unit: WeightUnit,
  /// Strict mode caps rep suggestions at the range max before a weight bump;
  /// lenient mode increments reps freely until the max is reached.
  pub strict_rep_range_for_progress: bool,
  /// How far out auto-goals project
  pub goal_horizon_weeks: u32,
  pub schedule: Schedule,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      unit: WeightUnit::Lb,
      strict_rep_range_for_progress: true,
      goal_horizon_weeks: 6,
      schedule: Schedule::default(),
    }
  }
}
