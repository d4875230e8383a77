use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ---------------------------------------------------------------------------
/// Set Kind: straight sets vs intensity techniques
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum SetKind {
  /// Plain straight sets
  #[default]
  Normal,
  /// Last set continues at reduced weight after reaching failure
  Dropset,
  /// Two exercises performed back-to-back, sharing a group tag
  Superset,
  /// Three exercises performed back-to-back, sharing a group tag
  Triset,
  /// Open-ended group of exercises performed as rounds
  Circuit,
}

impl SetKind {
  /// Whether this kind groups multiple exercises under a shared tag
  pub fn is_grouped(&self) -> bool {
    matches!(self, Self::Superset | Self::Triset | Self::Circuit)
  }

  /// Minimum member count for a run of same-tag exercises to form a group
  pub fn min_members(&self) -> usize {
    match self {
      Self::Triset => 3,
      Self::Superset | Self::Circuit => 2,
      Self::Normal | Self::Dropset => 1,
    }
  }
}

impl std::fmt::Display for SetKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Normal => write!(f, "normal"),
      Self::Dropset => write!(f, "dropset"),
      Self::Superset => write!(f, "superset"),
      Self::Triset => write!(f, "triset"),
      Self::Circuit => write!(f, "circuit"),
    }
  }
}

impl std::str::FromStr for SetKind {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "normal" => Ok(Self::Normal),
      "dropset" => Ok(Self::Dropset),
      "superset" => Ok(Self::Superset),
      "triset" => Ok(Self::Triset),
      "circuit" => Ok(Self::Circuit),
      _ => Err(format!("Unknown set kind: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Time Unit: timed movements log a duration instead of reps
/// ---------------------------------------------------------------------------

/// When set on an exercise, the reps column records a duration in this unit
/// (planks in seconds, treadmill walks in minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
  Seconds,
  Minutes,
}

impl std::fmt::Display for TimeUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Seconds => write!(f, "seconds"),
      Self::Minutes => write!(f, "minutes"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Template Exercise
/// ---------------------------------------------------------------------------

/// Target rep window for double progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
  pub min: u32,
  pub max: u32,
}

impl RepRange {
  pub fn new(min: u32, max: u32) -> Self {
    Self { min, max }
  }
}

/// One prescribed movement within a template. Immutable once logged against;
/// the template editor replaces the whole exercise list on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
  pub id: String,
  pub name: String,
  pub default_sets: u32,
  pub rep_range: RepRange,
  pub rest_seconds: u32,
  /// Weight increment used when progression bumps the load
  pub weight_step: f64,
  pub auto_progress: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_unit: Option<TimeUnit>,
  #[serde(default)]
  pub set_kind: SetKind,
  /// Shared tag linking superset/triset/circuit members (e.g. "A", "B")
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
}

impl TemplateExercise {
  pub fn new(name: impl Into<String>, default_sets: u32, rep_range: RepRange) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      name: name.into(),
      default_sets,
      rep_range,
      rest_seconds: 90,
      weight_step: 5.0,
      auto_progress: true,
      time_unit: None,
      set_kind: SetKind::Normal,
      group: None,
    }
  }

  /// Timed movements log durations and are sequenced after strength work
  pub fn is_timed(&self) -> bool {
    self.time_unit.is_some()
  }
}

/// ---------------------------------------------------------------------------
/// Template
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
  pub id: String,
  pub name: String,
  pub exercises: Vec<TemplateExercise>,
}

impl Template {
  pub fn new(name: impl Into<String>, exercises: Vec<TemplateExercise>) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      name: name.into(),
      exercises,
    }
  }

  pub fn exercise(&self, exercise_id: &str) -> Option<&TemplateExercise> {
    self.exercises.iter().find(|e| e.id == exercise_id)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
