use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::template::SetKind;

/// One finalized set. Only produced by the session save boundary, so every
/// numeric field is finite and non-negative and at least one of weight/reps
/// is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSet {
  pub weight: f64,
  pub reps: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rpe: Option<f64>,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub notes: String,
  #[serde(default)]
  pub set_kind: SetKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExerciseEntry {
  pub exercise_id: String,
  pub exercise_name: String,
  pub sets: Vec<SessionSet>,
}

/// A completed, logged workout. Immutable once saved except for deletion.
/// The template name is denormalized so the session survives template
/// deletion intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
  pub id: String,
  pub date: NaiveDate,
  pub template_id: String,
  pub template_name: String,
  pub entries: Vec<SessionExerciseEntry>,
}

impl Session {
  pub fn new(
    date: NaiveDate,
    template_id: impl Into<String>,
    template_name: impl Into<String>,
    entries: Vec<SessionExerciseEntry>,
  ) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      date,
      template_id: template_id.into(),
      template_name: template_name.into(),
      entries,
    }
  }
}
