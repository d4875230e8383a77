//! Application state and migration
//!
//! [`AppState`] is the whole engine-visible world: templates, the session
//! log, goals, and settings. Persistence lives outside the engine; the state
//! crosses that boundary as plain serde JSON. Incoming payloads go through
//! [`migrate`], which fills defaults field by field and skips malformed
//! entries instead of failing the whole load, so one corrupt record never
//! takes the training history down with it.

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::history::ExerciseHistory;
use crate::models::{Goal, Schedule, ScheduledSlot, Session, Settings, Template};
use crate::projector;

/// Bump when the persisted shape changes incompatibly.
pub const STATE_VERSION: u32 = 1;

/// ---------------------------------------------------------------------------
/// AppState
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
  pub version: u32,
  pub templates: Vec<Template>,
  pub sessions: Vec<Session>,
  pub goals: Vec<Goal>,
  pub settings: Settings,
}

impl Default for AppState {
  fn default() -> Self {
    Self {
      version: STATE_VERSION,
      templates: Vec::new(),
      sessions: Vec::new(),
      goals: Vec::new(),
      settings: Settings::default(),
    }
  }
}

impl AppState {
  pub fn template(&self, template_id: &str) -> Option<&Template> {
    self.templates.iter().find(|t| t.id == template_id)
  }

  /// Append a completed session to the log
  pub fn log_session(&mut self, session: Session) {
    info!(
      "Logged session '{}' on {} with {} exercises",
      session.template_name,
      session.date,
      session.entries.len()
    );
    self.sessions.push(session);
  }

  pub fn delete_session(&mut self, session_id: &str) -> bool {
    let before = self.sessions.len();
    self.sessions.retain(|s| s.id != session_id);
    self.sessions.len() < before
  }

  /// Delete a template and clear its schedule slots. Past sessions keep
  /// their denormalized template name and are left alone.
  pub fn delete_template(&mut self, template_id: &str) -> bool {
    let before = self.templates.len();
    self.templates.retain(|t| t.id != template_id);
    let deleted = self.templates.len() < before;
    if deleted {
      self.settings.schedule.remove_template(template_id);
    }
    deleted
  }

  /// Recompute the per-exercise history read model from the session log
  pub fn history(&self) -> ExerciseHistory {
    ExerciseHistory::compute(&self.sessions)
  }

  /// Project fresh auto-goals over the configured horizon and merge them
  /// into the goal list. Returns how many exercises were projected.
  pub fn apply_auto_goals(&mut self) -> usize {
    let projections = projector::project_goals(&self.history(), self.settings.goal_horizon_weeks);
    self.goals = projector::apply_auto_goals(&self.goals, &projections);
    info!("Applied auto-goals for {} exercises", projections.len());
    projections.len()
  }

  /// Resolve what the plan says for a calendar date
  pub fn resolve_for_date(&self, date: NaiveDate) -> DayPlan {
    match self.settings.schedule.resolve_slot(date.weekday()) {
      ScheduledSlot::Unassigned => DayPlan::Unassigned,
      ScheduledSlot::Rest => DayPlan::Rest,
      ScheduledSlot::Template(template_id) => match self.template(&template_id) {
        Some(template) => DayPlan::Workout {
          template: template.clone(),
        },
        // A slot naming a deleted template degrades instead of failing
        None => DayPlan::Missing { template_id },
      },
    }
  }
}

/// What the schedule prescribes for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DayPlan {
  Unassigned,
  Rest,
  Workout { template: Template },
  Missing { template_id: String },
}

/// ---------------------------------------------------------------------------
/// Migration
/// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrateError {
  #[error("State payload is not a JSON object")]
  NotAnObject,
  #[error("State version {0} is newer than this engine supports")]
  VersionTooNew(u32),
}

/// Coerce a raw persisted payload into the current [`AppState`] shape.
///
/// Missing fields get defaults, malformed list entries are skipped with a
/// warning, and malformed settings fall back field by field. A payload with
/// no version is treated as version 1. Only a newer-than-supported version
/// or a non-object payload is rejected outright.
pub fn migrate(raw: Value) -> Result<AppState, MigrateError> {
  let Value::Object(map) = raw else {
    return Err(MigrateError::NotAnObject);
  };

  let version = map
    .get("version")
    .and_then(Value::as_u64)
    .map(|v| v as u32)
    .unwrap_or(1);
  if version > STATE_VERSION {
    return Err(MigrateError::VersionTooNew(version));
  }

  Ok(AppState {
    version: STATE_VERSION,
    templates: collect_entries(map.get("templates"), "template"),
    sessions: collect_entries(map.get("sessions"), "session"),
    goals: collect_entries(map.get("goals"), "goal"),
    settings: migrate_settings(map.get("settings")),
  })
}

fn collect_entries<T: DeserializeOwned>(value: Option<&Value>, label: &str) -> Vec<T> {
  let Some(Value::Array(items)) = value else {
    return Vec::new();
  };
  items
    .iter()
    .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
      Ok(parsed) => Some(parsed),
      Err(err) => {
        warn!("Skipping malformed {} during state migration: {}", label, err);
        None
      }
    })
    .collect()
}

fn migrate_settings(value: Option<&Value>) -> Settings {
  let defaults = Settings::default();
  let Some(Value::Object(map)) = value else {
    return defaults;
  };

  Settings {
    unit: map
      .get("unit")
      .and_then(|v| serde_json::from_value(v.clone()).ok())
      .unwrap_or(defaults.unit),
    strict_rep_range_for_progress: map
      .get("strict_rep_range_for_progress")
      .and_then(Value::as_bool)
      .unwrap_or(defaults.strict_rep_range_for_progress),
    goal_horizon_weeks: map
      .get("goal_horizon_weeks")
      .and_then(Value::as_u64)
      .map(|v| v as u32)
      .unwrap_or(defaults.goal_horizon_weeks),
    schedule: map
      .get("schedule")
      .and_then(|v| serde_json::from_value::<Schedule>(v.clone()).ok())
      .unwrap_or(defaults.schedule),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{GoalMetric, WeightUnit};
  use crate::test_utils::{mock_entry, mock_exercise, mock_session, mock_set};
  use chrono::{Utc, Weekday};
  use serde_json::json;

  fn state_with_template() -> (AppState, String) {
    let template = Template::new("Push", vec![mock_exercise("Bench Press")]);
    let id = template.id.clone();
    let state = AppState {
      templates: vec![template],
      ..AppState::default()
    };
    (state, id)
  }

  #[test]
  fn test_migrate_round_trips_current_state() {
    let (mut state, _) = state_with_template();
    state.goals.push(Goal::new("Bench Press", GoalMetric::E1rm, 250.0, None));
    state.sessions.push(mock_session(
      2,
      vec![mock_entry("Bench Press", vec![mock_set(185.0, 8)])],
    ));

    let raw = serde_json::to_value(&state).unwrap();
    let migrated = migrate(raw).unwrap();

    assert_eq!(migrated, state);
  }

  #[test]
  fn test_migrate_fills_missing_fields_with_defaults() {
    let migrated = migrate(json!({})).unwrap();

    assert_eq!(migrated.version, STATE_VERSION);
    assert!(migrated.templates.is_empty());
    assert!(migrated.sessions.is_empty());
    assert!(migrated.goals.is_empty());
    assert_eq!(migrated.settings, Settings::default());
  }

  #[test]
  fn test_migrate_skips_malformed_entries() {
    let template = Template::new("Push", vec![]);
    let raw = json!({
      "version": 1,
      "templates": [template, {"not": "a template"}, 42],
    });

    let migrated = migrate(raw).unwrap();

    assert_eq!(migrated.templates.len(), 1);
    assert_eq!(migrated.templates[0].name, "Push");
  }

  #[test]
  fn test_migrate_rejects_newer_version() {
    let result = migrate(json!({"version": 99}));
    assert_eq!(result.unwrap_err(), MigrateError::VersionTooNew(99));
  }

  #[test]
  fn test_migrate_rejects_non_object() {
    assert_eq!(migrate(json!([1, 2, 3])).unwrap_err(), MigrateError::NotAnObject);
    assert_eq!(migrate(json!("state")).unwrap_err(), MigrateError::NotAnObject);
  }

  #[test]
  fn test_migrate_settings_fall_back_per_field() {
    let raw = json!({
      "settings": {
        "unit": "kg",
        "goal_horizon_weeks": "soon",
        "schedule": {"monday": "t-1"},
      }
    });

    let migrated = migrate(raw).unwrap();

    assert_eq!(migrated.settings.unit, WeightUnit::Kg);
    // Malformed horizon falls back to the default without poisoning the rest
    assert_eq!(migrated.settings.goal_horizon_weeks, 6);
    assert!(migrated.settings.strict_rep_range_for_progress);
    assert_eq!(migrated.settings.schedule.monday, "t-1");
  }

  #[test]
  fn test_migrate_defaults_missing_version_to_one() {
    let migrated = migrate(json!({"templates": []})).unwrap();
    assert_eq!(migrated.version, STATE_VERSION);
  }

  #[test]
  fn test_log_and_delete_session() {
    crate::test_utils::init_test_tracing();
    let mut state = AppState::default();
    let session = mock_session(1, vec![mock_entry("Bench Press", vec![mock_set(185.0, 5)])]);
    let id = session.id.clone();

    state.log_session(session);
    assert_eq!(state.sessions.len(), 1);

    assert!(state.delete_session(&id));
    assert!(state.sessions.is_empty());
    assert!(!state.delete_session(&id));
  }

  #[test]
  fn test_logged_session_becomes_newest_history_record() {
    let (mut state, id) = state_with_template();
    state.sessions.push(mock_session(
      7,
      vec![mock_entry("Bench Press", vec![mock_set(180.0, 8)])],
    ));

    // Save through the full draft path, then log and re-aggregate
    let template = state.template(&id).unwrap().clone();
    let mut entries = crate::workout::build_working_entries(&template, &[]);
    entries[0].sets[0].weight = "185".to_string();
    entries[0].sets[0].reps = "8".to_string();
    let session = crate::workout::build_session(Some(&template), &entries).unwrap();
    state.log_session(session);

    let record = state.history().latest("Bench Press").unwrap().clone();
    assert_eq!(record.top_set.weight, 185.0);
    assert_eq!(record.top_set.reps, 8);
    assert_eq!(record.date, Utc::now().date_naive());
  }

  #[test]
  fn test_delete_template_clears_schedule_and_keeps_sessions() {
    let (mut state, id) = state_with_template();
    state.settings.schedule.set_slot(Weekday::Mon, id.clone());
    state.sessions.push(mock_session(
      3,
      vec![mock_entry("Bench Press", vec![mock_set(185.0, 5)])],
    ));

    assert!(state.delete_template(&id));

    assert!(state.templates.is_empty());
    assert_eq!(
      state.settings.schedule.resolve_slot(Weekday::Mon),
      ScheduledSlot::Unassigned
    );
    // The session log survives the template
    assert_eq!(state.sessions.len(), 1);
    assert!(!state.delete_template(&id));
  }

  #[test]
  fn test_apply_auto_goals_projects_from_history() {
    let mut state = AppState::default();
    for days_ago in [28, 14, 0] {
      state.sessions.push(mock_session(
        days_ago,
        vec![mock_entry("Bench Press", vec![mock_set(100.0, 30)])],
      ));
    }

    let projected = state.apply_auto_goals();

    assert_eq!(projected, 1);
    assert_eq!(state.goals.len(), 1);
    assert_eq!(state.goals[0].exercise, "Bench Press");
    assert_eq!(state.goals[0].metric, GoalMetric::E1rm);
  }

  #[test]
  fn test_apply_auto_goals_is_idempotent_per_exercise() {
    let mut state = AppState::default();
    for days_ago in [28, 14, 0] {
      state.sessions.push(mock_session(
        days_ago,
        vec![mock_entry("Bench Press", vec![mock_set(100.0, 30)])],
      ));
    }

    state.apply_auto_goals();
    state.apply_auto_goals();

    assert_eq!(state.goals.len(), 1);
  }

  #[test]
  fn test_resolve_for_date_covers_all_outcomes() {
    let (mut state, id) = state_with_template();
    state.settings.schedule.set_slot(Weekday::Mon, id.clone());
    state.settings.schedule.set_slot(Weekday::Tue, Schedule::REST);
    state.settings.schedule.set_slot(Weekday::Wed, "deleted-id");

    // 2025-06-02 is a Monday
    let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    match state.resolve_for_date(monday) {
      DayPlan::Workout { template } => assert_eq!(template.id, id),
      other => panic!("expected workout, got {:?}", other),
    }

    let tuesday = monday.succ_opt().unwrap();
    assert_eq!(state.resolve_for_date(tuesday), DayPlan::Rest);

    let wednesday = tuesday.succ_opt().unwrap();
    assert_eq!(
      state.resolve_for_date(wednesday),
      DayPlan::Missing {
        template_id: "deleted-id".to_string()
      }
    );

    let thursday = wednesday.succ_opt().unwrap();
    assert_eq!(state.resolve_for_date(thursday), DayPlan::Unassigned);
  }
}
