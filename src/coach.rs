//! Coach package interchange
//!
//! A coach exports templates, a weekly schedule, and goals as one tagged
//! JSON document; a client imports it into their own state. Imported
//! templates and goals get fresh ids so repeated imports never collide, and
//! schedule slots are rewired through the id remap. A package that fails to
//! parse changes nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::{Goal, Schedule, Template};
use crate::state::AppState;

/// Tag identifying a coach package among arbitrary shared JSON documents.
pub const COACH_PACKAGE_TYPE: &str = "forgefit_coach_package";

/// ---------------------------------------------------------------------------
/// Package shape
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachPackage {
  #[serde(rename = "type")]
  pub package_type: String,
  #[serde(default)]
  pub templates: Vec<Template>,
  #[serde(default)]
  pub schedule: Schedule,
  #[serde(default)]
  pub goals: Vec<Goal>,
}

#[derive(Debug, Error, PartialEq, Eq, Serialize)]
pub enum ImportError {
  #[error("Coach package is not valid JSON: {0}")]
  Parse(String),
  #[error("Not a coach package (found type '{0}')")]
  WrongType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub templates: usize,
  pub goals: usize,
}

/// ---------------------------------------------------------------------------
/// Export / import
/// ---------------------------------------------------------------------------

/// Bundle the coach-relevant slice of state for sharing. Sessions stay
/// private to the client.
pub fn export_package(state: &AppState) -> CoachPackage {
  CoachPackage {
    package_type: COACH_PACKAGE_TYPE.to_string(),
    templates: state.templates.clone(),
    schedule: state.settings.schedule.clone(),
    goals: state.goals.clone(),
  }
}

pub fn parse_package(raw: &str) -> Result<CoachPackage, ImportError> {
  let package: CoachPackage =
    serde_json::from_str(raw).map_err(|err| ImportError::Parse(err.to_string()))?;
  if package.package_type != COACH_PACKAGE_TYPE {
    return Err(ImportError::WrongType(package.package_type));
  }
  Ok(package)
}

/// Merge a coach package into the state.
///
/// Templates and goals are appended under fresh ids; the incoming schedule
/// replaces the current one with its slots rewired through the template id
/// remap. Slot values with no remap entry, the rest/unassigned sentinels
/// included, pass through unchanged. On any parse failure the state is left
/// completely untouched.
pub fn import_package(state: &mut AppState, raw: &str) -> Result<ImportSummary, ImportError> {
  let package = parse_package(raw)?;

  let mut id_map: HashMap<String, String> = HashMap::new();
  let mut templates = package.templates;
  for template in &mut templates {
    let fresh = Uuid::new_v4().to_string();
    let old = std::mem::replace(&mut template.id, fresh.clone());
    id_map.insert(old, fresh);
  }

  let mut schedule = package.schedule;
  for slot in schedule.slots_mut() {
    if let Some(mapped) = id_map.get(slot.as_str()) {
      *slot = mapped.clone();
    }
  }

  let mut goals = package.goals;
  for goal in &mut goals {
    goal.id = Uuid::new_v4().to_string();
  }

  let summary = ImportSummary {
    templates: templates.len(),
    goals: goals.len(),
  };

  state.templates.extend(templates);
  state.goals.extend(goals);
  state.settings.schedule = schedule;

  info!(
    "Imported coach package: {} templates, {} goals",
    summary.templates, summary.goals
  );
  Ok(summary)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
