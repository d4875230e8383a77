//! Session Builder
//!
//! Expands a template into editable working entries for a session in
//! progress. Set rows hold raw strings until save so partial or malformed
//! input never breaks the editing flow; the save boundary coerces, filters
//! empty sets, and produces an immutable [`Session`].
//!
//! Working state is replaced wholesale on every mutation (never patched in
//! place) so grouping and step sequencing always recompute from a consistent
//! snapshot.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::advisor::ProgressionSuggestion;
use crate::metrics::{coerce_count, coerce_rpe, coerce_weight};
use crate::models::{Session, SessionExerciseEntry, SessionSet, Template, TemplateExercise};

/// ---------------------------------------------------------------------------
/// Working state
/// ---------------------------------------------------------------------------

/// One editable set row. Everything is a string straight from the input
/// field; parsing happens only at save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingSet {
  pub weight: String,
  pub reps: String,
  pub rpe: String,
  pub notes: String,
  pub set_kind: String,
  pub group: String,
}

impl WorkingSet {
  /// Blank row inheriting the exercise's set kind and group tag
  fn blank(hint: &TemplateExercise) -> Self {
    Self {
      weight: String::new(),
      reps: String::new(),
      rpe: String::new(),
      notes: String::new(),
      set_kind: hint.set_kind.to_string(),
      group: hint.group.clone().unwrap_or_default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingEntry {
  pub exercise_id: String,
  pub exercise_name: String,
  /// Read-only copy of the template exercise, for display and grouping
  pub hint: TemplateExercise,
  pub sets: Vec<WorkingSet>,
}

/// ---------------------------------------------------------------------------
/// Building and editing
/// ---------------------------------------------------------------------------

/// One working entry per template exercise with `default_sets` blank rows
/// (minimum one). When the advisor has a suggestion for an exercise, only
/// the first row is pre-filled; later rows stay blank.
pub fn build_working_entries(
  template: &Template,
  suggestions: &[ProgressionSuggestion],
) -> Vec<WorkingEntry> {
  template
    .exercises
    .iter()
    .map(|exercise| {
      let rows = exercise.default_sets.max(1) as usize;
      let mut sets: Vec<WorkingSet> = (0..rows).map(|_| WorkingSet::blank(exercise)).collect();

      if let Some(suggestion) = suggestions.iter().find(|s| s.exercise_id == exercise.id) {
        sets[0].weight = suggestion.next.weight.to_string();
        sets[0].reps = suggestion.next.reps.to_string();
      }

      WorkingEntry {
        exercise_id: exercise.id.clone(),
        exercise_name: exercise.name.clone(),
        hint: exercise.clone(),
        sets,
      }
    })
    .collect()
}

/// Return a new entry list with a blank set appended to the given exercise.
///
/// When the exercise belongs to a superset/triset/circuit, every member
/// sharing its kind and group tag gets a matching blank row so group set
/// counts stay synchronized for interleaving.
pub fn with_added_set(entries: &[WorkingEntry], exercise_id: &str) -> Vec<WorkingEntry> {
  let Some(target) = entries.iter().find(|e| e.exercise_id == exercise_id) else {
    return entries.to_vec();
  };

  let group_tag = if target.hint.set_kind.is_grouped() {
    target.hint.group.clone().filter(|tag| !tag.is_empty())
  } else {
    None
  };

  entries
    .iter()
    .map(|entry| {
      let grows = match &group_tag {
        Some(tag) => {
          entry.hint.set_kind == target.hint.set_kind
            && entry.hint.group.as_deref() == Some(tag.as_str())
        }
        None => entry.exercise_id == exercise_id,
      };

      let mut entry = entry.clone();
      if grows {
        entry.sets.push(WorkingSet::blank(&entry.hint));
      }
      entry
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Save boundary
/// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Serialize)]
pub enum SaveError {
  #[error("No template selected for this session")]
  NoTemplateSelected,
  #[error("No completed sets to save")]
  NoQualifyingSets,
}

/// Coerce the draft into a finalized [`Session`].
///
/// Sets where both weight and reps coerce to zero are dropped, then entries
/// left without sets are dropped. Fails without side effects when no
/// template is selected or nothing qualifying remains.
pub fn build_session(
  template: Option<&Template>,
  entries: &[WorkingEntry],
) -> Result<Session, SaveError> {
  let template = template.ok_or(SaveError::NoTemplateSelected)?;

  let finalized: Vec<SessionExerciseEntry> = entries
    .iter()
    .filter_map(|entry| {
      let sets: Vec<SessionSet> = entry.sets.iter().filter_map(finalize_set).collect();
      if sets.is_empty() {
        return None;
      }
      Some(SessionExerciseEntry {
        exercise_id: entry.exercise_id.clone(),
        exercise_name: entry.exercise_name.clone(),
        sets,
      })
    })
    .collect();

  if finalized.is_empty() {
    return Err(SaveError::NoQualifyingSets);
  }

  debug!(
    "Finalized session against '{}' with {} exercise entries",
    template.name,
    finalized.len()
  );

  Ok(Session::new(
    Utc::now().date_naive(),
    &template.id,
    &template.name,
    finalized,
  ))
}

fn finalize_set(set: &WorkingSet) -> Option<SessionSet> {
  let weight = coerce_weight(&set.weight);
  let reps = coerce_count(&set.reps);
  if weight == 0.0 && reps == 0 {
    return None;
  }

  Some(SessionSet {
    weight,
    reps,
    rpe: coerce_rpe(&set.rpe),
    notes: set.notes.clone(),
    set_kind: set.set_kind.parse().unwrap_or_default(),
    group: if set.group.is_empty() {
      None
    } else {
      Some(set.group.clone())
    },
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
