//! Per-exercise training history reduced from the session log
//!
//! This is the single read model every advisor consumes: one newest-first
//! record list per exercise name, recomputed deterministically from the full
//! log on each call. Identical input always yields identical output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::e1rm;
use crate::models::{Session, SessionSet};

/// The set that defined a session entry: highest estimated 1RM, ties going
/// to the heavier load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopSet {
  pub weight: f64,
  pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
  pub date: NaiveDate,
  pub top_set: TopSet,
  pub top_e1rm: f64,
  /// Sum of weight x reps over every set in the session entry
  pub volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseHistory {
  records: BTreeMap<String, Vec<ExerciseRecord>>,
}

impl ExerciseHistory {
  /// Reduce the session log into per-exercise records, newest first.
  /// Date ties keep their session-log order (the sort is stable).
  pub fn compute(sessions: &[Session]) -> Self {
    let mut records: BTreeMap<String, Vec<ExerciseRecord>> = BTreeMap::new();

    for session in sessions {
      for entry in &session.entries {
        let Some(top) = top_set(&entry.sets) else {
          continue;
        };
        let volume = entry
          .sets
          .iter()
          .map(|s| s.weight * s.reps as f64)
          .sum::<f64>();

        records
          .entry(entry.exercise_name.clone())
          .or_default()
          .push(ExerciseRecord {
            date: session.date,
            top_set: TopSet {
              weight: top.weight,
              reps: top.reps,
            },
            top_e1rm: e1rm(top.weight, top.reps),
            volume,
          });
      }
    }

    for list in records.values_mut() {
      list.sort_by(|a, b| b.date.cmp(&a.date));
    }

    Self { records }
  }

  /// Records for one exercise, newest first; empty when never logged
  pub fn for_exercise(&self, name: &str) -> &[ExerciseRecord] {
    self.records.get(name).map(Vec::as_slice).unwrap_or(&[])
  }

  /// The most recent record for an exercise
  pub fn latest(&self, name: &str) -> Option<&ExerciseRecord> {
    self.for_exercise(name).first()
  }

  /// All tracked exercise names, in deterministic (sorted) order
  pub fn exercise_names(&self) -> impl Iterator<Item = &str> {
    self.records.keys().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

/// The set maximizing e1RM; at equal estimates the heavier set wins, and a
/// full tie keeps the first set logged.
fn top_set(sets: &[SessionSet]) -> Option<&SessionSet> {
  let mut best: Option<(&SessionSet, f64)> = None;
  for set in sets {
    let estimate = e1rm(set.weight, set.reps);
    match best {
      None => best = Some((set, estimate)),
      Some((current, current_estimate)) => {
        if estimate > current_estimate
          || (estimate == current_estimate && set.weight > current.weight)
        {
          best = Some((set, estimate));
        }
      }
    }
  }
  best.map(|(set, _)| set)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
