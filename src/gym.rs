//! Grouping & Step Sequencer (Gym Mode)
//!
//! Turns the working-entry list into a guided, linear workout. Consecutive
//! entries sharing a superset/triset/circuit kind and group tag are grouped,
//! groups are flattened into an interleaved step list (A1, B1, A2, B2...),
//! timed finishers run last, and a rest-timer state machine drives optional
//! auto-advance between steps.
//!
//! Grouping is pure and recomputed from the entry list each time, so the
//! same input always yields the same groups and steps.

use serde::{Deserialize, Serialize};

use crate::models::SetKind;
use crate::workout::WorkingEntry;

/// ---------------------------------------------------------------------------
/// Groups
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
  Single,
  Superset,
  Triset,
  Circuit,
}

impl GroupKind {
  fn from_set_kind(kind: SetKind) -> Self {
    match kind {
      SetKind::Superset => Self::Superset,
      SetKind::Triset => Self::Triset,
      SetKind::Circuit => Self::Circuit,
      SetKind::Normal | SetKind::Dropset => Self::Single,
    }
  }
}

/// A run of entries executed together. `members` are indices into the
/// working-entry list the group was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseGroup {
  pub kind: GroupKind,
  pub tag: Option<String>,
  pub members: Vec<usize>,
}

impl ExerciseGroup {
  fn single(index: usize) -> Self {
    Self {
      kind: GroupKind::Single,
      tag: None,
      members: vec![index],
    }
  }
}

/// Partition the entries into execution groups, preserving order.
///
/// Consecutive non-timed entries sharing a grouped set kind and a non-empty
/// group tag form one group when the run reaches the kind's minimum
/// membership (two for supersets and circuits, three for trisets); shorter
/// runs fall back to one single-exercise group per member. Timed entries are
/// sequenced separately and stay invisible to grouping, so a run continues
/// across them.
pub fn build_groups(entries: &[WorkingEntry]) -> Vec<ExerciseGroup> {
  let mut groups: Vec<ExerciseGroup> = Vec::new();
  let mut run: Vec<usize> = Vec::new();
  let mut run_key: Option<(SetKind, String)> = None;

  let flush = |run: &mut Vec<usize>,
               run_key: &mut Option<(SetKind, String)>,
               groups: &mut Vec<ExerciseGroup>| {
    if let Some((kind, tag)) = run_key.take() {
      if run.len() >= kind.min_members() {
        groups.push(ExerciseGroup {
          kind: GroupKind::from_set_kind(kind),
          tag: Some(tag),
          members: std::mem::take(run),
        });
      } else {
        for index in run.drain(..) {
          groups.push(ExerciseGroup::single(index));
        }
      }
    }
  };

  for (index, entry) in entries.iter().enumerate() {
    if entry.hint.is_timed() {
      continue;
    }

    let key = match (&entry.hint.set_kind, &entry.hint.group) {
      (kind, Some(tag)) if kind.is_grouped() && !tag.is_empty() => Some((*kind, tag.clone())),
      _ => None,
    };

    match key {
      Some(key) => {
        if run_key.as_ref() != Some(&key) {
          flush(&mut run, &mut run_key, &mut groups);
          run_key = Some(key);
        }
        run.push(index);
      }
      None => {
        flush(&mut run, &mut run_key, &mut groups);
        groups.push(ExerciseGroup::single(index));
      }
    }
  }
  flush(&mut run, &mut run_key, &mut groups);

  groups
}

/// ---------------------------------------------------------------------------
/// Steps
/// ---------------------------------------------------------------------------

/// One unit of guided execution: a specific set of a specific exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymStep {
  pub exercise_id: String,
  pub set_index: usize,
}

/// Flatten groups into the ordered step list.
///
/// Singles contribute one step per set row (minimum one). Grouped entries
/// interleave members per set index up to the largest member set count.
/// Timed finishers are appended at the end in entry order.
pub fn build_steps(entries: &[WorkingEntry]) -> Vec<GymStep> {
  let mut steps: Vec<GymStep> = Vec::new();

  for group in build_groups(entries) {
    match group.members.as_slice() {
      [index] => push_entry_steps(&mut steps, &entries[*index]),
      members => {
        let max_sets = members
          .iter()
          .map(|&i| entries[i].sets.len().max(1))
          .max()
          .unwrap_or(1);
        for set_index in 0..max_sets {
          for &member in members {
            steps.push(GymStep {
              exercise_id: entries[member].exercise_id.clone(),
              set_index,
            });
          }
        }
      }
    }
  }

  for entry in entries.iter().filter(|e| e.hint.is_timed()) {
    push_entry_steps(&mut steps, entry);
  }

  steps
}

fn push_entry_steps(steps: &mut Vec<GymStep>, entry: &WorkingEntry) {
  for set_index in 0..entry.sets.len().max(1) {
    steps.push(GymStep {
      exercise_id: entry.exercise_id.clone(),
      set_index,
    });
  }
}

/// ---------------------------------------------------------------------------
/// Rest timer
/// ---------------------------------------------------------------------------

/// Countdown between sets. Ticked once per second by the caller; stops
/// itself at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub struct RestTimer {
  pub remaining_seconds: u32,
  pub running: bool,
  /// When armed, reaching zero advances Gym Mode one step
  pub auto_advance: bool,
}

impl RestTimer {
  pub fn start(&mut self, seconds: u32, auto_advance: bool) {
    self.remaining_seconds = seconds;
    self.running = true;
    self.auto_advance = auto_advance;
  }

  /// Count down one second. Returns true on the tick that reaches zero.
  pub fn tick(&mut self) -> bool {
    if !self.running {
      return false;
    }
    self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    if self.remaining_seconds == 0 {
      self.running = false;
      return true;
    }
    false
  }

  /// Stop and zero the countdown without firing anything
  pub fn clear(&mut self) {
    self.remaining_seconds = 0;
    self.running = false;
    self.auto_advance = false;
  }
}

/// ---------------------------------------------------------------------------
/// Gym Mode
/// ---------------------------------------------------------------------------

/// What a one-second tick did to the session flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickEvent {
  /// No timer running
  Idle,
  /// Timer still counting down
  Counting,
  /// Timer hit zero without auto-advance armed
  RestOver,
  /// Timer hit zero and moved to the next step
  AutoAdvanced,
}

/// Linear guided execution over the step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymMode {
  pub steps: Vec<GymStep>,
  pub current: usize,
  pub timer: RestTimer,
}

impl GymMode {
  pub fn new(entries: &[WorkingEntry]) -> Self {
    Self {
      steps: build_steps(entries),
      current: 0,
      timer: RestTimer::default(),
    }
  }

  pub fn current_step(&self) -> Option<&GymStep> {
    self.steps.get(self.current)
  }

  pub fn is_last_step(&self) -> bool {
    !self.steps.is_empty() && self.current == self.steps.len() - 1
  }

  /// Mark the current step done. Zero rest advances immediately; otherwise
  /// the rest timer starts with auto-advance armed.
  pub fn complete_current(&mut self, rest_seconds: u32) {
    if rest_seconds == 0 {
      self.advance();
    } else {
      self.timer.start(rest_seconds, true);
    }
  }

  /// Drive the timer one second and apply auto-advance when it fires.
  /// Auto-advance disarms after firing once.
  pub fn tick(&mut self) -> TickEvent {
    if !self.timer.running {
      return TickEvent::Idle;
    }
    if self.timer.tick() {
      if self.timer.auto_advance {
        self.timer.auto_advance = false;
        self.advance();
        TickEvent::AutoAdvanced
      } else {
        TickEvent::RestOver
      }
    } else {
      TickEvent::Counting
    }
  }

  /// Cut the rest short without advancing; the user moves on themselves
  pub fn skip_rest(&mut self) {
    self.timer.clear();
  }

  pub fn advance(&mut self) {
    self.jump_to(self.current + 1);
  }

  /// Move to a specific step, clamped to the last valid index
  pub fn jump_to(&mut self, index: usize) {
    if self.steps.is_empty() {
      self.current = 0;
      return;
    }
    self.current = index.min(self.steps.len() - 1);
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
