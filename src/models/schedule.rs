use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::template::Template;

/// ---------------------------------------------------------------------------
/// Weekly Schedule
/// ---------------------------------------------------------------------------

/// Weekly training plan: each slot holds a template id or one of the two
/// sentinels ("" = unassigned, "rest" = rest day).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
  #[serde(default)]
  pub monday: String,
  #[serde(default)]
  pub tuesday: String,
  #[serde(default)]
  pub wednesday: String,
  #[serde(default)]
  pub thursday: String,
  #[serde(default)]
  pub friday: String,
  #[serde(default)]
  pub saturday: String,
  #[serde(default)]
  pub sunday: String,
}

/// What a schedule slot resolves to before template lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledSlot {
  Unassigned,
  Rest,
  Template(String),
}

impl Schedule {
  /// Slot value meaning nothing has been assigned yet
  pub const UNASSIGNED: &'static str = "";
  /// Slot value marking a deliberate rest day
  pub const REST: &'static str = "rest";

  pub fn slot(&self, weekday: Weekday) -> &str {
    match weekday {
      Weekday::Mon => &self.monday,
      Weekday::Tue => &self.tuesday,
      Weekday::Wed => &self.wednesday,
      Weekday::Thu => &self.thursday,
      Weekday::Fri => &self.friday,
      Weekday::Sat => &self.saturday,
      Weekday::Sun => &self.sunday,
    }
  }

  pub fn set_slot(&mut self, weekday: Weekday, value: impl Into<String>) {
    *self.slot_mut(weekday) = value.into();
  }

  fn slot_mut(&mut self, weekday: Weekday) -> &mut String {
    match weekday {
      Weekday::Mon => &mut self.monday,
      Weekday::Tue => &mut self.tuesday,
      Weekday::Wed => &mut self.wednesday,
      Weekday::Thu => &mut self.thursday,
      Weekday::Fri => &mut self.friday,
      Weekday::Sat => &mut self.saturday,
      Weekday::Sun => &mut self.sunday,
    }
  }

  /// All seven slots, Monday first
  pub fn slots_mut(&mut self) -> [&mut String; 7] {
    [
      &mut self.monday,
      &mut self.tuesday,
      &mut self.wednesday,
      &mut self.thursday,
      &mut self.friday,
      &mut self.saturday,
      &mut self.sunday,
    ]
  }

  /// Interpret a slot value without consulting the template list
  pub fn resolve_slot(&self, weekday: Weekday) -> ScheduledSlot {
    match self.slot(weekday) {
      Self::UNASSIGNED => ScheduledSlot::Unassigned,
      Self::REST => ScheduledSlot::Rest,
      id => ScheduledSlot::Template(id.to_string()),
    }
  }

  /// Clear every slot referencing the template (called when one is deleted)
  pub fn remove_template(&mut self, template_id: &str) {
    for slot in self.slots_mut() {
      if slot == template_id {
        slot.clear();
      }
    }
  }

  /// Spread generated day-templates across canonical training weekdays,
  /// by position; the remaining days become rest days.
  pub fn assign_program(&mut self, templates: &[Template]) {
    let days = training_days(templates.len());
    for slot in self.slots_mut() {
      *slot = Self::REST.to_string();
    }
    for (template, weekday) in templates.iter().zip(days) {
      self.set_slot(*weekday, template.id.clone());
    }
  }
}

/// Canonical weekday spread per training-day count, spacing rest days out
/// where the week allows it
fn training_days(count: usize) -> &'static [Weekday] {
  use Weekday::{Fri, Mon, Sat, Sun, Thu, Tue, Wed};
  match count {
    0 => &[],
    1 => &[Mon],
    2 => &[Mon, Thu],
    3 => &[Mon, Wed, Fri],
    4 => &[Mon, Tue, Thu, Fri],
    5 => &[Mon, Tue, Wed, Thu, Fri],
    6 => &[Mon, Tue, Wed, Thu, Fri, Sat],
    _ => &[Mon, Tue, Wed, Thu, Fri, Sat, Sun],
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
