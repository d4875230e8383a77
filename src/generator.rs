//! Program Generator
//!
//! Procedurally builds multi-day training programs from a handful of user
//! choices: experience tier, split, training days, focus, and optional timed
//! finishers. Exercise selection comes from hand-authored tables per day
//! slot; prescriptions (sets, reps, rest) adapt to focus and experience;
//! accessory slots then get intensity techniques (supersets, trisets,
//! dropsets) assigned positionally.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{RepRange, SetKind, Template, TemplateExercise, TimeUnit, WeightUnit};

/// Leading slots assumed to hold the day's primary compound work; intensity
/// techniques never touch them.
const PRIMARY_SLOTS: usize = 2;

/// ---------------------------------------------------------------------------
/// Generator inputs
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Experience {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

impl std::fmt::Display for Experience {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Beginner => write!(f, "beginner"),
      Self::Intermediate => write!(f, "intermediate"),
      Self::Advanced => write!(f, "advanced"),
    }
  }
}

impl std::str::FromStr for Experience {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      _ => Err(format!("Unknown experience level: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum SplitType {
  #[default]
  FullBody,
  UpperLower,
  Ppl,
  Phul,
  BroSplit,
}

impl SplitType {
  /// The repeating day-slot cycle this split trains through
  pub fn day_pattern(&self) -> &'static [DaySlot] {
    match self {
      Self::FullBody => &[DaySlot::FullBody],
      Self::UpperLower => &[DaySlot::Upper, DaySlot::Lower],
      Self::Ppl => &[DaySlot::Push, DaySlot::Pull, DaySlot::Legs],
      Self::Phul => &[
        DaySlot::PowerUpper,
        DaySlot::PowerLower,
        DaySlot::Upper,
        DaySlot::Lower,
      ],
      Self::BroSplit => &[
        DaySlot::Chest,
        DaySlot::Back,
        DaySlot::Shoulders,
        DaySlot::Legs,
        DaySlot::Arms,
      ],
    }
  }
}

impl std::fmt::Display for SplitType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::FullBody => write!(f, "full_body"),
      Self::UpperLower => write!(f, "upper_lower"),
      Self::Ppl => write!(f, "ppl"),
      Self::Phul => write!(f, "phul"),
      Self::BroSplit => write!(f, "bro_split"),
    }
  }
}

impl std::str::FromStr for SplitType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "full_body" => Ok(Self::FullBody),
      "upper_lower" => Ok(Self::UpperLower),
      "ppl" => Ok(Self::Ppl),
      "phul" => Ok(Self::Phul),
      "bro_split" => Ok(Self::BroSplit),
      _ => Err(format!("Unknown split type: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Focus {
  #[default]
  General,
  Strength,
  Hypertrophy,
  FatLoss,
  Athletic,
}

impl std::fmt::Display for Focus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::General => write!(f, "general"),
      Self::Strength => write!(f, "strength"),
      Self::Hypertrophy => write!(f, "hypertrophy"),
      Self::FatLoss => write!(f, "fat_loss"),
      Self::Athletic => write!(f, "athletic"),
    }
  }
}

impl std::str::FromStr for Focus {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "general" => Ok(Self::General),
      "strength" => Ok(Self::Strength),
      "hypertrophy" => Ok(Self::Hypertrophy),
      "fat_loss" => Ok(Self::FatLoss),
      "athletic" => Ok(Self::Athletic),
      _ => Err(format!("Unknown training focus: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub struct FinisherOptions {
  #[serde(default)]
  pub core: bool,
  #[serde(default)]
  pub cardio: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
  pub experience: Experience,
  pub split: SplitType,
  pub days_per_week: u32,
  pub focus: Focus,
  #[serde(default)]
  pub finishers: FinisherOptions,
  #[serde(default)]
  pub unit: WeightUnit,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    Self {
      experience: Experience::Beginner,
      split: SplitType::FullBody,
      days_per_week: 3,
      focus: Focus::General,
      finishers: FinisherOptions::default(),
      unit: WeightUnit::default(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Day slots and the exercise library
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
  FullBody,
  Upper,
  Lower,
  Push,
  Pull,
  Legs,
  PowerUpper,
  PowerLower,
  Chest,
  Back,
  Shoulders,
  Arms,
}

impl DaySlot {
  pub fn label(&self) -> &'static str {
    match self {
      Self::FullBody => "Full Body",
      Self::Upper => "Upper",
      Self::Lower => "Lower",
      Self::Push => "Push",
      Self::Pull => "Pull",
      Self::Legs => "Legs",
      Self::PowerUpper => "Power Upper",
      Self::PowerLower => "Power Lower",
      Self::Chest => "Chest",
      Self::Back => "Back",
      Self::Shoulders => "Shoulders",
      Self::Arms => "Arms",
    }
  }

  /// Hand-curated exercise selection for this slot at the given tier
  pub fn exercises(&self, experience: Experience) -> &'static [&'static str] {
    use Experience::*;
    match (self, experience) {
      (Self::FullBody, Beginner) => &[
        "Goblet Squat",
        "Push-Up",
        "Seated Cable Row",
        "Dumbbell Shoulder Press",
        "Leg Curl",
      ],
      (Self::FullBody, Intermediate) => &[
        "Barbell Back Squat",
        "Bench Press",
        "Bent-Over Row",
        "Overhead Press",
        "Romanian Deadlift",
      ],
      (Self::FullBody, Advanced) => &[
        "Barbell Back Squat",
        "Bench Press",
        "Deadlift",
        "Overhead Press",
        "Weighted Pull-Up",
        "Barbell Hip Thrust",
      ],
      (Self::Upper, Beginner) => &[
        "Push-Up",
        "Seated Cable Row",
        "Dumbbell Bench Press",
        "Lat Pulldown",
        "Lateral Raise",
        "Cable Curl",
      ],
      (Self::Upper, Intermediate) => &[
        "Bench Press",
        "Bent-Over Row",
        "Overhead Press",
        "Lat Pulldown",
        "Incline Dumbbell Press",
        "Face Pull",
      ],
      (Self::Upper, Advanced) => &[
        "Bench Press",
        "Weighted Pull-Up",
        "Overhead Press",
        "Pendlay Row",
        "Incline Dumbbell Press",
        "Cable Fly",
      ],
      (Self::Lower, Beginner) => &[
        "Goblet Squat",
        "Leg Press",
        "Leg Curl",
        "Glute Bridge",
        "Standing Calf Raise",
      ],
      (Self::Lower, Intermediate) => &[
        "Barbell Back Squat",
        "Romanian Deadlift",
        "Walking Lunge",
        "Leg Curl",
        "Standing Calf Raise",
      ],
      (Self::Lower, Advanced) => &[
        "Barbell Back Squat",
        "Deadlift",
        "Bulgarian Split Squat",
        "Barbell Hip Thrust",
        "Leg Extension",
        "Seated Calf Raise",
      ],
      (Self::Push, Beginner) => &[
        "Push-Up",
        "Dumbbell Shoulder Press",
        "Incline Dumbbell Press",
        "Lateral Raise",
        "Triceps Pushdown",
      ],
      (Self::Push, Intermediate) => &[
        "Bench Press",
        "Overhead Press",
        "Incline Dumbbell Press",
        "Lateral Raise",
        "Triceps Pushdown",
        "Cable Fly",
      ],
      (Self::Push, Advanced) => &[
        "Bench Press",
        "Overhead Press",
        "Weighted Dip",
        "Incline Dumbbell Press",
        "Lateral Raise",
        "Overhead Triceps Extension",
      ],
      (Self::Pull, Beginner) => &[
        "Lat Pulldown",
        "Seated Cable Row",
        "Face Pull",
        "Back Extension",
        "Dumbbell Curl",
      ],
      (Self::Pull, Intermediate) => &[
        "Bent-Over Row",
        "Lat Pulldown",
        "Seated Cable Row",
        "Face Pull",
        "Barbell Curl",
        "Hammer Curl",
      ],
      (Self::Pull, Advanced) => &[
        "Weighted Pull-Up",
        "Pendlay Row",
        "Chest-Supported Row",
        "Straight-Arm Pulldown",
        "Barbell Curl",
        "Incline Dumbbell Curl",
      ],
      (Self::Legs, Beginner) => &[
        "Goblet Squat",
        "Leg Press",
        "Leg Curl",
        "Leg Extension",
        "Standing Calf Raise",
      ],
      (Self::Legs, Intermediate) => &[
        "Barbell Back Squat",
        "Romanian Deadlift",
        "Leg Press",
        "Leg Curl",
        "Standing Calf Raise",
      ],
      (Self::Legs, Advanced) => &[
        "Barbell Back Squat",
        "Deadlift",
        "Hack Squat",
        "Romanian Deadlift",
        "Leg Extension",
        "Standing Calf Raise",
      ],
      (Self::PowerUpper, Beginner) => &[
        "Dumbbell Bench Press",
        "Seated Cable Row",
        "Dumbbell Shoulder Press",
        "Lat Pulldown",
      ],
      (Self::PowerUpper, Intermediate) => &[
        "Bench Press",
        "Bent-Over Row",
        "Overhead Press",
        "Lat Pulldown",
        "Barbell Curl",
      ],
      (Self::PowerUpper, Advanced) => &[
        "Bench Press",
        "Weighted Pull-Up",
        "Overhead Press",
        "Pendlay Row",
        "Close-Grip Bench Press",
      ],
      (Self::PowerLower, Beginner) => &[
        "Goblet Squat",
        "Romanian Deadlift",
        "Leg Press",
        "Standing Calf Raise",
      ],
      (Self::PowerLower, Intermediate) => &[
        "Barbell Back Squat",
        "Deadlift",
        "Leg Press",
        "Leg Curl",
        "Standing Calf Raise",
      ],
      (Self::PowerLower, Advanced) => &[
        "Barbell Back Squat",
        "Deadlift",
        "Barbell Hip Thrust",
        "Front Squat",
        "Seated Calf Raise",
      ],
      (Self::Chest, Beginner) => &[
        "Push-Up",
        "Dumbbell Bench Press",
        "Incline Dumbbell Press",
        "Cable Fly",
      ],
      (Self::Chest, Intermediate) => &[
        "Bench Press",
        "Incline Dumbbell Press",
        "Weighted Dip",
        "Cable Fly",
        "Push-Up",
      ],
      (Self::Chest, Advanced) => &[
        "Bench Press",
        "Incline Bench Press",
        "Weighted Dip",
        "Low-to-High Cable Fly",
        "Dumbbell Pullover",
      ],
      (Self::Back, Beginner) => &[
        "Lat Pulldown",
        "Seated Cable Row",
        "Face Pull",
        "Back Extension",
      ],
      (Self::Back, Intermediate) => &[
        "Bent-Over Row",
        "Lat Pulldown",
        "Seated Cable Row",
        "Straight-Arm Pulldown",
        "Face Pull",
      ],
      (Self::Back, Advanced) => &[
        "Weighted Pull-Up",
        "Pendlay Row",
        "Chest-Supported Row",
        "Lat Pulldown",
        "Straight-Arm Pulldown",
      ],
      (Self::Shoulders, Beginner) => &[
        "Dumbbell Shoulder Press",
        "Lateral Raise",
        "Face Pull",
        "Rear Delt Fly",
      ],
      (Self::Shoulders, Intermediate) => &[
        "Overhead Press",
        "Dumbbell Shoulder Press",
        "Lateral Raise",
        "Rear Delt Fly",
        "Face Pull",
      ],
      (Self::Shoulders, Advanced) => &[
        "Overhead Press",
        "Push Press",
        "Lateral Raise",
        "Cable Lateral Raise",
        "Rear Delt Fly",
      ],
      (Self::Arms, Beginner) => &[
        "Dumbbell Curl",
        "Triceps Pushdown",
        "Hammer Curl",
        "Overhead Triceps Extension",
      ],
      (Self::Arms, Intermediate) => &[
        "Barbell Curl",
        "Close-Grip Bench Press",
        "Hammer Curl",
        "Triceps Pushdown",
        "Incline Dumbbell Curl",
      ],
      (Self::Arms, Advanced) => &[
        "Barbell Curl",
        "Close-Grip Bench Press",
        "Weighted Dip",
        "Incline Dumbbell Curl",
        "Overhead Triceps Extension",
        "Cable Curl",
      ],
    }
  }
}

/// Movement patterns that mark a lift as compound for prescription purposes
const COMPOUND_PATTERNS: [&str; 10] = [
  "squat",
  "deadlift",
  "bench",
  "press",
  "row",
  "pull-up",
  "push-up",
  "dip",
  "lunge",
  "hip thrust",
];

pub fn is_compound(name: &str) -> bool {
  let lower = name.to_lowercase();
  COMPOUND_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

/// ---------------------------------------------------------------------------
/// Prescription tables
/// ---------------------------------------------------------------------------

struct Prescription {
  reps: RepRange,
  sets: u32,
  rest: u32,
}

/// Base sets/reps/rest by focus, before experience adjustments.
fn prescription(focus: Focus, compound: bool) -> Prescription {
  let (min, max, sets, rest) = match (focus, compound) {
    (Focus::Strength, true) => (3, 6, 4, 180),
    (Focus::Strength, false) => (6, 10, 3, 120),
    (Focus::Hypertrophy, true) => (6, 10, 4, 120),
    (Focus::Hypertrophy, false) => (10, 15, 3, 60),
    (Focus::FatLoss, true) => (10, 15, 3, 60),
    (Focus::FatLoss, false) => (12, 20, 3, 45),
    (Focus::Athletic, true) => (4, 8, 4, 150),
    (Focus::Athletic, false) => (8, 12, 3, 90),
    (Focus::General, true) => (6, 10, 3, 120),
    (Focus::General, false) => (8, 12, 3, 75),
  };
  Prescription {
    reps: RepRange::new(min, max),
    sets,
    rest,
  }
}

/// Beginners get capped volume and rest; advanced lifters earn an extra set
/// and longer rest on the compound lifts.
fn adapt_for_experience(
  sets: u32,
  rest: u32,
  experience: Experience,
  compound: bool,
) -> (u32, u32) {
  match experience {
    Experience::Beginner => (sets.min(3), rest.min(120)),
    Experience::Intermediate => (sets, rest),
    Experience::Advanced if compound => (sets + 1, rest + 30),
    Experience::Advanced => (sets, rest),
  }
}

fn build_exercise(name: &str, options: &GeneratorOptions) -> TemplateExercise {
  let compound = is_compound(name);
  let rx = prescription(options.focus, compound);
  let (sets, rest) = adapt_for_experience(rx.sets, rx.rest, options.experience, compound);

  let mut exercise = TemplateExercise::new(name, sets, rx.reps);
  exercise.rest_seconds = rest;
  exercise.weight_step = if compound {
    options.unit.compound_increment()
  } else {
    options.unit.isolation_increment()
  };
  exercise
}

/// ---------------------------------------------------------------------------
/// Finishers
/// ---------------------------------------------------------------------------

fn core_finisher() -> TemplateExercise {
  let mut plank = TemplateExercise::new("Plank", 3, RepRange::new(30, 60));
  plank.rest_seconds = 30;
  plank.weight_step = 0.0;
  plank.auto_progress = false;
  plank.time_unit = Some(TimeUnit::Seconds);
  plank
}

fn cardio_finisher() -> TemplateExercise {
  let mut walk = TemplateExercise::new("Incline Treadmill Walk", 1, RepRange::new(10, 15));
  walk.rest_seconds = 0;
  walk.weight_step = 0.0;
  walk.auto_progress = false;
  walk.time_unit = Some(TimeUnit::Minutes);
  walk
}

/// ---------------------------------------------------------------------------
/// Intensity techniques
/// ---------------------------------------------------------------------------

/// Tag accessory slots with supersets, trisets, and dropsets by position.
///
/// The first [`PRIMARY_SLOTS`] entries are never touched, timed and
/// already-tagged entries are skipped, and each slot receives at most one
/// technique:
/// 1. fat loss turns the last three eligible accessories into a triset,
/// 2. hypertrophy and fat loss pair the remaining accessories into
///    supersets tagged "A"/"B"/"C",
/// 3. every focus except strength and athletic turns the last remaining
///    accessory into a dropset.
pub fn apply_intensity_techniques(exercises: &mut [TemplateExercise], focus: Focus) {
  let eligible: Vec<usize> = exercises
    .iter()
    .enumerate()
    .skip(PRIMARY_SLOTS)
    .filter(|(_, e)| e.set_kind == SetKind::Normal && !e.is_timed())
    .map(|(i, _)| i)
    .collect();

  if focus == Focus::FatLoss && eligible.len() >= 3 {
    for &i in &eligible[eligible.len() - 3..] {
      exercises[i].set_kind = SetKind::Triset;
      exercises[i].group = Some("T1".to_string());
    }
  }

  if matches!(focus, Focus::Hypertrophy | Focus::FatLoss) {
    let untagged: Vec<usize> = eligible
      .iter()
      .copied()
      .filter(|&i| exercises[i].set_kind == SetKind::Normal)
      .collect();
    let tags = ["A", "B", "C"];
    for (pair_index, pair) in untagged.chunks(2).take(tags.len()).enumerate() {
      if pair.len() < 2 {
        break;
      }
      for &i in pair {
        exercises[i].set_kind = SetKind::Superset;
        exercises[i].group = Some(tags[pair_index].to_string());
      }
    }
  }

  if !matches!(focus, Focus::Strength | Focus::Athletic) {
    let last_untagged = eligible
      .iter()
      .rev()
      .find(|&&i| exercises[i].set_kind == SetKind::Normal);
    if let Some(&i) = last_untagged {
      exercises[i].set_kind = SetKind::Dropset;
    }
  }
}

/// ---------------------------------------------------------------------------
/// Program assembly
/// ---------------------------------------------------------------------------

/// Build one template per training day, cycling through the split's day
/// pattern. `days_per_week` is clamped to 1..=7.
pub fn generate_program(options: &GeneratorOptions) -> Vec<Template> {
  let days = options.days_per_week.clamp(1, 7) as usize;
  let pattern = options.split.day_pattern();

  let templates: Vec<Template> = (0..days)
    .map(|day| {
      let slot = pattern[day % pattern.len()];
      let mut exercises: Vec<TemplateExercise> = slot
        .exercises(options.experience)
        .iter()
        .map(|name| build_exercise(name, options))
        .collect();

      if options.finishers.core {
        exercises.push(core_finisher());
      }
      if options.finishers.cardio {
        exercises.push(cardio_finisher());
      }

      apply_intensity_techniques(&mut exercises, options.focus);

      Template::new(format!("Day {}: {}", day + 1, slot.label()), exercises)
    })
    .collect();

  info!(
    "Generated {}-day {} program with {} focus",
    templates.len(),
    options.split,
    options.focus
  );
  templates
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
