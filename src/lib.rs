//! ForgeFit engine: training templates, session logging, double-progression
//! advice, goal projection, program generation, and guided Gym Mode
//! execution. Pure and synchronous; persistence and UI live in the host,
//! which exchanges [`state::AppState`] with the engine as plain serde data.

pub mod advisor;
pub mod coach;
pub mod diagnostics;
pub mod generator;
pub mod gym;
pub mod history;
pub mod metrics;
pub mod models;
pub mod projector;
pub mod state;
pub mod workout;

#[cfg(test)]
mod test_utils;

pub use advisor::{suggest_progressions, ProgressionSuggestion, SetTarget};
pub use coach::{export_package, import_package, CoachPackage, ImportError, ImportSummary};
pub use diagnostics::{init, EngineOptions, InitReport, SelfCheckReport};
pub use generator::{
  generate_program, Experience, FinisherOptions, Focus, GeneratorOptions, SplitType,
};
pub use gym::{GymMode, GymStep, RestTimer, TickEvent};
pub use history::{ExerciseHistory, ExerciseRecord, TopSet};
pub use models::{
  Goal, GoalMetric, GoalStatus, RepRange, Schedule, ScheduledSlot, Session,
  SessionExerciseEntry, SessionSet, SetKind, Settings, Template, TemplateExercise, TimeUnit,
  WeightUnit,
};
pub use projector::{goal_progress, project_goals, GoalProgress, GoalProjection};
pub use state::{migrate, AppState, DayPlan, MigrateError, STATE_VERSION};
pub use workout::{
  build_session, build_working_entries, with_added_set, SaveError, WorkingEntry, WorkingSet,
};
