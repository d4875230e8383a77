pub mod goal;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod template;

pub use goal::{Goal, GoalMetric, GoalStatus};
pub use schedule::{Schedule, ScheduledSlot};
pub use session::{Session, SessionExerciseEntry, SessionSet};
pub use settings::{Settings, WeightUnit};
pub use template::{RepRange, SetKind, Template, TemplateExercise, TimeUnit};
