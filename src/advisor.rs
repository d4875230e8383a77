//! Double-Progression Advisor
//!
//! Per-exercise next-set suggestions derived from the most recent training
//! record: add reps inside the template's rep range, then add weight and
//! reset reps once the top of the range is reached.
//!
//! Key principles:
//! - History-driven, not calendar-driven
//! - The rep range caps rep growth; the weight step caps load jumps
//! - Exercises without history or with auto-progress off get no suggestion

use serde::{Deserialize, Serialize};

use crate::history::{ExerciseHistory, ExerciseRecord, TopSet};
use crate::metrics::round_to;
use crate::models::{Settings, Template, TemplateExercise, WeightUnit};

// ---------------------------------------------------------------------------
/// Suggestion: what to load for the first working set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetTarget {
    pub weight: f64,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSuggestion {
    pub exercise_id: String,
    pub exercise_name: String,
    /// The top set of the most recent record the suggestion is based on
    pub last: TopSet,
    pub next: SetTarget,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Rule engine
// ---------------------------------------------------------------------------

/// Compute suggestions for every auto-progress exercise in the template that
/// has at least one history record, in template order.
pub fn suggest_progressions(
    template: &Template,
    history: &ExerciseHistory,
    settings: &Settings,
) -> Vec<ProgressionSuggestion> {
    template
        .exercises
        .iter()
        .filter(|exercise| exercise.auto_progress)
        .filter_map(|exercise| {
            let record = history.latest(&exercise.name)?;
            Some(suggest_for_exercise(exercise, record, settings))
        })
        .collect()
}

fn suggest_for_exercise(
    exercise: &TemplateExercise,
    record: &ExerciseRecord,
    settings: &Settings,
) -> ProgressionSuggestion {
    let last = record.top_set;
    let range = exercise.rep_range;
    let step = effective_step(exercise, settings.unit);

    let (next, reason) = if settings.strict_rep_range_for_progress {
        if last.reps >= range.max {
            let weight = round_to(last.weight + step, step);
            (
                SetTarget {
                    weight,
                    reps: range.min,
                },
                format!(
                    "Hit the top of the rep range ({}x{}), add weight and rebuild from {} reps",
                    last.weight, last.reps, range.min
                ),
            )
        } else {
            let reps = (last.reps + 1).clamp(1, range.max);
            (
                SetTarget {
                    weight: last.weight,
                    reps,
                },
                format!(
                    "Below the rep range max ({}), add a rep at {}",
                    range.max, last.weight
                ),
            )
        }
    } else if last.reps < range.max {
        (
            SetTarget {
                weight: last.weight,
                reps: last.reps + 1,
            },
            format!("Room left in the rep range, add a rep at {}", last.weight),
        )
    } else {
        let weight = round_to(last.weight + step, step);
        (
            SetTarget {
                weight,
                reps: range.min,
            },
            format!(
                "Rep range complete at {}x{}, add weight and rebuild from {} reps",
                last.weight, last.reps, range.min
            ),
        )
    };

    ProgressionSuggestion {
        exercise_id: exercise.id.clone(),
        exercise_name: exercise.name.clone(),
        last,
        next,
        reason,
    }
}

/// The exercise's own increment, falling back to the unit's compound jump
/// when the stored step is not positive.
fn effective_step(exercise: &TemplateExercise, unit: WeightUnit) -> f64 {
    if exercise.weight_step > 0.0 {
        exercise.weight_step
    } else {
        unit.compound_increment()
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ExerciseHistory;
    use crate::models::{RepRange, Template};
    use crate::test_utils::{mock_entry, mock_exercise, mock_session, mock_set, mock_settings};

    fn history_with_top_set(exercise: &TemplateExercise, weight: f64, reps: u32) -> ExerciseHistory {
        let sessions = vec![mock_session(
            3,
            vec![mock_entry(&exercise.name, vec![mock_set(weight, reps)])],
        )];
        ExerciseHistory::compute(&sessions)
    }

    #[test]
    fn test_strict_weight_bump_at_range_max() {
        // 185x8 against a [5,8] range with a 5 step suggests 190x5
        let mut exercise = mock_exercise("Bench Press");
        exercise.rep_range = RepRange::new(5, 8);
        exercise.weight_step = 5.0;
        let history = history_with_top_set(&exercise, 185.0, 8);
        let template = Template::new("Push", vec![exercise]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());

        assert_eq!(suggestions.len(), 1);
        let next = suggestions[0].next;
        assert_eq!(next.weight, 190.0);
        assert_eq!(next.reps, 5);
    }

    #[test]
    fn test_strict_rep_increment_below_max() {
        let mut exercise = mock_exercise("Bench Press");
        exercise.rep_range = RepRange::new(5, 8);
        let history = history_with_top_set(&exercise, 185.0, 6);
        let template = Template::new("Push", vec![exercise]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());

        let next = suggestions[0].next;
        assert_eq!(next.weight, 185.0);
        assert_eq!(next.reps, 7);
    }

    #[test]
    fn test_strict_weight_bump_rounds_to_step() {
        // Off-step history (e.g. logged on a different bar) snaps to the step
        let mut exercise = mock_exercise("Squat");
        exercise.rep_range = RepRange::new(5, 8);
        exercise.weight_step = 5.0;
        let history = history_with_top_set(&exercise, 187.0, 8);
        let template = Template::new("Legs", vec![exercise]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());

        // 187 + 5 = 192, rounded to the nearest 5 = 190
        assert_eq!(suggestions[0].next.weight, 190.0);
    }

    #[test]
    fn test_lenient_rep_increment_below_max() {
        let mut settings = mock_settings();
        settings.strict_rep_range_for_progress = false;
        let mut exercise = mock_exercise("Bench Press");
        exercise.rep_range = RepRange::new(5, 8);
        let history = history_with_top_set(&exercise, 185.0, 6);
        let template = Template::new("Push", vec![exercise]);

        let suggestions = suggest_progressions(&template, &history, &settings);

        let next = suggestions[0].next;
        assert_eq!(next.weight, 185.0);
        assert_eq!(next.reps, 7);
    }

    #[test]
    fn test_lenient_weight_bump_at_range_max() {
        let mut settings = mock_settings();
        settings.strict_rep_range_for_progress = false;
        let mut exercise = mock_exercise("Bench Press");
        exercise.rep_range = RepRange::new(5, 8);
        exercise.weight_step = 5.0;
        let history = history_with_top_set(&exercise, 185.0, 8);
        let template = Template::new("Push", vec![exercise]);

        let suggestions = suggest_progressions(&template, &history, &settings);

        let next = suggestions[0].next;
        assert_eq!(next.weight, 190.0);
        assert_eq!(next.reps, 5);
    }

    #[test]
    fn test_no_history_means_no_suggestion() {
        let exercise = mock_exercise("Bench Press");
        let template = Template::new("Push", vec![exercise]);
        let history = ExerciseHistory::compute(&[]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_auto_progress_off_is_skipped() {
        let mut tracked = mock_exercise("Bench Press");
        tracked.rep_range = RepRange::new(5, 8);
        let mut untracked = mock_exercise("Cable Fly");
        untracked.auto_progress = false;

        let sessions = vec![mock_session(
            2,
            vec![
                mock_entry("Bench Press", vec![mock_set(185.0, 6)]),
                mock_entry("Cable Fly", vec![mock_set(40.0, 12)]),
            ],
        )];
        let history = ExerciseHistory::compute(&sessions);
        let template = Template::new("Push", vec![tracked, untracked]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].exercise_name, "Bench Press");
    }

    #[test]
    fn test_zero_step_falls_back_to_unit_increment() {
        let mut exercise = mock_exercise("Overhead Press");
        exercise.rep_range = RepRange::new(5, 8);
        exercise.weight_step = 0.0;
        let history = history_with_top_set(&exercise, 95.0, 8);
        let template = Template::new("Push", vec![exercise]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());

        // Lb settings fall back to the 5 lb compound increment
        assert_eq!(suggestions[0].next.weight, 100.0);
    }

    #[test]
    fn test_suggestions_follow_template_order() {
        let mut bench = mock_exercise("Bench Press");
        bench.rep_range = RepRange::new(5, 8);
        let mut row = mock_exercise("Bent-Over Row");
        row.rep_range = RepRange::new(6, 10);

        let sessions = vec![mock_session(
            2,
            vec![
                mock_entry("Bent-Over Row", vec![mock_set(155.0, 8)]),
                mock_entry("Bench Press", vec![mock_set(185.0, 6)]),
            ],
        )];
        let history = ExerciseHistory::compute(&sessions);
        let template = Template::new("Upper", vec![bench, row]);

        let suggestions = suggest_progressions(&template, &history, &mock_settings());

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].exercise_name, "Bench Press");
        assert_eq!(suggestions[1].exercise_name, "Bent-Over Row");
    }
}
