//! Engine initialization and self-checks
//!
//! [`init`] runs once per process no matter how many times the host calls
//! it; the first call's report is returned to every later caller. The
//! self-checks are pure spot-checks over engine invariants, cheap enough to
//! run at every startup when enabled.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generator::{generate_program, GeneratorOptions};
use crate::gym::build_steps;
use crate::metrics::{e1rm, round_to};
use crate::models::{RepRange, SetKind, Template, TemplateExercise};
use crate::workout::build_working_entries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
  #[serde(default = "default_run_self_checks")]
  pub run_self_checks: bool,
}

fn default_run_self_checks() -> bool {
  true
}

impl Default for EngineOptions {
  fn default() -> Self {
    Self {
      run_self_checks: true,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfCheckReport {
  pub passed: bool,
  pub failures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
  /// None when self-checks were disabled for the initializing call
  pub self_checks: Option<SelfCheckReport>,
}

static INIT: OnceLock<InitReport> = OnceLock::new();

/// Initialize the engine once. Later calls return the first report
/// unchanged, whatever options they pass.
pub fn init(options: &EngineOptions) -> &'static InitReport {
  INIT.get_or_init(|| {
    let self_checks = options.run_self_checks.then(run_self_checks);
    match &self_checks {
      Some(report) if !report.passed => {
        warn!("Engine self-checks failed: {:?}", report.failures);
      }
      Some(_) => info!("Engine initialized, self-checks passed"),
      None => info!("Engine initialized, self-checks skipped"),
    }
    InitReport { self_checks }
  })
}

/// Spot-check a handful of engine invariants. Pure; safe to call directly.
pub fn run_self_checks() -> SelfCheckReport {
  let mut failures: Vec<String> = Vec::new();

  // Epley spot value: 100 x 10 estimates 133.33
  let estimate = e1rm(100.0, 10);
  if (estimate - 133.33).abs() > 0.01 {
    failures.push(format!("e1rm(100, 10) returned {}", estimate));
  }

  // Halves round up to the next step
  let rounded = round_to(187.5, 5.0);
  if rounded != 190.0 {
    failures.push(format!("round_to(187.5, 5) returned {}", rounded));
  }

  // Default generation produces one template per requested day
  let program = generate_program(&GeneratorOptions::default());
  if program.len() != 3 {
    failures.push(format!(
      "default program generated {} templates, expected 3",
      program.len()
    ));
  }

  // A two-exercise superset at three sets interleaves into six steps
  let steps = build_steps(&build_working_entries(&superset_probe(), &[]));
  let interleaved = steps.len() == 6
    && steps[0].exercise_id == steps[2].exercise_id
    && steps[1].exercise_id == steps[3].exercise_id
    && steps[0].exercise_id != steps[1].exercise_id;
  if !interleaved {
    failures.push(format!(
      "superset sequencing produced {} steps without interleave",
      steps.len()
    ));
  }

  SelfCheckReport {
    passed: failures.is_empty(),
    failures,
  }
}

fn superset_probe() -> Template {
  let mut first = TemplateExercise::new("Probe A", 3, RepRange::new(8, 12));
  first.set_kind = SetKind::Superset;
  first.group = Some("A".to_string());
  let mut second = TemplateExercise::new("Probe B", 3, RepRange::new(8, 12));
  second.set_kind = SetKind::Superset;
  second.group = Some("A".to_string());
  Template::new("Probe", vec![first, second])
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn test_self_checks_pass() {
    let report = run_self_checks();
    assert!(report.passed, "failures: {:?}", report.failures);
    assert!(report.failures.is_empty());
  }

  #[test]
  #[serial]
  fn test_init_runs_once_and_reports() {
    let first = init(&EngineOptions::default());
    assert!(first.self_checks.as_ref().is_some_and(|r| r.passed));

    // A second call with different options returns the original report
    let second = init(&EngineOptions {
      run_self_checks: false,
    });
    assert!(std::ptr::eq(first, second));
    assert!(second.self_checks.is_some());
  }
}
