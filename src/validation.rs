//! Schedule validation
//!
//! Findings are returned as data. Errors block use of the schedule, warnings
//! are informational and never change `is_valid`.

use crate::models::{HealthStatus, RotationSchedule, ValidationReport};

pub const DEFAULT_MAX_SESSION_MINUTES: u32 = 120;

/// Below this, a single-group schedule is flagged as oversized equipment
pub const LOW_UTILIZATION_PERCENT: u32 = 70;

/// Validate with the default utilization threshold
pub fn validate(schedule: &RotationSchedule, max_session_minutes: u32) -> ValidationReport {
  validate_with_threshold(schedule, max_session_minutes, LOW_UTILIZATION_PERCENT)
}

pub fn validate_with_threshold(
  schedule: &RotationSchedule,
  max_session_minutes: u32,
  low_utilization_percent: u32,
) -> ValidationReport {
  let mut warnings = Vec::new();
  let mut errors = Vec::new();

  if schedule.total_duration_minutes > max_session_minutes {
    errors.push(format!(
      "Total duration ({} minutes) exceeds maximum session time ({} minutes)",
      schedule.total_duration_minutes, max_session_minutes
    ));
  }

  for group in &schedule.groups {
    match group.players.len() {
      0 => errors.push(format!("{} has no players assigned", group.name)),
      1 => warnings.push(format!(
        "{} has only one player - consider combining with another group",
        group.name
      )),
      _ => {}
    }
  }

  let injured = schedule
    .groups
    .iter()
    .flat_map(|g| g.players.iter())
    .filter(|p| p.health_status == HealthStatus::Injured)
    .count();
  if injured > 0 {
    warnings.push(format!(
      "{} injured {} in schedule - review participation",
      injured,
      if injured == 1 { "player" } else { "players" }
    ));
  }

  if schedule.groups.len() == 1 && schedule.equipment_utilization_percent < low_utilization_percent {
    warnings.push(format!(
      "Low equipment utilization ({}%) - capacity may be oversized for this roster",
      schedule.equipment_utilization_percent
    ));
  }

  ValidationReport {
    is_valid: errors.is_empty(),
    warnings,
    errors,
  }
}
