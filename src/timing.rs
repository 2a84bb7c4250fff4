//! Session timing for rotation schedules
//!
//! Layers the rotation time, equipment resets and a transition buffer on top
//! of the base workout, and maps group offsets onto the wall clock.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{RotationSchedule, SessionTiming};

/// Equipment reset allowance per group change, in minutes
pub const SETUP_MINUTES_PER_GROUP_CHANGE: u32 = 3;

/// Fixed transition allowance for a rotated session, in minutes
pub const TRANSITION_BUFFER_MINUTES: u32 = 5;

/// Session time budget for `schedule` around a workout of `base_workout_minutes`.
///
/// Without rotation (one group, or none) the session is just the workout.
/// A budget past `u32::MAX` minutes is a `DurationOverflow`.
pub fn compute_session_timing(
  schedule: &RotationSchedule,
  base_workout_minutes: u32,
) -> Result<SessionTiming> {
  if !schedule.has_rotation() {
    return Ok(SessionTiming {
      total_session_time_minutes: base_workout_minutes,
      workout_time_minutes: base_workout_minutes,
      ..SessionTiming::default()
    });
  }

  let rotation_time_minutes = schedule.total_duration_minutes;
  let setup_time_minutes = u32::try_from(schedule.groups.len() - 1)
    .ok()
    .and_then(|changes| changes.checked_mul(SETUP_MINUTES_PER_GROUP_CHANGE));
  let total_session_time_minutes = setup_time_minutes.and_then(|setup| {
    base_workout_minutes
      .checked_add(rotation_time_minutes)?
      .checked_add(setup)?
      .checked_add(TRANSITION_BUFFER_MINUTES)
  });

  match (setup_time_minutes, total_session_time_minutes) {
    (Some(setup_time_minutes), Some(total_session_time_minutes)) => Ok(SessionTiming {
      total_session_time_minutes,
      workout_time_minutes: base_workout_minutes,
      rotation_time_minutes,
      setup_time_minutes,
      buffer_minutes: TRANSITION_BUFFER_MINUTES,
    }),
    _ => Err(PlannerError::DurationOverflow(format!(
      "session of {} workout minutes and {} rotation minutes does not fit in u32 minutes",
      base_workout_minutes, rotation_time_minutes
    ))),
  }
}

/// A group's slot on the wall clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWindow {
  pub group_id: String,
  pub name: String,
  pub starts_at: NaiveDateTime,
  pub ends_at: NaiveDateTime,
}

/// Absolute start/end of every group for a session starting at `session_start`
pub fn group_windows(
  schedule: &RotationSchedule,
  session_start: NaiveDateTime,
) -> Result<Vec<GroupWindow>> {
  schedule
    .groups
    .iter()
    .map(|group| {
      let starts_at = after(session_start, group.start_offset_minutes, &group.name)?;
      Ok(GroupWindow {
        group_id: group.id.clone(),
        name: group.name.clone(),
        starts_at,
        ends_at: after(starts_at, group.duration_minutes, &group.name)?,
      })
    })
    .collect()
}

fn after(at: NaiveDateTime, minutes: u32, group: &str) -> Result<NaiveDateTime> {
  at.checked_add_signed(Duration::minutes(i64::from(minutes)))
    .ok_or_else(|| PlannerError::DurationOverflow(format!("{} runs past the end of the calendar", group)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rotation::{RotationGroupBuilder, RotationOptions};
  use crate::test_utils::*;
  use chrono::NaiveDate;

  fn schedule_for(n: usize, capacity: u32) -> RotationSchedule {
    RotationGroupBuilder::new(RotationOptions::default())
      .build_for_roster(make_roster(n), capacity, "bike")
      .unwrap()
  }

  #[test]
  fn test_single_group_session_is_just_the_workout() {
    let timing = compute_session_timing(&schedule_for(5, 6), 45).unwrap();
    assert_eq!(
      timing,
      SessionTiming {
        total_session_time_minutes: 45,
        workout_time_minutes: 45,
        rotation_time_minutes: 0,
        setup_time_minutes: 0,
        buffer_minutes: 0,
      }
    );
  }

  #[test]
  fn test_rotated_session_adds_setup_and_buffer() {
    // 3 groups, 20 min each, 2 min rest: 64 min of rotation
    let schedule = schedule_for(18, 6);
    let timing = compute_session_timing(&schedule, 30).unwrap();

    assert_eq!(timing.rotation_time_minutes, 64);
    assert_eq!(timing.setup_time_minutes, 6);
    assert_eq!(timing.buffer_minutes, 5);
    assert_eq!(timing.workout_time_minutes, 30);
    assert_eq!(timing.total_session_time_minutes, 30 + 64 + 6 + 5);
  }

  #[test]
  fn test_empty_schedule_timing() {
    let timing = compute_session_timing(&schedule_for(0, 6), 20).unwrap();
    assert_eq!(timing.total_session_time_minutes, 20);
    assert_eq!(timing.setup_time_minutes, 0);
  }

  #[test]
  fn test_group_windows_on_the_clock() {
    let schedule = schedule_for(18, 6);
    let start = NaiveDate::from_ymd_opt(2026, 3, 14)
      .unwrap()
      .and_hms_opt(18, 0, 0)
      .unwrap();

    let windows = group_windows(&schedule, start).unwrap();
    let clock: Vec<String> = windows
      .iter()
      .map(|w| format!("{}-{}", w.starts_at.format("%H:%M"), w.ends_at.format("%H:%M")))
      .collect();
    assert_eq!(clock, vec!["18:00-18:20", "18:22-18:42", "18:44-19:04"]);
    assert_eq!(windows[0].group_id, schedule.groups[0].id);
  }

  #[test]
  fn test_session_overflow_is_reported() {
    let schedule = schedule_for(18, 6);
    let result = compute_session_timing(&schedule, u32::MAX - 10);
    assert!(matches!(result, Err(PlannerError::DurationOverflow(_))));

    // Without rotation the workout alone is the budget
    let timing = compute_session_timing(&schedule_for(3, 6), u32::MAX).unwrap();
    assert_eq!(timing.total_session_time_minutes, u32::MAX);
  }

  #[test]
  fn test_group_windows_past_the_calendar() {
    let schedule = schedule_for(18, 6);
    let result = group_windows(&schedule, NaiveDateTime::MAX);
    assert!(matches!(result, Err(PlannerError::DurationOverflow(_))));
  }
}
