use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::roster::Participant;

/// How the groups of a schedule share the equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStrategy {
  /// Everyone fits at once, no rotation
  Parallel,
  /// Groups take turns one after another
  Sequential,
  Mixed,
}

impl std::fmt::Display for ScheduleStrategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Parallel => write!(f, "parallel"),
      Self::Sequential => write!(f, "sequential"),
      Self::Mixed => write!(f, "mixed"),
    }
  }
}

impl std::str::FromStr for ScheduleStrategy {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "parallel" => Ok(Self::Parallel),
      "sequential" => Ok(Self::Sequential),
      "mixed" => Ok(Self::Mixed),
      _ => Err(format!("Unknown schedule strategy: {}", s)),
    }
  }
}

/// A subset of participants sharing the equipment during one time slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationGroup {
  pub id: String,
  pub name: String,
  pub players: Vec<Participant>,
  pub start_offset_minutes: u32,
  pub duration_minutes: u32,
  pub equipment_types: BTreeSet<String>,
}

impl RotationGroup {
  /// Saturates for hand-edited schedules; built ones always fit
  pub fn end_offset_minutes(&self) -> u32 {
    self.start_offset_minutes.saturating_add(self.duration_minutes)
  }
}

/// Built once from a roster and capacity snapshot. Never patched in place;
/// a roster or capacity change means building a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationSchedule {
  pub groups: Vec<RotationGroup>,
  pub total_duration_minutes: u32,
  pub rest_between_rotations_minutes: u32,
  pub strategy: ScheduleStrategy,
  pub equipment_utilization_percent: u32,
}

impl RotationSchedule {
  pub fn total_players(&self) -> usize {
    self.groups.iter().map(|g| g.players.len()).sum()
  }

  /// More than one group means participants take turns
  pub fn has_rotation(&self) -> bool {
    self.groups.len() > 1
  }
}

/// Session time budget derived from a schedule and the base workout length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionTiming {
  pub total_session_time_minutes: u32,
  pub workout_time_minutes: u32,
  pub rotation_time_minutes: u32,
  pub setup_time_minutes: u32,
  pub buffer_minutes: u32,
}

/// Findings from schedule validation. Warnings never affect `is_valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
  pub is_valid: bool,
  pub warnings: Vec<String>,
  pub errors: Vec<String>,
}
