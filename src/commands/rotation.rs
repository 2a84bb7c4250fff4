//! Rotation planning command: roster selection in, validated schedule out

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::export::{self, ExportFormat};
use crate::models::{Participant, RotationSchedule, SessionTiming, Team, ValidationReport};
use crate::rotation::{RotationGroupBuilder, RotationOptions};
use crate::timing::{self, GroupWindow};
use crate::validation;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationRequest {
  #[serde(default)]
  pub players: Vec<Participant>,
  #[serde(default)]
  pub teams: Vec<Team>,
  #[serde(default)]
  pub selected_player_ids: Vec<String>,
  #[serde(default)]
  pub selected_team_ids: Vec<String>,
  pub capacity: u32,
  pub resource_tag: String,
  /// Falls back to the configured defaults
  #[serde(default)]
  pub options: Option<RotationOptions>,
  #[serde(default)]
  pub base_workout_minutes: u32,
  #[serde(default)]
  pub max_session_minutes: Option<u32>,
  #[serde(default)]
  pub session_start: Option<NaiveDateTime>,
  #[serde(default)]
  pub export_format: Option<ExportFormat>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationPlan {
  pub schedule: RotationSchedule,
  pub timing: SessionTiming,
  pub validation: ValidationReport,
  pub summary: String,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub windows: Vec<GroupWindow>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub export: Option<String>,
}

/// Build, time, validate and summarize a rotation schedule
pub fn plan_rotation(request: &RotationRequest, config: &PlannerConfig) -> Result<RotationPlan, String> {
  let options = request.options.unwrap_or_else(|| config.rotation_options());

  let schedule = RotationGroupBuilder::new(options)
    .build(
      &request.players,
      &request.teams,
      &request.selected_player_ids,
      &request.selected_team_ids,
      request.capacity,
      &request.resource_tag,
    )
    .map_err(|e| e.to_string())?;

  let timing =
    timing::compute_session_timing(&schedule, request.base_workout_minutes).map_err(|e| e.to_string())?;
  let validation = validation::validate_with_threshold(
    &schedule,
    request.max_session_minutes.unwrap_or(config.max_session_minutes),
    config.low_utilization_percent,
  );
  let summary = export::summarize(&schedule, &timing);

  let windows = match request.session_start {
    Some(start) => timing::group_windows(&schedule, start).map_err(|e| e.to_string())?,
    None => Vec::new(),
  };

  let export = match request.export_format {
    Some(format) => Some(export::export(&schedule, format).map_err(|e| e.to_string())?),
    None => None,
  };

  Ok(RotationPlan {
    schedule,
    timing,
    validation,
    summary,
    windows,
    export,
  })
}
