//! Workout planning command: expand intervals and total them up

use serde::{Deserialize, Serialize};

use crate::intervals::{self, DurationBreakdown};
use crate::models::{IntervalDefinition, IntervalSegment};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
  pub intervals: Vec<IntervalDefinition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
  pub segments: Vec<IntervalSegment>,
  pub total_seconds: u64,
  pub breakdown: DurationBreakdown,
  /// `m:ss` / `h:mm:ss`
  pub total_display: String,
}

/// Expand the workout's intervals into display segments with totals
pub fn plan_workout(request: &WorkoutRequest) -> Result<WorkoutPlan, String> {
  let segments = intervals::expand(&request.intervals).map_err(|e| e.to_string())?;
  let breakdown = intervals::duration_breakdown(&request.intervals).map_err(|e| e.to_string())?;
  let total_seconds = breakdown.total_seconds();

  Ok(WorkoutPlan {
    segments,
    total_seconds,
    breakdown,
    total_display: intervals::format_duration(total_seconds),
  })
}
