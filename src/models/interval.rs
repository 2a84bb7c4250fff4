use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Work or rest. Rest segments are told apart by their label
/// ("Rest" between intervals, "Rest between sets" between sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
  #[default]
  Work,
  Rest,
}

/// Which target the athlete should follow during a work segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryMetric {
  Time,
  Distance,
  Calories,
  Watts,
  HeartRate,
}

/// Optional typed targets for a segment. Closed set, no free-form extras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricTargets {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time_target_seconds: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distance_target_meters: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub calories_target: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub watts_target: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub heart_rate_target: Option<u32>,
}

impl MetricTargets {
  pub fn is_empty(&self) -> bool {
    self.time_target_seconds.is_none()
      && self.distance_target_meters.is_none()
      && self.calories_target.is_none()
      && self.watts_target.is_none()
      && self.heart_rate_target.is_none()
  }
}

/// One atomic timed unit, ready for display and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSegment {
  pub id: String,
  pub kind: SegmentKind,
  pub name: String,
  pub duration_seconds: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub equipment: Option<String>,
  /// Originating definition; only set on expanded segments
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub primary_metric: Option<PrimaryMetric>,
  #[serde(default, skip_serializing_if = "MetricTargets::is_empty")]
  pub targets: MetricTargets,
}

/// Repetition descriptor: `number_of_sets` x `intervals_per_set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConfiguration {
  pub number_of_sets: u32,
  pub intervals_per_set: u32,
  #[serde(default)]
  pub rest_between_sets: u32,
  #[serde(default)]
  pub rest_between_intervals: u32,
}

impl SetConfiguration {
  /// Reject configurations that cannot be expanded
  pub fn validate(&self, definition_id: &str) -> Result<()> {
    if self.number_of_sets < 1 {
      return Err(PlannerError::InvalidSetConfiguration {
        definition_id: definition_id.to_string(),
        reason: "numberOfSets must be at least 1".to_string(),
      });
    }
    if self.intervals_per_set < 1 {
      return Err(PlannerError::InvalidSetConfiguration {
        definition_id: definition_id.to_string(),
        reason: "intervalsPerSet must be at least 1".to_string(),
      });
    }
    Ok(())
  }
}

/// User-authored interval, optionally repeated through a set configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalDefinition {
  pub id: String,
  #[serde(default)]
  pub kind: SegmentKind,
  pub name: String,
  pub duration_seconds: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub equipment: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub primary_metric: Option<PrimaryMetric>,
  #[serde(default, skip_serializing_if = "MetricTargets::is_empty")]
  pub targets: MetricTargets,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub set_configuration: Option<SetConfiguration>,
}

impl IntervalDefinition {
  /// A plain, non-repeating interval
  pub fn new(id: impl Into<String>, name: impl Into<String>, duration_seconds: u32) -> Self {
    Self {
      id: id.into(),
      kind: SegmentKind::Work,
      name: name.into(),
      duration_seconds,
      equipment: None,
      primary_metric: None,
      targets: MetricTargets::default(),
      set_configuration: None,
    }
  }

  pub fn with_sets(mut self, config: SetConfiguration) -> Self {
    self.set_configuration = Some(config);
    self
  }

  pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
    self.equipment = Some(equipment.into());
    self
  }

  /// The definition itself as a single segment (no `source_id`)
  pub fn as_segment(&self) -> IntervalSegment {
    IntervalSegment {
      id: self.id.clone(),
      kind: self.kind,
      name: self.name.clone(),
      duration_seconds: self.duration_seconds,
      equipment: self.equipment.clone(),
      source_id: None,
      primary_metric: self.primary_metric,
      targets: self.targets.clone(),
    }
  }
}
