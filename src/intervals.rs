//! Interval expansion and duration accounting
//!
//! Turns set-based interval definitions ("3 sets x 4 reps, 10s rest between
//! reps, 60s between sets") into the flat work/rest sequence the timer shows,
//! and computes total duration straight from the definitions without
//! materializing that sequence.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::ids::{IdGenerator, SequentialIds};
use crate::models::{IntervalDefinition, IntervalSegment, MetricTargets, SegmentKind};

pub const REST_LABEL: &str = "Rest";
pub const SET_REST_LABEL: &str = "Rest between sets";

/// ---------------------------------------------------------------------------
/// Expansion
/// ---------------------------------------------------------------------------

/// Expand definitions into concrete segments using sequential rest ids
pub fn expand(definitions: &[IntervalDefinition]) -> Result<Vec<IntervalSegment>> {
  expand_with(definitions, &mut SequentialIds::new())
}

/// Expand definitions into concrete segments, drawing rest ids from `ids`.
///
/// Every definition is validated before anything is emitted, so a malformed
/// set configuration never yields a partial result.
pub fn expand_with<G: IdGenerator>(
  definitions: &[IntervalDefinition],
  ids: &mut G,
) -> Result<Vec<IntervalSegment>> {
  validate_definitions(definitions)?;

  let mut segments = Vec::with_capacity(count_segments(definitions)?);

  for def in definitions {
    let Some(config) = def.set_configuration else {
      segments.push(def.as_segment());
      continue;
    };

    for set_index in 0..config.number_of_sets {
      for interval_index in 0..config.intervals_per_set {
        segments.push(IntervalSegment {
          id: format!("{}-set{}-interval{}", def.id, set_index + 1, interval_index + 1),
          kind: def.kind,
          name: format!("{} - Set {} Rep {}", def.name, set_index + 1, interval_index + 1),
          duration_seconds: def.duration_seconds,
          equipment: def.equipment.clone(),
          source_id: Some(def.id.clone()),
          primary_metric: def.primary_metric,
          targets: def.targets.clone(),
        });

        let last_interval = interval_index + 1 == config.intervals_per_set;
        if !last_interval && config.rest_between_intervals > 0 {
          segments.push(rest_segment(
            ids,
            def,
            REST_LABEL,
            config.rest_between_intervals,
          ));
        }
      }

      let last_set = set_index + 1 == config.number_of_sets;
      if !last_set && config.rest_between_sets > 0 {
        segments.push(rest_segment(ids, def, SET_REST_LABEL, config.rest_between_sets));
      }
    }
  }

  debug!(
    "Expanded {} interval definitions into {} segments",
    definitions.len(),
    segments.len()
  );

  Ok(segments)
}

fn rest_segment<G: IdGenerator>(
  ids: &mut G,
  def: &IntervalDefinition,
  label: &str,
  duration_seconds: u32,
) -> IntervalSegment {
  IntervalSegment {
    id: ids.next_id(&format!("{}-rest", def.id)),
    kind: SegmentKind::Rest,
    name: label.to_string(),
    duration_seconds,
    equipment: None,
    source_id: Some(def.id.clone()),
    primary_metric: None,
    targets: MetricTargets::default(),
  }
}

fn validate_definitions(definitions: &[IntervalDefinition]) -> Result<()> {
  for def in definitions {
    if let Some(config) = &def.set_configuration {
      config.validate(&def.id)?;
    }
  }
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Duration accounting
/// ---------------------------------------------------------------------------

/// Work vs rest split of a definition list, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DurationBreakdown {
  pub work_seconds: u64,
  pub rest_seconds: u64,
}

impl DurationBreakdown {
  /// `duration_breakdown` only returns splits whose sum fits in a `u64`
  pub fn total_seconds(&self) -> u64 {
    self.work_seconds + self.rest_seconds
  }
}

/// Total elapsed seconds of the definitions, including both rest types.
/// Always equals the summed durations of `expand(definitions)`.
pub fn total_duration(definitions: &[IntervalDefinition]) -> Result<u64> {
  Ok(duration_breakdown(definitions)?.total_seconds())
}

/// Work/rest split computed from the set arithmetic alone
pub fn duration_breakdown(definitions: &[IntervalDefinition]) -> Result<DurationBreakdown> {
  let mut total = DurationBreakdown::default();

  for def in definitions {
    let part = definition_breakdown(def)?;
    total.work_seconds = checked_add(total.work_seconds, part.work_seconds, &def.id)?;
    total.rest_seconds = checked_add(total.rest_seconds, part.rest_seconds, &def.id)?;
    checked_add(total.work_seconds, total.rest_seconds, &def.id)?;
  }

  Ok(total)
}

fn definition_breakdown(def: &IntervalDefinition) -> Result<DurationBreakdown> {
  let duration = u64::from(def.duration_seconds);

  let Some(config) = def.set_configuration else {
    // A standalone rest definition counts as rest time
    return Ok(match def.kind {
      SegmentKind::Work => DurationBreakdown { work_seconds: duration, rest_seconds: 0 },
      SegmentKind::Rest => DurationBreakdown { work_seconds: 0, rest_seconds: duration },
    });
  };
  config.validate(&def.id)?;

  let sets = u64::from(config.number_of_sets);
  let per_set = u64::from(config.intervals_per_set);

  let repeated = checked_mul(checked_mul(duration, per_set, &def.id)?, sets, &def.id)?;
  let interval_rest = checked_mul(
    checked_mul(u64::from(config.rest_between_intervals), per_set - 1, &def.id)?,
    sets,
    &def.id,
  )?;
  let set_rest = checked_mul(u64::from(config.rest_between_sets), sets - 1, &def.id)?;
  let rest = checked_add(interval_rest, set_rest, &def.id)?;

  Ok(match def.kind {
    SegmentKind::Work => DurationBreakdown { work_seconds: repeated, rest_seconds: rest },
    SegmentKind::Rest => DurationBreakdown {
      work_seconds: 0,
      rest_seconds: checked_add(repeated, rest, &def.id)?,
    },
  })
}

fn checked_mul(a: u64, b: u64, id: &str) -> Result<u64> {
  a.checked_mul(b)
    .ok_or_else(|| PlannerError::DurationOverflow(format!("duration of '{}' overflows", id)))
}

fn checked_add(a: u64, b: u64, id: &str) -> Result<u64> {
  a.checked_add(b)
    .ok_or_else(|| PlannerError::DurationOverflow(format!("duration of '{}' overflows", id)))
}

/// Number of segments `expand` would produce, without producing them
pub fn count_segments(definitions: &[IntervalDefinition]) -> Result<usize> {
  let mut count = 0usize;
  for def in definitions {
    let segments = match def.set_configuration {
      None => Some(1),
      Some(config) => {
        config.validate(&def.id)?;
        let sets = config.number_of_sets as usize;
        let per_set = config.intervals_per_set as usize;
        let interval_rests = if config.rest_between_intervals > 0 { per_set - 1 } else { 0 };
        let set_rests = if config.rest_between_sets > 0 { sets - 1 } else { 0 };
        // Each set is its reps plus the rests between them
        per_set
          .checked_add(interval_rests)
          .and_then(|per_set| per_set.checked_mul(sets))
          .and_then(|reps| reps.checked_add(set_rests))
      }
    };
    count = segments
      .and_then(|segments| count.checked_add(segments))
      .ok_or_else(|| PlannerError::DurationOverflow(format!("segment count of '{}' overflows", def.id)))?;
  }
  Ok(count)
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_duration(total_seconds: u64) -> String {
  let hours = total_seconds / 3600;
  let minutes = (total_seconds % 3600) / 60;
  let seconds = total_seconds % 60;
  if hours > 0 {
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
  } else {
    format!("{}:{:02}", minutes, seconds)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
