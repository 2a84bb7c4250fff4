//! Rotation group building
//!
//! When more participants want a piece of equipment than it can serve at
//! once, they are split into sequential rotation groups. Each partitioning
//! policy is its own `Partitioner`; `PartitionStrategy` is the closed set of
//! policies callers can pick from.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::ids::{IdGenerator, SequentialIds};
use crate::models::{
  Participant, PositionBucket, RotationGroup, RotationSchedule, ScheduleStrategy, Team,
};
use crate::roster::resolve_roster;

pub const DEFAULT_ROTATION_MINUTES: u32 = 20;
pub const DEFAULT_REST_BETWEEN_ROTATIONS: u32 = 2;

/// ---------------------------------------------------------------------------
/// Partitioning strategies
/// ---------------------------------------------------------------------------

/// Splits an over-capacity roster into groups of at most `capacity`
pub trait Partitioner {
  fn partition(&self, roster: Vec<Participant>, capacity: usize) -> Vec<Vec<Participant>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
  /// Group sizes differ by at most one
  #[default]
  BalanceGroups,
  /// Fill each group to capacity, last group takes the remainder
  MinimizeTime,
  /// Every group but the last runs the equipment at full capacity
  MaximizeEquipmentUse,
}

impl PartitionStrategy {
  pub fn partitioner(&self) -> &'static dyn Partitioner {
    match self {
      Self::BalanceGroups => &BalanceGroups,
      Self::MinimizeTime => &MinimizeTime,
      Self::MaximizeEquipmentUse => &MaximizeEquipmentUse,
    }
  }
}

impl std::fmt::Display for PartitionStrategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::BalanceGroups => write!(f, "balance_groups"),
      Self::MinimizeTime => write!(f, "minimize_time"),
      Self::MaximizeEquipmentUse => write!(f, "maximize_equipment_use"),
    }
  }
}

impl std::str::FromStr for PartitionStrategy {
  type Err = String;
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s {
      "balance_groups" => Ok(Self::BalanceGroups),
      "minimize_time" => Ok(Self::MinimizeTime),
      "maximize_equipment_use" => Ok(Self::MaximizeEquipmentUse),
      _ => Err(format!("Unknown partition strategy: {}", s)),
    }
  }
}

fn group_count(len: usize, capacity: usize) -> usize {
  len.div_ceil(capacity)
}

/// `ceil(n / capacity)` groups, the first `n mod g` get one extra member
pub struct BalanceGroups;

impl Partitioner for BalanceGroups {
  fn partition(&self, roster: Vec<Participant>, capacity: usize) -> Vec<Vec<Participant>> {
    let groups = group_count(roster.len(), capacity);
    if groups == 0 {
      return Vec::new();
    }

    let base = roster.len() / groups;
    let remainder = roster.len() % groups;

    let mut players = roster.into_iter();
    (0..groups)
      .map(|i| {
        let size = if i < remainder { base + 1 } else { base };
        players.by_ref().take(size).collect::<Vec<_>>()
      })
      .collect()
  }
}

/// Greedy chunks of `capacity`
pub struct MinimizeTime;

impl Partitioner for MinimizeTime {
  fn partition(&self, roster: Vec<Participant>, capacity: usize) -> Vec<Vec<Participant>> {
    roster.chunks(capacity).map(|chunk| chunk.to_vec()).collect()
  }
}

/// Full groups first with the remainder last. That is the same chunking
/// as `MinimizeTime`, offered under the equipment-use name.
pub struct MaximizeEquipmentUse;

impl Partitioner for MaximizeEquipmentUse {
  fn partition(&self, roster: Vec<Participant>, capacity: usize) -> Vec<Vec<Participant>> {
    MinimizeTime.partition(roster, capacity)
  }
}

/// Spreads each position bucket round-robin over `ceil(n / capacity)` groups,
/// skipping groups that are already full. Empty groups are dropped.
pub struct PositionBalance;

impl Partitioner for PositionBalance {
  fn partition(&self, roster: Vec<Participant>, capacity: usize) -> Vec<Vec<Participant>> {
    let count = group_count(roster.len(), capacity);
    let mut groups: Vec<Vec<Participant>> = vec![Vec::new(); count];
    if count == 0 {
      return groups;
    }

    let unbucketed = roster
      .iter()
      .filter(|p| p.position_bucket() == PositionBucket::Other)
      .count();
    if unbucketed > 0 {
      warn!("{} players have no recognised position, distributing them last", unbucketed);
    }

    for bucket in PositionBucket::ALL {
      let members = roster.iter().filter(|p| p.position_bucket() == bucket);
      for (i, player) in members.enumerate() {
        // Total capacity covers the roster, so a free slot always exists
        let target = (0..count)
          .map(|offset| (i + offset) % count)
          .find(|&g| groups[g].len() < capacity);
        if let Some(g) = target {
          groups[g].push(player.clone());
        }
      }
    }

    groups.retain(|g| !g.is_empty());
    groups
  }
}

/// ---------------------------------------------------------------------------
/// Builder
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotationOptions {
  pub strategy: PartitionStrategy,
  /// Overrides `strategy` with position balancing
  pub consider_player_position: bool,
  /// Healthy players first, compromised players toward later groups
  pub consider_player_fitness: bool,
  pub rotation_duration_minutes: u32,
  pub rest_between_rotations_minutes: u32,
}

impl Default for RotationOptions {
  fn default() -> Self {
    Self {
      strategy: PartitionStrategy::BalanceGroups,
      consider_player_position: false,
      consider_player_fitness: false,
      rotation_duration_minutes: DEFAULT_ROTATION_MINUTES,
      rest_between_rotations_minutes: DEFAULT_REST_BETWEEN_ROTATIONS,
    }
  }
}

/// Builds rotation schedules, drawing group ids from `G`
pub struct RotationGroupBuilder<G: IdGenerator = SequentialIds> {
  options: RotationOptions,
  ids: G,
}

impl RotationGroupBuilder<SequentialIds> {
  pub fn new(options: RotationOptions) -> Self {
    Self::with_ids(options, SequentialIds::new())
  }
}

impl<G: IdGenerator> RotationGroupBuilder<G> {
  pub fn with_ids(options: RotationOptions, ids: G) -> Self {
    Self { options, ids }
  }

  /// Resolve the selection into a roster, then build its schedule
  pub fn build(
    &mut self,
    players: &[Participant],
    teams: &[Team],
    selected_player_ids: &[String],
    selected_team_ids: &[String],
    capacity: u32,
    resource_tag: &str,
  ) -> Result<RotationSchedule> {
    let roster = resolve_roster(players, teams, selected_player_ids, selected_team_ids);
    self.build_for_roster(roster, capacity, resource_tag)
  }

  /// Build a schedule for an already resolved roster
  pub fn build_for_roster(
    &mut self,
    mut roster: Vec<Participant>,
    capacity: u32,
    resource_tag: &str,
  ) -> Result<RotationSchedule> {
    if capacity == 0 {
      return Err(PlannerError::InvalidCapacity(capacity));
    }
    if self.options.rotation_duration_minutes == 0 {
      return Err(PlannerError::InvalidDuration(
        "rotation duration must be at least 1 minute".to_string(),
      ));
    }

    let equipment_types: BTreeSet<String> = if resource_tag.is_empty() {
      BTreeSet::new()
    } else {
      BTreeSet::from([resource_tag.to_string()])
    };
    let rotation = self.options.rotation_duration_minutes;
    let rest = self.options.rest_between_rotations_minutes;

    if roster.is_empty() {
      debug!("Empty roster for {}, no groups built", resource_tag);
      return Ok(RotationSchedule {
        groups: Vec::new(),
        total_duration_minutes: 0,
        rest_between_rotations_minutes: rest,
        strategy: ScheduleStrategy::Parallel,
        equipment_utilization_percent: 0,
      });
    }

    let size = roster.len();
    let capacity_usize = capacity as usize;

    if size <= capacity_usize {
      debug!("{} players fit on {} x {}, no rotation needed", size, capacity, resource_tag);
      let utilization = (size as u64 * 100 + u64::from(capacity) / 2) / u64::from(capacity);
      let group = RotationGroup {
        id: self.ids.next_id("group"),
        name: "All Players".to_string(),
        players: roster,
        start_offset_minutes: 0,
        duration_minutes: rotation,
        equipment_types,
      };
      return Ok(RotationSchedule {
        groups: vec![group],
        total_duration_minutes: rotation,
        rest_between_rotations_minutes: rest,
        strategy: ScheduleStrategy::Parallel,
        equipment_utilization_percent: utilization as u32,
      });
    }

    if self.options.consider_player_fitness {
      roster.sort_by_key(|p| Reverse(p.health_status.priority()));
    }

    let partitioner: &dyn Partitioner = if self.options.consider_player_position {
      &PositionBalance
    } else {
      self.options.strategy.partitioner()
    };
    let partition = partitioner.partition(roster, capacity_usize);

    debug!(
      "Split {} players on {} (capacity {}) into {} groups: {:?}",
      size,
      resource_tag,
      capacity,
      partition.len(),
      partition.iter().map(|g| g.len()).collect::<Vec<_>>()
    );

    // Bounds every start offset below it, so checking the total first
    // means no id is drawn for a schedule that cannot be timed
    let total_duration_minutes = sequential_total(partition.len(), rotation, rest)?;
    let slot = minutes(rotation.checked_add(rest))?;

    let mut groups = Vec::with_capacity(partition.len());
    for (i, players) in partition.into_iter().enumerate() {
      let start = u32::try_from(i).ok().and_then(|i| i.checked_mul(slot));
      groups.push(RotationGroup {
        id: self.ids.next_id("group"),
        name: format!("Group {}", i + 1),
        players,
        start_offset_minutes: minutes(start)?,
        duration_minutes: rotation,
        equipment_types: equipment_types.clone(),
      });
    }

    Ok(RotationSchedule {
      groups,
      total_duration_minutes,
      rest_between_rotations_minutes: rest,
      strategy: ScheduleStrategy::Sequential,
      equipment_utilization_percent: 100,
    })
  }
}

/// `count` back-to-back rotations with `rest` between consecutive ones
fn sequential_total(count: usize, rotation: u32, rest: u32) -> Result<u32> {
  let count = u32::try_from(count).ok();
  let total = count.and_then(|count| {
    let work = count.checked_mul(rotation)?;
    let rests = count.saturating_sub(1).checked_mul(rest)?;
    work.checked_add(rests)
  });
  minutes(total)
}

fn minutes(value: Option<u32>) -> Result<u32> {
  value.ok_or_else(|| {
    PlannerError::DurationOverflow("rotation schedule does not fit in u32 minutes".to_string())
  })
}

/// One-shot build with sequential group ids
pub fn build(
  players: &[Participant],
  teams: &[Team],
  selected_player_ids: &[String],
  selected_team_ids: &[String],
  capacity: u32,
  resource_tag: &str,
  options: RotationOptions,
) -> Result<RotationSchedule> {
  RotationGroupBuilder::new(options).build(
    players,
    teams,
    selected_player_ids,
    selected_team_ids,
    capacity,
    resource_tag,
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
