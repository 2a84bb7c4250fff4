//! Test utilities and factories shared by the unit tests
//!
//! This module provides:
//! - Participant, roster and team factories
//! - Common interval definitions

use crate::models::{IntervalDefinition, Participant, PrimaryMetric, SetConfiguration, Team};

/// ---------------------------------------------------------------------------
/// Roster Factories
/// ---------------------------------------------------------------------------

/// A healthy player with no jersey or position
pub fn make_player(id: &str) -> Participant {
  Participant::new(id, format!("Name {}", id))
}

/// A player with a position
pub fn make_player_at(id: &str, position: &str) -> Participant {
  let mut player = make_player(id);
  player.position = Some(position.to_string());
  player
}

/// `n` healthy players: `player-1` / "Player 1" up to `player-n`
pub fn make_roster(n: usize) -> Vec<Participant> {
  (1..=n)
    .map(|i| Participant::new(format!("player-{}", i), format!("Player {}", i)))
    .collect()
}

/// A team whose players carry its id
pub fn make_team(id: &str, player_ids: &[&str]) -> Team {
  Team {
    id: id.to_string(),
    name: format!("Team {}", id),
    players: player_ids
      .iter()
      .map(|pid| {
        let mut player = make_player(pid);
        player.team_id = Some(id.to_string());
        player
      })
      .collect(),
  }
}

pub fn all_ids(players: &[Participant]) -> Vec<String> {
  players.iter().map(|p| p.id.clone()).collect()
}

/// ---------------------------------------------------------------------------
/// Interval Factories
/// ---------------------------------------------------------------------------

/// 8 x 20s work / 10s rest, one set
pub fn tabata(id: &str) -> IntervalDefinition {
  let mut def = IntervalDefinition::new(id, "Tabata", 20).with_sets(SetConfiguration {
    number_of_sets: 1,
    intervals_per_set: 8,
    rest_between_sets: 0,
    rest_between_intervals: 10,
  });
  def.primary_metric = Some(PrimaryMetric::Time);
  def.targets.time_target_seconds = Some(20);
  def
}
