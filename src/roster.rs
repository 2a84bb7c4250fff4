//! Roster resolution and import
//!
//! The roster provider hands over full player and team snapshots. This module
//! resolves a selection (individual players plus whole teams) into one
//! de-duplicated participant list, and reads roster snapshots from CSV.

use std::collections::HashSet;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{PlannerError, Result};
use crate::models::{HealthStatus, Participant, Team};

/// Resolve selected players and teams into a roster.
///
/// Direct selections come first (in selection order), followed by the
/// players of each selected team (teams in selection order). A participant
/// reachable more than once keeps only its first position.
pub fn resolve_roster(
  players: &[Participant],
  teams: &[Team],
  selected_player_ids: &[String],
  selected_team_ids: &[String],
) -> Vec<Participant> {
  let mut seen: HashSet<&str> = HashSet::new();
  let mut roster = Vec::new();

  for player_id in selected_player_ids {
    let found = players
      .iter()
      .chain(teams.iter().flat_map(|t| t.players.iter()))
      .find(|p| &p.id == player_id);

    match found {
      Some(player) => {
        if seen.insert(player.id.as_str()) {
          roster.push(player.clone());
        }
      }
      None => warn!("Selected player {} not found in roster snapshot", player_id),
    }
  }

  for team_id in selected_team_ids {
    let Some(team) = teams.iter().find(|t| &t.id == team_id) else {
      warn!("Selected team {} not found in roster snapshot", team_id);
      continue;
    };

    for player in &team.players {
      if seen.insert(player.id.as_str()) {
        roster.push(player.clone());
      }
    }
  }

  debug!(
    "Resolved roster: {} players from {} direct and {} team selections",
    roster.len(),
    selected_player_ids.len(),
    selected_team_ids.len()
  );

  roster
}

/// ---------------------------------------------------------------------------
/// CSV import
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RosterRecord {
  id: String,
  name: String,
  jersey_number: Option<u32>,
  position: Option<String>,
  team_id: Option<String>,
  health_status: Option<String>,
}

/// Read participants from CSV with the header
/// `id,name,jersey_number,position,team_id,health_status`.
///
/// Empty optional cells become `None`; an empty health cell means healthy.
pub fn load_roster_csv<R: Read>(reader: R) -> Result<Vec<Participant>> {
  let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
  let mut participants = Vec::new();

  for (row, record) in reader.deserialize::<RosterRecord>().enumerate() {
    let record = record?;

    if record.id.is_empty() || record.name.is_empty() {
      return Err(PlannerError::Roster(format!(
        "row {}: id and name are required",
        row + 1
      )));
    }

    let health_status = match record.health_status.as_deref() {
      Some(value) => value
        .parse::<HealthStatus>()
        .map_err(|e| PlannerError::Roster(format!("row {}: {}", row + 1, e)))?,
      None => HealthStatus::Healthy,
    };

    participants.push(Participant {
      id: record.id,
      name: record.name,
      jersey_number: record.jersey_number,
      position: record.position,
      team_id: record.team_id,
      health_status,
    });
  }

  Ok(participants)
}

/// Rebuild teams from each participant's `team_id`, in first-seen order.
/// The team id doubles as its name. Players without a team are left out.
pub fn group_into_teams(participants: &[Participant]) -> Vec<Team> {
  let mut teams: Vec<Team> = Vec::new();

  for player in participants {
    let Some(team_id) = &player.team_id else {
      continue;
    };

    match teams.iter_mut().find(|t| &t.id == team_id) {
      Some(team) => team.players.push(player.clone()),
      None => teams.push(Team {
        id: team_id.clone(),
        name: team_id.clone(),
        players: vec![player.clone()],
      }),
    }
  }

  teams
}
