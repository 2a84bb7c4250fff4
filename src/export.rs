//! Schedule summaries and interchange formats
//!
//! All output is a pure function of the schedule: identical input gives
//! byte-identical text, CSV and JSON.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::{Participant, RotationGroup, RotationSchedule, SessionTiming};

pub const CSV_HEADER: &str = "Group,Player Name,Jersey Number,Position,Start Time,Duration";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
  #[default]
  Text,
  Csv,
  Json,
}

impl std::fmt::Display for ExportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Text => write!(f, "text"),
      Self::Csv => write!(f, "csv"),
      Self::Json => write!(f, "json"),
    }
  }
}

impl std::str::FromStr for ExportFormat {
  type Err = String;
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "text" | "txt" => Ok(Self::Text),
      "csv" => Ok(Self::Csv),
      "json" => Ok(Self::Json),
      _ => Err(format!("Unknown export format: {}", s)),
    }
  }
}

/// One-line description: "18 players • 3 rotation groups • 105 minutes total"
pub fn summarize(schedule: &RotationSchedule, timing: &SessionTiming) -> String {
  let groups = if schedule.groups.len() == 1 {
    "single session".to_string()
  } else {
    format!("{} rotation groups", schedule.groups.len())
  };

  format!(
    "{} players • {} • {} minutes total",
    schedule.total_players(),
    groups,
    timing.total_session_time_minutes
  )
}

/// Render the schedule in one of the interchange formats
pub fn export(schedule: &RotationSchedule, format: ExportFormat) -> Result<String> {
  match format {
    ExportFormat::Text => Ok(export_text(schedule)),
    ExportFormat::Csv => export_csv(schedule),
    ExportFormat::Json => Ok(serde_json::to_string_pretty(schedule)?),
  }
}

/// Parse a schedule previously exported as JSON
pub fn schedule_from_json(json: &str) -> Result<RotationSchedule> {
  serde_json::from_str(json).map_err(|e| PlannerError::Serialization(e.to_string()))
}

fn export_text(schedule: &RotationSchedule) -> String {
  schedule
    .groups
    .iter()
    .map(group_block)
    .collect::<Vec<_>>()
    .join("\n\n")
}

fn group_block(group: &RotationGroup) -> String {
  let mut lines = vec![format!(
    "{} ({}min - {}min):",
    group.name,
    group.start_offset_minutes,
    group.end_offset_minutes()
  )];
  lines.extend(group.players.iter().map(player_line));
  lines.join("\n")
}

fn player_line(player: &Participant) -> String {
  let mut line = format!("  • {}", player.name);
  if let Some(jersey) = player.jersey_number {
    line.push_str(&format!(" (#{})", jersey));
  }
  if let Some(position) = &player.position {
    line.push_str(&format!(" - {}", position));
  }
  line
}

/// Every field is quoted so the player name always is, whatever it holds
fn export_csv(schedule: &RotationSchedule) -> Result<String> {
  let mut buffer = CSV_HEADER.as_bytes().to_vec();
  buffer.push(b'\n');

  let mut wtr = WriterBuilder::new()
    .has_headers(false)
    .quote_style(QuoteStyle::Always)
    .terminator(Terminator::Any(b'\n'))
    .from_writer(buffer);

  for group in &schedule.groups {
    for player in &group.players {
      wtr.write_record([
        group.name.clone(),
        player.name.clone(),
        player.jersey_number.map(|n| n.to_string()).unwrap_or_default(),
        player.position.clone().unwrap_or_default(),
        group.start_offset_minutes.to_string(),
        group.duration_minutes.to_string(),
      ])
      .map_err(|e| PlannerError::Serialization(e.to_string()))?;
    }
  }

  let bytes = wtr
    .into_inner()
    .map_err(|e| PlannerError::Serialization(e.to_string()))?;
  let text = String::from_utf8(bytes).map_err(|e| PlannerError::Serialization(e.to_string()))?;
  Ok(text.trim_end_matches('\n').to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rotation::{RotationGroupBuilder, RotationOptions};
  use crate::test_utils::*;
  use crate::timing::compute_session_timing;

  fn small_schedule() -> RotationSchedule {
    let mut roster = make_roster(3);
    roster[0].jersey_number = Some(9);
    roster[0].position = Some("Forward".to_string());
    roster[1].position = Some("Goalie".to_string());
    roster[2].name = "Dee \"Wall\" Park".to_string();

    RotationGroupBuilder::new(RotationOptions::default())
      .build_for_roster(roster, 2, "bike")
      .unwrap()
  }

  #[test]
  fn test_summary_for_rotated_session() {
    let schedule = RotationGroupBuilder::new(RotationOptions::default())
      .build_for_roster(make_roster(18), 6, "bike")
      .unwrap();
    let timing = compute_session_timing(&schedule, 30).unwrap();

    assert_eq!(
      summarize(&schedule, &timing),
      "18 players • 3 rotation groups • 105 minutes total"
    );
  }

  #[test]
  fn test_summary_for_single_session() {
    let schedule = RotationGroupBuilder::new(RotationOptions::default())
      .build_for_roster(make_roster(4), 6, "bike")
      .unwrap();
    let timing = compute_session_timing(&schedule, 45).unwrap();

    assert_eq!(summarize(&schedule, &timing), "4 players • single session • 45 minutes total");
  }

  #[test]
  fn test_text_export() {
    let text = export(&small_schedule(), ExportFormat::Text).unwrap();
    assert_eq!(
      text,
      "Group 1 (0min - 20min):\n  • Player 1 (#9) - Forward\n  • Player 2 - Goalie\n\n\
       Group 2 (22min - 42min):\n  • Dee \"Wall\" Park"
    );
  }

  #[test]
  fn test_csv_export() {
    let csv = export(&small_schedule(), ExportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
      lines,
      vec![
        CSV_HEADER,
        "\"Group 1\",\"Player 1\",\"9\",\"Forward\",\"0\",\"20\"",
        "\"Group 1\",\"Player 2\",\"\",\"Goalie\",\"0\",\"20\"",
        "\"Group 2\",\"Dee \"\"Wall\"\" Park\",\"\",\"\",\"22\",\"20\"",
      ]
    );
    assert!(!csv.ends_with('\n'));
  }

  #[test]
  fn test_csv_export_escapes_every_field() {
    let mut schedule = small_schedule();
    schedule.groups[0].name = "Group \"A\"".to_string();
    schedule.groups[0].players[0].position = Some("Wing, Left".to_string());

    let csv = export(&schedule, ExportFormat::Csv).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(reader.headers().unwrap().len(), 6);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 6));
    assert_eq!(&rows[0][0], "Group \"A\"");
    assert_eq!(&rows[0][3], "Wing, Left");
    assert_eq!(&rows[2][1], "Dee \"Wall\" Park");
  }

  #[test]
  fn test_json_export_roundtrip() {
    let schedule = small_schedule();
    let json = export(&schedule, ExportFormat::Json).unwrap();

    assert!(json.contains("\"startOffsetMinutes\""));
    assert!(json.contains("\"equipmentUtilizationPercent\""));
    assert_eq!(schedule_from_json(&json).unwrap(), schedule);
  }

  #[test]
  fn test_exports_are_deterministic() {
    for format in [ExportFormat::Text, ExportFormat::Csv, ExportFormat::Json] {
      assert_eq!(
        export(&small_schedule(), format).unwrap(),
        export(&small_schedule(), format).unwrap()
      );
    }
  }

  #[test]
  fn test_bad_json_is_a_serialization_error() {
    assert!(matches!(schedule_from_json("{"), Err(PlannerError::Serialization(_))));
  }

  #[test]
  fn test_format_names() {
    assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
    assert_eq!(ExportFormat::Json.to_string(), "json");
    assert!("xml".parse::<ExportFormat>().is_err());
  }
}
