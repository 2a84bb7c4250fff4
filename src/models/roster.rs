use serde::{Deserialize, Serialize};

/// Player availability, ordered from fittest to least available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
  #[default]
  Healthy,
  Limited,
  Injured,
  Unavailable,
}

impl HealthStatus {
  /// Sort priority: healthy players go first
  pub fn priority(&self) -> u8 {
    match self {
      Self::Healthy => 3,
      Self::Limited => 2,
      Self::Injured => 1,
      Self::Unavailable => 0,
    }
  }
}

impl std::fmt::Display for HealthStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Healthy => write!(f, "healthy"),
      Self::Limited => write!(f, "limited"),
      Self::Injured => write!(f, "injured"),
      Self::Unavailable => write!(f, "unavailable"),
    }
  }
}

impl std::str::FromStr for HealthStatus {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "" | "healthy" => Ok(Self::Healthy),
      "limited" => Ok(Self::Limited),
      "injured" => Ok(Self::Injured),
      "unavailable" => Ok(Self::Unavailable),
      other => Err(format!("Unknown health status: {}", other)),
    }
  }
}

/// Position groups used when balancing positions across rotation groups.
/// Declaration order is the distribution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PositionBucket {
  Forward,
  Defense,
  Goalie,
  /// No position, or one outside the three known groups
  Other,
}

impl PositionBucket {
  pub const ALL: [PositionBucket; 4] = [
    PositionBucket::Forward,
    PositionBucket::Defense,
    PositionBucket::Goalie,
    PositionBucket::Other,
  ];

  pub fn from_position(position: Option<&str>) -> Self {
    match position.map(|p| p.trim().to_lowercase()).as_deref() {
      Some("forward") | Some("f") => Self::Forward,
      Some("defense") | Some("defence") | Some("d") => Self::Defense,
      Some("goalie") | Some("g") => Self::Goalie,
      _ => Self::Other,
    }
  }
}

/// A roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub jersey_number: Option<u32>,
  #[serde(default)]
  pub position: Option<String>,
  #[serde(default)]
  pub team_id: Option<String>,
  #[serde(default)]
  pub health_status: HealthStatus,
}

impl Participant {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      jersey_number: None,
      position: None,
      team_id: None,
      health_status: HealthStatus::Healthy,
    }
  }

  pub fn position_bucket(&self) -> PositionBucket {
    PositionBucket::from_position(self.position.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub players: Vec<Participant>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_health_priority_order() {
    assert!(HealthStatus::Healthy.priority() > HealthStatus::Limited.priority());
    assert!(HealthStatus::Limited.priority() > HealthStatus::Injured.priority());
    assert!(HealthStatus::Injured.priority() > HealthStatus::Unavailable.priority());
  }

  #[test]
  fn test_health_status_roundtrip_through_str() {
    for status in [
      HealthStatus::Healthy,
      HealthStatus::Limited,
      HealthStatus::Injured,
      HealthStatus::Unavailable,
    ] {
      assert_eq!(status.to_string().parse::<HealthStatus>(), Ok(status));
    }
    assert!("broken".parse::<HealthStatus>().is_err());
  }

  #[test]
  fn test_missing_health_status_defaults_to_healthy() {
    let p: Participant = serde_json::from_str(r#"{"id":"p1","name":"Ava"}"#).unwrap();
    assert_eq!(p.health_status, HealthStatus::Healthy);
    assert_eq!(p.jersey_number, None);
  }

  #[test]
  fn test_position_buckets() {
    assert_eq!(PositionBucket::from_position(Some("Forward")), PositionBucket::Forward);
    assert_eq!(PositionBucket::from_position(Some(" defense ")), PositionBucket::Defense);
    assert_eq!(PositionBucket::from_position(Some("G")), PositionBucket::Goalie);
    assert_eq!(PositionBucket::from_position(Some("Coach")), PositionBucket::Other);
    assert_eq!(PositionBucket::from_position(None), PositionBucket::Other);
  }
}
