//! Error types shared by every planner operation

use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PlannerError {
  #[error("Invalid set configuration on '{definition_id}': {reason}")]
  InvalidSetConfiguration { definition_id: String, reason: String },

  #[error("Invalid capacity: {0} (must be at least 1)")]
  InvalidCapacity(u32),

  #[error("Invalid duration: {0}")]
  InvalidDuration(String),

  #[error("Duration overflow: {0}")]
  DurationOverflow(String),

  #[error("Invalid option: {0}")]
  InvalidOption(String),

  #[error("Roster error: {0}")]
  Roster(String),

  #[error("Serialization error: {0}")]
  Serialization(String),
}

impl From<serde_json::Error> for PlannerError {
  fn from(e: serde_json::Error) -> Self {
    PlannerError::Serialization(e.to_string())
  }
}

impl From<csv::Error> for PlannerError {
  fn from(e: csv::Error) -> Self {
    PlannerError::Roster(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_serializes_with_type_tag() {
    let err = PlannerError::InvalidCapacity(0);
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(json, r#"{"type":"InvalidCapacity","message":0}"#);
  }

  #[test]
  fn test_error_display() {
    let err = PlannerError::InvalidSetConfiguration {
      definition_id: "sprint".to_string(),
      reason: "numberOfSets must be at least 1".to_string(),
    };
    assert_eq!(
      err.to_string(),
      "Invalid set configuration on 'sprint': numberOfSets must be at least 1"
    );
  }
}
