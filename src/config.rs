//! Planner configuration
//!
//! Defaults cover a typical team session. Each value can be overridden from
//! the environment (or a `.env` file loaded by the binary).

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::rotation::{
  PartitionStrategy, RotationOptions, DEFAULT_REST_BETWEEN_ROTATIONS, DEFAULT_ROTATION_MINUTES,
};
use crate::validation::{DEFAULT_MAX_SESSION_MINUTES, LOW_UTILIZATION_PERCENT};

/// ---------------------------------------------------------------------------
/// Environment keys
/// ---------------------------------------------------------------------------

pub const ENV_MAX_SESSION_MINUTES: &str = "PLANNER_MAX_SESSION_MINUTES";
pub const ENV_ROTATION_MINUTES: &str = "PLANNER_ROTATION_MINUTES";
pub const ENV_REST_BETWEEN_ROTATIONS: &str = "PLANNER_REST_BETWEEN_ROTATIONS";
pub const ENV_STRATEGY: &str = "PLANNER_STRATEGY";
pub const ENV_LOW_UTILIZATION_PERCENT: &str = "PLANNER_LOW_UTILIZATION_PERCENT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
  pub max_session_minutes: u32,
  pub rotation_duration_minutes: u32,
  pub rest_between_rotations_minutes: u32,
  pub default_strategy: PartitionStrategy,
  pub low_utilization_percent: u32,
}

impl Default for PlannerConfig {
  fn default() -> Self {
    Self {
      max_session_minutes: DEFAULT_MAX_SESSION_MINUTES,
      rotation_duration_minutes: DEFAULT_ROTATION_MINUTES,
      rest_between_rotations_minutes: DEFAULT_REST_BETWEEN_ROTATIONS,
      default_strategy: PartitionStrategy::BalanceGroups,
      low_utilization_percent: LOW_UTILIZATION_PERCENT,
    }
  }
}

impl PlannerConfig {
  /// Defaults with any `PLANNER_*` overrides applied.
  /// A variable that is set but unparseable is an error.
  pub fn from_env() -> Result<Self> {
    let defaults = Self::default();
    Ok(Self {
      max_session_minutes: read_var(ENV_MAX_SESSION_MINUTES)?.unwrap_or(defaults.max_session_minutes),
      rotation_duration_minutes: read_var(ENV_ROTATION_MINUTES)?
        .unwrap_or(defaults.rotation_duration_minutes),
      rest_between_rotations_minutes: read_var(ENV_REST_BETWEEN_ROTATIONS)?
        .unwrap_or(defaults.rest_between_rotations_minutes),
      default_strategy: read_var(ENV_STRATEGY)?.unwrap_or(defaults.default_strategy),
      low_utilization_percent: read_var(ENV_LOW_UTILIZATION_PERCENT)?
        .unwrap_or(defaults.low_utilization_percent),
    })
  }

  /// Builder options seeded from this config
  pub fn rotation_options(&self) -> RotationOptions {
    RotationOptions {
      strategy: self.default_strategy,
      rotation_duration_minutes: self.rotation_duration_minutes,
      rest_between_rotations_minutes: self.rest_between_rotations_minutes,
      ..RotationOptions::default()
    }
  }
}

fn read_var<T>(key: &str) -> Result<Option<T>>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match env::var(key) {
    Ok(raw) if raw.trim().is_empty() => Ok(None),
    Ok(raw) => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| PlannerError::InvalidOption(format!("{}={}: {}", key, raw, e))),
    Err(env::VarError::NotPresent) => Ok(None),
    Err(env::VarError::NotUnicode(_)) => {
      Err(PlannerError::InvalidOption(format!("{} is not valid unicode", key)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const ALL_KEYS: [&str; 5] = [
    ENV_MAX_SESSION_MINUTES,
    ENV_ROTATION_MINUTES,
    ENV_REST_BETWEEN_ROTATIONS,
    ENV_STRATEGY,
    ENV_LOW_UTILIZATION_PERCENT,
  ];

  #[test]
  #[serial]
  fn test_defaults_without_env() {
    temp_env::with_vars_unset(ALL_KEYS, || {
      let config = PlannerConfig::from_env().unwrap();
      assert_eq!(config, PlannerConfig::default());
      assert_eq!(config.max_session_minutes, 120);
      assert_eq!(config.rotation_duration_minutes, 20);
    });
  }

  #[test]
  #[serial]
  fn test_env_overrides() {
    temp_env::with_vars(
      [
        (ENV_MAX_SESSION_MINUTES, Some("90")),
        (ENV_ROTATION_MINUTES, Some("15")),
        (ENV_STRATEGY, Some("minimize_time")),
        (ENV_REST_BETWEEN_ROTATIONS, None),
        (ENV_LOW_UTILIZATION_PERCENT, None),
      ],
      || {
        let config = PlannerConfig::from_env().unwrap();
        assert_eq!(config.max_session_minutes, 90);
        assert_eq!(config.rotation_duration_minutes, 15);
        assert_eq!(config.rest_between_rotations_minutes, 2);
        assert_eq!(config.default_strategy, PartitionStrategy::MinimizeTime);

        let options = config.rotation_options();
        assert_eq!(options.strategy, PartitionStrategy::MinimizeTime);
        assert_eq!(options.rotation_duration_minutes, 15);
        assert!(!options.consider_player_position);
      },
    );
  }

  #[test]
  #[serial]
  fn test_unparseable_env_is_an_error() {
    temp_env::with_var(ENV_ROTATION_MINUTES, Some("twenty"), || {
      assert!(matches!(PlannerConfig::from_env(), Err(PlannerError::InvalidOption(_))));
    });
  }

  #[test]
  #[serial]
  fn test_unknown_strategy_is_an_error() {
    temp_env::with_var(ENV_STRATEGY, Some("random"), || {
      assert!(PlannerConfig::from_env().is_err());
    });
  }

  #[test]
  #[serial]
  #[cfg(unix)]
  fn test_non_unicode_env_is_an_invalid_option() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    temp_env::with_var(ENV_MAX_SESSION_MINUTES, Some(OsStr::from_bytes(b"9\xff0")), || {
      assert!(matches!(PlannerConfig::from_env(), Err(PlannerError::InvalidOption(_))));
    });
  }
}
