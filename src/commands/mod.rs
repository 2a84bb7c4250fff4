pub mod rotation;
pub mod workout;

use std::fs;

use crate::config::PlannerConfig;
use crate::export::ExportFormat;

pub const USAGE: &str = "usage: session-planner workout <request.json>\n       session-planner rotation <request.json> [text|csv|json]";

/// Run a CLI command against a JSON request file and return what to print
pub fn dispatch(args: &[String], config: &PlannerConfig) -> Result<String, String> {
  let (command, path) = match args {
    [command, path, ..] => (command.as_str(), path.as_str()),
    _ => return Err(USAGE.to_string()),
  };

  let body = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;

  match command {
    "workout" => {
      let request: workout::WorkoutRequest =
        serde_json::from_str(&body).map_err(|e| format!("Invalid workout request: {}", e))?;
      let plan = workout::plan_workout(&request)?;
      serde_json::to_string_pretty(&plan).map_err(|e| format!("Failed to encode plan: {}", e))
    }
    "rotation" => {
      let mut request: rotation::RotationRequest =
        serde_json::from_str(&body).map_err(|e| format!("Invalid rotation request: {}", e))?;
      if let Some(format) = args.get(2) {
        request.export_format = Some(format.parse::<ExportFormat>()?);
      }

      let plan = rotation::plan_rotation(&request, config)?;
      let mut out = vec![plan.summary.clone()];
      out.extend(plan.validation.errors.iter().map(|e| format!("error: {}", e)));
      out.extend(plan.validation.warnings.iter().map(|w| format!("warning: {}", w)));
      if let Some(export) = &plan.export {
        out.push(String::new());
        out.push(export.clone());
      }
      Ok(out.join("\n"))
    }
    other => Err(format!("Unknown command '{}'\n{}", other, USAGE)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn write_request(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("session-planner-{}-{}.json", name, std::process::id()));
    fs::write(&path, body).unwrap();
    path
  }

  fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_dispatch_requires_command_and_file() {
    let err = dispatch(&args(&["workout"]), &PlannerConfig::default()).unwrap_err();
    assert_eq!(err, USAGE);
  }

  #[test]
  fn test_dispatch_workout() {
    let path = write_request(
      "workout",
      r#"{"intervals":[{"id":"w","name":"Warm up","durationSeconds":90}]}"#,
    );
    let out = dispatch(&args(&["workout", path.to_str().unwrap()]), &PlannerConfig::default()).unwrap();
    fs::remove_file(&path).ok();

    let plan: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(plan["totalSeconds"], 90);
    assert_eq!(plan["totalDisplay"], "1:30");
  }

  #[test]
  fn test_dispatch_rotation_with_format() {
    let path = write_request(
      "rotation",
      r#"{
        "players": [{"id":"a","name":"Ana"},{"id":"b","name":"Bo"},{"id":"c","name":"Cy"},{"id":"d","name":"Di"}],
        "selectedPlayerIds": ["a","b","c","d"],
        "capacity": 2,
        "resourceTag": "bike"
      }"#,
    );
    let out = dispatch(
      &args(&["rotation", path.to_str().unwrap(), "text"]),
      &PlannerConfig::default(),
    )
    .unwrap();
    fs::remove_file(&path).ok();

    assert!(out.starts_with("4 players • 2 rotation groups • 50 minutes total"));
    assert!(out.contains("Group 2 (22min - 42min):\n  • Cy\n  • Di"));
  }

  #[test]
  fn test_dispatch_unknown_command() {
    let path = write_request("unknown", "{}");
    let err = dispatch(&args(&["plan", path.to_str().unwrap()]), &PlannerConfig::default()).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(err.starts_with("Unknown command 'plan'"));
  }
}
