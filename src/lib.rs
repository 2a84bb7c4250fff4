pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod ids;
pub mod intervals;
pub mod models;
pub mod roster;
pub mod rotation;
pub mod timing;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use error::{PlannerError, Result};

use std::process::ExitCode;

use config::PlannerConfig;

pub fn run() -> ExitCode {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let config = match PlannerConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      log::error!("Invalid configuration: {}", e);
      return ExitCode::FAILURE;
    }
  };

  let args: Vec<String> = std::env::args().skip(1).collect();
  match commands::dispatch(&args, &config) {
    Ok(output) => {
      println!("{}", output);
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("{}", e);
      ExitCode::FAILURE
    }
  }
}
