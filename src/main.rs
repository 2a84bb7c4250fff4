use std::process::ExitCode;

fn main() -> ExitCode {
  session_planner_lib::run()
}
