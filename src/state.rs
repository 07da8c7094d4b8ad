//! Window State
//!
//! The two text buffers shown by the window, plus the guard that keeps a
//! single optimizer run in flight. Toolkit-free so the handler logic can be
//! exercised without a display.

use crate::command::OptimizeCommand;
use crate::config::LauncherConfig;
use crate::runner::RunResult;
use std::path::Path;
use tracing::{error, warn};

#[derive(Debug, Default, Clone)]
pub struct WindowState {
    /// Path chosen in Step 1
    selected_file: String,

    /// Standard error of the last Step 2 run
    process_log: String,

    run_in_flight: bool,
}

impl WindowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> &str {
        &self.selected_file
    }

    pub fn process_log(&self) -> &str {
        &self.process_log
    }

    pub fn is_running(&self) -> bool {
        self.run_in_flight
    }

    /// Apply the outcome of the file dialog. `None` (cancelled) changes nothing.
    ///
    /// Returns true when the label needs re-rendering.
    pub fn apply_file_choice(&mut self, choice: Option<&Path>) -> bool {
        match choice {
            Some(path) => {
                self.selected_file = path.to_string_lossy().into_owned();
                true
            }
            None => false,
        }
    }

    /// Claim the run slot and build the command to execute.
    ///
    /// Returns `None` while a previous run has not finished.
    pub fn begin_run(&mut self, config: &LauncherConfig) -> Option<OptimizeCommand> {
        if self.run_in_flight {
            warn!("Optimizer already running, ignoring click");
            return None;
        }

        self.run_in_flight = true;
        Some(OptimizeCommand::from_config(config, &self.selected_file))
    }

    /// Store the result of a run and release the run slot.
    pub fn finish_run(&mut self, result: RunResult) {
        self.run_in_flight = false;

        self.process_log = match result {
            Ok(output) => output.stderr_text(),
            Err(e) => {
                error!("Optimizer run failed: {}", e);
                e.log_text()
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LauncherError;
    use crate::runner::CapturedOutput;
    use std::path::PathBuf;
    use std::process::ExitStatus;

    fn exit_status(code: i32) -> ExitStatus {
        std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("exit {}", code))
            .status()
            .unwrap()
    }

    fn output(stdout: &str, stderr: &str, code: i32) -> RunResult {
        Ok(CapturedOutput {
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            status: exit_status(code),
        })
    }

    #[test]
    fn test_starts_empty() {
        let state = WindowState::new();
        assert_eq!(state.selected_file(), "");
        assert_eq!(state.process_log(), "");
        assert!(!state.is_running());
    }

    #[test]
    fn test_file_choice_sets_exact_path() {
        let mut state = WindowState::new();
        let path = PathBuf::from("/home/user/cuts/supercuts.json");

        assert!(state.apply_file_choice(Some(&path)));
        assert_eq!(state.selected_file(), "/home/user/cuts/supercuts.json");
    }

    #[test]
    fn test_cancel_leaves_selection_unchanged() {
        let mut state = WindowState::new();
        state.apply_file_choice(Some(Path::new("/tmp/a.json")));

        assert!(!state.apply_file_choice(None));
        assert_eq!(state.selected_file(), "/tmp/a.json");
    }

    #[test]
    fn test_latest_choice_wins() {
        let mut state = WindowState::new();
        state.apply_file_choice(Some(Path::new("/tmp/a.json")));
        state.apply_file_choice(Some(Path::new("/tmp/b.json")));
        assert_eq!(state.selected_file(), "/tmp/b.json");
    }

    #[test]
    fn test_run_ignores_selection() {
        let config = LauncherConfig::default();

        let mut before = WindowState::new();
        let cmd_before = before.begin_run(&config).unwrap();

        let mut after = WindowState::new();
        after.apply_file_choice(Some(Path::new("/tmp/supercuts.json")));
        let cmd_after = after.begin_run(&config).unwrap();

        assert_eq!(cmd_before, cmd_after);
        assert_eq!(cmd_before.display(), "python ../optimize.py -h");
    }

    #[test]
    fn test_single_run_in_flight() {
        let config = LauncherConfig::default();
        let mut state = WindowState::new();

        assert!(state.begin_run(&config).is_some());
        assert!(state.is_running());
        assert!(state.begin_run(&config).is_none());

        state.finish_run(output("", "", 0));
        assert!(!state.is_running());
        assert!(state.begin_run(&config).is_some());
    }

    #[test]
    fn test_log_is_stderr_not_stdout() {
        let mut state = WindowState::new();
        state.begin_run(&LauncherConfig::default());
        state.finish_run(output("usage on stdout\n", "usage: optimize.py [-h]\n", 0));

        assert_eq!(state.process_log(), "usage: optimize.py [-h]\n");
    }

    #[test]
    fn test_log_shown_regardless_of_exit_status() {
        let mut state = WindowState::new();
        state.begin_run(&LauncherConfig::default());
        state.finish_run(output("", "ImportError: No module named ROOT\n", 1));

        assert_eq!(state.process_log(), "ImportError: No module named ROOT\n");
    }

    #[test]
    fn test_empty_stderr_clears_previous_log() {
        let mut state = WindowState::new();
        state.finish_run(output("", "first\n", 0));
        state.finish_run(output("only stdout", "", 0));
        assert_eq!(state.process_log(), "");
    }

    #[test]
    fn test_spawn_failure_is_displayed() {
        let mut state = WindowState::new();
        state.begin_run(&LauncherConfig::default());
        state.finish_run(Err(LauncherError::Spawn {
            program: "python".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        }));

        assert!(!state.is_running());
        assert_eq!(state.process_log(), "spawn failed: python: No such file or directory");
    }
}
