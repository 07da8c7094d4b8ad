//! Optimizer Runner - Spawns the optimizer and captures its output
//!
//! ARCHITECTURE: the GTK main thread never waits on the child. `spawn_worker`
//! starts a native OS thread with its own Tokio runtime, runs the process
//! there, and hands the single result back over std::sync::mpsc. The UI polls
//! the receiver from the main loop.

use crate::command::OptimizeCommand;
use crate::error::LauncherError;
use std::process::{ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info};

/// Everything the child wrote, kept apart per stream
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: ExitStatus,
}

impl CapturedOutput {
    /// Standard error as label text. Invalid UTF-8 is replaced, nothing trimmed.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

pub type RunResult = Result<CapturedOutput, LauncherError>;

/// Run the command to completion with stdin closed.
pub async fn capture(command: &OptimizeCommand) -> RunResult {
    let mut cmd = tokio::process::Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(ref dir) = command.working_dir {
        cmd.current_dir(dir);
    }

    debug!("Spawning: {}", command.display());

    let output = cmd.output().await.map_err(|source| LauncherError::Spawn {
        program: command.program_name(),
        source,
    })?;

    info!(
        "{} exited with {} ({} bytes stdout, {} bytes stderr)",
        command.display(),
        output.status,
        output.stdout.len(),
        output.stderr.len()
    );

    Ok(CapturedOutput {
        stdout: output.stdout,
        stderr: output.stderr,
        status: output.status,
    })
}

/// Run `capture` on a dedicated worker thread.
///
/// Exactly one message is sent on the returned channel, unless the worker
/// dies first, in which case the sender is dropped.
pub fn spawn_worker(command: OptimizeCommand) -> mpsc::Receiver<RunResult> {
    let (sender, receiver) = mpsc::channel::<RunResult>();

    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                let _ = sender.send(Err(LauncherError::Runtime(e)));
                return;
            }
        };

        let result = rt.block_on(capture(&command));

        // Receiver dropped means the window is gone; nothing left to update
        let _ = sender.send(result);
    });

    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sh(script: &str) -> OptimizeCommand {
        OptimizeCommand::new("sh", ["-c", script])
    }

    #[tokio::test]
    async fn test_captures_streams_separately() {
        let out = capture(&sh("printf 'to stdout'; printf 'to stderr\\n' >&2"))
            .await
            .unwrap();

        assert_eq!(out.stdout, b"to stdout");
        assert_eq!(out.stderr_text(), "to stderr\n");
        assert!(out.status.success());
    }

    #[tokio::test]
    async fn test_nonzero_exit_still_captures_stderr() {
        let out = capture(&sh("echo 'boom' >&2; exit 3")).await.unwrap();

        assert_eq!(out.status.code(), Some(3));
        assert_eq!(out.stderr_text(), "boom\n");
    }

    #[tokio::test]
    async fn test_stdin_is_closed() {
        // `cat` would hang forever on an inherited terminal
        let out = capture(&sh("cat; echo done >&2")).await.unwrap();
        assert!(out.stdout.is_empty());
        assert_eq!(out.stderr_text(), "done\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cmd = OptimizeCommand::new("optimize-gui-no-such-interpreter", ["-h"]);

        match capture(&cmd).await {
            Err(LauncherError::Spawn { program, source }) => {
                assert_eq!(program, "optimize-gui-no-such-interpreter");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected spawn error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_script_resolved_relative_to_working_dir() {
        let root = tempfile::tempdir().unwrap();
        let gui_dir = root.path().join("gui");
        std::fs::create_dir(&gui_dir).unwrap();
        std::fs::write(
            root.path().join("optimize.sh"),
            "if [ \"$1\" = \"-h\" ]; then echo 'usage: optimize.py [-h]' >&2; fi\n",
        )
        .unwrap();

        let cmd = OptimizeCommand::new("sh", ["../optimize.sh", "-h"]).current_dir(&gui_dir);
        let out = capture(&cmd).await.unwrap();

        assert!(out.stdout.is_empty());
        assert_eq!(out.stderr_text(), "usage: optimize.py [-h]\n");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let out = CapturedOutput {
            stdout: Vec::new(),
            stderr: vec![b'o', b'k', 0xff, b'\n'],
            status: std::process::Command::new("true").status().unwrap(),
        };
        assert_eq!(out.stderr_text(), "ok\u{fffd}\n");
    }

    #[test]
    fn test_spawn_worker_sends_one_result() {
        let rx = spawn_worker(sh("echo 'from worker' >&2"));

        let result = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(result.unwrap().stderr_text(), "from worker\n");

        // Sender is dropped after the single message
        assert!(rx.recv_timeout(Duration::from_secs(10)).is_err());
    }
}
