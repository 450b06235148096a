use std::process::{Command, Stdio};

use crate::error::{Result, ToolError};
use crate::runner::{Executor, Invocation, Outcome};

/// Spawns real child processes with `std::process::Command`.
///
/// The child inherits the environment and standard streams, except standard
/// output when it is being captured.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.tokens.iter().skip(1));

        if let Some(dir) = &invocation.options.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &invocation.options.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<Outcome> {
        let mut cmd = Self::command(invocation);
        let spawn_failed = |source| ToolError::SpawnFailed {
            program: invocation.program().to_string(),
            source,
        };

        if invocation.capture_output {
            let output = cmd
                .stdin(Stdio::inherit())
                .stderr(Stdio::inherit())
                .output()
                .map_err(spawn_failed)?;
            if !output.status.success() {
                return Ok(Outcome::Exited(output.status.code()));
            }
            return Ok(Outcome::Captured(
                String::from_utf8_lossy(&output.stdout).into_owned(),
            ));
        }

        let status = cmd.status().map_err(spawn_failed)?;
        Ok(Outcome::Exited(status.code()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_process_captures_stdout() {
        let outcome = ProcessExecutor
            .execute(&Invocation::new(["sh", "-c", "echo hello"]).capture_output(true))
            .unwrap();
        assert_eq!(outcome, Outcome::Captured("hello\n".to_string()));
    }

    #[test]
    fn test_process_reports_exit_status() {
        let outcome = ProcessExecutor
            .execute(&Invocation::new(["sh", "-c", "exit 3"]))
            .unwrap();
        assert_eq!(outcome, Outcome::Exited(Some(3)));
    }

    #[test]
    fn test_process_failed_capture_reports_status() {
        let outcome = ProcessExecutor
            .execute(&Invocation::new(["sh", "-c", "echo partial; exit 4"]).capture_output(true))
            .unwrap();
        assert_eq!(outcome, Outcome::Exited(Some(4)));
    }

    #[test]
    fn test_process_honours_current_dir_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = ProcessExecutor
            .execute(
                &Invocation::new(["sh", "-c", "printf '%s' \"$GREETING\"; pwd"])
                    .capture_output(true)
                    .current_dir(dir.path())
                    .env("GREETING", "hi:"),
            )
            .unwrap();
        let text = outcome.into_output().unwrap();
        assert!(text.starts_with("hi:"));
        let canonical = dir.path().canonicalize().unwrap();
        assert!(text.trim_end().ends_with(canonical.file_name().unwrap().to_str().unwrap()));
    }

    #[test]
    fn test_process_missing_program() {
        let err = ProcessExecutor
            .execute(&Invocation::new(["definitely-not-a-real-program-xyz"]))
            .unwrap_err();
        assert!(matches!(err, ToolError::SpawnFailed { .. }));
    }
}
