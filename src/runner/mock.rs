use std::cell::RefCell;

use crate::error::{Result, ToolError};
use crate::runner::{Executor, Invocation, Outcome};

#[derive(Debug, Clone)]
enum Response {
    Outcome(Outcome),
    SpawnFailure,
}

/// Mock executor for testing without spawning processes
///
/// Responses are keyed by a command-line prefix (`"git tag --list"`); the
/// longest matching prefix wins. Unmatched commands succeed, returning empty
/// output when captured.
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: RefCell<Vec<(String, Response)>>,
    invocations: RefCell<Vec<Invocation>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for commands starting with `prefix`
    pub fn respond(&self, prefix: impl Into<String>, outcome: Outcome) -> &Self {
        self.responses
            .borrow_mut()
            .push((prefix.into(), Response::Outcome(outcome)));
        self
    }

    /// Script captured output for commands starting with `prefix`
    pub fn respond_output(&self, prefix: impl Into<String>, output: impl Into<String>) -> &Self {
        self.respond(prefix, Outcome::Captured(output.into()))
    }

    /// Make commands starting with `prefix` fail to spawn
    pub fn fail_spawn(&self, prefix: impl Into<String>) -> &Self {
        self.responses
            .borrow_mut()
            .push((prefix.into(), Response::SpawnFailure));
        self
    }

    /// Everything executed so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Command lines executed so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    /// Whether any executed command line starts with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.command_lines()
            .iter()
            .any(|line| line.starts_with(prefix))
    }

    fn lookup(&self, command_line: &str) -> Option<Response> {
        self.responses
            .borrow()
            .iter()
            .filter(|(prefix, _)| command_line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, response)| response.clone())
    }
}

impl Executor for MockExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<Outcome> {
        self.invocations.borrow_mut().push(invocation.clone());

        match self.lookup(&invocation.command_line()) {
            Some(Response::SpawnFailure) => Err(ToolError::SpawnFailed {
                program: invocation.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock: not found"),
            }),
            Some(Response::Outcome(Outcome::Captured(_))) if !invocation.capture_output => {
                Ok(Outcome::Exited(Some(0)))
            }
            Some(Response::Outcome(outcome)) => Ok(outcome),
            None if invocation.capture_output => Ok(Outcome::Captured(String::new())),
            None => Ok(Outcome::Exited(Some(0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_invocations() {
        let mock = MockExecutor::new();
        mock.execute(&Invocation::new(["git", "status"])).unwrap();
        mock.execute(&Invocation::new(["git", "log"])).unwrap();

        assert_eq!(mock.command_lines(), vec!["git status", "git log"]);
        assert!(mock.ran("git log"));
        assert!(!mock.ran("git push"));
    }

    #[test]
    fn test_mock_longest_prefix_wins() {
        let mock = MockExecutor::new();
        mock.respond("git", Outcome::Exited(Some(2)))
            .respond("git tag", Outcome::Exited(Some(3)));

        let outcome = mock.execute(&Invocation::new(["git", "tag", "v1"])).unwrap();
        assert_eq!(outcome, Outcome::Exited(Some(3)));

        let outcome = mock.execute(&Invocation::new(["git", "push"])).unwrap();
        assert_eq!(outcome, Outcome::Exited(Some(2)));
    }

    #[test]
    fn test_mock_default_capture_is_empty() {
        let mock = MockExecutor::new();
        let outcome = mock
            .execute(&Invocation::new(["git", "tag", "--list"]).capture_output(true))
            .unwrap();
        assert_eq!(outcome, Outcome::Captured(String::new()));
    }

    #[test]
    fn test_mock_spawn_failure() {
        let mock = MockExecutor::new();
        mock.fail_spawn("pre-commit");
        let err = mock
            .execute(&Invocation::new(["pre-commit", "install"]))
            .unwrap_err();
        assert!(matches!(err, ToolError::SpawnFailed { .. }));
    }
}
