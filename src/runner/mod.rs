//! External command execution.
//!
//! [`CommandRunner`] owns the run-mode logic (dry-run, tracing, check and
//! capture semantics) and delegates the actual spawn to an [`Executor`]:
//!
//! - [`ProcessExecutor`]: spawns real child processes
//! - [`MockExecutor`]: records invocations and replays scripted outcomes in tests

pub mod mock;
pub mod process;
pub mod trace;

pub use mock::MockExecutor;
pub use process::ProcessExecutor;
pub use trace::{TraceLog, TraceSettings, Tracer};

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, ToolError};

/// A command line plus the flags controlling how it is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program followed by its arguments; never empty
    pub tokens: Vec<String>,
    /// Fail with `CommandFailed` on non-zero exit
    pub check: bool,
    /// Only print what would run
    pub dry_run: bool,
    /// Collect standard output as text (implies check)
    pub capture_output: bool,
    /// Print a trace line before spawning
    pub show_trace: bool,
    /// Pass-through spawn options
    pub options: SpawnOptions,
}

/// Options handed untouched to the process-spawning facility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    pub current_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// A checked, untraced, wet invocation of `tokens`.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            tokens: tokens.into_iter().map(Into::into).collect(),
            check: true,
            dry_run: false,
            capture_output: false,
            show_trace: false,
            options: SpawnOptions::default(),
        }
    }

    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn capture_output(mut self, capture_output: bool) -> Self {
        self.capture_output = capture_output;
        self
    }

    pub fn show_trace(mut self, show_trace: bool) -> Self {
        self.show_trace = show_trace;
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

/// What came back from running an [`Invocation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The child was waited on; `None` when killed by a signal
    Exited(Option<i32>),
    /// Standard output of a successful captured run
    Captured(String),
    /// Nothing was spawned
    DryRun,
}

impl Outcome {
    /// Exit status, with a dry run counting as success.
    pub fn status(&self) -> Option<i32> {
        match self {
            Outcome::Exited(code) => *code,
            Outcome::Captured(_) | Outcome::DryRun => Some(0),
        }
    }

    /// Captured output, absent for dry runs and uncaptured commands.
    pub fn into_output(self) -> Option<String> {
        match self {
            Outcome::Captured(text) => Some(text),
            _ => None,
        }
    }
}

/// Spawns a command and reports how it ended.
///
/// Implementations never apply check semantics; [`CommandRunner`] does that.
/// When `capture_output` is set they return [`Outcome::Captured`] on success
/// and [`Outcome::Exited`] with the failing code otherwise.
pub trait Executor {
    fn execute(&self, invocation: &Invocation) -> Result<Outcome>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, invocation: &Invocation) -> Result<Outcome> {
        (**self).execute(invocation)
    }
}

/// Runs invocations with tracing and dry-run support.
pub struct CommandRunner<E> {
    executor: E,
    tracer: Tracer,
}

impl<E: Executor> CommandRunner<E> {
    pub fn new(executor: E, tracer: Tracer) -> Self {
        CommandRunner { executor, tracer }
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `invocation`.
    ///
    /// # Returns
    /// * `Ok(Outcome::DryRun)` - dry run, nothing spawned
    /// * `Ok(Outcome::Captured(_))` - captured stdout of a successful run
    /// * `Ok(Outcome::Exited(_))` - the child's status (zero when `check` is set)
    /// * `Err(ToolError::CommandFailed)` - non-zero exit under check or capture
    /// * `Err(ToolError::SpawnFailed)` - the program could not be started
    pub fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        if invocation.dry_run {
            self.tracer.emit(format!(
                "{}Would run the following command:",
                trace::message_prefix(true)
            ));
            self.tracer.command(&invocation.tokens, true);
            return Ok(Outcome::DryRun);
        }

        if invocation.show_trace {
            self.tracer.command(&invocation.tokens, false);
        }

        debug!(command = %invocation.command_line(), check = invocation.check, capture = invocation.capture_output, "spawning");
        let outcome = self.executor.execute(invocation)?;
        debug!(?outcome, "command finished");

        match outcome {
            Outcome::Exited(code) if code != Some(0) => {
                if invocation.check || invocation.capture_output {
                    Err(ToolError::command_failed(&invocation.tokens, code))
                } else {
                    Ok(Outcome::Exited(code))
                }
            }
            other => Ok(other),
        }
    }

    /// Run and return captured standard output (`None` in a dry run).
    pub fn capture(&self, invocation: Invocation) -> Result<Option<String>> {
        let outcome = self.run(&invocation.capture_output(true))?;
        Ok(outcome.into_output())
    }

    /// Run without check semantics and return the raw status.
    pub fn status(&self, invocation: Invocation) -> Result<Option<i32>> {
        let outcome = self.run(&invocation.check(false))?;
        Ok(outcome.status())
    }
}
