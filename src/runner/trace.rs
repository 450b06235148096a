//! Shell-style command tracing.
//!
//! Every line produced here goes to standard error (or to an in-memory log in
//! tests) exactly as `{message_prefix}{trace_prefix}{tokens joined by ' '}`,
//! mirroring what `set -x` prints in a shell.

use std::cell::RefCell;
use std::rc::Rc;

/// Prefix marking lines printed during a dry run.
pub const DRY_RUN_PREFIX: &str = "[DRY-RUN] ";

/// Prefix for lines printed during a real run.
pub const WET_RUN_PREFIX: &str = "";

/// Trace prefix used when `PS4` is not set.
pub const DEFAULT_TRACE_PREFIX: &str = "+ ";

/// Environment variable consulted for the trace prefix.
pub const TRACE_PREFIX_VAR: &str = "PS4";

/// Standard dry-run or wet-run prefix for trace messages.
pub fn message_prefix(dry_run: bool) -> &'static str {
    if dry_run {
        DRY_RUN_PREFIX
    } else {
        WET_RUN_PREFIX
    }
}

/// Trace settings resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSettings {
    pub trace_prefix: String,
}

impl TraceSettings {
    pub fn new(trace_prefix: impl Into<String>) -> Self {
        TraceSettings {
            trace_prefix: trace_prefix.into(),
        }
    }

    /// Reads `PS4`, falling back to [`DEFAULT_TRACE_PREFIX`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let trace_prefix =
            lookup(TRACE_PREFIX_VAR).unwrap_or_else(|| DEFAULT_TRACE_PREFIX.to_string());
        TraceSettings { trace_prefix }
    }
}

impl Default for TraceSettings {
    fn default() -> Self {
        TraceSettings::new(DEFAULT_TRACE_PREFIX)
    }
}

/// Lines captured by a [`Tracer`] built with [`Tracer::capturing`].
#[derive(Debug, Clone, Default)]
pub struct TraceLog(Rc<RefCell<Vec<String>>>);

impl TraceLog {
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.borrow().iter().any(|line| line.contains(needle))
    }

    fn push(&self, line: String) {
        self.0.borrow_mut().push(line);
    }
}

#[derive(Debug, Clone)]
enum Sink {
    Stderr,
    Memory(TraceLog),
}

/// Writes trace and diagnostic lines for the user.
#[derive(Debug, Clone)]
pub struct Tracer {
    settings: TraceSettings,
    sink: Sink,
}

impl Tracer {
    /// A tracer that writes to standard error.
    pub fn new(settings: TraceSettings) -> Self {
        Tracer {
            settings,
            sink: Sink::Stderr,
        }
    }

    /// A tracer that keeps its lines in memory instead of printing them.
    pub fn capturing(settings: TraceSettings) -> (Self, TraceLog) {
        let log = TraceLog::default();
        let tracer = Tracer {
            settings,
            sink: Sink::Memory(log.clone()),
        };
        (tracer, log)
    }

    pub fn trace_prefix(&self) -> &str {
        &self.settings.trace_prefix
    }

    /// Trace a command using the configured trace prefix.
    pub fn command<S: AsRef<str>>(&self, tokens: &[S], dry_run: bool) {
        self.trace(tokens, None, self.trace_prefix(), dry_run);
    }

    /// Trace an informational message: no trace prefix, just the run-mode prefix.
    pub fn note<S: AsRef<str>>(&self, words: &[S], dry_run: bool) {
        self.trace(words, None, "", dry_run);
    }

    /// Emit `{message_prefix}{trace_prefix}{tokens}`.
    ///
    /// `message_prefix` defaults to the dry-run or wet-run prefix.
    pub fn trace<S: AsRef<str>>(
        &self,
        tokens: &[S],
        message_prefix: Option<&str>,
        trace_prefix: &str,
        dry_run: bool,
    ) {
        self.emit(format_trace(tokens, message_prefix, trace_prefix, dry_run));
    }

    /// Emit a raw line.
    pub fn emit(&self, line: String) {
        match &self.sink {
            Sink::Stderr => eprintln!("{}", line),
            Sink::Memory(log) => log.push(line),
        }
    }
}

/// Format a single trace line.
pub fn format_trace<S: AsRef<str>>(
    tokens: &[S],
    message_prefix: Option<&str>,
    trace_prefix: &str,
    dry_run: bool,
) -> String {
    let message_prefix = message_prefix.unwrap_or_else(|| self::message_prefix(dry_run));
    let words: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    format!("{}{}{}", message_prefix, trace_prefix, words.join(" "))
}
