//! Install pre-commit hooks.

use anyhow::Result;

use repo_tools::config::load_config;
use repo_tools::hooks::HookManager;
use repo_tools::logging;
use repo_tools::runner::{CommandRunner, ProcessExecutor, TraceSettings, Tracer};

fn main() -> Result<()> {
    logging::init();

    let config = load_config(None)?;
    let runner = CommandRunner::new(ProcessExecutor, Tracer::new(TraceSettings::default()));
    let status = HookManager::new(&runner, config.hooks).install()?;
    std::process::exit(status);
}
