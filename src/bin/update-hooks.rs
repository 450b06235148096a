//! Update hooks in `.pre-commit-config.yaml`.

use anyhow::Result;

use repo_tools::cli::{grok_argv, passthrough_args};
use repo_tools::config::load_config;
use repo_tools::hooks::HookManager;
use repo_tools::logging;
use repo_tools::runner::{CommandRunner, ProcessExecutor, TraceSettings, Tracer};

fn main() -> Result<()> {
    logging::init();

    let (_prog, args) = grok_argv(std::env::args_os());
    let args = passthrough_args(&args);
    let config = load_config(None)?;
    let runner = CommandRunner::new(ProcessExecutor, Tracer::new(TraceSettings::default()));
    let status = HookManager::new(&runner, config.hooks).update(&args)?;
    std::process::exit(status);
}
