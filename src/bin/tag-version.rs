//! Add an annotated tag for the version of the current git project.

use repo_tools::logging;
use repo_tools::runner::{CommandRunner, ProcessExecutor, TraceSettings, Tracer};
use repo_tools::ui::StdinPrompter;
use repo_tools::workflow;

fn main() {
    logging::init();

    let runner = CommandRunner::new(ProcessExecutor, Tracer::new(TraceSettings::from_env()));
    let status = workflow::main(std::env::args_os(), &runner, &StdinPrompter);
    std::process::exit(status);
}
