use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ToolError};
use crate::hooks::{HookManager, SIGNALLED_STATUS};
use crate::runner::{Executor, Invocation};
use crate::ui;

/// Printed by `run-manual-hooks` when no hook was named.
pub const MISSING_HOOK_MESSAGE: &str =
    "ERROR: Please supply the name of at least one hook to run manually.";

/// Printed by `seed-hook-config` when the config file already exists.
pub const CONFIG_FOUND_MESSAGE: &str = "Printing sample config file to stdout instead.\n\
You may redirect stdout to the file of your choice.";

/// Arguments that already select files (or ask for help).
const FILE_SELECTION_ARGS: &[&str] = &["-a", "--all-files", "-h", "--help", "--files"];

/// Add `--all-files` unless the caller already chose files or asked for help.
pub fn filter_run_args(args: &[String]) -> Vec<String> {
    if args
        .iter()
        .any(|arg| FILE_SELECTION_ARGS.contains(&arg.as_str()))
    {
        return args.to_vec();
    }
    std::iter::once("--all-files".to_string())
        .chain(args.iter().cloned())
        .collect()
}

fn config_not_found_message(config_file: &str) -> String {
    format!(
        "WARNING: No {config} file found.  Some hook installation steps will fail.\n\
         You can re-run this script after creating a {config} file.\n\
         You can create a sample {config} file using 'seed-hook-config'.",
        config = config_file
    )
}

impl<'a, E: Executor> HookManager<'a, E> {
    fn call(&self, tokens: Vec<String>) -> Result<i32> {
        let status = self
            .runner
            .status(Invocation::new(tokens).show_trace(true))?;
        Ok(status.unwrap_or(SIGNALLED_STATUS))
    }

    /// Install the git hook scripts and the hook environments.
    ///
    /// A missing config file only triggers a warning.
    pub fn install(&self) -> Result<i32> {
        if !Path::new(&self.config.config_file).exists() {
            ui::display_warning(&config_not_found_message(&self.config.config_file));
        }
        self.call(self.install_command())
    }

    /// Run hooks of the `manual` stage, on all files unless told otherwise.
    ///
    /// Returns 1 without running anything when `args` is empty.
    pub fn run_manual(&self, args: &[String]) -> Result<i32> {
        if args.is_empty() {
            ui::display_failure(MISSING_HOOK_MESSAGE);
            return Ok(1);
        }
        self.call(self.run_manual_command(&filter_run_args(args)))
    }

    /// Bump hook revisions in the config file.
    pub fn update(&self, args: &[String]) -> Result<i32> {
        self.call(self.autoupdate_command(args))
    }

    /// Write a sample config file, or print it to `stdout` if one exists.
    pub fn seed_config(&self, stdout: &mut dyn Write) -> Result<i32> {
        let config_file = Path::new(&self.config.config_file);
        if config_file.exists() {
            ui::display_warning(&format!(
                "WARNING: {} file already exists!\n{}",
                self.config.config_file, CONFIG_FOUND_MESSAGE
            ));
            return self.print_sample_config(stdout);
        }

        let mut sample = Vec::new();
        let status = self.print_sample_config(&mut sample)?;
        if status == 0 {
            debug!(path = %config_file.display(), "writing sample config");
            fs::write(config_file, sample)?;
        }
        Ok(status)
    }

    /// Write `pre-commit sample-config` output to `out`, returning its status.
    pub fn print_sample_config(&self, out: &mut dyn Write) -> Result<i32> {
        let invocation = Invocation::new(self.sample_config_command()).show_trace(true);
        match self.runner.capture(invocation) {
            Ok(output) => {
                out.write_all(output.unwrap_or_default().as_bytes())?;
                out.flush()?;
                Ok(0)
            }
            Err(ToolError::CommandFailed { exit_code, .. }) => {
                Ok(exit_code.unwrap_or(SIGNALLED_STATUS))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_injects_all_files() {
        assert_eq!(
            filter_run_args(&strings(&["mytest"])),
            strings(&["--all-files", "mytest"])
        );
    }

    #[test]
    fn test_filter_keeps_explicit_selection() {
        for selector in ["-a", "--all-files", "-h", "--help", "--files"] {
            let args = strings(&["mytest", selector]);
            assert_eq!(filter_run_args(&args), args, "{selector}");
        }
    }

    #[test]
    fn test_filter_only_matches_whole_arguments() {
        assert_eq!(
            filter_run_args(&strings(&["--files-from", "x"])),
            strings(&["--all-files", "--files-from", "x"])
        );
    }

    #[test]
    fn test_config_not_found_names_file() {
        let message = config_not_found_message(".pre-commit-config.yaml");
        assert!(message.starts_with("WARNING: No .pre-commit-config.yaml file found."));
        assert_eq!(message.lines().count(), 3);
    }
}
