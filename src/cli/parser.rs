//! Shared command-line parser setup.
//!
//! Every tool builds its parser through [`new_parser`] and attaches the
//! common flags with [`add_dry_run_flag`] / [`add_chdir_flag`], so all of
//! them spell `--dry-run` and `--chdir` the same way.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

pub const DRY_RUN_ID: &str = "dry_run";
pub const CHDIR_ID: &str = "working_dir";

/// Split an argument vector into program name and remaining arguments.
///
/// An empty `argv` falls back to the real process arguments, so calling a
/// tool's `main` from a test behaves like invoking it from a shell.
/// Arguments stay `OsString`s; only the program name is made printable.
pub fn grok_argv<I, T>(argv: I) -> (Option<String>, Vec<OsString>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    if argv.is_empty() {
        argv = std::env::args_os().collect();
    }
    let mut iter = argv.into_iter();
    let prog = iter.next().map(|prog| prog.to_string_lossy().into_owned());
    (prog, iter.collect())
}

/// Arguments passed through to another program verbatim.
///
/// The runner works on `String` tokens, so undecodable bytes are replaced.
pub fn passthrough_args(args: &[OsString]) -> Vec<String> {
    args.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Create a parser with `--help` and whatever metadata is supplied.
///
/// # Arguments
/// * `prog` - Program name shown in usage; derived by clap when `None`
/// * `description` - Text shown above the options
/// * `epilog` - Text shown after the options
/// * `help_template` - Custom clap help template
pub fn new_parser(
    prog: Option<&str>,
    description: Option<&str>,
    epilog: Option<&str>,
    help_template: Option<&str>,
) -> Command {
    let mut cmd = Command::new(env!("CARGO_PKG_NAME"));
    if let Some(prog) = prog {
        cmd = cmd.name(display_name(prog)).bin_name(display_name(prog));
    }
    if let Some(description) = description {
        cmd = cmd.about(description.to_string());
    }
    if let Some(epilog) = epilog {
        cmd = cmd.after_help(epilog.to_string());
    }
    if let Some(template) = help_template {
        cmd = cmd.help_template(template.to_string());
    }
    cmd
}

/// Register `-n/--dry-run/--dryrun`.
pub fn add_dry_run_flag(cmd: Command) -> Command {
    cmd.arg(
        Arg::new(DRY_RUN_ID)
            .short('n')
            .long("dry-run")
            .visible_alias("dryrun")
            .action(ArgAction::SetTrue)
            .help("Show what would be done, but don't actually do it"),
    )
}

/// Register `-C/--cd/--chdir`.
pub fn add_chdir_flag(cmd: Command) -> Command {
    cmd.arg(
        Arg::new(CHDIR_ID)
            .short('C')
            .long("cd")
            .visible_alias("chdir")
            .value_name("DIR")
            .value_parser(value_parser!(PathBuf))
            .action(ArgAction::Set)
            .help("Directory to change to (default: current directory)"),
    )
}

/// Values of the common flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonArgs {
    pub dry_run: bool,
    pub working_dir: Option<PathBuf>,
}

impl CommonArgs {
    /// Read the common flags from matches; flags that were never registered read as unset.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let dry_run = matches
            .try_get_one::<bool>(DRY_RUN_ID)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);
        let working_dir = matches
            .try_get_one::<PathBuf>(CHDIR_ID)
            .ok()
            .flatten()
            .cloned();
        CommonArgs {
            dry_run,
            working_dir,
        }
    }
}

/// The last path component of `prog`, as shells display it.
fn display_name(prog: &str) -> String {
    Path::new(prog)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(prog)
        .to_string()
}
