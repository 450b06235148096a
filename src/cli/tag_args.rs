//! Command-line surface of `tag-version`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::cli::parser::{add_chdir_flag, add_dry_run_flag, new_parser, CommonArgs};

pub const DESCRIPTION: &str = "Add an annotated tag corresponding to the version of the current \
git project.  The version is expected to live in a file named 'VERSION' in the project root.";

/// A tag prefix or suffix as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Affix {
    /// Not given; use the configured default
    #[default]
    Default,
    /// Disabled with `--no-prefix` / `--no-suffix`
    Empty,
    /// Given explicitly
    Value(String),
}

impl Affix {
    fn from_matches(matches: &ArgMatches, value_id: &str, disable_id: &str) -> Self {
        if matches.get_flag(disable_id) {
            Affix::Empty
        } else if let Some(value) = matches.get_one::<String>(value_id) {
            Affix::Value(value.clone())
        } else {
            Affix::Default
        }
    }

    /// The concrete string, falling back to `default` when not given.
    pub fn resolve<'a>(&'a self, default: &'a str) -> &'a str {
        match self {
            Affix::Default => default,
            Affix::Empty => "",
            Affix::Value(value) => value,
        }
    }
}

/// Parsed `tag-version` options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagVersionArgs {
    pub common: CommonArgs,
    pub prefix: Affix,
    pub suffix: Affix,
    pub version_file: Option<PathBuf>,
    pub commit: Option<String>,
    pub message: Option<String>,
    pub push: bool,
    pub stable: bool,
    pub stable_tag: Option<String>,
    pub stable_message: Option<String>,
    pub stable_version_file: Option<PathBuf>,
    pub rewrite_history: bool,
    pub accept_paradoxes: bool,
    pub config: Option<PathBuf>,
}

impl TagVersionArgs {
    /// Parse `args` (program name excluded).
    pub fn try_parse_from<T>(prog: Option<&str>, args: &[T]) -> Result<Self, clap::Error>
    where
        T: Clone + Into<OsString>,
    {
        let argv = std::iter::once(OsString::from(prog.unwrap_or("tag-version")))
            .chain(args.iter().cloned().map(Into::into));
        let matches = tag_version_command(prog).try_get_matches_from(argv)?;
        Ok(Self::from_matches(&matches))
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned();
        let path = |id: &str| matches.get_one::<PathBuf>(id).cloned();

        TagVersionArgs {
            common: CommonArgs::from_matches(matches),
            prefix: Affix::from_matches(matches, "tag_prefix", "no_tag_prefix"),
            suffix: Affix::from_matches(matches, "tag_suffix", "no_tag_suffix"),
            version_file: path("version_file"),
            commit: string("commit"),
            message: string("message"),
            push: matches.get_flag("push"),
            stable: matches.get_flag("stable"),
            stable_tag: string("stable_tag"),
            stable_message: string("stable_message"),
            stable_version_file: path("stable_version_file"),
            rewrite_history: matches.get_flag("rewrite_history"),
            accept_paradoxes: matches.get_flag("accept_paradoxes"),
            config: path("config"),
        }
    }
}

fn value(id: &'static str) -> Arg {
    Arg::new(id).action(ArgAction::Set)
}

fn path_value(id: &'static str) -> Arg {
    value(id).value_parser(value_parser!(PathBuf))
}

fn flag(id: &'static str) -> Arg {
    Arg::new(id).action(ArgAction::SetTrue)
}

/// Build the `tag-version` parser.
pub fn tag_version_command(prog: Option<&str>) -> Command {
    let cmd = add_chdir_flag(add_dry_run_flag(new_parser(
        prog,
        Some(DESCRIPTION),
        None,
        None,
    )));

    cmd.arg(
        value("tag_prefix")
            .short('p')
            .long("prefix")
            .value_name("PREFIX")
            .conflicts_with("no_tag_prefix")
            .help("String to prepend to version tag (default: 'v')"),
    )
    .arg(
        flag("no_tag_prefix")
            .long("no-prefix")
            .help("Do not use any tag prefix"),
    )
    .arg(
        value("tag_suffix")
            .short('s')
            .long("suffix")
            .value_name("SUFFIX")
            .conflicts_with("no_tag_suffix")
            .help("String to append to version tag (default: '')"),
    )
    .arg(
        flag("no_tag_suffix")
            .long("no-suffix")
            .help("Do not use any tag suffix"),
    )
    .arg(
        path_value("version_file")
            .short('f')
            .long("file")
            .visible_alias("version-file")
            .value_name("FILE")
            .help("File containing version (default: 'VERSION' in root of project)"),
    )
    .arg(
        value("commit")
            .short('c')
            .long("commit")
            .value_name("COMMIT")
            .help("Commit to tag (default: currently checked out HEAD)"),
    )
    .arg(
        value("message")
            .short('m')
            .long("message")
            .value_name("MESSAGE")
            .help("Message to add to annotated version tag (default: same as the tag, like git-flow)"),
    )
    .arg(
        flag("push")
            .long("push")
            .help("Push the tags after creating them."),
    )
    .arg(
        flag("stable")
            .short('S')
            .long("stable")
            .help("Mark the current version as stable by adding/updating a 'stable' tag."),
    )
    .arg(
        value("stable_tag")
            .long("stable-tag")
            .value_name("TAG")
            .help("The name of the tag to use when marking the current version stable (default: stable)"),
    )
    .arg(
        value("stable_message")
            .short('M')
            .long("stable-message")
            .value_name("MESSAGE")
            .help("Commit message for 'stable' tag (default: the version being tagged)"),
    )
    .arg(
        path_value("stable_version_file")
            .short('F')
            .long("stable-file")
            .visible_alias("stable-version-file")
            .value_name("FILE")
            .help("File containing stable version (default: 'STABLE_VERSION' in root of project)"),
    )
    .arg(
        flag("rewrite_history")
            .short('T')
            .long("rewrite-history")
            .visible_alias("time-travel")
            .help(
                "Rewrite history by changing a pre-existing version tag to point to the \
                 current commit (this is inadvisable, but may be necessary in some cases).",
            ),
    )
    .arg(
        flag("accept_paradoxes")
            .long("accept-paradoxes")
            .visible_alias("peril-sensitive-sunglasses")
            .help("When rewriting history, ignore warnings and continue blindly ahead."),
    )
    .arg(
        path_value("config")
            .long("config")
            .value_name("PATH")
            .help("Custom configuration file path"),
    )
}
