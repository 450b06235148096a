//! Command-line parsing shared by the tools

pub mod parser;
pub mod tag_args;

pub use parser::{
    add_chdir_flag, add_dry_run_flag, grok_argv, new_parser, passthrough_args, CommonArgs,
};
pub use tag_args::{Affix, TagVersionArgs};
