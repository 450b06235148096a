//! Version tagging workflow
//!
//! Tags the current project with the version read from its `VERSION` file:
//!
//! 1. change directory (`--chdir`)
//! 2. resolve the project root and default file locations
//! 3. read the version and compose the tag name
//! 4. with `--rewrite-history`, confirm before moving an existing tag
//! 5. with `--stable`, record and commit the stable version
//! 6. create the annotated tag, then move the stable tag
//! 7. with `--push`, push history and tags to the remote
//!
//! Steps run in order and stop at the first failure. Nothing is undone.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::parser::grok_argv;
use crate::cli::tag_args::TagVersionArgs;
use crate::config::{load_config, TagConfig};
use crate::domain::tag::{self, TagName};
use crate::domain::ProjectVersion;
use crate::error::{Result, ToolError};
use crate::runner::trace::message_prefix;
use crate::runner::{CommandRunner, Executor, Invocation};
use crate::ui::{self, Prompter, CAUTION_MESSAGE, CONFIRM_PROMPT};

/// Exit status for reported failures and a declined confirmation.
pub const EXIT_FAILURE: i32 = 1;

/// Entry point shared by the `tag-version` binary and tests.
///
/// Returns the process exit status. Usage errors print clap's message and
/// return its exit code; everything else is reported as `prog: error: ...`.
pub fn main<I, T, E, P>(argv: I, runner: &CommandRunner<E>, prompter: &P) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    E: Executor,
    P: Prompter + ?Sized,
{
    let (prog, args) = grok_argv(argv);
    let args = match TagVersionArgs::try_parse_from(prog.as_deref(), &args) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    let workflow = TagVersion::new(prog.clone(), runner, prompter);
    match workflow.run(&args) {
        Ok(status) => status,
        Err(e) => {
            ui::display_error(prog.as_deref(), &e.to_string());
            EXIT_FAILURE
        }
    }
}

/// Everything the workflow decided before touching the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPlan {
    pub version: ProjectVersion,
    pub tag: TagName,
    pub message: String,
    pub stable_message: String,
    pub version_file: PathBuf,
    pub stable_version_file: PathBuf,
}

/// The version tagging workflow bound to a runner and a prompter.
pub struct TagVersion<'a, E, P: ?Sized> {
    prog: Option<String>,
    runner: &'a CommandRunner<E>,
    prompter: &'a P,
}

impl<'a, E, P> TagVersion<'a, E, P>
where
    E: Executor,
    P: Prompter + ?Sized,
{
    pub fn new(prog: Option<String>, runner: &'a CommandRunner<E>, prompter: &'a P) -> Self {
        TagVersion {
            prog,
            runner,
            prompter,
        }
    }

    /// Run the workflow and return the exit status.
    ///
    /// # Returns
    /// * `Ok(0)` - everything requested was done
    /// * `Ok(1)` - the confirmation was declined, or a tag/push command failed
    ///   (already reported)
    /// * `Err` - setup failed: bad configuration, unreadable or blank version
    ///   file, project root query failure
    pub fn run(&self, args: &TagVersionArgs) -> Result<i32> {
        let dry_run = args.common.dry_run;

        if let Some(dir) = &args.common.working_dir {
            let shown = dir.display().to_string();
            self.runner.tracer().command(&["cd", shown.as_str()], dry_run);
            std::env::set_current_dir(dir)?;
        }

        let config = load_config(args.config.as_deref())?;
        let plan = self.plan(args, &config.tag)?;
        info!(tag = %plan.tag, version = %plan.version, "composed version tag");

        if args.rewrite_history && self.tag_exists(&plan.tag)? {
            self.runner.tracer().note(&[CAUTION_MESSAGE], dry_run);
            self.runner.tracer().note(&[ui::safety_message()], dry_run);

            if args.accept_paradoxes {
                self.runner.tracer().note(
                    &["Peril-sensitive sunglasses deployed, proceeding anyway..."],
                    dry_run,
                );
            } else if !self.should_continue(dry_run)? {
                self.runner.tracer().note(&["Aborting..."], dry_run);
                return Ok(EXIT_FAILURE);
            }
        }

        match self.publish(args, &config.tag, &plan) {
            Ok(()) => Ok(0),
            Err(e @ ToolError::CommandFailed { .. }) => {
                ui::display_error(self.prog.as_deref(), &e.to_string());
                Ok(EXIT_FAILURE)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve file locations, read the version and compose the tag.
    pub fn plan(&self, args: &TagVersionArgs, config: &TagConfig) -> Result<TagPlan> {
        let project_root = if args.version_file.is_none() || args.stable_version_file.is_none() {
            Some(self.project_root()?)
        } else {
            None
        };
        let in_root = |name: &str| -> PathBuf {
            project_root
                .as_deref()
                .map(|root| root.join(name))
                .unwrap_or_else(|| PathBuf::from(name))
        };

        let version_file = args
            .version_file
            .clone()
            .unwrap_or_else(|| in_root(&config.version_file));
        let stable_version_file = args
            .stable_version_file
            .clone()
            .unwrap_or_else(|| in_root(&config.stable_version_file));

        let version = ProjectVersion::read(&version_file)?;
        let tag = TagName::compose(
            args.prefix.resolve(&config.prefix),
            &version,
            args.suffix.resolve(&config.suffix),
        );

        let message = args.message.clone().unwrap_or_else(|| tag.to_string());
        let stable_message = args
            .stable_message
            .clone()
            .unwrap_or_else(|| tag.to_string());

        Ok(TagPlan {
            version,
            tag,
            message,
            stable_message,
            version_file,
            stable_version_file,
        })
    }

    /// Top-level directory of the current git project.
    pub fn project_root(&self) -> Result<PathBuf> {
        let output = self
            .runner
            .capture(Invocation::new(tag::show_toplevel()))?
            .unwrap_or_default();
        let root = output.strip_suffix('\n').unwrap_or(&output);
        debug!(root, "resolved project root");
        Ok(PathBuf::from(root))
    }

    /// Whether a tag with exactly this name already exists.
    pub fn tag_exists(&self, tag: &TagName) -> Result<bool> {
        let tags = self
            .runner
            .capture(
                Invocation::new(tag::list_tag(tag))
                    .check(false)
                    .show_trace(true),
            )?
            .unwrap_or_default();
        Ok(tag.listed_in(&tags))
    }

    fn should_continue(&self, dry_run: bool) -> Result<bool> {
        if dry_run {
            self.runner
                .tracer()
                .trace(&["Would prompt:", CONFIRM_PROMPT], None, "", dry_run);
            return Ok(true);
        }

        let prompt = format!("{}{}", message_prefix(dry_run), CONFIRM_PROMPT);
        ui::confirm(self.prompter, &prompt)
    }

    fn publish(&self, args: &TagVersionArgs, config: &TagConfig, plan: &TagPlan) -> Result<()> {
        let dry_run = args.common.dry_run;
        let commit = args.commit.as_deref();
        let stable_tag = args.stable_tag.as_deref().unwrap_or(&config.stable_tag);

        if args.stable {
            // Must happen before tagging so the tag covers the commit
            self.store_stable_version(&plan.version, &plan.stable_version_file, dry_run)?;
        }

        let tag_command =
            tag::annotated_tag(&plan.message, &plan.tag, args.rewrite_history, commit);
        self.execute(tag_command, dry_run)?;

        if args.stable {
            debug!(stable_tag, message = %plan.stable_message, "moving stable tag");
            self.runner
                .tracer()
                .note(&["Tagging", plan.tag.as_str(), "as stable ..."], dry_run);
            self.execute(tag::move_tag(stable_tag, commit), dry_run)?;
        }

        if args.push {
            if args.stable {
                // Push the stable version commit
                self.execute(tag::push(), dry_run)?;
            }
            self.execute(
                tag::push_ref(&config.remote, &plan.tag.force_refspec(), args.rewrite_history),
                dry_run,
            )?;
            if args.stable {
                self.execute(
                    tag::push_ref(&config.remote, &tag::tag_refspec(stable_tag), true),
                    dry_run,
                )?;
            }
        }

        Ok(())
    }

    /// Record `version` in the stable version file and commit it if it changed.
    ///
    /// A missing file is left alone: projects opt in by creating it.
    pub fn store_stable_version(
        &self,
        version: &ProjectVersion,
        stable_version_file: &Path,
        dry_run: bool,
    ) -> Result<()> {
        if !stable_version_file.exists() {
            debug!(path = %stable_version_file.display(), "no stable version file, skipping");
            return Ok(());
        }

        self.runner.tracer().note(
            &["Storing", version.as_str(), "as stable version ..."],
            dry_run,
        );
        if !dry_run {
            fs::write(stable_version_file, format!("{}\n", version))?;
        }

        let status = self.runner.status(
            Invocation::new(tag::diff_quiet(stable_version_file))
                .show_trace(true)
                .dry_run(dry_run),
        )?;

        // Any non-zero status counts as a change
        if dry_run || status != Some(0) {
            let message = format!("Update stable version to {}", version);
            self.execute(tag::commit_file(&message, stable_version_file), dry_run)?;
        }
        Ok(())
    }

    fn execute(&self, tokens: Vec<String>, dry_run: bool) -> Result<()> {
        self.runner.run(
            &Invocation::new(tokens)
                .check(true)
                .show_trace(true)
                .dry_run(dry_run),
        )?;
        Ok(())
    }
}
