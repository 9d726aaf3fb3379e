//! Command-line interface for `schemapack`.
//!
//! The binary stays focused on orchestration; argument definitions live here
//! so they can be exercised without spawning a process.

use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use schemapack_packager::archive::ConflictPolicy;

use crate::config::DEFAULT_CONFIG_FILE;

/// Package per-module XML schema manifests into a single schema archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "schemapack")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package per-module XML schema manifests into a single schema archive.\n\n",
    "Each configured module may carry a META-INF/spring.schemas manifest mapping ",
    "namespace URIs to XSD resources. schemapack resolves every entry to its file ",
    "and writes a zip laid out as <short name>/<file name>, where the short name ",
    "is the segment between `schema/` and `/spring-` in the namespace URI.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build the archive described by ./schemapack.toml:\n",
    "    $ schemapack\n\n",
    "  Fail instead of skipping files that collide in the archive:\n",
    "    $ schemapack build --policy error\n\n",
    "  Preview the archive layout as JSON:\n",
    "    $ schemapack list --json\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config: Utf8PathBuf,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet",
        global = true
    )]
    pub verbosity: u8,

    /// Only report errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Build arguments (used when no subcommand is given).
    #[command(flatten)]
    pub build: BuildArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve every manifest and write the archive (default).
    Build(BuildArgs),

    /// Show the archive layout without writing anything.
    List(ListArgs),
}

/// Arguments for the build command.
#[derive(Parser, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Archive path, overriding `[archive] output`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Conflict policy, overriding `[archive] conflict_policy`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub policy: Option<ConflictPolicy>,

    /// Also write `<archive>.sha256`.
    #[arg(long)]
    pub checksum: bool,
}

impl BuildArgs {
    /// Whether no build flag was given.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.output.is_none() && self.policy.is_none() && !self.checksum
    }
}

/// Arguments for the list command.
#[derive(Parser, Debug, Clone, Default)]
pub struct ListArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,

    /// Conflict policy, overriding `[archive] conflict_policy`.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub policy: Option<ConflictPolicy>,
}

impl Cli {
    /// Parses the process arguments, exiting with a usage error when
    /// top-level build flags precede a subcommand.
    #[must_use]
    pub fn parse_checked() -> Self {
        let cli = Self::parse();
        if let Err(error) = cli.check_build_flags() {
            error.exit();
        }
        cli
    }

    /// Rejects top-level `--output`, `--policy` or `--checksum` given
    /// together with a subcommand, since the subcommand's own arguments
    /// would take their place.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::ArgumentConflict`] usage error naming the
    /// subcommand.
    pub fn check_build_flags(&self) -> Result<(), clap::Error> {
        let name = match &self.command {
            None => return Ok(()),
            Some(_) if self.build.is_unset() => return Ok(()),
            Some(Command::Build(_)) => "build",
            Some(Command::List(_)) => "list",
        };
        Err(Self::command().error(
            ErrorKind::ArgumentConflict,
            format!("build flags placed before `{name}` would be ignored; pass them after `build`"),
        ))
    }

    /// Returns the effective build arguments.
    ///
    /// An explicit `build` subcommand wins; otherwise the flattened
    /// top-level arguments apply. Under `list` the flattened arguments are
    /// unset, as [`Cli::check_build_flags`] enforces.
    #[must_use]
    pub const fn build_args(&self) -> &BuildArgs {
        match &self.command {
            Some(Command::Build(args)) => args,
            Some(Command::List(_)) | None => &self.build,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
