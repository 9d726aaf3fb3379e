//! `schemapack` CLI entrypoint.
//!
//! Loads `schemapack.toml`, indexes every module's resource directories, and
//! either writes the schema archive or prints its planned layout.

use std::io::Write;

use log::LevelFilter;
use schemapack::cli::{Cli, Command, ListArgs};
use schemapack::{ConfigError, PackConfig};
use schemapack_packager::SchemaPackError;
use schemapack_packager::list_output::{format_human, format_json};
use schemapack_packager::pipeline::{
    ArchiveOutput, SchemaArchiveParams, build_schema_archive, plan_schema_archive,
};
use schemapack_packager::resources::FileSystemResources;
use thiserror::Error;

/// Failures surfaced by the binary.
#[derive(Debug, Error)]
enum CliError {
    /// `schemapack.toml` could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resolution, planning, or archive output failed.
    #[error(transparent)]
    Pack(#[from] SchemaPackError),

    /// Writing the report to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, CliError>;

fn main() {
    let cli = Cli::parse_checked();
    init_logging(&cli);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Installs `env_logger` on stderr; `RUST_LOG` refines the chosen level.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(level_filter(cli.verbosity, cli.quiet))
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

const fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let config = PackConfig::load(&cli.config)?;
    let resources =
        FileSystemResources::scan(config.manifest_path.clone(), config.resource_roots())?;

    match &cli.command {
        Some(Command::List(args)) => run_list(&config, &resources, args, stdout),
        Some(Command::Build(_)) | None => run_build(cli, &config, &resources, stdout),
    }
}

fn run_build(
    cli: &Cli,
    config: &PackConfig,
    resources: &FileSystemResources,
    stdout: &mut dyn Write,
) -> Result<()> {
    let params = build_params(cli, config);
    let output = build_schema_archive(&params, resources, resources)?;
    report_build(&output, stdout)?;
    Ok(())
}

/// Merges command-line overrides over the `[archive]` table.
fn build_params(cli: &Cli, config: &PackConfig) -> SchemaArchiveParams {
    let args = cli.build_args();
    SchemaArchiveParams {
        modules: config.module_names(),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| config.archive.output.clone()),
        policy: args.policy.unwrap_or(config.archive.conflict_policy),
        write_checksum: args.checksum || config.archive.checksum,
    }
}

fn report_build(output: &ArchiveOutput, stdout: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        stdout,
        "Wrote {} ({} schema files)",
        output.archive_path, output.entries
    )?;
    writeln!(stdout, "sha256: {}", output.digest)?;
    if let Some(checksum_path) = &output.checksum_path {
        writeln!(stdout, "checksum: {checksum_path}")?;
    }
    Ok(())
}

fn run_list(
    config: &PackConfig,
    resources: &FileSystemResources,
    args: &ListArgs,
    stdout: &mut dyn Write,
) -> Result<()> {
    let policy = args.policy.unwrap_or(config.archive.conflict_policy);
    let plan = plan_schema_archive(&config.module_names(), resources, resources, policy)?;
    let rendered = if args.json {
        format_json(&plan)
    } else {
        format_human(&plan)
    };
    writeln!(stdout, "{}", rendered.trim_end())?;
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
