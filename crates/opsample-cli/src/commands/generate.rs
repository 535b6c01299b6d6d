//! Implementation of the `opsample generate` command.
//!
//! Responsibility: merge flags over config, wire adapters into the core
//! generation service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use opsample_adapters::{
    BuiltinScaffolder, ExternalScaffolder, InProcessScaffolder, LocalFilesystem, ProcessRunner,
    SampleCatalog,
    scaffold::{BUILTIN_PROGRAM, DEFAULT_BINARY},
};
use opsample_core::{
    application::{
        CommandRunner, Filesystem, GenerateOptions, GenerationReport, GenerationService,
        ScaffoldEngine,
    },
    domain::{CommandSpec, SampleDefinition},
};

use crate::{
    cli::{GenerateArgs, OutputFormat, ScaffolderKind},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Effective settings after merging flags over config.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    sample: String,
    output_root: PathBuf,
    scaffolder: ScaffolderKind,
    scaffolder_bin: PathBuf,
    options: GenerateOptions,
}

/// Execute `opsample generate`.
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dry_run = args.dry_run;
    let settings = resolve_settings(args, &config)?;
    debug!(?settings, "Generate settings resolved");

    let catalog = SampleCatalog::builtin()?;
    let sample = catalog
        .find(&settings.sample)
        .map_err(opsample_core::error::SampleError::from)?;

    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new());
    let (engine, program) = build_engine(&settings, fs.clone(), runner.clone());
    let service = GenerationService::new(fs, engine, runner).with_program(program);

    if dry_run {
        return show_plan(&service, sample, &settings, &output);
    }

    if output.format() != OutputFormat::Json {
        output.header(&format!(
            "Generating sample '{}' with the {} scaffolder...",
            sample.name, settings.scaffolder
        ))?;
    }
    info!(
        sample = %sample.name,
        output = %settings.output_root.display(),
        "Generation started"
    );

    let report = service.generate(sample, &settings.output_root, &settings.options)?;

    info!(workspace = %report.workspace.display(), "Generation completed");
    show_report(&report, sample, &settings, &output)
}

/// Flags win over config; config wins over built-in defaults.
fn resolve_settings(args: GenerateArgs, config: &AppConfig) -> CliResult<Settings> {
    let generate = &config.generate;
    let scaffolder = args.scaffolder.unwrap_or(config.scaffolder.kind);

    if args.scaffolder_bin.is_some() && scaffolder != ScaffolderKind::External {
        return Err(CliError::InvalidInput {
            message: format!("--scaffolder-bin cannot be used with {scaffolder}"),
        });
    }

    let timeout = args
        .timeout
        .or(generate.timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let options = GenerateOptions {
        skip_verify: args.skip_verify || generate.skip_verify,
        keep_previous_on_failure: args.keep_previous_on_failure
            || generate.keep_previous_on_failure,
        timeout,
        build: parse_command("verify.build", config.verify.build.as_deref())?,
        package: parse_command("verify.package", config.verify.package.as_deref())?,
    };

    let scaffolder_bin = args
        .scaffolder_bin
        .or_else(|| config.scaffolder.program.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY));

    Ok(Settings {
        sample: args.sample.unwrap_or_else(|| generate.sample.clone()),
        output_root: args.output.unwrap_or_else(|| generate.output_dir.clone()),
        scaffolder,
        scaffolder_bin,
        options,
    })
}

fn parse_command(key: &str, raw: Option<&str>) -> CliResult<Option<CommandSpec>> {
    raw.map(|line| {
        CommandSpec::from_str(line).map_err(|e| CliError::ConfigError {
            message: format!("{key} = {line:?} is not a usable command"),
            source: Some(Box::new(e)),
        })
    })
    .transpose()
}

/// The scaffold engine for `settings` and the argv[0] it expects.
fn build_engine(
    settings: &Settings,
    fs: Arc<dyn Filesystem>,
    runner: Arc<dyn CommandRunner>,
) -> (Arc<dyn ScaffoldEngine>, String) {
    match settings.scaffolder {
        ScaffolderKind::Builtin => (
            Arc::new(BuiltinScaffolder::new(fs)),
            BUILTIN_PROGRAM.to_string(),
        ),
        ScaffolderKind::InProcess => {
            let builtin = BuiltinScaffolder::new(fs);
            let engine = InProcessScaffolder::new(BUILTIN_PROGRAM, move |args: &[String]| {
                builtin.run_args(Path::new("."), args)
            });
            (Arc::new(engine), BUILTIN_PROGRAM.to_string())
        }
        ScaffolderKind::External => {
            let program = settings.scaffolder_bin.display().to_string();
            (
                Arc::new(ExternalScaffolder::new(&settings.scaffolder_bin, runner)),
                program,
            )
        }
    }
}

fn show_plan(
    service: &GenerationService,
    sample: &SampleDefinition,
    settings: &Settings,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = service.plan(sample)?;
    let workspace = service.workspace_for(sample, &settings.output_root);

    output.info(&format!(
        "Dry run: would generate '{}' at {}",
        sample.name,
        workspace.display()
    ))?;
    for (i, step) in plan.iter().enumerate() {
        output.print(&format!("  {:>2}. {step}", i + 1))?;
    }

    if settings.options.skip_verify {
        output.print("  verification skipped")?;
    } else {
        let (build, package) = verify_commands(sample, &settings.options);
        output.print(&format!("  then: {build}"))?;
        output.print(&format!("  then: {package}"))?;
    }
    Ok(())
}

fn show_report(
    report: &GenerationReport,
    sample: &SampleDefinition,
    settings: &Settings,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output.json(report);
    }

    for (i, step) in report.steps.iter().enumerate() {
        output.item(i + 1, step, "done")?;
    }

    if report.verified {
        let (build, package) = verify_commands(sample, &settings.options);
        output.success(&format!("Verified with `{build}` and `{package}`"))?;
    } else {
        output.warning("Verification skipped; the project has not been built")?;
    }
    output.success(&format!(
        "Sample '{}' generated in {}",
        report.sample,
        report.workspace.display()
    ))?;
    Ok(())
}

fn verify_commands(
    sample: &SampleDefinition,
    options: &GenerateOptions,
) -> (CommandSpec, CommandSpec) {
    (
        options
            .build
            .clone()
            .unwrap_or_else(|| sample.build.clone()),
        options
            .package
            .clone()
            .unwrap_or_else(|| sample.package.clone()),
    )
}
