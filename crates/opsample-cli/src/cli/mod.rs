//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "opsample",
    bin_name = "opsample",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate and verify operator sample projects",
    long_about = "opsample scaffolds a Quarkus operator project, splices the \
                  sample's reconciler, spec, status and dependency code into it, \
                  then builds and bundles the result.",
    after_help = "EXAMPLES:\n\
        \x20 opsample generate\n\
        \x20 opsample generate memcached -o testdata --skip-verify\n\
        \x20 opsample generate --scaffolder external --scaffolder-bin /usr/local/bin/operator-sdk\n\
        \x20 opsample list --format json\n\
        \x20 opsample completions bash > /usr/share/bash-completion/completions/opsample",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a sample project.
    #[command(
        visible_alias = "gen",
        about = "Generate a sample project",
        after_help = "EXAMPLES:\n\
            \x20 opsample generate\n\
            \x20 opsample generate memcached --output testdata\n\
            \x20 opsample generate --dry-run\n\
            \x20 opsample generate --timeout 600 --keep-previous-on-failure"
    )]
    Generate(GenerateArgs),

    /// List the bundled samples.
    #[command(
        visible_alias = "ls",
        about = "List available samples",
        after_help = "EXAMPLES:\n\
            \x20 opsample list\n\
            \x20 opsample list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 opsample completions bash > ~/.local/share/bash-completion/completions/opsample\n\
            \x20 opsample completions zsh  > ~/.zfunc/_opsample\n\
            \x20 opsample completions fish > ~/.config/fish/completions/opsample.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the opsample configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 opsample config list\n\
            \x20 opsample config path\n\
            \x20 opsample config init --force"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `opsample generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Sample to generate (default from config, normally `memcached`).
    #[arg(value_name = "SAMPLE", help = "Sample name")]
    pub sample: Option<String>,

    /// Root directory the sample workspace is created under.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output root directory (default: testdata)"
    )]
    pub output: Option<PathBuf>,

    /// Which scaffold engine produces the initial skeleton.
    #[arg(
        long = "scaffolder",
        value_enum,
        value_name = "KIND",
        help = "Scaffold engine to use"
    )]
    pub scaffolder: Option<ScaffolderKind>,

    /// Binary run by the external scaffolder.
    #[arg(
        long = "scaffolder-bin",
        value_name = "PATH",
        help = "Scaffolding binary for --scaffolder external"
    )]
    pub scaffolder_bin: Option<PathBuf>,

    /// Skip the build and packaging commands.
    #[arg(long = "skip-verify", help = "Do not build or bundle the result")]
    pub skip_verify: bool,

    /// Per-command limit for the verification commands, in seconds.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Kill a verification command after SECS seconds"
    )]
    pub timeout: Option<u64>,

    /// Restore the previous workspace if generation fails.
    #[arg(
        long = "keep-previous-on-failure",
        help = "Restore the previous workspace when generation fails"
    )]
    pub keep_previous_on_failure: bool,

    /// Print the step plan without touching disk.
    #[arg(long = "dry-run", help = "Show the steps without running them")]
    pub dry_run: bool,
}

/// Scaffold engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaffolderKind {
    /// Templates compiled into opsample.
    #[default]
    Builtin,
    /// The built-in templates driven through the working directory.
    InProcess,
    /// An external scaffolding binary such as `operator-sdk`.
    External,
}

impl fmt::Display for ScaffolderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::InProcess => write!(f, "in-process"),
            Self::External => write!(f, "external"),
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `opsample list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `opsample completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `opsample config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print all effective configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
    /// Write a configuration file containing the defaults.
    Init {
        /// Where to write (default: the path printed by `config path`).
        #[arg(long = "path", value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
