//! Errors surfaced by the `opsample` binary and how they are shown.
//!
//! Every failure ends up as a [`CliError`]. Its category decides the exit
//! code; failed build and packaging commands also carry the tail of their
//! captured output.

use std::error::Error as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use opsample_core::error::{ErrorCategory as CoreCategory, SampleError};

pub type CliResult<T> = Result<T, CliError>;

/// Lines of captured command output shown when not verbose.
const OUTPUT_TAIL_LINES: usize = 20;

#[derive(Debug, Error)]
pub enum CliError {
    /// Flag combinations clap cannot express.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config init` would overwrite an existing file.
    #[error("Configuration file already exists at {path}")]
    ConfigExists { path: PathBuf },

    #[error(transparent)]
    Core(#[from] SampleError),

    /// Writing to stdout or serialising a report failed.
    #[error("Output error: {message}")]
    Output { message: String },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Exit-code classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    /// Includes a scaffolder, build or packaging command that failed.
    Internal,
}

/// Parts of a rendered error that get their own colour.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Title,
    Message,
    Heading,
    Faint,
    Hint,
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => {
                vec!["Run `opsample generate --help` to see valid flags".into()]
            }
            Self::ConfigError { .. } => vec![
                format!(
                    "Default config file: {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use OPSAMPLE__<SECTION>__<KEY>".into(),
                "`opsample config init` writes a file with every default".into(),
            ],
            Self::ConfigExists { .. } => vec!["Pass --force to overwrite it".into()],
            Self::Core(core) => core.suggestions(),
            Self::Output { .. } => vec!["Check that stdout is writable".into()],
            Self::IoError { .. } => vec!["Check permissions on the output directory".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::External | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Output { .. } | Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// 2 for usage errors, 3 for unknown samples or anchors, 4 for
    /// configuration, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Output captured from a failed build or packaging command.
    pub fn captured_output(&self) -> Option<&str> {
        let captured = match self {
            Self::Core(SampleError::Application(app)) => app.captured_output(),
            _ => None,
        };
        captured.filter(|out| !out.trim().is_empty())
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, |tone, text| match tone {
            Tone::Title => text.red().bold().to_string(),
            Tone::Message => text.red().to_string(),
            Tone::Heading => text.yellow().bold().to_string(),
            Tone::Faint => text.dimmed().to_string(),
            Tone::Hint => text.blue().to_string(),
        })
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, |_, text| text.to_owned())
    }

    fn render(&self, verbose: bool, paint: impl Fn(Tone, &str) -> String) -> String {
        let mut out = format!(
            "\n{} {}\n",
            paint(Tone::Title, "\u{2717} Error:"),
            paint(Tone::Message, &self.to_string())
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let line = format!("caused by: {err}");
                out.push_str(&format!("  {}\n", paint(Tone::Faint, &line)));
                cause = err.source();
            }
        }

        if let Some(captured) = self.captured_output() {
            out.push_str(&format!("\n{}\n", paint(Tone::Heading, "Command output:")));
            for line in output_lines(captured, verbose) {
                out.push_str(&format!("  {}\n", paint(Tone::Faint, line)));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint(Tone::Heading, "Suggestions:")));
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint(Tone::Hint, "Use -v / --verbose for more details.")
            ));
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(error = %self, "Command rejected")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(error = %self, "Command failed")
            }
        }

        if let Self::Core(core) = self {
            if let Some(step) = core.failed_step() {
                tracing::debug!(step, "Failed step");
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(cause = %source, "Underlying error");
        }
    }
}

/// The tail of `captured`, or all of it when verbose.
fn output_lines(captured: &str, verbose: bool) -> Vec<&str> {
    let lines: Vec<&str> = captured.lines().collect();
    if verbose || lines.len() <= OUTPUT_TAIL_LINES {
        lines
    } else {
        lines[lines.len() - OUTPUT_TAIL_LINES..].to_vec()
    }
}
