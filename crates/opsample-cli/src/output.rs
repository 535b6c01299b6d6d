//! Terminal output for command results.
//!
//! Log events go to stderr through `tracing`; everything a user asked for
//! (step lists, reports, JSON) goes to stdout through [`OutputManager`].

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;
use tracing::warn;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Leading symbol of a status line.
#[derive(Debug, Clone, Copy)]
enum Mark {
    Success,
    Warning,
    Info,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Mark::Success => "\u{2713}",
            Mark::Warning => "\u{26a0}",
            Mark::Info => "\u{2139}",
        }
    }

    fn style(self) -> Style {
        match self {
            Mark::Success => Style::new().green(),
            Mark::Warning => Style::new().yellow(),
            Mark::Info => Style::new().blue(),
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins unless it is `auto`, in which case
    /// `output.format` from config applies. `auto` resolves to `human` on a
    /// terminal and `plain` otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => configured_format(&config.output.format),
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    /// Plain line; dropped under `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(|| msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Mark::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Mark::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Mark::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.line(|| {
            if self.use_color() {
                text.cyan().bold().to_string()
            } else {
                text.to_owned()
            }
        })
    }

    /// `  3. name                           detail`
    pub fn item(&self, index: usize, name: &str, detail: &str) -> io::Result<()> {
        self.line(|| {
            if self.use_color() {
                format!("  {index:>2}. {name:<30} {}", detail.dimmed())
            } else {
                format!("  {index:>2}. {name:<30} {detail}")
            }
        })
    }

    /// Pretty JSON on stdout, written even under `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let body = serde_json::to_string_pretty(value).map_err(|e| CliError::Output {
            message: format!("Failed to serialise JSON: {e}"),
        })?;
        self.term.write_line(&body)?;
        Ok(())
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// Resolved format; never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn status(&self, mark: Mark, msg: &str) -> io::Result<()> {
        self.line(|| {
            if self.use_color() {
                let style = mark.style();
                format!("{} {}", mark.symbol().style(style.bold()), msg.style(style))
            } else {
                format!("{} {msg}", mark.symbol())
            }
        })
    }

    fn line(&self, render: impl FnOnce() -> String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&render())
    }

    fn use_color(&self) -> bool {
        self.supports_color() && self.format != OutputFormat::Plain
    }
}

fn configured_format(raw: &str) -> OutputFormat {
    OutputFormat::from_str(raw, true).unwrap_or_else(|_| {
        warn!(format = raw, "Unknown output.format in config, using auto");
        OutputFormat::Auto
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(quiet: bool, no_color: bool, format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        }
    }

    fn manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        OutputManager::new(&global(quiet, no_color, format), &AppConfig::default())
    }

    #[test]
    fn quiet_mode_writes_nothing_but_succeeds() {
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
        assert!(out.item(1, "init", "scaffold").is_ok());
    }

    #[test]
    fn color_follows_flag_and_config() {
        assert!(manager(false, false, OutputFormat::Plain).supports_color());
        assert!(!manager(false, true, OutputFormat::Plain).supports_color());

        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&global(false, false, OutputFormat::Human), &config);
        assert!(!out.supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "JSON".into();

        let out = OutputManager::new(&global(false, true, OutputFormat::Auto), &config);
        assert_eq!(out.format(), OutputFormat::Json);

        let out = OutputManager::new(&global(false, true, OutputFormat::Plain), &config);
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn unknown_config_format_falls_back_to_auto() {
        assert_eq!(configured_format("fancy"), OutputFormat::Auto);
        assert_eq!(configured_format("plain"), OutputFormat::Plain);
    }

    #[test]
    fn json_serialises_values() {
        let out = manager(true, true, OutputFormat::Json);
        assert!(out.json(&["memcached"]).is_ok());
    }
}
