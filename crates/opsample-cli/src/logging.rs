//! Tracing subscriber for the `opsample` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Events go to stderr so stdout stays clean for `--output-format
//! json`. `RUST_LOG` replaces the level chosen by `-v` / `-q`.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown; everything else stays at the filter default.
const CRATES: [&str; 3] = ["opsample", "opsample_core", "opsample_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(args.log_level()))
            .context("building the default log filter")?,
    };

    // Step lines are short; targets and source locations only add noise.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("a tracing subscriber is already installed")
}

fn default_directives(level: LevelFilter) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_name_each_crate() {
        let d = default_directives(LevelFilter::DEBUG);
        for krate in CRATES {
            assert!(d.contains(&format!("{krate}=")), "{d}");
        }
        assert!(EnvFilter::try_new(&d).is_ok());
    }

    #[test]
    fn off_is_a_valid_directive() {
        assert!(EnvFilter::try_new(default_directives(LevelFilter::OFF)).is_ok());
    }
}
