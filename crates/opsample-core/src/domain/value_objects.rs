//! Domain value objects: Subcommand, GroupVersionKind, CommandSpec.
//!
//! # Design
//!
//! These are pure value types: equality-by-value, no identity, no I/O.
//! Validation happens in the constructors so a value that exists is a value
//! that is well-formed.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Subcommand ───────────────────────────────────────────────────────────────

/// Which scaffold-producer entry point a configuration drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subcommand {
    Init,
    CreateApi,
}

impl Subcommand {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateApi => "create api",
        }
    }

    /// Argument words that select this subcommand on a command line.
    pub const fn words(&self) -> &'static [&'static str] {
        match self {
            Self::Init => &["init"],
            Self::CreateApi => &["create", "api"],
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GroupVersionKind ─────────────────────────────────────────────────────────

/// A Kubernetes API resource coordinate, e.g. `cache/v1, Kind=Memcached`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    group: String,
    version: String,
    kind: String,
}

impl GroupVersionKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let gvk = Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        };
        gvk.validate()?;
        Ok(gvk)
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    fn validate(&self) -> Result<(), DomainError> {
        let lower_dns = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
                && !s.starts_with(['.', '-'])
                && !s.ends_with(['.', '-'])
        };

        if !lower_dns(&self.group) {
            return Err(DomainError::InvalidConfiguration {
                field: "group",
                reason: format!("'{}' must be a lowercase DNS-style name", self.group),
            });
        }

        let mut chars = self.version.chars();
        let version_ok = chars.next() == Some('v')
            && chars.next().is_some_and(|c| c.is_ascii_digit())
            && self
                .version
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !version_ok {
            return Err(DomainError::InvalidConfiguration {
                field: "version",
                reason: format!("'{}' must look like v1, v1alpha1, v2beta3", self.version),
            });
        }

        let kind_ok = self
            .kind
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
            && self.kind.chars().all(|c| c.is_ascii_alphanumeric());
        if !kind_ok {
            return Err(DomainError::InvalidConfiguration {
                field: "kind",
                reason: format!("'{}' must be PascalCase alphanumeric", self.kind),
            });
        }

        Ok(())
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

// ── CommandSpec ──────────────────────────────────────────────────────────────

/// An external command: program plus arguments, no shell involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a word list such as `["mvn", "clean", "install"]`.
    pub fn from_words(words: &[String]) -> Result<Self, DomainError> {
        match words.split_first() {
            Some((program, args)) if !program.trim().is_empty() => {
                Ok(Self::new(program.clone(), args.iter().cloned()))
            }
            _ => Err(DomainError::InvalidConfiguration {
                field: "command",
                reason: "command must name a program".into(),
            }),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl FromStr for CommandSpec {
    type Err = DomainError;

    /// Whitespace-split parse. Quoting is not supported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<String> = s.split_whitespace().map(String::from).collect();
        Self::from_words(&words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommand_words() {
        assert_eq!(Subcommand::Init.words(), &["init"]);
        assert_eq!(Subcommand::CreateApi.words(), &["create", "api"]);
        assert_eq!(Subcommand::CreateApi.to_string(), "create api");
    }

    #[test]
    fn gvk_accepts_memcached() {
        let gvk = GroupVersionKind::new("cache", "v1", "Memcached").unwrap();
        assert_eq!(gvk.to_string(), "cache/v1, Kind=Memcached");
    }

    #[test]
    fn gvk_rejects_bad_parts() {
        assert!(GroupVersionKind::new("Cache", "v1", "Memcached").is_err());
        assert!(GroupVersionKind::new("cache", "1", "Memcached").is_err());
        assert!(GroupVersionKind::new("cache", "vx", "Memcached").is_err());
        assert!(GroupVersionKind::new("cache", "v1", "memcached").is_err());
        assert!(GroupVersionKind::new("cache", "v1alpha1", "Mem-cached").is_err());
        assert!(GroupVersionKind::new("-cache", "v1", "Memcached").is_err());
    }

    #[test]
    fn command_spec_parses_and_displays() {
        let cmd: CommandSpec = "mvn clean  install".parse().unwrap();
        assert_eq!(cmd.program(), "mvn");
        assert_eq!(cmd.args(), &["clean".to_string(), "install".to_string()]);
        assert_eq!(cmd.to_string(), "mvn clean install");
    }

    #[test]
    fn command_spec_requires_program() {
        assert!("   ".parse::<CommandSpec>().is_err());
        assert!(CommandSpec::from_words(&[]).is_err());
    }
}
