use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{GroupVersionKind, Subcommand},
};

/// Parameters for the "initialize project skeleton" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfig {
    pub plugin: String,
    pub domain: String,
    pub project_name: String,
}

/// Parameters for the "add a typed API resource" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApiConfig {
    pub plugin: String,
    pub gvk: GroupVersionKind,
}

/// A fixed scaffolding request, rendered into a synthetic command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaffoldConfiguration {
    Init(InitConfig),
    CreateApi(CreateApiConfig),
}

impl ScaffoldConfiguration {
    pub fn subcommand(&self) -> Subcommand {
        match self {
            Self::Init(_) => Subcommand::Init,
            Self::CreateApi(_) => Subcommand::CreateApi,
        }
    }

    /// Argument vector as a scaffolding CLI would receive it, `program` first.
    pub fn to_args(&self, program: &str) -> Vec<String> {
        let mut args = vec![program.to_string()];
        args.extend(self.subcommand().words().iter().map(|w| w.to_string()));

        let flags: Vec<(&str, &str)> = match self {
            Self::Init(c) => vec![
                ("--plugins", c.plugin.as_str()),
                ("--domain", c.domain.as_str()),
                ("--project-name", c.project_name.as_str()),
            ],
            Self::CreateApi(c) => vec![
                ("--plugins", c.plugin.as_str()),
                ("--group", c.gvk.group()),
                ("--version", c.gvk.version()),
                ("--kind", c.gvk.kind()),
            ],
        };
        for (flag, value) in flags {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
        args
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let plugin = match self {
            Self::Init(c) => &c.plugin,
            Self::CreateApi(c) => &c.plugin,
        };
        if plugin.trim().is_empty() {
            return Err(DomainError::InvalidConfiguration {
                field: "plugin",
                reason: "plugin selector cannot be empty".into(),
            });
        }

        if let Self::Init(c) = self {
            if c.domain.is_empty()
                || !c.domain.contains('.')
                || c.domain.contains(char::is_whitespace)
            {
                return Err(DomainError::InvalidConfiguration {
                    field: "domain",
                    reason: format!("'{}' is not a domain name", c.domain),
                });
            }
            let name_ok = c
                .project_name
                .chars()
                .next()
                .is_some_and(|ch| ch.is_ascii_lowercase())
                && c
                    .project_name
                    .chars()
                    .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
            if !name_ok {
                return Err(DomainError::InvalidConfiguration {
                    field: "project-name",
                    reason: format!(
                        "'{}' must be lowercase letters, digits and hyphens",
                        c.project_name
                    ),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for ScaffoldConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(c) => write!(
                f,
                "init (plugin={}, domain={}, project={})",
                c.plugin, c.domain, c.project_name
            ),
            Self::CreateApi(c) => write!(f, "create api (plugin={}, {})", c.plugin, c.gvk),
        }
    }
}
