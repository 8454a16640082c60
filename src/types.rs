// src/types.rs

use std::str::FromStr;

use serde::Deserialize;

/// How the environment of a spawned command is composed.
///
/// - `Isolated` (default): the child sees only the rule's `env` overlay.
///   Nothing is inherited from `wf`'s own environment, not even `PATH` or
///   `HOME`; a rule that needs them must list them in `env`.
/// - `Inherit`: the child starts from `wf`'s environment and the overlay is
///   applied on top, overlay entries winning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvPolicy {
    #[default]
    Isolated,
    Inherit,
}

impl FromStr for EnvPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isolated" => Ok(EnvPolicy::Isolated),
            "inherit" => Ok(EnvPolicy::Inherit),
            other => Err(format!(
                "invalid env_policy: {other} (expected \"isolated\" or \"inherit\")"
            )),
        }
    }
}

/// Encoding of a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFileFormat {
    Yaml,
    Toml,
}

impl RuleFileFormat {
    /// `.toml` files are TOML; everything else is read as YAML.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => RuleFileFormat::Toml,
            _ => RuleFileFormat::Yaml,
        }
    }
}
