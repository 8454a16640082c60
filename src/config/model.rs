// src/config/model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::serde_utils;
use crate::types::EnvPolicy;

/// Rule file as decoded from YAML or TOML, before validation.
///
/// ```yaml
/// config:
///   env_policy: isolated
/// globals:
///   bob: BOBOB
/// wf_file:
///   - rule: alpha
///     c:
///       - "bbb {{bob}}"
///       - "ddd"
///     env:
///       FOO: BAR
/// ```
///
/// The TOML form uses `[globals]`, `[config]` and `[[wf_file]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRuleFile {
    #[serde(default)]
    pub config: SettingsSection,

    /// Variables visible to every command template.
    #[serde(default, deserialize_with = "serde_utils::scalar_map")]
    pub globals: BTreeMap<String, String>,

    /// Rule entries in file order. A later entry with the same name replaces
    /// an earlier one.
    #[serde(default, rename = "wf_file")]
    pub rules: Vec<RuleEntry>,
}

/// `config` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SettingsSection {
    /// Whether spawned commands see the parent's environment.
    #[serde(default)]
    pub env_policy: EnvPolicy,
}

/// One entry of the `wf_file` list.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub rule: String,

    /// Command templates, executed in order. A bare string is one command.
    #[serde(rename = "c", default, deserialize_with = "serde_utils::one_or_many")]
    pub commands: Vec<String>,

    /// Environment for this rule's processes. Missing or empty means none.
    #[serde(default, deserialize_with = "serde_utils::scalar_map")]
    pub env: BTreeMap<String, String>,
}

/// Global variables, fixed once the rule file is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GlobalScope(BTreeMap<String, String>);

impl GlobalScope {
    pub fn new(vars: BTreeMap<String, String>) -> Self {
        Self(vars)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GlobalScope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A named, ordered list of command templates plus its environment overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    commands: Vec<String>,
    env: BTreeMap<String, String>,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        commands: Vec<String>,
        env: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            commands,
            env,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Command templates in execution order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}

/// Validated, read-only workflow: global scope, settings and rules by name.
///
/// Construct through [`Workflow::try_from`] on a [`RawRuleFile`] or through
/// the loader functions.
#[derive(Debug, Clone)]
pub struct Workflow {
    settings: SettingsSection,
    globals: GlobalScope,
    rules: BTreeMap<String, Rule>,
}

impl Workflow {
    /// Build without validation. Callers must have run the checks in
    /// `validate.rs`.
    pub(crate) fn new_unchecked(
        settings: SettingsSection,
        globals: GlobalScope,
        rules: BTreeMap<String, Rule>,
    ) -> Self {
        Self {
            settings,
            globals,
            rules,
        }
    }

    pub fn settings(&self) -> &SettingsSection {
        &self.settings
    }

    pub fn globals(&self) -> &GlobalScope {
        &self.globals
    }

    /// Rule names in lexicographic order.
    pub fn list_rules(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
