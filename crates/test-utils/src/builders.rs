#![allow(dead_code)]

use std::collections::BTreeMap;

use wf::config::{RawRuleFile, RuleEntry, SettingsSection, Workflow};
use wf::types::EnvPolicy;

/// Builder for `Workflow` to simplify test setup.
pub struct WorkflowBuilder {
    raw: RawRuleFile,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawRuleFile {
                config: SettingsSection::default(),
                globals: BTreeMap::new(),
                rules: Vec::new(),
            },
        }
    }

    pub fn with_global(mut self, name: &str, value: &str) -> Self {
        self.raw.globals.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_rule(mut self, rule: RuleEntry) -> Self {
        self.raw.rules.push(rule);
        self
    }

    pub fn with_env_policy(mut self, policy: EnvPolicy) -> Self {
        self.raw.config.env_policy = policy;
        self
    }

    pub fn build(self) -> Workflow {
        Workflow::try_from(self.raw).expect("Failed to build valid workflow from builder")
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `wf_file` entry.
pub struct RuleBuilder {
    entry: RuleEntry,
}

impl RuleBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            entry: RuleEntry {
                rule: name.to_string(),
                commands: Vec::new(),
                env: BTreeMap::new(),
            },
        }
    }

    pub fn cmd(mut self, template: &str) -> Self {
        self.entry.commands.push(template.to_string());
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.entry.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> RuleEntry {
        self.entry
    }
}
