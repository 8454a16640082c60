// src/config/validate.rs

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::model::{GlobalScope, RawRuleFile, Rule, Workflow};
use crate::errors::{Result, WfError};

/// Where a rule file came from, for error messages.
pub(crate) const INLINE_ORIGIN: &str = "<input>";

impl TryFrom<RawRuleFile> for Workflow {
    type Error = WfError;

    fn try_from(raw: RawRuleFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_rule_file(&raw)?;

        // Duplicate names: the last entry wins.
        let mut rules = BTreeMap::new();
        for entry in raw.rules {
            let name = entry.rule.clone();
            if entry.commands.is_empty() {
                debug!(rule = %name, "rule has no commands");
            }
            let rule = Rule::new(entry.rule, entry.commands, entry.env);
            if rules.insert(name.clone(), rule).is_some() {
                debug!(rule = %name, "duplicate rule name; later entry replaces the earlier one");
            }
        }

        Ok(Workflow::new_unchecked(
            raw.config,
            GlobalScope::new(raw.globals),
            rules,
        ))
    }
}

fn validate_raw_rule_file(raw: &RawRuleFile) -> Result<()> {
    ensure_has_rules(raw)?;
    validate_rule_names(raw)?;
    Ok(())
}

fn ensure_has_rules(raw: &RawRuleFile) -> Result<()> {
    if raw.rules.is_empty() {
        return Err(WfError::parse(
            INLINE_ORIGIN,
            "rule file must contain at least one entry under `wf_file`",
        ));
    }
    Ok(())
}

fn validate_rule_names(raw: &RawRuleFile) -> Result<()> {
    for (position, entry) in raw.rules.iter().enumerate() {
        if entry.rule.trim().is_empty() {
            return Err(WfError::parse(
                INLINE_ORIGIN,
                format!("entry #{position} of `wf_file` has an empty rule name"),
            ));
        }
    }
    Ok(())
}
