// src/config/loader.rs

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::model::{RawRuleFile, Workflow};
use crate::config::validate::INLINE_ORIGIN;
use crate::errors::{Result, WfError};
use crate::fs::FileSystem;
use crate::types::RuleFileFormat;

/// File name searched for when none is given on the command line.
pub const DEFAULT_RULE_FILE: &str = ".workflow.yaml";

/// Decode rule-file text without validating it.
///
/// Empty (whitespace-only) input is rejected here rather than decoded into
/// a file with no rules.
pub fn parse_str(text: &str, format: RuleFileFormat) -> Result<RawRuleFile> {
    if text.trim().is_empty() {
        return Err(WfError::parse(INLINE_ORIGIN, "empty rule file"));
    }

    match format {
        RuleFileFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| WfError::parse(INLINE_ORIGIN, e))
        }
        RuleFileFormat::Toml => toml::from_str(text).map_err(|e| WfError::parse(INLINE_ORIGIN, e)),
    }
}

/// Decode and validate rule-file text.
pub fn load_str(text: &str, format: RuleFileFormat) -> Result<Workflow> {
    let raw = parse_str(text, format)?;
    let workflow = Workflow::try_from(raw)?;
    debug!(
        rules = workflow.len(),
        globals = workflow.globals().len(),
        "loaded workflow"
    );
    Ok(workflow)
}

/// [`load_str`] for the default YAML encoding.
pub fn load_yaml(text: &str) -> Result<Workflow> {
    load_str(text, RuleFileFormat::Yaml)
}

/// Read a whole stream and load it.
pub fn load_reader(mut reader: impl Read, format: RuleFileFormat) -> Result<Workflow> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| WfError::parse(INLINE_ORIGIN, e))?;
    load_str(&text, format)
}

/// Load a rule file from disk (or any [`FileSystem`]), choosing the
/// encoding from the file extension. Parse errors name the path.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Workflow> {
    let path = path.as_ref();
    let text = fs.read_to_string(path)?;

    load_str(&text, RuleFileFormat::from_path(path)).map_err(|err| match err {
        WfError::Parse { message, .. } => WfError::Parse {
            origin: path.display().to_string(),
            message,
        },
        other => other,
    })
}
