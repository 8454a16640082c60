// src/config/mod.rs

//! Rule-file handling for wf.
//!
//! Responsibilities:
//! - Define the serde-backed file model and the validated [`Workflow`]
//!   (`model.rs`).
//! - Find the rule file by walking parent directories (`locate.rs`).
//! - Decode YAML or TOML text (`loader.rs`).
//! - Check basic invariants while building the [`Workflow`] (`validate.rs`).

pub mod loader;
pub mod locate;
pub mod model;
pub mod serde_utils;
pub mod validate;

pub use loader::{DEFAULT_RULE_FILE, load_from_path, load_reader, load_str, load_yaml, parse_str};
pub use locate::locate_rule_file;
pub use model::{GlobalScope, RawRuleFile, Rule, RuleEntry, SettingsSection, Workflow};
