// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every failure that aborts a rule is represented here with enough context
//! (rule name, command index, offending text) for the caller to report which
//! step failed. The library never prints these; `main.rs` does.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;
use crate::tokenize::TokenizeError;

#[derive(Error, Debug)]
pub enum WfError {
    /// The rule file was empty, could not be decoded, or failed validation.
    #[error("parse error in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("workflow file '{name}' not found in {start:?} or any parent directory")]
    RuleFileNotFound { name: String, start: PathBuf },

    #[error("rule does not exist: {0}")]
    RuleNotFound(String),

    #[error("rule '{rule}' command #{index}: {source}")]
    Template {
        rule: String,
        index: usize,
        #[source]
        source: TemplateError,
    },

    #[error("rule '{rule}' command #{index}: {source}")]
    Tokenize {
        rule: String,
        index: usize,
        #[source]
        source: TokenizeError,
    },

    #[error("rule '{rule}' command #{index}: command not found in PATH: {program}")]
    CommandNotFound {
        rule: String,
        index: usize,
        program: String,
    },

    #[error("rule '{rule}' command #{index}: failed to spawn {program:?}: {source}")]
    Spawn {
        rule: String,
        index: usize,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WfError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        WfError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    /// Process exit status the `wf` binary uses when this error ends a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            WfError::RuleFileNotFound { .. } => 1,
            WfError::Parse { .. } | WfError::IoError(_) | WfError::Other(_) => 2,
            WfError::RuleNotFound(_) => 3,
            WfError::CommandNotFound { .. } => 4,
            WfError::Template { .. } => 5,
            WfError::Tokenize { .. } => 6,
            WfError::Spawn { .. } => 7,
        }
    }
}

pub type Result<T> = std::result::Result<T, WfError>;
