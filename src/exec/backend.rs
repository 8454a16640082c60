// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The executor hands each ready command to a [`ProcessBackend`] and waits
//! for its exit code. Production uses [`RealProcessBackend`]; tests swap in
//! a fake that records the commands instead of spawning them.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::types::EnvPolicy;

/// Everything needed to start one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Absolute path of the executable.
    pub program: PathBuf,
    pub args: Vec<String>,
    /// The rule's environment overlay.
    pub env: BTreeMap<String, String>,
    pub env_policy: EnvPolicy,
}

/// Trait abstracting how a single command is run to completion.
pub trait ProcessBackend: Send {
    /// Start the process described by `spec`, block until it exits and
    /// return its exit code.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&mut self, spec: &ProcessSpec) -> io::Result<i32>;
}

/// Spawns real OS processes with `std::process::Command`.
///
/// - stdout and stderr are the parent's own streams, not captured.
/// - stdin is the null device.
/// - With [`EnvPolicy::Isolated`] the child's environment is exactly the
///   overlay.
/// - A child killed by a signal reports exit code `-1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessBackend;

impl ProcessBackend for RealProcessBackend {
    fn run(&mut self, spec: &ProcessSpec) -> io::Result<i32> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if spec.env_policy == EnvPolicy::Isolated {
            cmd.env_clear();
        }
        cmd.envs(&spec.env);

        let status = cmd.status()?;
        Ok(status.code().unwrap_or(-1))
    }
}
