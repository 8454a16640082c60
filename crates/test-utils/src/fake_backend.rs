use std::collections::{HashMap, HashSet};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use wf::exec::{ExecutableResolver, ProcessBackend, ProcessSpec};

/// Directory the fake resolver pretends every executable lives in.
pub const FAKE_BIN: &str = "/fake/bin";

/// A fake process backend that:
/// - records every spec it was asked to run
/// - returns a scripted exit code per program name (default 0)
/// - fails to spawn programs listed in `unspawnable`
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    executed: Arc<Mutex<Vec<ProcessSpec>>>,
    exit_codes: HashMap<String, i32>,
    unspawnable: HashSet<String>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` exit with `code`.
    pub fn exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Make spawning `program` fail with a permission error.
    pub fn unspawnable(mut self, program: &str) -> Self {
        self.unspawnable.insert(program.to_string());
        self
    }

    /// Shared handle to the recorded specs, usable after the backend has
    /// been moved into an executor.
    pub fn executed(&self) -> Arc<Mutex<Vec<ProcessSpec>>> {
        Arc::clone(&self.executed)
    }

    /// Program names (file names of the resolved paths) run so far.
    pub fn executed_programs(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(program_name)
            .collect()
    }
}

impl ProcessBackend for FakeBackend {
    fn run(&mut self, spec: &ProcessSpec) -> io::Result<i32> {
        let name = program_name(spec);
        if self.unspawnable.contains(&name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("fake spawn failure for {name}"),
            ));
        }

        self.executed.lock().unwrap().push(spec.clone());
        Ok(self.exit_codes.get(&name).copied().unwrap_or(0))
    }
}

/// Resolves every program to `/fake/bin/<name>` except the ones marked
/// missing.
#[derive(Debug, Clone, Default)]
pub struct FakeResolver {
    missing: HashSet<String>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }
}

impl ExecutableResolver for FakeResolver {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if self.missing.contains(program) {
            None
        } else {
            Some(PathBuf::from(FAKE_BIN).join(program))
        }
    }
}

fn program_name(spec: &ProcessSpec) -> String {
    spec.program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
