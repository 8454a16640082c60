// src/exec/resolver.rs

use std::path::PathBuf;

/// Maps a program-name token to the executable that should be spawned.
pub trait ExecutableResolver {
    /// `None` when no executable of that name can be found.
    fn resolve(&self, program: &str) -> Option<PathBuf>;
}

/// Searches `PATH` of the `wf` process itself (never a rule's overlay).
/// Names containing a path separator are checked directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPathResolver;

impl ExecutableResolver for SearchPathResolver {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
