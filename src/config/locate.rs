// src/config/locate.rs

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{Result, WfError};
use crate::fs::FileSystem;

/// Find the rule file `name`, starting in `start` and walking up through
/// each parent directory to the filesystem root.
///
/// - The nearest regular file wins; a directory with the same name is
///   skipped.
/// - An absolute `name` is checked as-is, without any search.
pub fn locate_rule_file(fs: &dyn FileSystem, start: &Path, name: &str) -> Result<PathBuf> {
    let not_found = || WfError::RuleFileNotFound {
        name: name.to_string(),
        start: start.to_path_buf(),
    };

    let name_path = Path::new(name);
    if name_path.is_absolute() {
        return if fs.is_file(name_path) {
            Ok(name_path.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    for dir in start.ancestors() {
        let candidate = dir.join(name_path);
        trace!(candidate = %candidate.display(), "checking for rule file");
        if fs.is_file(&candidate) {
            debug!(path = %candidate.display(), "found rule file");
            return Ok(candidate);
        }
    }

    Err(not_found())
}
