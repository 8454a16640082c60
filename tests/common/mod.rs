#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub use wf_test_utils::init_tracing;

/// Rule file with the same shape as the README example.
pub const ALPHA_YAML: &str = r#"
# comment lines are fine
globals:
  bob: BOBOB
  count: 77
wf_file:
  - rule: alpha
    c:
      - "bbb {{bob}}"
      - "ddd"
    env:
      FOO: BAR
  - rule: beta
    c: "{{bob}} {{count}}"
"#;

/// Write `contents` to `dir/name` and return the full path.
pub fn write_rule_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("writing rule file");
    path
}
