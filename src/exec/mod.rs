// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] owns the per-rule loop: expand, tokenize, locate, spawn,
//!   wait, short-circuit on the first non-zero exit.
//! - [`backend`] provides the `ProcessBackend` trait and the real
//!   `std::process` implementation; tests replace it with a fake.
//! - [`resolver`] maps program names to executables via `PATH`.

pub mod backend;
pub mod resolver;
pub mod runner;

pub use backend::{ProcessBackend, ProcessSpec, RealProcessBackend};
pub use resolver::{ExecutableResolver, SearchPathResolver};
pub use runner::{ExecOptions, Executor, PlannedCommand, RuleOutcome};
