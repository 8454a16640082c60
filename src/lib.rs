// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod template;
pub mod tokenize;
pub mod types;

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Workflow, load_from_path, locate_rule_file};
use crate::errors::Result;
use crate::exec::{
    ExecOptions, Executor, PlannedCommand, RealProcessBackend, RuleOutcome, SearchPathResolver,
};
use crate::fs::{FileSystem, RealFileSystem};

pub use crate::tokenize::{Tokens, tokenize};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - locating the workflow file from the current directory upwards
/// - `--dump`, `--list` and `--dry-run`
/// - running the requested rule with real processes
///
/// Returns the exit code the process should end with.
pub fn run(args: CliArgs) -> Result<i32> {
    let fs = RealFileSystem;
    let cwd = std::env::current_dir()?;
    let path = locate_rule_file(&fs, &cwd, &args.file)?;
    debug!(path = %path.display(), "using workflow file");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.dump {
        dump_file(&fs, &path, &mut out)?;
        return Ok(0);
    }

    let workflow = load_from_path(&fs, &path)?;

    let rule = match args.rule.as_deref() {
        Some(rule) if !args.list => rule,
        _ => {
            print_rules(&workflow, &mut out)?;
            return Ok(0);
        }
    };

    let options = ExecOptions {
        env_policy: args.env_policy,
    };
    let mut executor = Executor::new(RealProcessBackend, SearchPathResolver, options);

    if args.dry_run {
        let plan = executor.plan(&workflow, rule)?;
        print_plan(rule, &plan, &mut out)?;
        return Ok(0);
    }
    // Children write to the same stdout; release the lock while they run.
    drop(out);

    let started = Instant::now();
    let outcome = executor.run(&workflow, rule)?;
    let elapsed = started.elapsed();

    match outcome {
        RuleOutcome::Completed { commands_run } => {
            info!(rule, commands_run, "rule finished");
        }
        RuleOutcome::Failed { index, exit_code } => {
            info!(rule, index, exit_code, "rule failed");
        }
    }

    if args.time {
        println!("Total Time in µsecs: {}", elapsed.as_micros());
    }

    Ok(outcome.exit_code())
}

/// Copy the workflow file to `out` unchanged.
pub fn dump_file(fs: &dyn FileSystem, path: &Path, out: &mut dyn Write) -> Result<()> {
    let mut reader = fs.open_read(path)?;
    io::copy(&mut reader, out)?;
    Ok(())
}

/// One rule name per line, sorted.
pub fn print_rules(workflow: &Workflow, out: &mut dyn Write) -> Result<()> {
    for name in workflow.list_rules() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Dry-run output: each command with its resolved executable and arguments.
pub fn print_plan(rule: &str, plan: &[PlannedCommand], out: &mut dyn Write) -> Result<()> {
    writeln!(out, "wf dry-run: rule {rule} ({} commands)", plan.len())?;
    for cmd in plan {
        writeln!(out, "  [{}] {}", cmd.index, cmd.line)?;
        writeln!(out, "      program: {}", cmd.program.display())?;
        if !cmd.args.is_empty() {
            writeln!(out, "      args: {:?}", cmd.args)?;
        }
    }
    Ok(())
}

