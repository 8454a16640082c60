// src/exec/runner.rs

//! Sequential execution of a rule's commands.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{GlobalScope, Rule, Workflow};
use crate::errors::{Result, WfError};
use crate::exec::backend::{ProcessBackend, ProcessSpec};
use crate::exec::resolver::ExecutableResolver;
use crate::template::{ResolvedCommand, TemplateResolver};
use crate::tokenize::tokenize;
use crate::types::EnvPolicy;

/// Knobs that are not part of the rule file itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecOptions {
    /// Overrides the rule file's `config.env_policy` when set.
    pub env_policy: Option<EnvPolicy>,
}

/// Result of a rule that ran without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Every command exited with status 0.
    Completed { commands_run: usize },
    /// Command `index` exited non-zero; later commands were not started.
    Failed { index: usize, exit_code: i32 },
}

impl RuleOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RuleOutcome::Completed { .. } => 0,
            RuleOutcome::Failed { exit_code, .. } => *exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RuleOutcome::Completed { .. })
    }
}

/// A command that is ready to spawn: expanded, split and located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    pub index: usize,
    pub line: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Runs rules one command at a time.
///
/// For each rule all templates are expanded first, so a template error
/// aborts before anything has run. Then, per command: tokenize, locate the
/// executable, spawn, wait. The first non-zero exit ends the rule.
/// Commands that already ran are not undone.
pub struct Executor<B, R> {
    backend: B,
    resolver: R,
    templates: TemplateResolver,
    options: ExecOptions,
}

impl<B: ProcessBackend, R: ExecutableResolver> Executor<B, R> {
    pub fn new(backend: B, resolver: R, options: ExecOptions) -> Self {
        Self {
            backend,
            resolver,
            templates: TemplateResolver::new(),
            options,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Look up `name` in `workflow` and run it.
    pub fn run(&mut self, workflow: &Workflow, name: &str) -> Result<RuleOutcome> {
        let rule = lookup(workflow, name)?;
        let policy = self
            .options
            .env_policy
            .unwrap_or(workflow.settings().env_policy);
        self.execute(rule, workflow.globals(), policy)
    }

    /// Run an already looked-up rule against `scope`.
    ///
    /// Without an override in [`ExecOptions`] the environment is isolated.
    pub fn run_rule(&mut self, rule: &Rule, scope: &GlobalScope) -> Result<RuleOutcome> {
        let policy = self.options.env_policy.unwrap_or_default();
        self.execute(rule, scope, policy)
    }

    /// Expand, tokenize and locate every command of `name` without running
    /// anything.
    pub fn plan(&self, workflow: &Workflow, name: &str) -> Result<Vec<PlannedCommand>> {
        let rule = lookup(workflow, name)?;
        self.templates
            .resolve_rule(rule, workflow.globals())?
            .iter()
            .map(|command| self.plan_command(rule.name(), command))
            .collect()
    }

    fn execute(
        &mut self,
        rule: &Rule,
        scope: &GlobalScope,
        env_policy: EnvPolicy,
    ) -> Result<RuleOutcome> {
        let resolved = self.templates.resolve_rule(rule, scope)?;
        info!(
            rule = %rule.name(),
            commands = resolved.len(),
            ?env_policy,
            "running rule"
        );

        for command in &resolved {
            let planned = self.plan_command(rule.name(), command)?;
            let spec = ProcessSpec {
                program: planned.program,
                args: planned.args,
                env: command.env.clone(),
                env_policy,
            };

            info!(
                rule = %rule.name(),
                index = command.index,
                program = %spec.program.display(),
                args = ?spec.args,
                "starting command"
            );

            let exit_code = self.backend.run(&spec).map_err(|source| WfError::Spawn {
                rule: rule.name().to_string(),
                index: command.index,
                program: spec.program.clone(),
                source,
            })?;

            info!(
                rule = %rule.name(),
                index = command.index,
                exit_code,
                "command exited"
            );

            if exit_code != 0 {
                let skipped = resolved.len() - command.index - 1;
                if skipped > 0 {
                    warn!(
                        rule = %rule.name(),
                        index = command.index,
                        exit_code,
                        skipped,
                        "command failed; skipping remaining commands"
                    );
                }
                return Ok(RuleOutcome::Failed {
                    index: command.index,
                    exit_code,
                });
            }
        }

        Ok(RuleOutcome::Completed {
            commands_run: resolved.len(),
        })
    }

    fn plan_command(&self, rule: &str, command: &ResolvedCommand<'_>) -> Result<PlannedCommand> {
        let tokens = tokenize(&command.line).map_err(|source| WfError::Tokenize {
            rule: rule.to_string(),
            index: command.index,
            source,
        })?;
        debug!(
            rule = %rule,
            index = command.index,
            program = %tokens.program,
            args = ?tokens.args,
            "tokenized command"
        );

        let program = self
            .resolver
            .resolve(&tokens.program)
            .ok_or_else(|| WfError::CommandNotFound {
                rule: rule.to_string(),
                index: command.index,
                program: tokens.program.clone(),
            })?;

        Ok(PlannedCommand {
            index: command.index,
            line: command.line.clone(),
            program,
            args: tokens.args,
        })
    }
}

fn lookup<'w>(workflow: &'w Workflow, name: &str) -> Result<&'w Rule> {
    workflow
        .lookup(name)
        .ok_or_else(|| WfError::RuleNotFound(name.to_string()))
}
