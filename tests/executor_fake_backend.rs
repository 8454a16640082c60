// tests/executor_fake_backend.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;

use wf::config::{GlobalScope, Workflow};
use wf::errors::WfError;
use wf::exec::{ExecOptions, Executor, RuleOutcome};
use wf::tokenize::TokenizeErrorKind;
use wf::types::EnvPolicy;
use wf_test_utils::builders::{RuleBuilder, WorkflowBuilder};
use wf_test_utils::fake_backend::{FAKE_BIN, FakeBackend, FakeResolver};

type TestResult = Result<(), Box<dyn Error>>;

fn executor(backend: FakeBackend, resolver: FakeResolver) -> Executor<FakeBackend, FakeResolver> {
    Executor::new(backend, resolver, ExecOptions::default())
}

fn two_rules() -> Workflow {
    WorkflowBuilder::new()
        .with_global("greeting", "hello")
        .with_rule(RuleBuilder::new("alpha").cmd("echo A").cmd("echo B").build())
        .with_rule(
            RuleBuilder::new("beta")
                .cmd("false")
                .cmd("echo unreachable")
                .build(),
        )
        .build()
}

#[test]
fn all_commands_run_in_order_and_rule_succeeds() -> TestResult {
    init_tracing();
    let wf = two_rules();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    let outcome = exec.run(&wf, "alpha")?;

    assert_eq!(outcome, RuleOutcome::Completed { commands_run: 2 });
    assert_eq!(outcome.exit_code(), 0);
    assert!(outcome.is_success());

    let executed = exec.backend().executed();
    let executed = executed.lock().unwrap();
    assert_eq!(executed.len(), 2);
    assert_eq!(executed[0].program, PathBuf::from(FAKE_BIN).join("echo"));
    assert_eq!(executed[0].args, vec!["A".to_string()]);
    assert_eq!(executed[1].args, vec!["B".to_string()]);
    Ok(())
}

#[test]
fn first_non_zero_exit_stops_the_rule() -> TestResult {
    let wf = two_rules();
    let mut exec = executor(FakeBackend::new().exit_code("false", 1), FakeResolver::new());

    let outcome = exec.run(&wf, "beta")?;

    assert_eq!(outcome, RuleOutcome::Failed { index: 0, exit_code: 1 });
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(exec.backend().executed_programs(), vec!["false"]);
    Ok(())
}

#[test]
fn returned_code_is_that_of_the_first_failure() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_rule(
            RuleBuilder::new("chain")
                .cmd("ok1")
                .cmd("ok2")
                .cmd("fail42")
                .cmd("fail7")
                .cmd("ok3")
                .build(),
        )
        .build();
    let backend = FakeBackend::new().exit_code("fail42", 42).exit_code("fail7", 7);
    let mut exec = executor(backend, FakeResolver::new());

    let outcome = exec.run(&wf, "chain")?;

    assert_eq!(outcome, RuleOutcome::Failed { index: 2, exit_code: 42 });
    assert_eq!(exec.backend().executed_programs(), vec!["ok1", "ok2", "fail42"]);
    Ok(())
}

#[test]
fn negative_exit_code_also_short_circuits() -> TestResult {
    let wf = two_rules();
    let mut exec = executor(FakeBackend::new().exit_code("false", -1), FakeResolver::new());

    assert_eq!(exec.run(&wf, "beta")?.exit_code(), -1);
    assert_eq!(exec.backend().executed_programs(), vec!["false"]);
    Ok(())
}

#[test]
fn rule_without_commands_succeeds_without_running_anything() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_rule(RuleBuilder::new("noop").build())
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    assert_eq!(exec.run(&wf, "noop")?, RuleOutcome::Completed { commands_run: 0 });
    assert!(exec.backend().executed_programs().is_empty());
    Ok(())
}

#[test]
fn unknown_rule_is_rule_not_found() {
    let wf = two_rules();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    match exec.run(&wf, "gamma") {
        Err(err @ WfError::RuleNotFound(_)) => {
            assert_eq!(err.exit_code(), 3);
            assert!(err.to_string().contains("gamma"));
        }
        other => panic!("expected RuleNotFound, got {other:?}"),
    }
    assert!(exec.backend().executed_programs().is_empty());
}

#[test]
fn templates_are_expanded_before_tokenizing() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_global("msg", "two words")
        .with_rule(
            RuleBuilder::new("say")
                .cmd("echo {{msg}}")
                .cmd("echo \"{{msg}}\"")
                .build(),
        )
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    exec.run(&wf, "say")?;

    let executed = exec.backend().executed();
    let executed = executed.lock().unwrap();
    assert_eq!(executed[0].args, vec!["two".to_string(), "words".to_string()]);
    assert_eq!(executed[1].args, vec!["two words".to_string()]);
    Ok(())
}

#[test]
fn template_error_aborts_before_any_command_runs() {
    let wf = WorkflowBuilder::new()
        .with_rule(
            RuleBuilder::new("r")
                .cmd("echo first")
                .cmd("echo {{undefined}}")
                .build(),
        )
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    match exec.run(&wf, "r") {
        Err(WfError::Template { rule, index, .. }) => {
            assert_eq!(rule, "r");
            assert_eq!(index, 1);
        }
        other => panic!("expected Template error, got {other:?}"),
    }
    assert!(exec.backend().executed_programs().is_empty());
}

#[test]
fn tokenize_error_aborts_remaining_commands() {
    let wf = WorkflowBuilder::new()
        .with_rule(
            RuleBuilder::new("r")
                .cmd("echo one")
                .cmd("   ")
                .cmd("echo three")
                .build(),
        )
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    match exec.run(&wf, "r") {
        Err(WfError::Tokenize { index, source, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(source.kind, TokenizeErrorKind::Empty);
        }
        other => panic!("expected Tokenize error, got {other:?}"),
    }
    assert_eq!(exec.backend().executed_programs(), vec!["echo"]);
}

#[test]
fn missing_executable_is_command_not_found_and_stops_the_rule() {
    let wf = WorkflowBuilder::new()
        .with_rule(
            RuleBuilder::new("r")
                .cmd("echo before")
                .cmd("no-such-tool --flag")
                .cmd("echo after")
                .build(),
        )
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new().missing("no-such-tool"));

    match exec.run(&wf, "r") {
        Err(err @ WfError::CommandNotFound { .. }) => {
            assert_eq!(err.exit_code(), 4);
            if let WfError::CommandNotFound { rule, index, program } = err {
                assert_eq!(rule, "r");
                assert_eq!(index, 1);
                assert_eq!(program, "no-such-tool");
            }
        }
        other => panic!("expected CommandNotFound, got {other:?}"),
    }
    assert_eq!(exec.backend().executed_programs(), vec!["echo"]);
}

#[test]
fn spawn_failure_is_spawn_error() {
    let wf = two_rules();
    let mut exec = executor(FakeBackend::new().unspawnable("echo"), FakeResolver::new());

    match exec.run(&wf, "alpha") {
        Err(WfError::Spawn { rule, index, program, .. }) => {
            assert_eq!(rule, "alpha");
            assert_eq!(index, 0);
            assert_eq!(program, PathBuf::from(FAKE_BIN).join("echo"));
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[test]
fn global_named_log_reaches_argv() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_global("log", "build.log")
        .with_global("title", "Nightly")
        .with_rule(RuleBuilder::new("report").cmd("tee {{log}} {{title}}").build())
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    exec.run(&wf, "report")?;

    let executed = exec.backend().executed();
    let executed = executed.lock().unwrap();
    assert_eq!(
        executed[0].args,
        vec!["build.log".to_string(), "Nightly".to_string()]
    );
    Ok(())
}

#[test]
fn rule_env_overlay_is_passed_to_every_command() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_rule(
            RuleBuilder::new("r")
                .cmd("one")
                .cmd("two")
                .env("FOO", "BAR")
                .env("USER", "me")
                .build(),
        )
        .with_rule(RuleBuilder::new("bare").cmd("three").build())
        .build();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    exec.run(&wf, "r")?;
    exec.run(&wf, "bare")?;

    let executed = exec.backend().executed();
    let executed = executed.lock().unwrap();
    for spec in &executed[..2] {
        assert_eq!(spec.env.len(), 2);
        assert_eq!(spec.env["FOO"], "BAR");
        assert_eq!(spec.env["USER"], "me");
        assert_eq!(spec.env_policy, EnvPolicy::Isolated);
    }
    assert!(executed[2].env.is_empty());
    Ok(())
}

#[test]
fn env_policy_comes_from_the_file_unless_overridden() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_env_policy(EnvPolicy::Inherit)
        .with_rule(RuleBuilder::new("r").cmd("x").build())
        .build();

    let mut from_file = executor(FakeBackend::new(), FakeResolver::new());
    from_file.run(&wf, "r")?;
    assert_eq!(
        from_file.backend().executed().lock().unwrap()[0].env_policy,
        EnvPolicy::Inherit
    );

    let options = ExecOptions {
        env_policy: Some(EnvPolicy::Isolated),
    };
    let mut overridden = Executor::new(FakeBackend::new(), FakeResolver::new(), options);
    overridden.run(&wf, "r")?;
    assert_eq!(
        overridden.backend().executed().lock().unwrap()[0].env_policy,
        EnvPolicy::Isolated
    );
    Ok(())
}

#[test]
fn run_rule_uses_the_given_scope() -> TestResult {
    let wf = two_rules();
    let rule = wf.lookup("alpha").expect("alpha").clone();
    let scope: GlobalScope = [("unused", "x")].into_iter().collect();
    let mut exec = executor(FakeBackend::new(), FakeResolver::new());

    let outcome = exec.run_rule(&rule, &scope)?;
    assert_eq!(outcome, RuleOutcome::Completed { commands_run: 2 });
    Ok(())
}

#[test]
fn plan_resolves_without_running() -> TestResult {
    let wf = WorkflowBuilder::new()
        .with_global("target", "release")
        .with_rule(
            RuleBuilder::new("build")
                .cmd("cargo build --{{target}}")
                .cmd("strip 'target/{{target}}/my app'")
                .build(),
        )
        .build();
    let exec = executor(FakeBackend::new(), FakeResolver::new());

    let plan = exec.plan(&wf, "build")?;

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].line, "cargo build --release");
    assert_eq!(plan[0].program, PathBuf::from(FAKE_BIN).join("cargo"));
    assert_eq!(plan[0].args, vec!["build".to_string(), "--release".to_string()]);
    assert_eq!(plan[1].index, 1);
    assert_eq!(plan[1].args, vec!["target/release/my app".to_string()]);
    assert!(exec.backend().executed_programs().is_empty());
    Ok(())
}

#[test]
fn plan_surfaces_missing_executables() {
    let wf = two_rules();
    let exec = executor(FakeBackend::new(), FakeResolver::new().missing("false"));

    assert!(matches!(
        exec.plan(&wf, "beta"),
        Err(WfError::CommandNotFound { index: 0, .. })
    ));
}
