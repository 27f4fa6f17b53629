//! Test runner dispatch for the `test` management command.
//!
//! Suites are registered data: the embedding application supplies them, the
//! standalone binary registers the framework self-check suite. The command
//! resolves a runner implementation by the name configured in settings,
//! passes the CLI options through unchanged, and turns a non-empty failure
//! list into a non-zero exit status.

use crate::config::AppConfig;
use crate::error::CommandError;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Options parsed from the CLI and forwarded unchanged to the runner.
#[derive(Debug, Clone, Copy)]
pub struct RunnerOptions {
    pub verbosity: u8,
    pub interactive: bool,
    pub failfast: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            verbosity: 1,
            interactive: true,
            failfast: false,
        }
    }
}

/// One executable check.
pub struct TestCase {
    name: String,
    run: Box<dyn Fn() -> Result<(), String> + Send + Sync>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn() -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named collection of cases, addressed by label from the CLI.
pub struct TestSuite {
    name: String,
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn with_case(
        mut self,
        name: impl Into<String>,
        run: impl Fn() -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.cases.push(TestCase::new(name, run));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// One failed case.
#[derive(Debug, Clone)]
pub struct CaseFailure {
    pub suite: String,
    pub case: String,
    pub message: String,
}

/// Per-suite tally.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub name: String,
    pub executed: usize,
    pub failed: usize,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub executed: usize,
    pub failures: Vec<CaseFailure>,
    pub suites: Vec<SuiteResult>,
}

impl RunReport {
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// A test runner: selects suites by label, executes them, reports failures.
pub trait TestRunner {
    fn run(&self, labels: &[String]) -> Result<RunReport, CommandError>;
}

/// Constructor for a named runner implementation.
pub type RunnerFactory =
    Box<dyn Fn(RunnerOptions, Vec<TestSuite>, PathBuf) -> Box<dyn TestRunner>>;

/// Name-to-factory registry consulted via the `test_runner` setting.
pub struct RunnerRegistry {
    factories: HashMap<String, RunnerFactory>,
}

impl RunnerRegistry {
    /// Registry with the built-in `default` runner.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("default", |options, suites, scratch_root| {
            Box::new(DefaultRunner::new(options, suites, scratch_root))
        });
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(RunnerOptions, Vec<TestSuite>, PathBuf) -> Box<dyn TestRunner> + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Construct the runner named by `config.test_runner`.
    pub fn resolve(
        &self,
        config: &AppConfig,
        options: RunnerOptions,
        suites: Vec<TestSuite>,
        scratch_root: PathBuf,
    ) -> Result<Box<dyn TestRunner>, CommandError> {
        match self.factories.get(&config.test_runner) {
            Some(factory) => Ok(factory(options, suites, scratch_root)),
            None => Err(CommandError::UnknownRunner(config.test_runner.clone())),
        }
    }
}

/// Built-in runner: sequential execution in registration order, scratch
/// directory lifecycle around the run, failfast stops at the first failure.
pub struct DefaultRunner {
    options: RunnerOptions,
    suites: Vec<TestSuite>,
    scratch_root: PathBuf,
}

impl DefaultRunner {
    pub fn new(options: RunnerOptions, suites: Vec<TestSuite>, scratch_root: PathBuf) -> Self {
        Self {
            options,
            suites,
            scratch_root,
        }
    }

    fn select(&self, labels: &[String]) -> Result<Vec<&TestSuite>, CommandError> {
        if labels.is_empty() {
            return Ok(self.suites.iter().collect());
        }
        let mut selected = Vec::new();
        for label in labels {
            let suite = self
                .suites
                .iter()
                .find(|s| s.name() == label)
                .ok_or_else(|| CommandError::UnknownLabel(label.clone()))?;
            selected.push(suite);
        }
        Ok(selected)
    }

    /// A leftover scratch directory from an aborted run is removed before
    /// executing; in interactive mode the user confirms the removal first.
    fn setup_scratch(&self) -> Result<(), CommandError> {
        if self.scratch_root.exists() {
            if self.options.interactive {
                use dialoguer::Confirm;
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Scratch directory {} exists from a previous run; remove it?",
                        self.scratch_root.display()
                    ))
                    .interact()
                    .map_err(|e| {
                        CommandError::ConfigError(format!("Failed to get user input: {}", e))
                    })?;
                if !confirmed {
                    return Err(CommandError::RunAborted(
                        "scratch directory left in place".to_string(),
                    ));
                }
            }
            std::fs::remove_dir_all(&self.scratch_root)?;
        }
        std::fs::create_dir_all(&self.scratch_root)?;
        Ok(())
    }

    fn teardown_scratch(&self) {
        if let Err(e) = std::fs::remove_dir_all(&self.scratch_root) {
            warn!(
                scratch_root = %self.scratch_root.display(),
                "Failed to remove scratch directory: {}", e
            );
        }
    }
}

impl TestRunner for DefaultRunner {
    fn run(&self, labels: &[String]) -> Result<RunReport, CommandError> {
        let selected = self.select(labels)?;
        self.setup_scratch()?;

        let mut report = RunReport::default();
        'suites: for suite in selected {
            if self.options.verbosity >= 1 {
                info!(suite = %suite.name, cases = suite.cases.len(), "Running suite");
            }
            let mut tally = SuiteResult {
                name: suite.name.clone(),
                executed: 0,
                failed: 0,
            };
            for case in &suite.cases {
                if self.options.verbosity >= 2 {
                    debug!(suite = %suite.name, case = %case.name, "Running case");
                }
                report.executed += 1;
                tally.executed += 1;
                if let Err(message) = (case.run)() {
                    warn!(suite = %suite.name, case = %case.name, %message, "Case failed");
                    tally.failed += 1;
                    report.failures.push(CaseFailure {
                        suite: suite.name.clone(),
                        case: case.name.clone(),
                        message,
                    });
                    if self.options.failfast {
                        report.suites.push(tally);
                        break 'suites;
                    }
                }
            }
            report.suites.push(tally);
        }

        self.teardown_scratch();
        Ok(report)
    }
}

/// Framework self-check suite registered by the standalone binary.
pub fn builtin_suites() -> Vec<TestSuite> {
    vec![TestSuite::new("plinth")
        .with_case("default_config_validates", || {
            AppConfig::default().validate().map_err(|errors| {
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
        .with_case("context_exposes_documented_keys", || {
            use crate::context::{ContextProcessors, RequestContext};
            use crate::db::QueryLog;
            use crate::request::Request;

            let config = AppConfig::default();
            let processors = ContextProcessors::from_config(&config, QueryLog::new())
                .map_err(|e| e.to_string())?;
            let context = RequestContext::build(&processors, &Request::new(), &config);
            for key in ["csrf_token", "LANGUAGE_CODE", "STATIC_URL", "MEDIA_URL", "request"] {
                if !context.contains_key(key) {
                    return Err(format!("missing context key: {}", key));
                }
            }
            Ok(())
        })
        .with_case("bidi_table_resolves", || {
            use crate::i18n::get_language_bidi;
            if !get_language_bidi("ar") || get_language_bidi("en") {
                return Err("bidi lookup inconsistent".to_string());
            }
            Ok(())
        })]
}
