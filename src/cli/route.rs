//! CLI route: run context and route table. Dispatches to domain services
//! and presentation.

use crate::cli::parse::Commands;
use crate::cli::{command_name, presentation};
use crate::config::{AppConfig, ConfigLoader};
use crate::context::ContextProcessors;
use crate::db::QueryLog;
use crate::error::CommandError;
use crate::runner::{self, RunnerOptions, RunnerRegistry, TestSuite};
use crate::sitemap;
use std::path::PathBuf;
use tracing::info;

/// Suites supplied per run; the runner consumes them.
type SuiteFactory = Box<dyn Fn() -> Vec<TestSuite>>;

/// Runtime context for CLI execution: settings, workspace, and the shared
/// query log. Built from workspace path and optional config path using
/// ConfigLoader only.
pub struct RunContext {
    config: AppConfig,
    workspace_root: PathBuf,
    #[allow(dead_code)]
    config_path: Option<PathBuf>,
    query_log: QueryLog,
    suite_factory: SuiteFactory,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CommandError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        Ok(Self {
            config,
            workspace_root,
            config_path,
            query_log: QueryLog::new(),
            suite_factory: Box::new(runner::builtin_suites),
        })
    }

    /// Replace the suites offered to the test command. The standalone binary
    /// runs the framework self-checks; embedding applications register their
    /// own suites here.
    pub fn with_suites(mut self, factory: impl Fn() -> Vec<TestSuite> + 'static) -> Self {
        self.suite_factory = Box::new(factory);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn query_log(&self) -> QueryLog {
        self.query_log.clone()
    }

    /// Processor registry resolved from settings, reading this context's
    /// query log.
    pub fn context_processors(&self) -> Result<ContextProcessors, CommandError> {
        ContextProcessors::from_config(&self.config, self.query_log.clone())
    }

    fn scratch_root(&self) -> PathBuf {
        self.workspace_root.join(".plinth").join("scratch")
    }

    /// Execute a CLI command via the route table.
    pub fn execute(&self, command: &Commands) -> Result<String, CommandError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::PingGoogle { sitemap_url } => {
                let result =
                    sitemap::ping_google(&self.config.sitemap, sitemap_url.as_deref())?;
                Ok(presentation::format_ping_result(&result))
            }
            Commands::Test {
                labels,
                noinput,
                failfast,
                verbosity,
            } => {
                let options = RunnerOptions {
                    verbosity: *verbosity,
                    interactive: !*noinput,
                    failfast: *failfast,
                };
                let registry = RunnerRegistry::with_builtins();
                let runner = registry.resolve(
                    &self.config,
                    options,
                    (self.suite_factory)(),
                    self.scratch_root(),
                )?;
                let report = runner.run(labels)?;
                if report.failed() {
                    Err(CommandError::TestsFailed {
                        failures: report.failures.len(),
                        executed: report.executed,
                        details: presentation::format_failures(&report),
                    })
                } else {
                    Ok(presentation::format_run_report(&report, *verbosity))
                }
            }
        }
    }
}
