//! Request lifecycle: validate, build, spawn, normalize.
//!
//! Every operation here returns an [`ExecutionResult`]; failures (including
//! panics) are folded into [`ExecutionResult::Failed`] and never escape to the
//! caller. Nothing is retried.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::EngineSettings;
use crate::error::OrchestratorError;
use crate::execution::{ExecutionRequest, ExecutionResult, Properties};
use crate::invocation::{self, ResolvedInvocation, UniqueSuffix};
use crate::process::{Launcher, SystemLauncher};
use crate::validator;

pub struct Orchestrator<L = SystemLauncher> {
    settings: EngineSettings,
    launcher: L,
}

impl Orchestrator<SystemLauncher> {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_launcher(settings, SystemLauncher)
    }
}

impl<L: Launcher> Orchestrator<L> {
    pub fn with_launcher(settings: EngineSettings, launcher: L) -> Self {
        Self { settings, launcher }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// General entry point; batch mode unless `gui_mode` is set. No reporting.
    pub async fn run(
        &self,
        test_file: &str,
        gui_mode: bool,
        properties: Properties,
    ) -> ExecutionResult {
        let request = ExecutionRequest::new(test_file)
            .gui(gui_mode)
            .properties(properties);
        self.execute(&request).await
    }

    /// Batch entry point with the full set of reporting controls.
    pub async fn run_batch(
        &self,
        test_file: &str,
        properties: Properties,
        generate_report: bool,
        report_output_dir: Option<String>,
        log_file: Option<String>,
    ) -> ExecutionResult {
        let request = ExecutionRequest {
            test_file: test_file.to_string(),
            gui_mode: false,
            properties,
            generate_report,
            report_output_dir,
            log_file,
        };
        self.execute(&request).await
    }

    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        let span = info_span!("jmeter", test_file = %request.test_file, gui = request.gui_mode);
        let outcome = AssertUnwindSafe(self.try_execute(request))
            .catch_unwind()
            .instrument(span)
            .await;

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!(kind = ?err.kind(), "request failed: {}", err);
                err.into()
            }
            Err(panic) => {
                let err = OrchestratorError::Unexpected(panic_message(panic.as_ref()));
                warn!("request panicked: {}", err);
                err.into()
            }
        }
    }

    /// Validate and build without spawning anything.
    pub fn plan(&self, request: &ExecutionRequest) -> Result<ResolvedInvocation, OrchestratorError> {
        let test_plan = validator::resolve_test_plan(&request.test_file)?;
        let suffix = UniqueSuffix::generate();
        invocation::build(&self.settings, &test_plan, request, &suffix)
    }

    async fn try_execute(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, OrchestratorError> {
        let invocation = self.plan(request)?;
        let argv = &invocation.argv;

        if request.gui_mode {
            self.launcher
                .spawn_detached(argv)
                .await
                .map_err(|source| OrchestratorError::Launch {
                    program: invocation.program().to_string(),
                    source,
                })?;
            info!("GUI session launched");
            return Ok(ExecutionResult::launched());
        }

        debug!("waiting for batch run");
        let output = self
            .launcher
            .run_captured(argv)
            .await
            .map_err(|source| OrchestratorError::Launch {
                program: invocation.program().to_string(),
                source,
            })?;

        if !output.success() {
            return Err(OrchestratorError::Engine {
                code: output.code,
                stderr: output.stderr,
            });
        }

        info!(
            log_file = ?invocation.log_file,
            report_dir = ?invocation.report_output_dir,
            "batch run completed"
        );
        Ok(ExecutionResult::Completed {
            stdout: output.stdout,
        })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during JMeter request".to_string()
    }
}
