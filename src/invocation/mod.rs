//! Argument vector composition for a single JMeter run.
//!
//! Token order is fixed: optional `java <opts>` wrapper, engine binary, `-n`
//! (batch only), `-t <plan>`, one `-J<name>=<value>` per property, then
//! `-l <log> -e -o <dir>` when a batch run asks for a report.
//!
//! Property values are passed as single argv elements, never through a shell.
//! Values containing `=` or spaces are forwarded as-is; how JMeter itself
//! splits them is not checked here.

use std::path::{self, Path};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::EngineSettings;
use crate::error::OrchestratorError;
use crate::execution::ExecutionRequest;

pub mod suffix;

pub use suffix::UniqueSuffix;

pub const JAVA_RUNTIME: &str = "java";
pub const NON_GUI_FLAG: &str = "-n";
pub const TEST_FILE_FLAG: &str = "-t";
pub const PROPERTY_FLAG_PREFIX: &str = "-J";
pub const LOG_FILE_FLAG: &str = "-l";
pub const REPORT_FLAG: &str = "-e";
pub const REPORT_DIR_FLAG: &str = "-o";

/// The composed command plus the artifact names it will write, which can
/// differ from the request because of suffix injection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInvocation {
    pub argv: Vec<String>,
    pub log_file: Option<String>,
    pub report_output_dir: Option<String>,
}

impl ResolvedInvocation {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    /// Tokens shaped like a property flag.
    pub fn property_tokens(&self) -> impl Iterator<Item = &str> {
        self.argv
            .iter()
            .map(String::as_str)
            .filter(|t| t.starts_with(PROPERTY_FLAG_PREFIX))
    }

    /// Space-joined, for logs and dry runs only.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Build the argv for `request` against an already validated `test_plan`.
///
/// `suffix` is computed once per request by the caller and shared by the
/// log file and the report directory.
pub fn build(
    settings: &EngineSettings,
    test_plan: &Path,
    request: &ExecutionRequest,
    suffix: &UniqueSuffix,
) -> Result<ResolvedInvocation, OrchestratorError> {
    let plan = test_plan
        .to_str()
        .ok_or_else(|| OrchestratorError::NonUtf8Path(test_plan.display().to_string()))?;

    let mut argv = Vec::new();
    if !settings.java_opts.is_empty() {
        argv.push(JAVA_RUNTIME.to_string());
        argv.extend(settings.java_opts.iter().cloned());
    }
    argv.push(resolve_binary(&settings.binary)?);

    if !request.gui_mode {
        argv.push(NON_GUI_FLAG.to_string());
    }
    argv.push(TEST_FILE_FLAG.to_string());
    argv.push(plan.to_string());

    for (name, value) in &request.properties {
        argv.push(format!("{}{}={}", PROPERTY_FLAG_PREFIX, name, value));
    }

    let mut log_file = None;
    let mut report_output_dir = None;
    if request.reporting_enabled() {
        let stem = test_plan
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("test");
        let log = request
            .log_file
            .clone()
            .unwrap_or_else(|| format!("{}_{}_results.jtl", stem, suffix));
        let dir = match &request.report_output_dir {
            Some(base) => format!("{}_{}", base, suffix),
            None => format!("{}_{}_report", stem, suffix),
        };
        argv.push(LOG_FILE_FLAG.to_string());
        argv.push(log.clone());
        argv.push(REPORT_FLAG.to_string());
        argv.push(REPORT_DIR_FLAG.to_string());
        argv.push(dir.clone());
        log_file = Some(log);
        report_output_dir = Some(dir);
    } else if request.generate_report {
        warn!("report generation is not available in GUI mode; ignoring");
    }

    let invocation = ResolvedInvocation {
        argv,
        log_file,
        report_output_dir,
    };
    debug!(command = %invocation.command_line(), "invocation built");
    Ok(invocation)
}

/// Bare names stay as-is for `PATH` lookup; anything with a directory part is
/// made absolute.
fn resolve_binary(binary: &str) -> Result<String, OrchestratorError> {
    let p = Path::new(binary);
    if p.components().count() <= 1 && !p.is_absolute() {
        return Ok(binary.to_string());
    }
    let absolute = path::absolute(p).map_err(|e| {
        OrchestratorError::Unexpected(format!("cannot resolve JMeter binary {}: {}", binary, e))
    })?;
    Ok(absolute.to_string_lossy().into_owned())
}
