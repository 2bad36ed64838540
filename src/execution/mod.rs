//! Execution engine: request and result types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OrchestratorError;

/// JMeter properties passed as `-J<name>=<value>`. Ordered by key, so tokens
/// come out sorted; callers should not rely on that.
pub type Properties = BTreeMap<String, String>;

pub const GUI_LAUNCHED_MESSAGE: &str = "JMeter GUI launched successfully";

/// One JMeter run as asked for by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionRequest {
    pub test_file: String,
    pub gui_mode: bool,
    pub properties: Properties,
    /// Ignored in GUI mode.
    pub generate_report: bool,
    pub report_output_dir: Option<String>,
    pub log_file: Option<String>,
}

impl ExecutionRequest {
    pub fn new(test_file: impl Into<String>) -> Self {
        Self {
            test_file: test_file.into(),
            ..Self::default()
        }
    }

    pub fn gui(mut self, gui_mode: bool) -> Self {
        self.gui_mode = gui_mode;
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn report(mut self, report_output_dir: Option<String>, log_file: Option<String>) -> Self {
        self.generate_report = true;
        self.report_output_dir = report_output_dir;
        self.log_file = log_file;
        self
    }

    /// Reporting only happens for batch runs.
    pub fn reporting_enabled(&self) -> bool {
        self.generate_report && !self.gui_mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    LaunchFailure,
    EngineFailure,
    Unexpected,
}

/// Normalized outcome of a request, for both batch and GUI runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Batch run exited with status 0; stdout is kept verbatim.
    Completed { stdout: String },
    /// GUI process was spawned and left running.
    Launched { message: String },
    Failed { kind: FailureKind, reason: String },
}

impl ExecutionResult {
    pub fn launched() -> Self {
        Self::Launched {
            message: GUI_LAUNCHED_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Raw payload: stdout, the launch message or the failure reason.
    pub fn payload(&self) -> &str {
        match self {
            Self::Completed { stdout } => stdout,
            Self::Launched { message } => message,
            Self::Failed { reason, .. } => reason,
        }
    }
}

impl From<OrchestratorError> for ExecutionResult {
    fn from(err: OrchestratorError) -> Self {
        Self::Failed {
            kind: err.kind(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { stdout } => {
                write!(f, "JMeter execution completed successfully:\n{}", stdout)
            }
            Self::Launched { message } => f.write_str(message),
            Self::Failed { reason, .. } => f.write_str(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_is_inert_in_gui_mode() {
        let req = ExecutionRequest::new("plan.jmx").gui(true).report(None, None);
        assert!(req.generate_report);
        assert!(!req.reporting_enabled());

        let req = ExecutionRequest::new("plan.jmx").report(None, None);
        assert!(req.reporting_enabled());
    }

    #[test]
    fn test_failure_from_error_keeps_kind_and_text() {
        let result = ExecutionResult::from(OrchestratorError::Engine {
            code: Some(1),
            stderr: "boom".into(),
        });
        assert_eq!(result.failure_kind(), Some(FailureKind::EngineFailure));
        assert_eq!(result.payload(), "Error executing JMeter test:\nboom");
        assert!(!result.is_success());
    }

    #[test]
    fn test_display_wraps_stdout_but_payload_is_verbatim() {
        let result = ExecutionResult::Completed {
            stdout: "  summary = 10\n".into(),
        };
        assert_eq!(result.payload(), "  summary = 10\n");
        assert_eq!(
            result.to_string(),
            "JMeter execution completed successfully:\n  summary = 10\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(ExecutionResult::Failed {
            kind: FailureKind::InvalidInput,
            reason: "nope".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "invalid_input");
        assert_eq!(json["reason"], "nope");

        let json = serde_json::to_value(ExecutionResult::launched()).unwrap();
        assert_eq!(json["status"], "launched");
        assert_eq!(json["message"], GUI_LAUNCHED_MESSAGE);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let req: ExecutionRequest =
            serde_json::from_str(r#"{"test_file": "a.jmx", "properties": {"threads": "10"}}"#)
                .unwrap();
        assert_eq!(req.test_file, "a.jmx");
        assert!(!req.gui_mode);
        assert_eq!(req.properties.get("threads").map(String::as_str), Some("10"));
        assert!(req.log_file.is_none());
    }
}
