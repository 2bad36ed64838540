//! Turns JMeter run requests into validated, correctly ordered engine
//! invocations and normalizes batch and GUI outcomes into one result type.

pub mod config;
pub mod error;
pub mod execution;
pub mod invocation;
pub mod logging;
pub mod orchestrator;
pub mod printer;
pub mod process;
pub mod validator;

pub use config::{Config, EngineSettings};
pub use error::OrchestratorError;
pub use execution::{ExecutionRequest, ExecutionResult, FailureKind, Properties};
pub use invocation::{ResolvedInvocation, UniqueSuffix};
pub use orchestrator::Orchestrator;
pub use process::{CapturedOutput, Launcher, SystemLauncher};
