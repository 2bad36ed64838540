//! Failure taxonomy for a single JMeter request.

use std::io;

use thiserror::Error;

use crate::execution::FailureKind;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Error: Test file not found: {0}")]
    TestFileNotFound(String),

    #[error("Error: Invalid file type. Expected .jmx file: {0}")]
    InvalidExtension(String),

    #[error("Error: Test file is not a regular file: {0}")]
    NotAFile(String),

    #[error("Error: Test file path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("Unexpected error: failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Error executing JMeter test:\n{stderr}")]
    Engine { code: Option<i32>, stderr: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl OrchestratorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::TestFileNotFound(_)
            | Self::InvalidExtension(_)
            | Self::NotAFile(_)
            | Self::NonUtf8Path(_) => FailureKind::InvalidInput,
            Self::Launch { .. } => FailureKind::LaunchFailure,
            Self::Engine { .. } => FailureKind::EngineFailure,
            Self::Unexpected(_) => FailureKind::Unexpected,
        }
    }
}
