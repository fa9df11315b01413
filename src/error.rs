use crate::model::TargetSpec;
use std::process::ExitCode;
use thiserror::Error;

/// Every way a probe can fail. The first failing step aborts the run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid arguments: {0}")]
    Argument(String),

    #[error("failed to {stage} {target}: {source}")]
    Connection {
        stage: &'static str,
        target: TargetSpec,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake with {target} failed: {message}")]
    Handshake { target: TargetSpec, message: String },

    #[error("failed to {stage}: {source}")]
    Io {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    pub fn io(stage: &'static str, source: std::io::Error) -> Self {
        ProbeError::Io { stage, source }
    }

    pub fn code(&self) -> u8 {
        match self {
            ProbeError::Argument(_) => 2,
            ProbeError::Connection { .. } => 3,
            ProbeError::Handshake { .. } => 4,
            ProbeError::Io { .. } => 5,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}
