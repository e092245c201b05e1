//! Error types shared across the pipeline
//!
//! Each module owns the errors of its own concern (config, registry, speech,
//! output). This module holds the agent execution error that crosses the
//! engine/agent boundary, and the top-level error the binary reports.

use thiserror::Error;

/// Failure raised by a single agent step
///
/// Always names the agent it came from so a halted run can be attributed
/// without consulting the engine.
#[derive(Debug, Error)]
#[error("Agent '{agent}' failed: {kind}")]
pub struct AgentError {
    agent: String,
    #[source]
    kind: AgentErrorKind,
}

/// Underlying cause of an agent failure
#[derive(Debug, Error)]
pub enum AgentErrorKind {
    #[error("model request failed: {0}")]
    Model(#[from] crate::llm::LlmError),

    #[error("{0}")]
    Internal(String),
}

impl AgentError {
    /// Create a model-backed agent failure
    pub fn model<S: Into<String>>(agent: S, source: crate::llm::LlmError) -> Self {
        Self {
            agent: agent.into(),
            kind: AgentErrorKind::Model(source),
        }
    }

    /// Create an internal agent failure
    pub fn internal<S: Into<String>, M: Into<String>>(agent: S, message: M) -> Self {
        Self {
            agent: agent.into(),
            kind: AgentErrorKind::Internal(message.into()),
        }
    }

    /// Name of the agent that failed
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Underlying cause
    pub fn kind(&self) -> &AgentErrorKind {
        &self.kind
    }
}

/// Top-level error for a pipeline run, as reported by the binary
///
/// Every variant is fatal; output-stage failures are deliberately absent
/// because they are reported without failing the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Agent loading error: {0}")]
    Registry(#[from] crate::agent::RegistryError),

    #[error("Input error: {0}")]
    Input(#[from] crate::input::InputError),

    #[error("Execution error: {0}")]
    Execution(#[from] crate::engine::ExecutionFailure),
}
