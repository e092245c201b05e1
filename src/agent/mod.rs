//! Agent contract and loading
//!
//! An agent is one step of the pipeline: it receives the previous step's text
//! and returns a new text artifact. Everything else an agent may consult (the
//! initial input, the steps completed so far) arrives through a read-only
//! context, so agents cannot reach into run state.

pub mod builtin;
pub mod registry;

pub use registry::{AgentRegistry, RegistryError};

use crate::engine::StepRecord;
use crate::error::AgentError;
use async_trait::async_trait;

/// Read-only view of the run handed to each step
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Text the run started from
    pub initial_input: &'a str,
    /// Steps completed before this one, in execution order
    pub history: &'a [StepRecord],
}

/// Uniform contract for one pipeline step
#[async_trait]
pub trait Agent: Send + Sync {
    /// Name this agent was declared with in the pipeline configuration
    fn name(&self) -> &str;

    /// Transform `input` into the next text artifact
    async fn process(&self, input: &str, cx: &StepContext<'_>) -> Result<String, AgentError>;
}
