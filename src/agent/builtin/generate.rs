//! Model-backed rewrite agents
//!
//! Humor, simplification and imagery all follow the same shape: build a
//! prompt around the incoming text, send it through the resolved provider and
//! return the trimmed completion. Any provider failure halts the run with an
//! error naming the agent.

use crate::agent::{Agent, StepContext};
use crate::error::AgentError;
use crate::llm::{GenerateRequest, LlmProvider};
use async_trait::async_trait;
use std::sync::Arc;

/// Provider and model a generation agent runs against
#[derive(Clone)]
pub struct ModelBackend {
    pub provider: Arc<dyn LlmProvider>,
    pub model: String,
}

impl ModelBackend {
    async fn generate(&self, agent: &str, prompt: String) -> Result<String, AgentError> {
        let request = GenerateRequest::new(prompt, self.model.clone());
        let text = self
            .provider
            .generate(&request)
            .await
            .map_err(|e| AgentError::model(agent, e))?;
        Ok(text.trim().to_string())
    }
}

/// Appends a short witty continuation to the text
pub struct HumorAgent {
    name: String,
    backend: ModelBackend,
}

impl HumorAgent {
    pub fn new<S: Into<String>>(name: S, backend: ModelBackend) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

#[async_trait]
impl Agent for HumorAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        let prompt = format!(
            "Given the original text: '{input}'. Append a short, humorous, and witty remark \
             that directly relates to or continues the original text. The output should be \
             the original text followed by your humorous addition. For example, if the \
             original text is 'It is raining', a good response would be 'It is raining. \
             Cats and dogs.' Do not add any introductory phrases."
        );
        self.backend.generate(&self.name, prompt).await
    }
}

/// Rewrites the text to be concise while keeping its meaning
pub struct SimplifyAgent {
    name: String,
    backend: ModelBackend,
}

impl SimplifyAgent {
    pub fn new<S: Into<String>>(name: S, backend: ModelBackend) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

#[async_trait]
impl Agent for SimplifyAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        let prompt = format!(
            "Rewrite the following text to be more concise and easier to understand, while \
             preserving its full meaning and any humorous elements. Provide only the \
             rewritten text. Original text: '{input}'"
        );
        self.backend.generate(&self.name, prompt).await
    }
}

/// Enriches the text with concrete sensory description
pub struct ImageryAgent {
    name: String,
    backend: ModelBackend,
}

impl ImageryAgent {
    pub fn new<S: Into<String>>(name: S, backend: ModelBackend) -> Self {
        Self {
            name: name.into(),
            backend,
        }
    }
}

#[async_trait]
impl Agent for ImageryAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        let prompt = format!(
            "Enhance the following text with concrete sensory descriptions (sight, sound, \
             texture, motion) to make it more vivid. Original text: '{input}'"
        );
        self.backend.generate(&self.name, prompt).await
    }
}
