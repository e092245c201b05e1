//! Agent registry and loader
//!
//! Resolves the configuration's agent declarations into runnable instances.
//! Loading is pure construction: no agent is invoked, and loading the same
//! declarations twice yields functionally identical pipelines.

use crate::agent::{builtin, Agent};
use crate::config::{AgentSpec, PipelineConfig, DEFAULT_MODEL_SENTINEL};
use crate::llm::{LlmError, ProviderSet};
use thiserror::Error;
use tracing::debug;

/// Agent loading errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown agent implementation '{implementation}' for agent '{agent}'")]
    UnknownImplementation { agent: String, implementation: String },
    #[error("Unsupported provider '{provider}' for agent '{agent}' (available: {available})")]
    UnsupportedProvider {
        agent: String,
        provider: String,
        available: String,
    },
    #[error("Provider construction failed: {0}")]
    Provider(#[from] LlmError),
}

/// Resolves agent declarations into boxed agent instances
pub struct AgentRegistry {
    providers: ProviderSet,
    default_model: String,
}

impl AgentRegistry {
    /// Create a registry with an explicit provider set
    pub fn new<S: Into<String>>(providers: ProviderSet, default_model: S) -> Self {
        Self {
            providers,
            default_model: default_model.into(),
        }
    }

    /// Create a registry wired to the configured production providers
    pub fn from_config(config: &PipelineConfig) -> Result<Self, RegistryError> {
        let providers = ProviderSet::from_config(config)?;
        Ok(Self::new(providers, config.pipeline.default_model.clone()))
    }

    /// Load every declared agent in order, or fail the entire load
    pub fn load(&self, specs: &[AgentSpec]) -> Result<Vec<Box<dyn Agent>>, RegistryError> {
        specs
            .iter()
            .map(|spec| {
                let agent = self.create_agent(spec)?;
                debug!(
                    agent = %spec.name,
                    implementation = %spec.implementation,
                    "loaded agent"
                );
                Ok(agent)
            })
            .collect()
    }

    /// Create one agent instance from its declaration
    fn create_agent(&self, spec: &AgentSpec) -> Result<Box<dyn Agent>, RegistryError> {
        match spec.implementation.as_str() {
            "persona" => Ok(Box::new(builtin::PersonaAgent::new(&spec.name))),
            "reframe" => Ok(Box::new(builtin::ReframeAgent::new(&spec.name))),
            "transcript" => Ok(Box::new(builtin::TranscriptAgent::new(&spec.name))),
            "humor" => Ok(Box::new(builtin::HumorAgent::new(
                &spec.name,
                self.model_backend(spec)?,
            ))),
            "simplify" => Ok(Box::new(builtin::SimplifyAgent::new(
                &spec.name,
                self.model_backend(spec)?,
            ))),
            "imagery" => Ok(Box::new(builtin::ImageryAgent::new(
                &spec.name,
                self.model_backend(spec)?,
            ))),
            _ => Err(RegistryError::UnknownImplementation {
                agent: spec.name.clone(),
                implementation: spec.implementation.clone(),
            }),
        }
    }

    /// Resolve the provider and model a generation agent will run against
    fn model_backend(&self, spec: &AgentSpec) -> Result<builtin::ModelBackend, RegistryError> {
        let provider_name = spec.settings.provider.as_deref().unwrap_or("gemini");
        let provider =
            self.providers
                .get(provider_name)
                .ok_or_else(|| RegistryError::UnsupportedProvider {
                    agent: spec.name.clone(),
                    provider: provider_name.to_string(),
                    available: self.providers.names().join(", "),
                })?;

        Ok(builtin::ModelBackend {
            provider,
            model: self.effective_model(spec),
        })
    }

    /// Per-agent model, falling back to the pipeline default when absent
    /// or set to the "default" sentinel
    fn effective_model(&self, spec: &AgentSpec) -> String {
        match spec.settings.model.as_deref() {
            None | Some(DEFAULT_MODEL_SENTINEL) => self.default_model.clone(),
            Some(model) => model.to_string(),
        }
    }
}
