//! Model provider abstraction layer
//!
//! Provider-agnostic text generation behind the `LlmProvider` trait, plus the
//! `ProviderSet` the registry draws from when wiring model-backed agents.

pub mod provider;
pub mod providers;

pub use provider::*;
pub use providers::*;

use crate::config::PipelineConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Named model providers available to the registry
///
/// Production wiring builds this from the pipeline configuration; tests
/// register scripted providers instead.
#[derive(Clone, Default)]
pub struct ProviderSet {
    models: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the production provider set from configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self, LlmError> {
        let gemini_config = GeminiConfig {
            api_key: config.gemini_api_key(),
            api_key_env: config.providers.gemini.api_key_env.clone(),
            ..Default::default()
        };

        let mut set = Self::new();
        set.register(Arc::new(GeminiProvider::new(gemini_config)?));
        Ok(set)
    }

    /// Register a provider under its own name, replacing any previous one
    pub fn register(&mut self, provider: Arc<dyn LlmProvider>) {
        self.models.insert(provider.name().to_string(), provider);
    }

    /// Look up a provider by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.models.get(name).cloned()
    }

    /// Names of all registered providers, for error reporting
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NamedProvider(&'static str);

    #[async_trait]
    impl LlmProvider for NamedProvider {
        fn name(&self) -> &str {
            self.0
        }

        async fn generate(&self, _request: &GenerateRequest) -> Result<String, LlmError> {
            Ok("ok".to_string())
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut set = ProviderSet::new();
        set.register(Arc::new(NamedProvider("gemini")));

        assert!(set.get("gemini").is_some());
        assert!(set.get("unknown").is_none());
        assert_eq!(set.names(), vec!["gemini"]);
    }

    #[test]
    fn test_from_config_registers_gemini() {
        let config = PipelineConfig::test_config();
        let set = ProviderSet::from_config(&config).unwrap();

        assert!(set.get("gemini").is_some());
    }
}
