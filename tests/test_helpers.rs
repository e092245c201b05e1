//! Test helpers and utilities for integration tests

use textweave::config::{
    AgentSettings, AgentSpec, GeminiSection, InputSection, PipelineConfig, PipelineSection,
    ProvidersSection, SpeechSection,
};
use std::path::PathBuf;

/// Create a test configuration for integration tests
#[allow(dead_code)]
pub fn test_config() -> PipelineConfig {
    PipelineConfig {
        pipeline: PipelineSection {
            default_model: "gemini-1.5-flash-latest".to_string(),
            output_dir: PathBuf::from("pipeline_logs"),
        },
        providers: ProvidersSection {
            gemini: GeminiSection {
                api_key_env: "GEMINI_API_KEY".to_string(),
            },
        },
        input: InputSection { capture_secs: 5.0 },
        speech: SpeechSection::default(),
        agents: vec![agent_spec("reframe", "reframe"), agent_spec("persona", "persona")],
    }
}

/// Create one agent declaration with default settings
#[allow(dead_code)]
pub fn agent_spec(name: &str, implementation: &str) -> AgentSpec {
    AgentSpec {
        name: name.to_string(),
        implementation: implementation.to_string(),
        settings: AgentSettings::default(),
        emits_transcript: false,
    }
}
