//! Declarative pipeline configuration
//!
//! A pipeline run is described entirely by one TOML document: global options,
//! provider credentials (as environment variable names, never values), input
//! and speech settings, and the ordered agent list. The file is loaded once at
//! startup, validated, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Sentinel model name that defers to `[pipeline].default_model`.
pub const DEFAULT_MODEL_SENTINEL: &str = "default";

/// Top-level pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub pipeline: PipelineSection,
    #[serde(default)]
    pub providers: ProvidersSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub speech: SpeechSection,
    /// Ordered agent declarations; execution order is declaration order
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

/// Global pipeline options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSection {
    /// Model used when an agent declares none (or the "default" sentinel)
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Directory receiving transcript and audio artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Model provider credential sources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProvidersSection {
    #[serde(default)]
    pub gemini: GeminiSection,
}

/// Gemini provider settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeminiSection {
    /// Environment variable containing the API key
    #[serde(default = "default_gemini_api_key_env")]
    pub api_key_env: String,
}

/// Microphone input settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSection {
    /// Capture window in seconds (must be finite and > 0)
    #[serde(default = "default_capture_secs")]
    pub capture_secs: f64,
}

/// Speech service settings (transcription and voice rendering)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeechSection {
    /// Environment variable containing the API key
    #[serde(default = "default_speech_api_key_env")]
    pub api_key_env: String,
    /// Voice used for rendered audio
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,
    /// Voice stability, 0.0 to 1.0
    #[serde(default = "default_stability")]
    pub stability: f32,
    /// Voice similarity boost, 0.0 to 1.0
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,
    /// Voice style exaggeration, 0.0 to 1.0
    #[serde(default)]
    pub style: f32,
}

/// One agent declaration in the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSpec {
    /// Unique name within the run (must match [a-zA-Z0-9._-]+)
    pub name: String,
    /// Implementation reference resolved by the registry
    #[serde(rename = "impl")]
    pub implementation: String,
    /// Agent-specific settings
    #[serde(default)]
    pub settings: AgentSettings,
    /// Marks the agent's output as a durable transcript to persist after the run
    #[serde(default)]
    pub emits_transcript: bool,
}

/// Optional per-agent settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AgentSettings {
    /// Model override; absent or "default" falls back to the pipeline default
    pub model: Option<String>,
    /// Provider name; absent means "gemini"
    pub provider: Option<String>,
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("pipeline_logs")
}

fn default_gemini_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_capture_secs() -> f64 {
    5.0
}

fn default_speech_api_key_env() -> String {
    "ELEVENLABS_API_KEY".to_string()
}

fn default_voice_id() -> String {
    // "Rachel", the service's stock narration voice
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_tts_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_stt_model() -> String {
    "scribe_v1".to_string()
}

fn default_stability() -> f32 {
    0.7
}

fn default_similarity_boost() -> f32 {
    0.75
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_key_env: default_gemini_api_key_env(),
        }
    }
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            capture_secs: default_capture_secs(),
        }
    }
}

impl Default for SpeechSection {
    fn default() -> Self {
        Self {
            api_key_env: default_speech_api_key_env(),
            voice_id: default_voice_id(),
            tts_model: default_tts_model(),
            stt_model: default_stt_model(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: 0.0,
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Pipeline declares no agents")]
    EmptyPipeline,
    #[error("Duplicate agent name: {0}")]
    DuplicateAgentName(String),
    #[error("Invalid agent name format: {0}")]
    InvalidAgentName(String),
    #[error("Capture duration must be a positive number of seconds, got {0}")]
    InvalidCaptureDuration(f64),
    #[error("Voice setting '{name}' must be within 0.0..=1.0, got {value}")]
    VoiceSettingOutOfRange { name: &'static str, value: f32 },
}

impl PipelineConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural validation; a config that passes is safe to load agents from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }

        let mut seen = std::collections::HashSet::new();
        for spec in &self.agents {
            validate_agent_name(&spec.name)?;
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateAgentName(spec.name.clone()));
            }
        }

        validate_capture_secs(self.input.capture_secs)?;
        self.speech.validate()?;

        Ok(())
    }

    /// Gemini API key from the configured environment variable, if set
    pub fn gemini_api_key(&self) -> Option<String> {
        std::env::var(&self.providers.gemini.api_key_env).ok()
    }

    /// Speech service API key from the configured environment variable, if set
    pub fn speech_api_key(&self) -> Option<String> {
        std::env::var(&self.speech.api_key_env).ok()
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[pipeline]
default_model = "gemini-1.5-flash-latest"
output_dir = "logs"

[input]
capture_secs = 5.0

[speech]
voice_id = "test-voice"
stability = 0.7
similarity_boost = 0.75

[[agents]]
name = "reframe"
impl = "reframe"

[[agents]]
name = "persona"
impl = "persona"
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}

impl SpeechSection {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_voice_setting("stability", self.stability)?;
        validate_voice_setting("similarity_boost", self.similarity_boost)?;
        validate_voice_setting("style", self.style)?;
        Ok(())
    }
}

/// Validate an agent name: non-empty, [a-zA-Z0-9._-]+ only
fn validate_agent_name(name: &str) -> Result<(), ConfigError> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

    if name.is_empty() || !valid_chars {
        return Err(ConfigError::InvalidAgentName(format!(
            "Agent name '{name}' must match pattern [a-zA-Z0-9._-]+"
        )));
    }

    Ok(())
}

/// Validate a capture window: finite and strictly positive
pub fn validate_capture_secs(secs: f64) -> Result<(), ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidCaptureDuration(secs));
    }
    Ok(())
}

/// Convert a capture window into a `Duration`, rejecting values a `Duration`
/// cannot represent
pub fn capture_duration(secs: f64) -> Result<Duration, ConfigError> {
    validate_capture_secs(secs)?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidCaptureDuration(secs))
}

fn validate_voice_setting(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::VoiceSettingOutOfRange { name, value });
    }
    Ok(())
}
