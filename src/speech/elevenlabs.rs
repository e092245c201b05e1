//! ElevenLabs speech client
//!
//! One client covers both directions: scribe transcription for captured
//! clips and multilingual voice synthesis for the final pipeline text. The
//! API key is optional at construction time; a missing key surfaces as
//! `NotConfigured` on the first call, so text-only pipelines run without
//! speech credentials.

use crate::config::PipelineConfig;
use crate::speech::{
    encode_wav, AudioClip, SpeechToText, SynthesisError, TextToSpeech, TranscriptionError,
};
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ElevenLabs client configuration
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: Option<String>,
    /// Environment variable the key was read from, named in errors
    pub api_key_env: String,
    pub base_url: String,
    pub timeout: Duration,
    pub voice_id: String,
    pub tts_model: String,
    pub stt_model: String,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: "ELEVENLABS_API_KEY".to_string(),
            base_url: "https://api.elevenlabs.io".to_string(),
            timeout: Duration::from_secs(60),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            tts_model: "eleven_multilingual_v2".to_string(),
            stt_model: "scribe_v1".to_string(),
            stability: 0.7,
            similarity_boost: 0.75,
            style: 0.0,
        }
    }
}

impl ElevenLabsConfig {
    /// Build a client configuration from the loaded pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            api_key: config.speech_api_key(),
            api_key_env: config.speech.api_key_env.clone(),
            voice_id: config.speech.voice_id.clone(),
            tts_model: config.speech.tts_model.clone(),
            stt_model: config.speech.stt_model.clone(),
            stability: config.speech.stability,
            similarity_boost: config.speech.similarity_boost,
            style: config.speech.style,
            ..Default::default()
        }
    }
}

/// ElevenLabs REST client implementing both speech directions
pub struct ElevenLabsClient {
    config: ElevenLabsConfig,
    client: Client,
}

impl ElevenLabsClient {
    /// Create a client. The per-request timeout comes from the configuration;
    /// a default client is the fallback if the builder fails.
    pub fn new(config: ElevenLabsConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    fn api_key(&self) -> Option<&str> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Some(key),
            _ => None,
        }
    }

    fn missing_key(&self) -> String {
        format!(
            "ElevenLabs API key missing; set {}",
            self.config.api_key_env
        )
    }
}

#[async_trait]
impl SpeechToText for ElevenLabsClient {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        let api_key = self
            .api_key()
            .ok_or_else(|| TranscriptionError::NotConfigured(self.missing_key()))?;

        let wav = encode_wav(clip).map_err(|e| TranscriptionError::AudioEncode(e.to_string()))?;
        let file = multipart::Part::bytes(wav)
            .file_name("capture.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::AudioEncode(e.to_string()))?;
        let form = multipart::Form::new()
            .text("model_id", self.config.stt_model.clone())
            .part("file", file);

        let response = self
            .client
            .post(format!("{}/v1/speech-to-text", self.config.base_url))
            .header("xi-api-key", api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Api(format!(
                "ElevenLabs API error: {status} - {error_text}"
            )));
        }

        let transcription: SpeechToTextResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        let text = transcription.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscriptionError::EmptyTranscript);
        }

        Ok(text)
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        let api_key = self
            .api_key()
            .ok_or_else(|| SynthesisError::NotConfigured(self.missing_key()))?;

        let request = TextToSpeechRequest {
            text: text.to_string(),
            model_id: self.config.tts_model.clone(),
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
                style: self.config.style,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.config.base_url, self.config.voice_id
            ))
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Api(format!(
                "ElevenLabs API error: {status} - {error_text}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        Ok(audio.to_vec())
    }
}

#[derive(Debug, Serialize)]
struct TextToSpeechRequest {
    text: String,
    model_id: String,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
}

#[derive(Debug, Deserialize)]
struct SpeechToTextResponse {
    #[serde(default)]
    text: String,
}
