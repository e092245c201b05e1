//! Mock implementations for testing
//!
//! Scripted model providers, speech services, audio sources and agents so
//! pipelines can be exercised without devices or network access.

use crate::agent::{Agent, StepContext};
use crate::error::AgentError;
use crate::llm::{GenerateRequest, LlmError, LlmProvider};
use crate::speech::{
    AudioClip, AudioSource, CaptureError, SpeechToText, SynthesisError, TextToSpeech,
    TranscriptionError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Mock model provider returning scripted responses in rotation
pub struct MockLlmProvider {
    pub responses: Vec<String>,
    pub current_response: Arc<Mutex<usize>>,
    pub should_fail: bool,
    pub requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockLlmProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            current_response: Arc::new(Mutex::new(0)),
            should_fail: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn single_response(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(vec![])
        }
    }

    /// Requests observed so far, in call order
    pub async fn seen_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        self.requests.lock().await.push(request.clone());

        if self.should_fail {
            return Err(LlmError::ApiError("Mock provider failure".to_string()));
        }

        let mut current = self.current_response.lock().await;
        let response_idx = *current % self.responses.len().max(1);
        *current += 1;

        if self.responses.is_empty() {
            Ok("Mock response".to_string())
        } else {
            Ok(self.responses[response_idx].clone())
        }
    }
}

/// Mock transcription service
pub struct MockSpeechToText {
    pub transcript: String,
    pub should_fail: bool,
    pub clips: Arc<Mutex<Vec<AudioClip>>>,
}

impl MockSpeechToText {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            should_fail: false,
            clips: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    pub async fn seen_clips(&self) -> Vec<AudioClip> {
        self.clips.lock().await.clone()
    }
}

#[async_trait]
impl SpeechToText for MockSpeechToText {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        self.clips.lock().await.push(clip.clone());

        if self.should_fail {
            return Err(TranscriptionError::Api(
                "Mock transcription failure".to_string(),
            ));
        }
        Ok(self.transcript.clone())
    }
}

/// Mock voice rendering service
pub struct MockTextToSpeech {
    pub audio: Vec<u8>,
    pub should_fail: bool,
    pub spoken: Arc<Mutex<Vec<String>>>,
}

impl MockTextToSpeech {
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio,
            should_fail: false,
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(vec![])
        }
    }

    pub async fn seen_texts(&self) -> Vec<String> {
        self.spoken.lock().await.clone()
    }
}

#[async_trait]
impl TextToSpeech for MockTextToSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        self.spoken.lock().await.push(text.to_string());

        if self.should_fail {
            return Err(SynthesisError::Api("Mock synthesis failure".to_string()));
        }
        Ok(self.audio.clone())
    }
}

/// Mock audio source yielding a fixed clip
pub struct MockAudioSource {
    pub clip: AudioClip,
    pub should_fail: bool,
}

impl MockAudioSource {
    pub fn new(clip: AudioClip) -> Self {
        Self {
            clip,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            clip: AudioClip {
                samples: vec![],
                sample_rate: 16_000,
            },
            should_fail: true,
        }
    }
}

#[async_trait]
impl AudioSource for MockAudioSource {
    async fn record(&self, _duration: Duration) -> Result<AudioClip, CaptureError> {
        if self.should_fail {
            return Err(CaptureError::NoDevice);
        }
        Ok(self.clip.clone())
    }
}

/// Agent applying a pure function to its input
pub struct MapAgent {
    name: String,
    map: Box<dyn Fn(&str) -> String + Send + Sync>,
}

impl MapAgent {
    pub fn new<S, F>(name: S, map: F) -> Self
    where
        S: Into<String>,
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            map: Box::new(map),
        }
    }
}

#[async_trait]
impl Agent for MapAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        Ok((self.map)(input))
    }
}

/// Agent that always fails
pub struct FailingAgent {
    name: String,
}

impl FailingAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Agent for FailingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        Err(AgentError::internal(&self.name, "Mock agent failure"))
    }
}

/// Agent that counts invocations and passes text through unchanged
pub struct CountingAgent {
    name: String,
    invocations: Arc<AtomicUsize>,
}

impl CountingAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the invocation counter, usable after the agent is moved
    pub fn invocations(&self) -> Arc<AtomicUsize> {
        self.invocations.clone()
    }
}

#[async_trait]
impl Agent for CountingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(input.to_string())
    }
}
