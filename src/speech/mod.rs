//! Speech capture and rendering
//!
//! Microphone capture, transcription and voice synthesis sit behind small
//! traits so pipelines can be tested with scripted services instead of real
//! devices and network calls. The concrete implementations are cpal for the
//! microphone and the ElevenLabs REST API for both speech directions.

pub mod capture;
pub mod elevenlabs;

pub use capture::{CaptureError, MicCapture, CLIP_SAMPLE_RATE};
pub use elevenlabs::{ElevenLabsClient, ElevenLabsConfig};

use async_trait::async_trait;
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;

/// A recorded stretch of mono PCM audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioClip {
    /// Length of the clip in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Source of recorded audio, usually the default microphone
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Record for the given duration and return the normalized clip
    async fn record(&self, duration: Duration) -> Result<AudioClip, CaptureError>;
}

/// Turns recorded audio into text
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError>;
}

/// Turns text into rendered audio bytes
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}

/// Transcription errors, fatal to input resolution
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Transcription not configured: {0}")]
    NotConfigured(String),
    #[error("Failed to encode captured audio: {0}")]
    AudioEncode(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Transcription produced no text")]
    EmptyTranscript,
}

/// Voice synthesis errors, reported after the text result already stands
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    #[error("Voice rendering not configured: {0}")]
    NotConfigured(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Synthesis produced no audio")]
    EmptyAudio,
}

/// Encode a clip as 16-bit mono PCM WAV, entirely in memory
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &sample in &clip.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_secs() {
        let clip = AudioClip {
            samples: vec![0; 32_000],
            sample_rate: 16_000,
        };
        assert!((clip.duration_secs() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duration_secs_zero_rate() {
        let clip = AudioClip {
            samples: vec![0; 10],
            sample_rate: 0,
        };
        assert_eq!(clip.duration_secs(), 0.0);
    }

    #[test]
    fn test_encode_wav_readable_by_hound() {
        let clip = AudioClip {
            samples: vec![100, -200, 300],
            sample_rate: 16_000,
        };
        let bytes = encode_wav(&clip).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![100, -200, 300]);
    }

    #[test]
    fn test_encode_wav_empty_clip() {
        let clip = AudioClip {
            samples: vec![],
            sample_rate: 16_000,
        };
        let bytes = encode_wav(&clip).unwrap();
        // Header only, no data
        assert!(bytes.len() >= 44);
    }
}
