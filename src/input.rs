//! Input resolution
//!
//! The initial pipeline text comes from exactly one of two places: the text
//! argument passed at invocation, used verbatim, or a timed microphone
//! capture transcribed through the speech service. Capture and transcription
//! failures are fatal to the run; there is no fallback to empty text.

use crate::speech::{AudioSource, CaptureError, SpeechToText, TranscriptionError};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Input resolution errors, all fatal to the run
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Audio capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}

/// Resolve the initial text. Direct text wins; otherwise record for
/// `capture_window` and transcribe the clip.
pub async fn resolve_input(
    direct: Option<String>,
    source: &dyn AudioSource,
    transcriber: &dyn SpeechToText,
    capture_window: Duration,
) -> Result<String, InputError> {
    if let Some(text) = direct {
        return Ok(text);
    }

    info!(
        secs = capture_window.as_secs_f64(),
        "recording from microphone"
    );
    let clip = source.record(capture_window).await?;

    info!(
        clip_secs = clip.duration_secs(),
        "transcribing captured audio"
    );
    let transcript = transcriber.transcribe(&clip).await?;
    if transcript.trim().is_empty() {
        return Err(TranscriptionError::EmptyTranscript.into());
    }

    Ok(transcript)
}
