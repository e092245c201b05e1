//! Microphone capture via cpal
//!
//! Records the system default input device for a fixed duration, then
//! downmixes to mono and resamples to 16 kHz so clips are ready for
//! transcription upload. The cpal stream is built and dropped on a blocking
//! worker thread and never crosses an await point.

use crate::speech::{AudioClip, AudioSource};
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Sample rate clips are normalized to before upload
pub const CLIP_SAMPLE_RATE: u32 = 16_000;

/// Errors that can occur while recording from the microphone
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("No input device available on the default audio host")]
    NoDevice,

    #[error("Failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Unsupported input sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Capture produced no samples")]
    Empty,

    #[error("Capture worker failed: {0}")]
    Worker(String),
}

/// Timed recording from the system default input device
#[derive(Debug, Default)]
pub struct MicCapture;

impl MicCapture {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioSource for MicCapture {
    async fn record(&self, duration: Duration) -> Result<AudioClip, CaptureError> {
        tokio::task::spawn_blocking(move || record_blocking(duration))
            .await
            .map_err(|e| CaptureError::Worker(e.to_string()))?
    }
}

/// Record the default input device for `duration`. Blocks the calling thread
/// for the full recording window.
fn record_blocking(duration: Duration) -> Result<AudioClip, CaptureError> {
    let host = cpal::default_host();
    let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;
    let supported = device.default_input_config()?;

    let channels = supported.channels() as usize;
    let native_rate = supported.sample_rate().0;
    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();

    debug!(
        channels,
        native_rate,
        format = ?sample_format,
        "recording from default input device"
    );

    let buffer = Arc::new(Mutex::new(Vec::<i16>::new()));
    let sink = Arc::clone(&buffer);

    let err_callback = |err: cpal::StreamError| {
        error!(error = %err, "input stream error");
    };

    let stream = match sample_format {
        cpal::SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                if let Ok(mut samples) = sink.lock() {
                    samples.extend_from_slice(data);
                }
            },
            err_callback,
            None,
        )?,
        cpal::SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut samples) = sink.lock() {
                    samples.extend(
                        data.iter()
                            .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16),
                    );
                }
            },
            err_callback,
            None,
        )?,
        other => return Err(CaptureError::UnsupportedFormat(format!("{other:?}"))),
    };

    stream.play()?;
    std::thread::sleep(duration);
    drop(stream);

    let raw = {
        let mut samples = buffer
            .lock()
            .map_err(|e| CaptureError::Worker(e.to_string()))?;
        std::mem::take(&mut *samples)
    };

    if raw.is_empty() {
        return Err(CaptureError::Empty);
    }

    let mono = downmix_to_mono(&raw, channels);
    let samples = resample(&mono, native_rate, CLIP_SAMPLE_RATE);

    Ok(AudioClip {
        samples,
        sample_rate: CLIP_SAMPLE_RATE,
    })
}

/// Mix interleaved channels down to mono by averaging each frame
fn downmix_to_mono(samples: &[i16], channels: usize) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

/// Linear-interpolation resampler
fn resample(samples: &[i16], source_rate: u32, target_rate: u32) -> Vec<i16> {
    if source_rate == target_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let output_len = (samples.len() as f64 / ratio).round() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx.min(samples.len() - 1)]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
