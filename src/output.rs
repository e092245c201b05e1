//! Run artifacts
//!
//! After a run completes, two optional artifacts can be produced: the durable
//! markdown transcript (the recorded output of the agent flagged
//! `emits_transcript`) and a rendered audio file of the final text. Both are
//! best effort: a failure here is reported in the returned summary and
//! logged, never turned into a run failure.

use crate::agent::builtin::transcript::TRANSCRIPT_TIMESTAMP_FORMAT;
use crate::config::AgentSpec;
use crate::engine::{RunResult, StepRecord};
use crate::speech::{SynthesisError, TextToSpeech};
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Artifact failures, reported but never fatal
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Audio rendering failed: {0}")]
    AudioRender(#[from] SynthesisError),

    #[error("Failed to write audio artifact: {0}")]
    AudioWrite(std::io::Error),

    #[error("Failed to write transcript: {0}")]
    TranscriptWrite(std::io::Error),
}

/// Where the run's artifacts ended up
#[derive(Debug, Default)]
pub struct OutputReport {
    pub transcript: Option<PathBuf>,
    pub audio: Option<PathBuf>,
    pub failures: Vec<OutputError>,
}

/// Persist the run's artifacts under `output_dir`
pub async fn emit(
    result: &RunResult,
    specs: &[AgentSpec],
    synthesizer: &dyn TextToSpeech,
    speak: bool,
    output_dir: &Path,
) -> OutputReport {
    let mut report = OutputReport::default();
    let stamp = Utc::now().format(TRANSCRIPT_TIMESTAMP_FORMAT).to_string();
    let slug = artifact_slug(&result.initial_input);

    if let Some(content) = transcript_to_persist(result, specs) {
        let path = output_dir.join(format!("{stamp}_{slug}.md"));
        match write_artifact(&path, content.as_bytes()).await {
            Ok(()) => {
                info!(path = %path.display(), "transcript saved");
                report.transcript = Some(path);
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "transcript write failed");
                report.failures.push(OutputError::TranscriptWrite(e));
            }
        }
    }

    if speak {
        match synthesizer.synthesize(&result.final_text).await {
            Ok(audio) => {
                let path = output_dir.join(format!("{stamp}_{slug}.mp3"));
                match write_artifact(&path, &audio).await {
                    Ok(()) => {
                        info!(path = %path.display(), bytes = audio.len(), "audio saved");
                        report.audio = Some(path);
                    }
                    Err(e) => {
                        warn!(error = %e, path = %path.display(), "audio write failed");
                        report.failures.push(OutputError::AudioWrite(e));
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "audio rendering failed");
                report.failures.push(OutputError::AudioRender(e));
            }
        }
    }

    report
}

/// The transcript to persist: the recorded output of the last step whose
/// agent is flagged `emits_transcript` in the declarations
fn transcript_to_persist<'a>(result: &'a RunResult, specs: &[AgentSpec]) -> Option<&'a str> {
    let flagged: Vec<&StepRecord> = result
        .history
        .iter()
        .filter(|record| {
            specs
                .iter()
                .any(|spec| spec.emits_transcript && spec.name == record.agent)
        })
        .collect();

    if flagged.len() > 1 {
        warn!(
            count = flagged.len(),
            "multiple transcript steps recorded; persisting the last"
        );
    }

    flagged.last().map(|record| record.output.as_str())
}

async fn write_artifact(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}

/// Filesystem-friendly base for artifact names, derived from the first 30
/// characters of the initial input. Alphanumerics, spaces, underscores and
/// hyphens survive; everything else becomes an underscore; spaces then become
/// underscores. All-blank input falls back to "log".
pub fn artifact_slug(text: &str) -> String {
    let sanitized: String = text
        .chars()
        .take(30)
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let slug = sanitized.trim_end().replace(' ', "_");
    if slug.is_empty() {
        "log".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::MockTextToSpeech;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn spec(name: &str, emits_transcript: bool) -> AgentSpec {
        AgentSpec {
            name: name.to_string(),
            implementation: "transcript".to_string(),
            settings: Default::default(),
            emits_transcript,
        }
    }

    fn record(agent: &str, output: &str) -> StepRecord {
        StepRecord {
            agent: agent.to_string(),
            input: String::new(),
            output: output.to_string(),
            completed_at: Utc::now(),
        }
    }

    fn result(history: Vec<StepRecord>) -> RunResult {
        RunResult {
            run_id: Uuid::new_v4(),
            initial_input: "It is raining".to_string(),
            final_text: "final".to_string(),
            history,
        }
    }

    #[test]
    fn test_artifact_slug_examples() {
        assert_eq!(artifact_slug("Hello world"), "Hello_world");
        assert_eq!(artifact_slug("It is raining!!!"), "It_is_raining___");
        assert_eq!(artifact_slug("trailing spaces   "), "trailing_spaces");
        assert_eq!(artifact_slug(""), "log");
        assert_eq!(artifact_slug("   "), "log");
        assert_eq!(artifact_slug("???"), "___");
    }

    #[test]
    fn test_artifact_slug_truncates_before_sanitizing() {
        let long = "a".repeat(40);
        assert_eq!(artifact_slug(&long), "a".repeat(30));
    }

    #[test]
    fn test_artifact_slug_keeps_unicode_letters() {
        assert_eq!(artifact_slug("héllo"), "héllo");
    }

    proptest! {
        #[test]
        fn artifact_slug_is_never_empty(text in ".*") {
            prop_assert!(!artifact_slug(&text).is_empty());
        }

        #[test]
        fn artifact_slug_has_no_spaces_or_slashes(text in ".*") {
            let slug = artifact_slug(&text);
            prop_assert!(!slug.contains(' '), "no spaces: {}", slug);
            prop_assert!(!slug.contains('/'), "no slashes: {}", slug);
            prop_assert!(!slug.contains('.'), "no dots: {}", slug);
        }

        #[test]
        fn artifact_slug_is_bounded(text in ".*") {
            prop_assert!(artifact_slug(&text).chars().count() <= 30);
        }
    }

    #[test]
    fn test_transcript_selection_takes_last_flagged_step() {
        let result = result(vec![
            record("humor", "funny"),
            record("log", "first transcript"),
            record("log2", "second transcript"),
        ]);
        let specs = vec![spec("humor", false), spec("log", true), spec("log2", true)];

        assert_eq!(
            transcript_to_persist(&result, &specs),
            Some("second transcript")
        );
    }

    #[test]
    fn test_transcript_selection_none_flagged() {
        let result = result(vec![record("humor", "funny")]);
        let specs = vec![spec("humor", false)];

        assert_eq!(transcript_to_persist(&result, &specs), None);
    }

    #[test]
    fn test_transcript_selection_flagged_agent_never_ran() {
        // Run halted before the flagged agent; nothing to persist
        let result = result(vec![record("humor", "funny")]);
        let specs = vec![spec("humor", false), spec("log", true)];

        assert_eq!(transcript_to_persist(&result, &specs), None);
    }

    #[tokio::test]
    async fn test_emit_writes_transcript_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = result(vec![record("log", "# Pipeline Run Log\ncontent")]);
        let specs = vec![spec("log", true)];
        let tts = MockTextToSpeech::new(vec![]);

        let report = emit(&result, &specs, &tts, false, dir.path()).await;

        let path = report.transcript.expect("transcript path");
        assert!(path.extension().is_some_and(|e| e == "md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Pipeline Run Log\ncontent");
        assert!(report.audio.is_none());
        assert!(report.failures.is_empty());
        assert!(tts.seen_texts().await.is_empty());
    }

    #[tokio::test]
    async fn test_emit_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("artifacts");
        let result = result(vec![record("log", "content")]);
        let specs = vec![spec("log", true)];
        let tts = MockTextToSpeech::new(vec![]);

        let report = emit(&result, &specs, &tts, false, &nested).await;

        assert!(report.transcript.is_some());
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_emit_renders_final_text_to_audio() {
        let dir = tempfile::tempdir().unwrap();
        let result = result(vec![record("humor", "funny")]);
        let specs = vec![spec("humor", false)];
        let tts = MockTextToSpeech::new(vec![1, 2, 3]);

        let report = emit(&result, &specs, &tts, true, dir.path()).await;

        let path = report.audio.expect("audio path");
        assert!(path.extension().is_some_and(|e| e == "mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert_eq!(tts.seen_texts().await, vec!["final".to_string()]);
    }

    #[tokio::test]
    async fn test_emit_synthesis_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = result(vec![record("log", "content")]);
        let specs = vec![spec("log", true)];
        let tts = MockTextToSpeech::with_failure();

        let report = emit(&result, &specs, &tts, true, dir.path()).await;

        // Transcript still written; the synthesis failure is only reported
        assert!(report.transcript.is_some());
        assert!(report.audio.is_none());
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0], OutputError::AudioRender(_)));
    }

    #[tokio::test]
    async fn test_emit_nothing_requested_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never_created");
        let result = result(vec![record("humor", "funny")]);
        let specs = vec![spec("humor", false)];
        let tts = MockTextToSpeech::new(vec![]);

        let report = emit(&result, &specs, &tts, false, &out).await;

        assert!(report.transcript.is_none());
        assert!(report.audio.is_none());
        assert!(report.failures.is_empty());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_emit_filename_shape() {
        let dir = tempfile::tempdir().unwrap();
        let result = result(vec![record("log", "content")]);
        let specs = vec![spec("log", true)];
        let tts = MockTextToSpeech::new(vec![]);

        let report = emit(&result, &specs, &tts, false, dir.path()).await;

        let path = report.transcript.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        // 20260101_120000_It_is_raining.md
        let (stamp, rest) = name.split_at(15);
        assert!(stamp[..8].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&stamp[8..9], "_");
        assert!(stamp[9..15].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest, "_It_is_raining.md");
    }
}
