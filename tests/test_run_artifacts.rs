//! End-of-run artifact tests
//!
//! Runs a real pipeline with deterministic agents, then drives the output
//! stage against a temporary directory and a scripted synthesizer, checking
//! what lands on disk and what gets reported.

mod test_helpers;

use textweave::config::PipelineConfig;
use textweave::output;
use textweave::testing::MockTextToSpeech;
use textweave::{AgentRegistry, PipelineEngine, RunResult};

fn run_config() -> PipelineConfig {
    let mut config = test_helpers::test_config();
    let mut log = test_helpers::agent_spec("log", "transcript");
    log.emits_transcript = true;
    config.agents = vec![test_helpers::agent_spec("reframe", "reframe"), log];
    config
}

async fn run_pipeline(config: &PipelineConfig, input: &str) -> RunResult {
    let registry = AgentRegistry::from_config(config).unwrap();
    let agents = registry.load(&config.agents).unwrap();
    PipelineEngine::new(agents).run(input).await.unwrap()
}

#[tokio::test]
async fn test_flagged_transcript_written_after_run() {
    let config = run_config();
    let result = run_pipeline(&config, "It is raining").await;
    let synth = MockTextToSpeech::new(vec![]);
    let dir = tempfile::tempdir().unwrap();

    let report = output::emit(&result, &config.agents, &synth, false, dir.path()).await;

    assert!(report.failures.is_empty());
    let transcript_path = report.transcript.expect("transcript should be written");
    let content = std::fs::read_to_string(&transcript_path).unwrap();
    assert!(content.starts_with("# Pipeline Run Log ("));
    assert!(content.contains("## Initial Input\n\n```\nIt is raining\n```"));
    assert!(content.contains("## After Agent: reframe"));
}

#[tokio::test]
async fn test_artifact_filename_carries_timestamp_and_slug() {
    let config = run_config();
    let result = run_pipeline(&config, "It is raining!!!").await;
    let synth = MockTextToSpeech::new(vec![]);
    let dir = tempfile::tempdir().unwrap();

    let report = output::emit(&result, &config.agents, &synth, false, dir.path()).await;

    let name = report
        .transcript
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    let (stamp, rest) = name.split_at(15);
    assert!(stamp[..8].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(&stamp[8..9], "_");
    assert!(stamp[9..15].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(rest, "_It_is_raining___.md");
}

#[tokio::test]
async fn test_speak_renders_final_text_to_audio_artifact() {
    let config = run_config();
    let result = run_pipeline(&config, "It is raining").await;
    let audio = vec![0x49u8, 0x44, 0x33];
    let synth = MockTextToSpeech::new(audio.clone());
    let dir = tempfile::tempdir().unwrap();

    let report = output::emit(&result, &config.agents, &synth, true, dir.path()).await;

    assert!(report.failures.is_empty());
    let audio_path = report.audio.expect("audio should be written");
    assert_eq!(audio_path.extension().unwrap(), "mp3");
    assert_eq!(std::fs::read(&audio_path).unwrap(), audio);
    assert_eq!(synth.seen_texts().await, vec![result.final_text.clone()]);
}

#[tokio::test]
async fn test_synthesis_failure_reported_without_losing_transcript() {
    let config = run_config();
    let result = run_pipeline(&config, "It is raining").await;
    let synth = MockTextToSpeech::with_failure();
    let dir = tempfile::tempdir().unwrap();

    let report = output::emit(&result, &config.agents, &synth, true, dir.path()).await;

    assert_eq!(report.failures.len(), 1);
    assert!(report.audio.is_none());
    assert!(report.transcript.is_some());
    assert!(report.transcript.unwrap().exists());
}

#[tokio::test]
async fn test_no_artifacts_without_flag_or_speak() {
    let mut config = run_config();
    // Same agents, but nothing is flagged for persistence
    config.agents[1].emits_transcript = false;
    let result = run_pipeline(&config, "It is raining").await;
    let synth = MockTextToSpeech::new(vec![]);
    let dir = tempfile::tempdir().unwrap();

    let report = output::emit(&result, &config.agents, &synth, false, dir.path()).await;

    assert!(report.transcript.is_none());
    assert!(report.audio.is_none());
    assert!(report.failures.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(synth.seen_texts().await.is_empty());
}

#[tokio::test]
async fn test_output_dir_created_on_demand() {
    let config = run_config();
    let result = run_pipeline(&config, "It is raining").await;
    let synth = MockTextToSpeech::new(vec![]);
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("logs").join("runs");

    let report = output::emit(&result, &config.agents, &synth, false, &nested).await;

    assert!(report.failures.is_empty());
    assert!(nested.is_dir());
    assert!(report.transcript.unwrap().starts_with(&nested));
}
