//! Transcript rendering agent
//!
//! Renders the run so far (initial input plus every completed step) as a
//! Markdown document and returns it as its own output text. The agent only
//! renders; persisting the document to disk is the output stage's job, keyed
//! off the `emits_transcript` flag on the agent's declaration.

use crate::agent::{Agent, StepContext};
use crate::engine::StepRecord;
use crate::error::AgentError;
use async_trait::async_trait;
use chrono::Utc;

/// Timestamp format shared by transcript headers and artifact filenames
pub const TRANSCRIPT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Renders the run history as a Markdown transcript
pub struct TranscriptAgent {
    name: String,
}

impl TranscriptAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Agent for TranscriptAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _input: &str, cx: &StepContext<'_>) -> Result<String, AgentError> {
        // The direct input is already the last history entry's output, so the
        // rendering works from the context alone.
        let timestamp = Utc::now().format(TRANSCRIPT_TIMESTAMP_FORMAT).to_string();
        Ok(render_transcript(&timestamp, cx.initial_input, cx.history))
    }
}

/// Render the Markdown transcript body for a run
pub fn render_transcript(timestamp: &str, initial_input: &str, history: &[StepRecord]) -> String {
    let mut content = format!("# Pipeline Run Log ({timestamp})\n\n");
    content.push_str(&format!(
        "## Initial Input\n\n```\n{initial_input}\n```\n\n---\n\n"
    ));

    for record in history {
        content.push_str(&format!("## After Agent: {}\n\n", record.agent));
        content.push_str(&format!("```\n{}\n```\n\n---\n\n", record.output));
    }

    content
}
