//! Sequential pipeline execution engine
//!
//! Owns the loaded agents for one run and drives them in declared order,
//! capturing a step record after every agent. The engine knows nothing about
//! what individual agents do; it only moves text forward, appends history,
//! and halts on the first failure with everything collected so far.

use crate::agent::{Agent, StepContext};
use crate::error::AgentError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Lifecycle of a pipeline engine; each engine runs exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// One completed step: which agent ran, what it saw, what it produced
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub agent: String,
    pub input: String,
    pub output: String,
    pub completed_at: DateTime<Utc>,
}

/// Immutable outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub initial_input: String,
    pub final_text: String,
    pub history: Vec<StepRecord>,
}

/// Why a run did not complete
#[derive(Debug, Error)]
pub enum ExecutionFailure {
    /// An agent failed; downstream agents were never invoked
    #[error("Pipeline halted at step {step}: {source}")]
    Halted {
        /// Zero-based index of the failing step
        step: usize,
        /// Steps completed before the failure, preserved for reporting
        history: Vec<StepRecord>,
        #[source]
        source: AgentError,
    },
    #[error("Engine is {state:?}; each engine runs exactly once")]
    NotIdle { state: RunState },
}

impl ExecutionFailure {
    /// Steps completed before the failure
    pub fn history(&self) -> &[StepRecord] {
        match self {
            Self::Halted { history, .. } => history,
            Self::NotIdle { .. } => &[],
        }
    }
}

/// Drives an ordered agent chain over a single input
pub struct PipelineEngine {
    agents: Vec<Box<dyn Agent>>,
    state: RunState,
}

impl PipelineEngine {
    pub fn new(agents: Vec<Box<dyn Agent>>) -> Self {
        Self {
            agents,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run every agent in declared order over `initial_input`
    ///
    /// Each agent is invoked exactly once, with the previous agent's output
    /// (the initial input for the first). The first failure halts the run;
    /// the returned failure carries the history collected up to that point.
    pub async fn run(&mut self, initial_input: &str) -> Result<RunResult, ExecutionFailure> {
        if self.state != RunState::Idle {
            return Err(ExecutionFailure::NotIdle { state: self.state });
        }
        self.state = RunState::Running;

        let run_id = Uuid::new_v4();
        info!(
            run_id = %run_id,
            agents = self.agents.len(),
            "pipeline run started"
        );

        let mut history: Vec<StepRecord> = Vec::with_capacity(self.agents.len());
        let mut current = initial_input.to_string();

        for (step, agent) in self.agents.iter().enumerate() {
            let outcome = {
                let cx = StepContext {
                    initial_input,
                    history: &history,
                };
                agent.process(&current, &cx).await
            };

            match outcome {
                Ok(output) => {
                    debug!(
                        run_id = %run_id,
                        agent = agent.name(),
                        step,
                        chars = output.len(),
                        "agent completed"
                    );
                    history.push(StepRecord {
                        agent: agent.name().to_string(),
                        input: current,
                        output: output.clone(),
                        completed_at: Utc::now(),
                    });
                    current = output;
                }
                Err(source) => {
                    self.state = RunState::Failed;
                    error!(
                        run_id = %run_id,
                        agent = agent.name(),
                        step,
                        error = %source,
                        "pipeline halted"
                    );
                    return Err(ExecutionFailure::Halted {
                        step,
                        history,
                        source,
                    });
                }
            }
        }

        self.state = RunState::Completed;
        info!(run_id = %run_id, steps = history.len(), "pipeline run completed");

        Ok(RunResult {
            run_id,
            initial_input: initial_input.to_string(),
            final_text: current,
            history,
        })
    }
}
