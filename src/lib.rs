//! textweave - a configurable text transformation pipeline
//!
//! Input text (typed or transcribed from the microphone) flows through an
//! ordered chain of agents declared in a TOML file. Each agent turns the
//! previous text into a new one; the engine records every step and the final
//! text can optionally be rendered to speech or persisted as a markdown
//! transcript.
//!
//! # Overview
//!
//! This crate provides:
//! - A declarative pipeline configuration with structural validation
//! - A registry resolving agent declarations into runnable instances
//! - A sequential execution engine with per-step history capture
//! - Input adapters (direct text, timed microphone capture + transcription)
//! - Output adapters (voice rendering, durable markdown transcripts)
//!
//! # Quick Start
//!
//! ```rust
//! use textweave::engine::PipelineEngine;
//! use textweave::testing::mocks::MapAgent;
//!
//! # tokio_test::block_on(async {
//! let agents: Vec<Box<dyn textweave::agent::Agent>> = vec![
//!     Box::new(MapAgent::new("shout", |text| text.to_uppercase())),
//!     Box::new(MapAgent::new("bang", |text| format!("{text}!"))),
//! ];
//!
//! let mut engine = PipelineEngine::new(agents);
//! let result = engine.run("hello").await.unwrap();
//!
//! assert_eq!(result.final_text, "HELLO!");
//! assert_eq!(result.history.len(), 2);
//! # });
//! ```

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod llm;
pub mod logging;
pub mod output;
pub mod speech;
pub mod testing;

pub use agent::{Agent, AgentRegistry, RegistryError, StepContext};
pub use config::{AgentSpec, ConfigError, PipelineConfig};
pub use engine::{PipelineEngine, RunResult, RunState, StepRecord};
pub use error::{AgentError, RunError};
pub use output::OutputReport;
