//! Conceptual reframe agent
//!
//! Restates the text through a philosophical lens, chosen by a stable hash of
//! the input.

use crate::agent::builtin::stable_choice;
use crate::agent::{Agent, StepContext};
use crate::error::AgentError;
use async_trait::async_trait;

struct Lens {
    name: &'static str,
    intro: &'static str,
}

const LENSES: &[Lens] = &[
    Lens {
        name: "Marxist",
        intro: "From a Marxist perspective, this reflects class struggle and the means of \
                production...",
    },
    Lens {
        name: "Stoic",
        intro: "A Stoic might view this as an opportunity to practice virtue and accept what \
                cannot be changed...",
    },
    Lens {
        name: "Systems Thinking",
        intro: "Considering this through a Systems Thinking lens, we see interconnected \
                feedback loops...",
    },
    Lens {
        name: "Nietzschean",
        intro: "A Nietzschean interpretation might focus on the will to power and the \
                revaluation of values...",
    },
];

/// Reconstructs the central idea through a different worldview
pub struct ReframeAgent {
    name: String,
}

impl ReframeAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Agent for ReframeAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        let lens = stable_choice(input, LENSES);
        let reframed = format!("{} The original statement was: '{}'", lens.intro, input);
        Ok(format!(
            "Reframing through a {} lens: {} This offers a new viewpoint.",
            lens.name, reframed
        ))
    }
}
