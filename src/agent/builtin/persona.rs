//! Persona imprint agent
//!
//! Wraps the text in the voice of an archetype. The persona is chosen by a
//! stable hash of the input, so the same text always gets the same speaker.

use crate::agent::builtin::stable_choice;
use crate::agent::{Agent, StepContext};
use crate::error::AgentError;
use async_trait::async_trait;

struct Persona {
    name: &'static str,
    intro: &'static str,
    outro: &'static str,
}

const PERSONAS: &[Persona] = &[
    Persona {
        name: "War General",
        intro: "Alright soldier, listen up! In the theatre of operations, this situation \
                demands decisive action. ",
        outro: " Dismissed!",
    },
    Persona {
        name: "Zen Monk",
        intro: "Observe the breath. In the stillness, the nature of this text reveals itself. ",
        outro: " Thus, emptiness is form.",
    },
    Persona {
        name: "Tech Futurist",
        intro: "Extrapolating current trendlines, the paradigm shift indicated by this data \
                is undeniable. ",
        outro: " The singularity is near.",
    },
    Persona {
        name: "Skeptical Detective",
        intro: "Something doesn't add up here. Let's look at the facts, just the facts. ",
        outro: " Case closed... or is it?",
    },
];

/// Applies the voice and speaking style of an archetype
pub struct PersonaAgent {
    name: String,
}

impl PersonaAgent {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Agent for PersonaAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, input: &str, _cx: &StepContext<'_>) -> Result<String, AgentError> {
        let persona = stable_choice(input, PERSONAS);
        let imprinted = format!("{}'{}'{}", persona.intro, input, persona.outro);
        Ok(format!("Speaking as a {}: {}", persona.name, imprinted))
    }
}
