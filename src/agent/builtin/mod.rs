//! Built-in agent implementations
//!
//! These are the implementation references the registry recognizes. Two are
//! deterministic text wrappers, three rewrite text through a model provider,
//! and one renders the run history as a Markdown transcript.

pub mod generate;
pub mod persona;
pub mod reframe;
pub mod transcript;

pub use generate::{HumorAgent, ImageryAgent, ModelBackend, SimplifyAgent};
pub use persona::PersonaAgent;
pub use reframe::ReframeAgent;
pub use transcript::{render_transcript, TranscriptAgent};

use std::hash::{Hash, Hasher};

/// Pick one option by a stable hash of the input text
///
/// Stands in for the original's random choice so a given input always yields
/// the same output and steps stay reproducible.
pub(crate) fn stable_choice<'a, T>(input: &str, options: &'a [T]) -> &'a T {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    input.hash(&mut hasher);
    let index = (hasher.finish() % options.len() as u64) as usize;
    &options[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_choice_is_deterministic() {
        let options = ["a", "b", "c", "d"];
        let first = stable_choice("some text", &options);
        let second = stable_choice("some text", &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stable_choice_stays_in_bounds() {
        let options = ["only"];
        assert_eq!(*stable_choice("anything", &options), "only");
        assert_eq!(*stable_choice("", &options), "only");
    }
}
