//! Model provider implementations
//!
//! Concrete implementations of the LlmProvider trait for hosted services.

pub mod gemini;

pub use gemini::*;
