//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing pipelines without
//! requiring microphones, speech services or model providers.

pub mod mocks;

pub use mocks::*;
