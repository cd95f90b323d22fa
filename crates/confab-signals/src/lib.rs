//! Signal extractors over a meeting transcript.
//!
//! Each extractor is a pure function of the transcript: stateless,
//! order-preserving, no side effects. Missing input (no sentence tags, no
//! provider speaker stats) yields empty collections, never an error.
//! Heuristic keyword lists and window sizes live here as named constants so
//! they stay independently testable and tunable.

pub mod actions;
pub mod competitive;
pub mod decisions;
pub mod moments;
pub mod questions;
pub mod speakers;
pub mod timeline;
