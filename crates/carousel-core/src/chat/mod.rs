//! Chat engine.

pub mod engine;

pub use engine::{ChatEngine, HISTORY_WINDOW};
