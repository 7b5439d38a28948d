//! Business logic for Carousel.
//!
//! Defines the `LlmProvider` and `HistoryStore` traits, the model
//! rotator, the persona registry, and the chat engine that ties them
//! together. Concrete backends live in `carousel-infra`; this crate
//! never depends on infrastructure.

pub mod chat;
pub mod history;
pub mod llm;
pub mod persona;
pub mod rotation;
