//! Infrastructure implementations for Carousel.
//!
//! Concrete backends for the traits defined in `carousel-core`: the
//! Groq chat-completion provider, the JSON-file history store, the
//! environment credential resolver, and the `carousel.toml` loader.

pub mod config;
pub mod history;
pub mod llm;
pub mod secret;
