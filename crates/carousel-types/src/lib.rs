//! Shared domain types for Carousel.
//!
//! This crate contains the core domain types used across the Carousel
//! front end: messages, the conversation log, personas, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
