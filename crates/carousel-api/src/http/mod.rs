//! HTTP layer for Carousel.
//!
//! Axum-based front end with a fixed wire contract:
//! `POST /chat`, `POST /clear`, a static chat UI at `/`, and a
//! `/health` probe. Responses are plain JSON bodies, errors are
//! `{ "error": text }`.

pub mod error;
pub mod handlers;
pub mod router;
