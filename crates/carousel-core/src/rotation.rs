//! Cyclic model rotation.
//!
//! Holds a fixed ordered list of model identifiers and an atomic cursor.
//! Selection is purely cyclic: no health tracking, no exclusion of
//! failed models. A model that errored is selected again after one full
//! cycle.

use std::sync::atomic::{AtomicUsize, Ordering};

use carousel_types::error::RotationError;

/// Round-robin selector over a fixed list of model identifiers.
#[derive(Debug)]
pub struct ModelRotator {
    models: Vec<String>,
    cursor: AtomicUsize,
}

impl ModelRotator {
    /// Create a rotator over the given models, in rotation order.
    pub fn new(models: Vec<String>) -> Result<Self, RotationError> {
        if models.is_empty() {
            return Err(RotationError::Empty);
        }
        Ok(Self {
            models,
            cursor: AtomicUsize::new(0),
        })
    }

    /// The model at the cursor; advances the cursor cyclically.
    pub fn next(&self) -> String {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.models[i % self.models.len()].clone()
    }

    /// The model the next `next()` call would return, without advancing.
    pub fn peek(&self) -> String {
        let i = self.cursor.load(Ordering::Relaxed);
        self.models[i % self.models.len()].clone()
    }

    /// Number of models in the rotation.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// The full rotation, in order.
    pub fn models(&self) -> &[String] {
        &self.models
    }
}
