//! AR session handles
//!
//! The platform's hit-test source is acquired exactly once, asynchronously,
//! at session start. Everything after that is synchronous and frame-driven;
//! this module only models the one-shot handshake.

use thiserror::Error;

/// Opaque handle to the platform's per-frame hit-test stream.
///
/// Holding one is the orchestrator's proof that the session handshake
/// completed and hit-test samples may be consumed.
#[derive(Debug, Clone)]
pub struct HitTestSource {
    reference_space: String,
}

impl HitTestSource {
    pub fn new(reference_space: impl Into<String>) -> Self {
        Self {
            reference_space: reference_space.into(),
        }
    }

    /// Reference space the source's samples are expressed in.
    pub fn reference_space(&self) -> &str {
        &self.reference_space
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("hit-test source acquisition failed: {0}")]
    Acquisition(String),
}
