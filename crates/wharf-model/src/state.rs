//! The per-directory load-cycle state machine's data shape.
//!
//! `scan -> load -> delete -> scan`, with a `stl-load-error` side branch out
//! of `load`. Represented as a sum type with per-variant payloads, per the
//! design note in spec.md §9.

use crate::descriptor::Descriptor;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum CycleState {
    Scan,
    Load {
        descriptor: Arc<Descriptor>,
        files: Vec<String>,
    },
    Delete {
        files: Vec<String>,
    },
    StlLoadError {
        descriptor: Arc<Descriptor>,
        files: Vec<String>,
    },
}

impl CycleState {
    pub fn label(&self) -> &'static str {
        match self {
            CycleState::Scan => "scan",
            CycleState::Load { .. } => "load",
            CycleState::Delete { .. } => "delete",
            CycleState::StlLoadError { .. } => "stl-load-error",
        }
    }
}

impl Default for CycleState {
    fn default() -> Self {
        CycleState::Scan
    }
}

/// Result of advancing the state machine once: the next state to hold, and
/// whether the watcher should sleep one poll interval before re-entering.
#[derive(Debug, Clone)]
pub struct Transition {
    pub next: CycleState,
    pub pause: bool,
}

impl Transition {
    pub fn paused(next: CycleState) -> Self {
        Self { next, pause: true }
    }

    pub fn immediate(next: CycleState) -> Self {
        Self { next, pause: false }
    }
}
