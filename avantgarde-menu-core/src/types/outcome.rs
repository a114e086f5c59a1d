//! Results handed back across the click protocol boundary

use serde::Serialize;

use super::FlowKind;

/// Whether the surface should close the view that produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub close: bool,
}

impl DispatchOutcome {
    /// Terminal action; the current view goes away.
    #[must_use]
    pub const fn close() -> Self {
        Self { close: true }
    }

    /// A new view replaces the current one (or the event was not ours).
    #[must_use]
    pub const fn keep_open() -> Self {
        Self { close: false }
    }
}

/// Per-user position in the dispatch state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "target", rename_all = "snake_case")]
pub enum SessionState {
    Closed,
    Viewing(String),
    AwaitingSubInput(FlowKind),
}
