//! At-most-once barrier for side-effecting events.

use std::collections::HashSet;

/// Side-effecting event kinds guarded by the dedupe set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// In-game start report.
    GameStart,
    /// Final outcome report.
    GameFinished,
    /// POV stream attachment.
    StreamReady,
}

impl EventKind {
    /// Wire name of the event kind, as stored in dedupe keys.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::GameStart => "game_start",
            EventKind::GameFinished => "game_finished",
            EventKind::StreamReady => "stream_ready",
        }
    }
}

/// Composite key for a team-scoped game event.
pub fn event_key(team_id: &str, kind: EventKind, game_id: &str) -> String {
    [team_id, kind.as_str(), game_id].join("|")
}

/// Composite key for a stream event, which is additionally role-scoped.
pub fn stream_event_key(team_id: &str, kind: EventKind, game_id: &str, role: &str) -> String {
    [team_id, kind.as_str(), game_id, role].join("|")
}

/// Set of already-processed event keys.
///
/// Keys are only marked after the event's row write succeeded, and are
/// never removed within a process lifetime.
#[derive(Debug, Default)]
pub struct EventDedupe {
    seen: HashSet<String>,
}

impl EventDedupe {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `key` was already processed.
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    /// Mark `key` as processed. Returns false when it was already present.
    pub fn mark(&mut self, key: impl Into<String>) -> bool {
        self.seen.insert(key.into())
    }
}
