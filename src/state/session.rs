//! In-memory tracking of each team's active game session.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::dao::storage::RowIndex;

/// Live draft/game record for one team.
///
/// A session exists for a team exactly while that team has an active,
/// unfinished game. `row_index` stays `None` until the first successful
/// sheet write returns a locator.
#[derive(Debug, Clone)]
pub struct TeamSession {
    /// Generated identifier of the game being played.
    pub game_id: String,
    /// Count of non-empty draft fields recorded so far; never decreases.
    pub draft_count: usize,
    /// Locator of the game row in the sheet, once known.
    pub row_index: Option<RowIndex>,
    /// Accumulated row fields, restricted to the games-sheet schema.
    pub row_data: IndexMap<String, String>,
    /// Sequence number of this game within its date, per team.
    pub game_number: u32,
    /// Date string the game was reported under.
    pub date: String,
}

/// Table of active sessions plus per-team per-date game counters.
#[derive(Debug, Default)]
pub struct SessionTracker {
    sessions: HashMap<String, TeamSession>,
    counters: HashMap<String, HashMap<String, u32>>,
}

impl SessionTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active session for `team_id`, if any.
    pub fn get(&self, team_id: &str) -> Option<&TeamSession> {
        self.sessions.get(team_id)
    }

    /// Mutable access to the team's active session.
    pub fn get_mut(&mut self, team_id: &str) -> Option<&mut TeamSession> {
        self.sessions.get_mut(team_id)
    }

    /// Record a freshly started session for `team_id`.
    pub fn insert(&mut self, team_id: String, session: TeamSession) {
        self.sessions.insert(team_id, session);
    }

    /// Drop the team's session, returning it when one existed.
    pub fn remove(&mut self, team_id: &str) -> Option<TeamSession> {
        self.sessions.remove(team_id)
    }

    /// Next game number for `team_id` on `date`.
    ///
    /// Counters start at 1 and are never reclaimed; abandoned games still
    /// consume a number.
    pub fn next_game_number(&mut self, team_id: &str, date: &str) -> u32 {
        let counter = self
            .counters
            .entry(team_id.to_string())
            .or_default()
            .entry(date.to_string())
            .or_insert(0);
        *counter += 1;
        *counter
    }
}
