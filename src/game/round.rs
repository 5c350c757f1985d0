//! A round's full playable state.
//!
//! [`Game`] embeds its [`GameState`] and [`GameOptions`]; on the wire their
//! fields sit flat inside the game object.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::game::events::GameEvent;
use crate::game::options::GameOptions;
use crate::game::state::GameState;
use crate::game::team::Team;

/// One round of the game.
///
/// Invariant: `order`, `winners` and `losers` together hold each of `teams`
/// exactly once, and `layout` holds exactly one [`Team::Black`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    /// Snapshot fields (seed, cursor, round, turn, revealed, pool)
    #[serde(flatten)]
    pub state: GameState,

    /// Host-assigned identifier
    pub id: String,

    /// When the round was generated
    pub created_at: DateTime<Utc>,

    /// Last guess (or generation)
    pub updated_at: DateTime<Utc>,

    /// Overall winner. Never assigned by the rules engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_team: Option<Team>,

    /// Words on the board, index-aligned with `layout`
    pub words: Vec<String>,

    /// Owner of each cell
    pub layout: Vec<Team>,

    /// Start of the current turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_started_at: Option<DateTime<Utc>>,

    /// Participating teams, in their randomised starting order
    pub teams: Vec<Team>,

    /// Teams still taking turns
    pub order: Vec<Team>,

    /// Teams that revealed all their cells, in the order they finished
    pub winners: Vec<Team>,

    /// Teams knocked out by the black cell
    pub losers: Vec<Team>,

    /// Options the round was generated with
    #[serde(flatten)]
    pub options: GameOptions,

    /// Events not yet taken by the host
    #[serde(skip)]
    pub(crate) pending_events: Vec<GameEvent>,
}

impl Game {
    /// Number of cells on the board.
    pub fn cells(&self) -> usize {
        self.layout.len()
    }

    /// Team whose turn it is.
    ///
    /// `None` once every team is decided.
    pub fn current_team(&self) -> Option<Team> {
        self.order.get(self.state.turn_index).copied()
    }

    /// Whether a cell has been guessed.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.state.revealed.get(index).copied().unwrap_or(false)
    }

    /// Unrevealed cells still owned by `team`.
    pub fn remaining(&self, team: Team) -> usize {
        self.layout
            .iter()
            .zip(&self.state.revealed)
            .filter(|(owner, revealed)| **owner == team && !**revealed)
            .count()
    }

    /// A round is finished once at most one team is still taking turns.
    pub fn is_finished(&self) -> bool {
        self.order.len() <= 1
    }

    /// Whether every team has won or been eliminated.
    pub fn all_decided(&self) -> bool {
        self.winners.len() + self.losers.len() == self.teams.len()
    }

    /// Points earned this round, in `teams` order.
    ///
    /// When somebody hit the black cell, every team except the losers gets a
    /// base point. Winners add one point per team that finished behind them
    /// (first of four earns 3, second 2, third 1).
    pub fn team_scores(&self) -> Vec<(Team, u32)> {
        let base = u32::from(!self.losers.is_empty());
        let teams = self.teams.len() as u32;

        self.teams
            .iter()
            .map(|&team| {
                let score = if self.losers.contains(&team) {
                    0
                } else if let Some(rank) = self.winners.iter().position(|&w| w == team) {
                    base + teams - (rank as u32 + 1)
                } else {
                    base
                };
                (team, score)
            })
            .collect()
    }

    /// Fixed-width, lexicographically sortable update token.
    ///
    /// `updated_at` in nanoseconds since the Unix epoch, zero-padded to 19
    /// digits; the most recent snapshot of a game sorts last.
    pub fn state_id(&self) -> String {
        let nanos = self.updated_at.timestamp_nanos_opt().unwrap_or(i64::MAX);
        format!("{:019}", nanos)
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Compute hash of the board and partition for verification.
    ///
    /// Timestamps and the id are excluded: two replicas that saw the same
    /// guesses hash equal regardless of when they ran.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.state.seed, self.state.perm_index, |hasher| {
            for word in &self.words {
                hasher.update_str(word);
            }
            for (owner, revealed) in self.layout.iter().zip(&self.state.revealed) {
                hasher.update_u8(*owner as u8);
                hasher.update_bool(*revealed);
            }

            hash_teams(hasher, &self.order);
            hash_teams(hasher, &self.winners);
            hash_teams(hasher, &self.losers);

            hasher.update_u64(self.state.turn_index as u64);
            hasher.update_u32(self.state.round);
        })
    }
}

fn hash_teams(hasher: &mut StateHasher, teams: &[Team]) {
    hasher.update_u32(teams.len() as u32);
    for team in teams {
        hasher.update_u8(*team as u8);
    }
}

// =============================================================================
// TESTS
// =============================================================================
