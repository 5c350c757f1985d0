//! Game Events
//!
//! Events produced while resolving guesses. Hosts drain them with
//! [`Game::take_events`](crate::game::round::Game::take_events) to drive
//! notifications; they are not part of the persisted game.

use serde::{Serialize, Deserialize};
use crate::game::team::Team;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A cell was revealed
    CellRevealed {
        index: usize,
        owner: Team,
        guessed_by: Team,
    },

    /// A team exposed the black cell and is out
    TeamEliminated {
        team: Team,
    },

    /// A team has no unrevealed cells left
    TeamWon {
        team: Team,
        rank: usize,
    },

    /// The turn moved on (`None` once every team is decided)
    TurnPassed {
        next: Option<Team>,
    },
}

/// A game event stamped with the round counter it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Value of `round` when the event occurred
    pub round: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(round: u32, data: GameEventData) -> Self {
        Self { round, data }
    }

    /// Team the event is about, if any.
    pub fn team(&self) -> Option<Team> {
        match &self.data {
            GameEventData::CellRevealed { guessed_by, .. } => Some(*guessed_by),
            GameEventData::TeamEliminated { team } => Some(*team),
            GameEventData::TeamWon { team, .. } => Some(*team),
            GameEventData::TurnPassed { next } => *next,
        }
    }
}
