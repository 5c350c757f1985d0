//! Game State Definitions
//!
//! [`GameState`] is the minimal resumable snapshot of a round: enough to
//! regenerate the board after a process restart and to derive the next
//! round of the lineage.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::clock::SeedSource;

/// Errors raised by the rules engine.
///
/// Every error is detected before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Team count outside 2..=4.
    #[error("invalid options: {teams} teams (expected 2, 3 or 4)")]
    InvalidOptions {
        /// Requested team count
        teams: u32,
    },

    /// The pool cannot supply a full board at the cursor.
    #[error("word pool too small: need {needed} words, have {available}")]
    InsufficientWordPool {
        /// Words required (cursor + cells)
        needed: usize,
        /// Words in the pool
        available: usize,
    },

    /// Guess outside the board.
    #[error("index {index} is invalid for a board of {cells} cells")]
    InvalidIndex {
        /// Requested cell
        index: usize,
        /// Board size
        cells: usize,
    },

    /// No team is left to take a turn.
    #[error("round is over")]
    RoundOver,
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, GameError>;

/// Resumable snapshot of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed of the lineage (63-bit)
    pub seed: u64,

    /// Cursor into the seed's permutation of the word pool
    pub perm_index: usize,

    /// Turn advances so far this round
    pub round: u32,

    /// Index into the game's `order`: whose turn it is
    pub turn_index: usize,

    /// One flag per cell, set once guessed
    pub revealed: Vec<bool>,

    /// Every candidate word of the lineage
    pub word_set: Vec<String>,

    /// Cells per board
    pub words_per_game: usize,
}

impl GameState {
    /// First state of a fresh lineage.
    pub fn random<S>(words: Vec<String>, words_per_game: usize, seeds: &mut S) -> Self
    where
        S: SeedSource + ?Sized,
    {
        Self::with_seed(seeds.next_seed(), words, words_per_game)
    }

    /// First state of a lineage with a known seed.
    pub fn with_seed(seed: u64, words: Vec<String>, words_per_game: usize) -> Self {
        Self {
            seed,
            perm_index: 0,
            round: 0,
            turn_index: 0,
            revealed: vec![false; words_per_game],
            word_set: words,
            words_per_game,
        }
    }

    /// Whether any cell has been guessed.
    pub fn any_revealed(&self) -> bool {
        self.revealed.iter().any(|&r| r)
    }

    /// Words left in the lineage after the current board.
    pub fn words_remaining(&self) -> usize {
        self.word_set
            .len()
            .saturating_sub(self.perm_index.saturating_add(self.words_per_game))
    }
}

/// Derive the state for the next round of the lineage.
///
/// The cursor moves past the current board. When that leaves no room for
/// another full board, a fresh seed is drawn and the cursor restarts at 0
/// (a new lineage over the same pool). The input is left untouched.
pub fn advance<S>(state: &GameState, seeds: &mut S) -> GameState
where
    S: SeedSource + ?Sized,
{
    let mut next = state.clone();
    let cursor = state.perm_index.checked_add(state.words_per_game);
    let board_end = cursor.and_then(|c| c.checked_add(state.words_per_game));
    next.perm_index = cursor.unwrap_or(0);

    // An overflowing cursor counts as an exhausted pool
    if board_end.map_or(true, |end| end >= next.word_set.len()) {
        next.seed = seeds.next_seed();
        next.perm_index = 0;
        info!(
            "Word pool exhausted after cursor {}, reseeding lineage",
            state.perm_index
        );
    }

    next.revealed = vec![false; next.words_per_game];
    next.round = 0;
    next.turn_index = 0;
    next
}

// =============================================================================
// TESTS
// =============================================================================
