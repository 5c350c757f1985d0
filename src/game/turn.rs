//! Guess Resolution
//!
//! The only way a [`Game`] changes after generation. One guess:
//!
//! 1. reveals the cell,
//! 2. eliminates the team on turn if the cell is black, or else
//! 3. recomputes which teams have won,
//! 4. passes the turn when the guess missed or the rotation shrank.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::core::clock::Clock;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::round::Game;
use crate::game::state::{GameError, Result};
use crate::game::team::Team;

impl Game {
    /// Guess the cell at `index` for the team on turn.
    ///
    /// Guessing an already revealed cell is allowed and runs the full
    /// resolution again.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidIndex`] when `index` is off the board
    /// - [`GameError::RoundOver`] when no team is left on turn
    ///
    /// The game is untouched on error.
    pub fn guess(&mut self, index: usize, clock: &dyn Clock) -> Result<()> {
        let cells = self.layout.len().min(self.state.revealed.len());
        if index >= cells {
            return Err(GameError::InvalidIndex { index, cells });
        }
        let Some(guessing) = self.current_team() else {
            return Err(GameError::RoundOver);
        };

        let old_order_len = self.order.len();
        let now = clock.now();

        self.updated_at = now;
        self.state.revealed[index] = true;

        let owner = self.layout[index];
        debug!("Team {} revealed cell {} ({})", guessing, index, owner);
        self.push_event(GameEvent::new(
            self.state.round,
            GameEventData::CellRevealed { index, owner, guessed_by: guessing },
        ));

        if owner == Team::Black {
            self.eliminate(guessing);
            self.next_turn(now);
            return Ok(());
        }

        self.check_winning_condition();

        if Some(owner) != self.current_team() || old_order_len != self.order.len() {
            self.next_turn(now);
        }

        Ok(())
    }

    /// Move `team` from the rotation to the losers.
    fn eliminate(&mut self, team: Team) {
        self.losers.push(team);
        self.order.retain(|&t| t != team);

        info!("Game {}: team {} hit the black cell and is out", self.id, team);
        self.push_event(GameEvent::new(self.state.round, GameEventData::TeamEliminated { team }));
    }

    /// Recompute `winners` and `order`.
    ///
    /// Walks `winners ++ order` once, so earlier winners keep their rank and
    /// new winners are appended in rotation order. Only the four team colors
    /// are scanned; a team owning no cells never runs out. Skipped once
    /// fewer than two teams remain in the rotation.
    fn check_winning_condition(&mut self) {
        if self.order.len() < 2 {
            return;
        }

        let mut remaining = [false; 4];
        for (owner, revealed) in self.layout.iter().zip(&self.state.revealed) {
            if *revealed {
                continue;
            }
            if let Some(i) = owner.playable_index() {
                remaining[i] = true;
            }
        }

        let previous_winners = self.winners.len();
        let mut new_order = Vec::with_capacity(self.order.len());
        let mut new_winners = Vec::with_capacity(self.teams.len());

        for &team in self.winners.iter().chain(&self.order) {
            let Some(i) = team.playable_index() else {
                continue;
            };
            if remaining[i] {
                new_order.push(team);
            } else {
                new_winners.push(team);
            }
        }

        self.order = new_order;
        self.winners = new_winners;

        for rank in previous_winners..self.winners.len() {
            let team = self.winners[rank];
            info!("Game {}: team {} finished in place {}", self.id, team, rank + 1);
            self.push_event(GameEvent::new(self.state.round, GameEventData::TeamWon { team, rank }));
        }
    }

    /// Pass the turn.
    ///
    /// An index equal to the rotation length (the last team on turn just
    /// left the rotation) wraps to 0 instead of taking the modulus.
    fn next_turn(&mut self, now: DateTime<Utc>) {
        self.state.round += 1;

        let len = self.order.len();
        self.state.turn_index = if len > 0 && self.state.turn_index < len {
            (self.state.turn_index + 1) % len
        } else {
            0
        };
        self.round_started_at = Some(now);

        let next = self.current_team();
        match next {
            Some(team) => debug!("Game {}: turn passes to {}", self.id, team),
            None => info!("Game {}: every team is decided", self.id),
        }
        self.push_event(GameEvent::new(self.state.round, GameEventData::TurnPassed { next }));
    }
}

// =============================================================================
// TESTS
// =============================================================================
