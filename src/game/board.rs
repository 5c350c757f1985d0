//! Board Generation
//!
//! Builds a [`Game`] from a [`GameState`] and [`GameOptions`]. Fully
//! deterministic in `(seed, perm_index, options)`:
//!
//! - the *selection* stream, seeded with `seed`, permutes the word pool;
//! - the *layout* stream, seeded from `(seed, perm_index)`, shuffles the
//!   team order and the cell assignment.
//!
//! Rounds of one lineage therefore never repeat words until the pool runs
//! out, yet get unrelated layouts.

use tracing::{debug, info};

use crate::core::clock::Clock;
use crate::core::rng::DeterministicRng;
use crate::game::options::{BoardLayout, GameOptions};
use crate::game::round::Game;
use crate::game::state::{GameError, GameState, Result};
use crate::game::team::Team;

/// Random swaps applied to the base team order.
const ORDER_SWAPS: usize = 5;

/// Minimum number of layout shuffles; up to 4 more are drawn at random.
const MIN_LAYOUT_SHUFFLES: u32 = 5;

/// Generate the board for a round.
///
/// `options.number_of_teams` decides the board size, which replaces
/// `state.words_per_game`. A `revealed` vector sized for some other board
/// is reset.
///
/// # Errors
///
/// - [`GameError::InvalidOptions`] for a team count outside 2..=4
/// - [`GameError::InsufficientWordPool`] when the pool has fewer than
///   `perm_index + cells` words
pub fn generate(
    id: impl Into<String>,
    mut state: GameState,
    options: GameOptions,
    clock: &dyn Clock,
) -> Result<Game> {
    let layout = options.layout()?;

    let available = state.word_set.len();
    let needed = state.perm_index.checked_add(layout.cells).unwrap_or(usize::MAX);
    if available < needed {
        return Err(GameError::InsufficientWordPool { needed, available });
    }

    state.words_per_game = layout.cells;
    if state.revealed.len() != layout.cells {
        state.revealed = vec![false; layout.cells];
    }

    let mut selection_rng = DeterministicRng::new(state.seed);
    let mut layout_rng = DeterministicRng::for_layout(state.seed, state.perm_index);

    let words = select_words(&mut selection_rng, &state.word_set, state.perm_index, layout.cells);
    let order = shuffled_order(&mut layout_rng, layout.teams());
    let cells = assign_cells(&mut layout_rng, &layout, &order);

    let now = clock.now();
    let game = Game {
        id: id.into(),
        created_at: now,
        updated_at: now,
        winning_team: None,
        words,
        layout: cells,
        round_started_at: Some(now),
        teams: order.clone(),
        order,
        winners: Vec::with_capacity(layout.teams() - 1),
        losers: Vec::with_capacity(1),
        state,
        options,
        pending_events: Vec::new(),
    };

    info!(
        "Generated game {} with {} teams, seed {}, cursor {}, starting team {}",
        game.id,
        game.teams.len(),
        game.state.seed,
        game.state.perm_index,
        game.teams[0],
    );

    Ok(game)
}

/// Pick the board's words at `cursor` in the seed's pool permutation.
///
/// Words are `pool[perm[i]]`. Hosts that indexed the permutation twice
/// (`pool[perm[perm[i]]]`) get different boards for the same seed.
fn select_words(
    rng: &mut DeterministicRng,
    pool: &[String],
    cursor: usize,
    count: usize,
) -> Vec<String> {
    let perm = rng.permutation(pool.len());
    perm[cursor..cursor + count]
        .iter()
        .map(|&i| pool[i].clone())
        .collect()
}

/// Base order `[Red, Blue, Green, Yellow][..teams]` scrambled by five
/// random swaps.
fn shuffled_order(rng: &mut DeterministicRng, teams: usize) -> Vec<Team> {
    let mut order = Team::PLAYABLE[..teams].to_vec();

    for _ in 0..ORDER_SWAPS {
        let a = rng.next_int(5) as usize % teams;
        let b = rng.next_int(5) as usize % teams;
        order.swap(a, b);
    }

    order
}

/// Lay out quotas (largest to the first team in `order`), bystanders and
/// the black cell, then shuffle.
fn assign_cells(rng: &mut DeterministicRng, layout: &BoardLayout, order: &[Team]) -> Vec<Team> {
    let mut cells = Vec::with_capacity(layout.cells);
    for (team, &quota) in order.iter().zip(layout.quotas) {
        cells.extend(team.repeat(quota));
    }
    cells.extend(Team::Neutral.repeat(layout.neutral));
    cells.push(Team::Black);

    let shuffles = MIN_LAYOUT_SHUFFLES + rng.next_int(5);
    for _ in 0..shuffles {
        rng.shuffle(&mut cells);
    }
    debug!("Shuffled {} cells {} times", cells.len(), shuffles);

    cells
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{DeterministicSeeds, ManualClock};
    use crate::game::state::advance;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word-{i}")).collect()
    }

    fn clock() -> ManualClock {
        ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    fn state(seed: u64, pool_size: usize) -> GameState {
        GameState::with_seed(seed, pool(pool_size), 25)
    }

    #[test]
    fn test_board_shape_for_all_team_counts() {
        for teams in 2..=4 {
            let game = generate("g", state(42, 200), GameOptions::with_teams(teams), &clock()).unwrap();
            let cells = [25, 36, 49][teams as usize - 2];

            assert_eq!(game.words.len(), cells);
            assert_eq!(game.layout.len(), cells);
            assert_eq!(game.state.revealed.len(), cells);
            assert_eq!(game.state.words_per_game, cells);
            assert_eq!(game.layout.iter().filter(|&&t| t == Team::Black).count(), 1);

            assert_eq!(game.teams.len(), teams as usize);
            assert_eq!(game.order, game.teams);
            assert!(game.winners.is_empty());
            assert!(game.losers.is_empty());
            assert_eq!(game.state.round, 0);
            assert_eq!(game.state.turn_index, 0);

            let distinct: HashSet<_> = game.teams.iter().collect();
            assert_eq!(distinct.len(), teams as usize);
        }
    }

    #[test]
    fn test_first_team_gets_largest_quota() {
        let game = generate("g", state(3, 200), GameOptions::with_teams(4), &clock()).unwrap();
        let counts: Vec<usize> = game.order.iter().map(|&t| game.remaining(t)).collect();
        assert_eq!(counts, vec![10, 9, 8, 7]);
        assert_eq!(game.remaining(Team::Neutral), 14);
    }

    #[test]
    fn test_words_are_distinct_pool_entries() {
        let words = pool(60);
        let game = generate("g", state(8, 60), GameOptions::with_teams(2), &clock()).unwrap();
        let distinct: HashSet<_> = game.words.iter().collect();
        assert_eq!(distinct.len(), 25);
        assert!(game.words.iter().all(|w| words.contains(w)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate("a", state(1234, 100), GameOptions::default(), &clock()).unwrap();
        let b = generate("b", state(1234, 100), GameOptions::default(), &clock()).unwrap();

        assert_eq!(a.words, b.words);
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.teams, b.teams);
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate("a", state(1, 100), GameOptions::default(), &clock()).unwrap();
        let b = generate("b", state(2, 100), GameOptions::default(), &clock()).unwrap();
        assert_ne!(a.words, b.words);
    }

    #[test]
    fn test_lineage_does_not_repeat_words() {
        let mut seeds = DeterministicSeeds::new(0);
        let first_state = state(77, 100);
        let second_state = advance(&first_state, &mut seeds);
        assert_eq!(second_state.seed, 77);

        let first = generate("g", first_state, GameOptions::default(), &clock()).unwrap();
        let second = generate("g", second_state, GameOptions::default(), &clock()).unwrap();

        let seen: HashSet<_> = first.words.iter().collect();
        assert!(second.words.iter().all(|w| !seen.contains(w)));
        assert_ne!(first.layout, second.layout);
    }

    #[test]
    fn test_invalid_team_count() {
        for teams in [0, 1, 5] {
            let err = generate("g", state(1, 200), GameOptions::with_teams(teams), &clock()).unwrap_err();
            assert_eq!(err, GameError::InvalidOptions { teams });
        }
    }

    #[test]
    fn test_insufficient_word_pool() {
        let err = generate("g", state(1, 24), GameOptions::default(), &clock()).unwrap_err();
        assert_eq!(err, GameError::InsufficientWordPool { needed: 25, available: 24 });

        let mut s = state(1, 40);
        s.perm_index = 25;
        let err = generate("g", s, GameOptions::default(), &clock()).unwrap_err();
        assert_eq!(err, GameError::InsufficientWordPool { needed: 50, available: 40 });

        // Three teams need 36 words
        let err = generate("g", state(1, 30), GameOptions::with_teams(3), &clock()).unwrap_err();
        assert_eq!(err, GameError::InsufficientWordPool { needed: 36, available: 30 });
    }

    #[test]
    fn test_huge_cursor_is_an_error() {
        let mut s = state(1, 100);
        s.perm_index = usize::MAX - 3;

        let err = generate("g", s, GameOptions::default(), &clock()).unwrap_err();
        assert_eq!(err, GameError::InsufficientWordPool { needed: usize::MAX, available: 100 });
    }

    #[test]
    fn test_exact_pool_is_enough() {
        assert!(generate("g", state(5, 25), GameOptions::default(), &clock()).is_ok());
    }

    #[test]
    fn test_timestamps_from_clock() {
        let clock = clock();
        let game = generate("g", state(5, 30), GameOptions::default(), &clock).unwrap();
        assert_eq!(game.created_at, clock.now());
        assert_eq!(game.updated_at, clock.now());
        assert_eq!(game.round_started_at, Some(clock.now()));
    }
}
