//! End-to-end lineage tests through the public API.
//!
//! These play whole rounds, persist them through the wire format and chain
//! rounds with `advance`.

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use codenames::core::clock::{DeterministicSeeds, ManualClock};
use codenames::{advance, generate, DeterministicRng, Game, GameError, GameOptions, GameState, Team};

fn pool(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("word-{i}")).collect()
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.timestamp_opt(1_650_000_000, 0).unwrap())
}

/// Guess random hidden cells until the round is finished.
fn play_out(game: &mut Game, clock: &ManualClock, seed: u64) -> Vec<usize> {
    let mut picker = DeterministicRng::new(seed);
    let mut guesses = Vec::new();
    while !game.is_finished() {
        let hidden: Vec<usize> = (0..game.cells()).filter(|&i| !game.is_revealed(i)).collect();
        let index = hidden[picker.next_index(hidden.len())];
        clock.advance(Duration::milliseconds(250));
        game.guess(index, clock).unwrap();
        guesses.push(index);
    }
    guesses
}

/// Test that whole rounds end in a valid partition for every team count.
#[test]
fn test_rounds_play_to_completion() {
    for teams in 2..=4 {
        for seed in 0..10 {
            let clock = clock();
            let opts = GameOptions::with_teams(teams);
            let cells = opts.layout().unwrap().cells;
            let mut game = generate("e2e", GameState::with_seed(seed, pool(300), cells), opts, &clock).unwrap();

            play_out(&mut game, &clock, seed);

            assert!(game.order.len() <= 1);
            let mut seen = HashSet::new();
            for team in game.order.iter().chain(&game.winners).chain(&game.losers) {
                assert!(seen.insert(*team), "team {team} appears twice");
            }
            assert_eq!(seen.len(), teams as usize);
            assert_eq!(game.winning_team, None);
            assert!(game.state.round > 0);
        }
    }
}

/// Test that replaying the same guesses reproduces the same game.
#[test]
fn test_replay_is_deterministic() {
    let opts = GameOptions::with_teams(4);
    let state = GameState::with_seed(2024, pool(300), 49);

    let clock_a = clock();
    let mut original = generate("a", state.clone(), opts.clone(), &clock_a).unwrap();
    let guesses = play_out(&mut original, &clock_a, 99);

    let clock_b = clock();
    let mut replay = generate("b", state, opts, &clock_b).unwrap();
    for index in guesses {
        replay.guess(index, &clock_b).unwrap();
    }

    assert_eq!(original.compute_hash(), replay.compute_hash());
    assert_eq!(original.winners, replay.winners);
    assert_eq!(original.losers, replay.losers);
}

/// Test that a game survives a JSON round trip mid-round and keeps playing.
#[test]
fn test_resume_from_snapshot() {
    let clock = clock();
    let opts = GameOptions::with_teams(3);
    let mut game = generate("snap", GameState::with_seed(5, pool(100), 36), opts, &clock).unwrap();

    let neutral = game.layout.iter().position(|&t| t == Team::Neutral).unwrap();
    clock.advance(Duration::seconds(1));
    game.guess(neutral, &clock).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let mut restored: Game = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.state_id(), game.state_id());
    assert_eq!(restored.compute_hash(), game.compute_hash());
    assert_eq!(restored.current_team(), game.current_team());

    play_out(&mut restored, &clock, 3);
    assert!(restored.is_finished());
}

/// Test that the latest snapshot of a game has the greatest state id.
#[test]
fn test_state_id_orders_snapshots() {
    let clock = clock();
    let mut game = generate("ids", GameState::with_seed(8, pool(100), 25), GameOptions::default(), &clock).unwrap();

    let mut ids = vec![game.state_id()];
    for _ in 0..5 {
        let hidden = (0..game.cells()).find(|&i| !game.is_revealed(i)).unwrap();
        clock.advance(Duration::nanoseconds(1));
        game.guess(hidden, &clock).unwrap();
        ids.push(game.state_id());
    }

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert!(ids.iter().all(|id| id.len() == 19));
}

/// Test that a lineage walks the whole pool before reseeding.
#[test]
fn test_lineage_walks_pool_then_reseeds() {
    let clock = clock();
    let mut seeds = DeterministicSeeds::new(11);
    let opts = GameOptions::default();
    let mut state = GameState::with_seed(500, pool(110), 25);
    let mut seen = HashSet::new();

    // Cursors 0, 25, 50, 75 share the seed; 100 + 25 >= 110 reseeds
    for expected_cursor in [0, 25, 50, 75] {
        assert_eq!(state.seed, 500);
        assert_eq!(state.perm_index, expected_cursor);

        let game = generate("lineage", state.clone(), opts.clone(), &clock).unwrap();
        for word in &game.words {
            assert!(seen.insert(word.clone()), "word {word} repeated within lineage");
        }
        state = advance(&state, &mut seeds);
    }

    assert_eq!(state.perm_index, 0);
    assert_ne!(state.seed, 500);
    assert!(generate("lineage", state, opts, &clock).is_ok());
}

/// Test that a stale cursor is reported instead of panicking.
#[test]
fn test_stale_cursor_is_an_error() {
    let mut state = GameState::with_seed(1, pool(60), 25);
    state.perm_index = 50;

    let err = generate("stale", state, GameOptions::default(), &clock()).unwrap_err();
    assert_eq!(err, GameError::InsufficientWordPool { needed: 75, available: 60 });
}
