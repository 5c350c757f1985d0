//! Codenames Rules Engine Demo
//!
//! Plays a short seeded lineage with scripted guesses and verifies that
//! replaying a round reproduces it exactly.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use codenames::{
    VERSION, Game, GameEventData, GameOptions, GameState, SystemClock,
    DeterministicRng, generate, advance,
    core::clock::DeterministicSeeds,
};

const DEMO_WORDS: &str = "\
    anchor apple arrow atlas bakery band bank bark bat battery beach bear bell \
    berry board bolt bomb bond boot bottle bow box bridge brush buck buffalo \
    bug button calf canada capital car card carrot casino cast cat cell \
    centaur center chair change charge check chest chick china chocolate \
    church circle cliff cloak club code cold comic compound concert conductor \
    contract cook copper cotton court cover crane crash cricket cross crown \
    cycle czech dance date day death deck degree diamond dice dinosaur disease \
    doctor dog draft dragon dress drill drop duck dwarf eagle egypt embassy \
    engine england europe eye face fair fall fan fence field fighter figure \
    file film fire fish flute fly foot force forest fork france game gas \
    genius germany ghost giant glass glove gold grace grass greece green \
    ground ham hand hawk head heart helicopter himalayas hole hollywood honey \
    hood hook horn horse horseshoe hospital hotel ice iron ivory jack jam jet";

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Codenames Engine v{}", VERSION);

    let words: Vec<String> = DEMO_WORDS.split_whitespace().map(String::from).collect();
    info!("Word pool: {} words", words.len());

    demo_lineage(words)
}

/// Play a few rounds of one lineage, then replay the first.
fn demo_lineage(words: Vec<String>) -> Result<()> {
    let clock = SystemClock;
    let mut seeds = DeterministicSeeds::new(12345);
    let options = GameOptions::with_teams(3);
    let cells = options.layout()?.cells;

    let first_state = GameState::random(words, cells, &mut seeds);
    let mut state = first_state.clone();
    let mut first_round: Option<(Vec<usize>, Game)> = None;

    for round in 1..=4 {
        info!("=== Round {} (seed {}, cursor {}) ===", round, state.seed, state.perm_index);

        let mut game = generate(format!("demo-{round}"), state.clone(), options.clone(), &clock)?;
        let guesses = play_round(&mut game, round)?;

        for (team, score) in game.team_scores() {
            info!("{}: {} points", team, score);
        }
        info!("Final State Hash: {}", hex::encode(game.compute_hash()));
        info!("Snapshot: {} bytes of JSON", serde_json::to_vec(&game)?.len());

        if first_round.is_none() {
            first_round = Some((guesses, game));
        }
        state = advance(&state, &mut seeds);
    }

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    if let Some((guesses, original)) = first_round {
        let mut replay = generate("demo-replay", first_state, options, &clock)?;
        for index in guesses {
            replay.guess(index, &clock)?;
        }

        let (expected, actual) = (original.compute_hash(), replay.compute_hash());
        info!("Replay State Hash: {}", hex::encode(actual));

        if expected == actual {
            info!("DETERMINISM VERIFIED: Hashes match!");
        } else {
            info!("DETERMINISM FAILURE: Hashes differ!");
        }
    }

    Ok(())
}

/// Guess random unrevealed cells until the round is decided.
///
/// Returns the guessed indices in order.
fn play_round(game: &mut Game, round: u64) -> Result<Vec<usize>> {
    let mut picker = DeterministicRng::new(round);
    let mut guesses = Vec::new();

    while !game.is_finished() {
        let hidden: Vec<usize> = (0..game.cells()).filter(|&i| !game.is_revealed(i)).collect();
        if hidden.is_empty() {
            break;
        }
        let index = hidden[picker.next_index(hidden.len())];

        game.guess(index, &SystemClock)?;
        guesses.push(index);

        for event in game.take_events() {
            match event.data {
                GameEventData::TeamEliminated { team } => {
                    info!("Team {} eliminated on turn {}", team, event.round);
                }
                GameEventData::TeamWon { team, rank } => {
                    info!("Team {} finished #{} on turn {}", team, rank + 1, event.round);
                }
                _ => {}
            }
        }
    }

    info!(
        "Round over after {} guesses: winners {:?}, losers {:?}, still playing {:?}",
        guesses.len(),
        game.winners,
        game.losers,
        game.order,
    );
    Ok(guesses)
}
