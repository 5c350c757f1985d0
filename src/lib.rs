//! # Codenames Rules Engine
//!
//! Deterministic rules for a word-guessing board game played by two to
//! four teams.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   CODENAMES ENGINE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Xorshift128+ PRNG, layout seed derivation │
//! │  ├── hash.rs     - State hashing for verification            │
//! │  └── clock.rs    - Injected clock and seed sources           │
//! │                                                              │
//! │  game/           - Rules (deterministic)                     │
//! │  ├── team.rs     - Team colors                               │
//! │  ├── options.rs  - Options and board sizing                  │
//! │  ├── state.rs    - Round snapshot and transition             │
//! │  ├── round.rs    - Playable game                             │
//! │  ├── board.rs    - Board generation                          │
//! │  ├── turn.rs     - Guess resolution                          │
//! │  └── events.rs   - Events for hosts                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Board generation reads no global state:
//! - All randomness from seeded Xorshift128+ streams
//! - Time only through the injected [`Clock`](crate::core::Clock)
//! - Fresh seeds only through the injected [`SeedSource`](crate::core::SeedSource)
//!
//! The same seed, cursor and team count produce the same board on any
//! platform. Hosts serialize all calls against a given [`Game`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use crate::core::clock::{Clock, SystemClock, SeedSource, UuidSeedSource};
pub use game::{
    Team, GameOptions, GameState, Game, GameError, GameEvent, GameEventData,
    generate, advance,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
