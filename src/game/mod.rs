//! Game Logic Module
//!
//! All rules code. 100% deterministic given the injected clock and seeds.
//!
//! ## Module Structure
//!
//! - `team`: Team colors and their wire names
//! - `options`: Game options and board sizing
//! - `state`: Resumable round snapshot, round transition, errors
//! - `round`: The playable `Game`
//! - `board`: Board generation
//! - `turn`: Guess resolution and turn rotation
//! - `events`: Game events for hosts

pub mod team;
pub mod options;
pub mod state;
pub mod round;
pub mod board;
pub mod turn;
pub mod events;

// Re-export key types
pub use team::Team;
pub use options::{GameOptions, BoardLayout};
pub use state::{GameState, GameError, Result, advance};
pub use round::Game;
pub use board::generate;
pub use events::{GameEvent, GameEventData};
