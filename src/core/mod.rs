//! Core deterministic primitives.
//!
//! Seeded randomness, state hashing and the injected clock / seed
//! sources. Nothing here touches global state.

pub mod rng;
pub mod hash;
pub mod clock;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{StateHash, compute_state_hash};
pub use clock::{Clock, SystemClock, ManualClock, SeedSource, UuidSeedSource, DeterministicSeeds};
