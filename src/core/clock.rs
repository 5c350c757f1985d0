//! Injected wall clock and seed sources.
//!
//! The rules engine never reads system time or global randomness itself;
//! hosts hand in a [`Clock`] for timestamps and a [`SeedSource`] for
//! fresh lineage seeds.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

use super::rng::DeterministicRng;

/// Seeds are kept in the non-negative 63-bit range.
pub const SEED_MASK: u64 = i64::MAX as u64;

/// Wall-clock reader used to stamp games.
pub trait Clock {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Useful for replays and tests where timestamps must be reproducible.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Supplier of fresh lineage seeds.
pub trait SeedSource {
    /// Next seed, in the 63-bit range.
    fn next_seed(&mut self) -> u64;
}

/// Fresh seeds from random (v4) UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidSeedSource;

impl SeedSource for UuidSeedSource {
    fn next_seed(&mut self) -> u64 {
        let uuid = uuid::Uuid::new_v4();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&uuid.as_bytes()[..8]);
        u64::from_le_bytes(bytes) & SEED_MASK
    }
}

/// Reproducible seed sequence driven by a [`DeterministicRng`].
#[derive(Clone, Debug)]
pub struct DeterministicSeeds {
    rng: DeterministicRng,
}

impl DeterministicSeeds {
    /// Create a sequence from a master seed.
    pub fn new(master: u64) -> Self {
        Self { rng: DeterministicRng::new(master) }
    }
}

impl SeedSource for DeterministicSeeds {
    fn next_seed(&mut self) -> u64 {
        self.rng.next_u64() & SEED_MASK
    }
}
