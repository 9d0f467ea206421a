use crate::errors::GameError;
use crate::games::types::LuckyPair;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{PoisonError, RwLock};
use tokio::time::Instant;

/// Reference capacity of the lucky pair supply
pub const DEFAULT_SUPPLY_CAPACITY: usize = 100;

/// Fixed-capacity LIFO stack of lucky pairs shared by all bets.
///
/// Draw order does not matter for fairness since every value is uniformly
/// random, so a stack with a single top index is enough. The whole store is
/// guarded by one lock; every mutation is a short exclusive section.
pub struct DrawSupply {
    inner: RwLock<SupplyState>,
    capacity: usize,
}

struct SupplyState {
    pairs: Vec<LuckyPair>,
    rng: StdRng,
    last_pop: Instant,
}

impl DrawSupply {
    /// Create an empty supply with an entropy-seeded random source
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Create an empty supply with a deterministic random source
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    /// Create an empty supply around the given random source
    fn with_rng(capacity: usize, rng: StdRng) -> Self {
        Self {
            inner: RwLock::new(SupplyState {
                pairs: Vec::with_capacity(capacity),
                rng,
                last_pop: Instant::now(),
            }),
            capacity,
        }
    }

    /// Push a pair on top of the stack
    pub fn push(&self, pair: LuckyPair) -> Result<(), GameError> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if state.pairs.len() >= self.capacity {
            return Err(GameError::SupplyFull {
                capacity: self.capacity,
            });
        }
        state.pairs.push(pair);
        Ok(())
    }

    /// Draw the most recently pushed pair, recording the draw time on success
    pub fn pop(&self) -> Result<LuckyPair, GameError> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let pair = state.pairs.pop().ok_or(GameError::SupplyEmpty)?;
        state.last_pop = Instant::now();
        Ok(pair)
    }

    /// Top the supply up to capacity with uniformly random pairs.
    ///
    /// Returns the number of pairs added.
    pub fn fill_up(&self) -> usize {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let missing = self.capacity.saturating_sub(state.pairs.len());
        for _ in 0..missing {
            let pair = LuckyPair(state.rng.gen::<u16>());
            state.pairs.push(pair);
        }
        missing
    }

    /// Time of the last successful pop, or construction time if none yet
    pub fn time_of_last_pop(&self) -> Instant {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).last_pop
    }

    /// Number of pairs currently available to draw
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).pairs.len()
    }

    /// True when the next pop would fail
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of pairs the supply holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DrawSupply {
    /// Create an empty supply with the reference capacity
    fn default() -> Self {
        Self::new(DEFAULT_SUPPLY_CAPACITY)
    }
}
