use std::sync::{PoisonError, RwLock};

/// Shared pot fed by every wager and paid out whole on a win
#[derive(Debug, Default)]
pub struct JackpotAccumulator {
    value: RwLock<f64>,
}

impl JackpotAccumulator {
    /// Create an empty jackpot
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wager to the pot. Negative or non-finite amounts are ignored.
    pub fn add(&self, amount: f64) {
        if !amount.is_finite() || amount < 0.0 {
            tracing::warn!(amount, "Rejected invalid jackpot contribution");
            return;
        }

        let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
        *value += amount;
    }

    /// Take the whole pot, leaving zero behind.
    ///
    /// Read and reset happen under one write lock, so a given contribution
    /// can only ever be redeemed once.
    pub fn redeem(&self) -> f64 {
        let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *value)
    }

    /// Snapshot of the pot, for diagnostics only
    pub fn current(&self) -> f64 {
        *self.value.read().unwrap_or_else(PoisonError::into_inner)
    }
}
