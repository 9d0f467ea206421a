use crate::errors::GameError;
use dashmap::DashMap;

/// Ledger of free replays owed to players.
///
/// Credits are fungible and never expire; each grant adds one and each
/// consume takes one.
#[derive(Debug, Default)]
pub struct BonusRegistry {
    credits: DashMap<String, u32>,
}

impl BonusRegistry {
    /// Create an empty bonus ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Owe the player one more free replay. Returns the new balance.
    pub fn grant(&self, player_id: &str) -> u32 {
        let mut entry = self.credits.entry(player_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    /// Spend one free replay. Returns the remaining balance.
    pub fn consume(&self, player_id: &str) -> Result<u32, GameError> {
        // get_mut holds the shard lock across check and decrement
        match self.credits.get_mut(player_id) {
            Some(mut credits) if *credits > 0 => {
                *credits -= 1;
                Ok(*credits)
            }
            _ => Err(GameError::NoBonusAvailable(player_id.to_string())),
        }
    }

    /// Credits currently owed to the player
    pub fn available(&self, player_id: &str) -> u32 {
        self.credits.get(player_id).map(|c| *c).unwrap_or(0)
    }

    /// Credits owed across all players
    pub fn total_outstanding(&self) -> u64 {
        self.credits.iter().map(|entry| u64::from(*entry.value())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_consume_without_grant_fails() {
        let registry = BonusRegistry::new();
        match registry.consume("p1") {
            Err(GameError::NoBonusAvailable(player)) => assert_eq!(player, "p1"),
            other => panic!("Expected NoBonusAvailable, got {:?}", other),
        }
        assert_eq!(registry.available("p1"), 0);
    }

    #[test]
    fn test_grants_accumulate_and_drain() {
        let registry = BonusRegistry::new();
        assert_eq!(registry.grant("p1"), 1);
        assert_eq!(registry.grant("p1"), 2);
        assert_eq!(registry.grant("p2"), 1);
        assert_eq!(registry.total_outstanding(), 3);

        assert_eq!(registry.consume("p1").unwrap(), 1);
        assert_eq!(registry.consume("p1").unwrap(), 0);
        assert!(registry.consume("p1").is_err());
        assert_eq!(registry.available("p1"), 0);
        assert_eq!(registry.available("p2"), 1);
    }

    #[test]
    fn test_concurrent_consume_never_goes_negative() {
        let registry = Arc::new(BonusRegistry::new());
        for _ in 0..10 {
            registry.grant("shared");
        }

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.consume("shared").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 10);
        assert_eq!(registry.available("shared"), 0);
    }
}
