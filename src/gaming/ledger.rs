//! Wagers currently on the table, one amount per bet

use std::collections::HashMap;

use super::craps_rules::BetType;
use crate::error::{Error, Result};

/// Largest wager one bet may carry, in cents ($1,000,000)
pub const MAX_WAGER: u64 = 100_000_000;

/// Amounts in cents keyed by bet. Zero amounts are never stored.
#[derive(Debug, Clone, Default)]
pub struct BetLedger {
    bets: HashMap<BetType, u64>,
    resolving: bool,
}

impl BetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the wager on `bet`, returning the new total.
    ///
    /// The total may not exceed [`MAX_WAGER`]; a refused add leaves the
    /// ledger untouched.
    pub fn add_bet(&mut self, bet: BetType, amount: u64) -> Result<u64> {
        if amount == 0 {
            return Err(Error::InvalidAmount(amount));
        }
        let total = self
            .get(bet)
            .checked_add(amount)
            .filter(|total| *total <= MAX_WAGER)
            .ok_or(Error::InvalidAmount(amount))?;
        self.bets.insert(bet, total);
        Ok(total)
    }

    /// Current wager on `bet`, 0 when nothing is down
    pub fn get(&self, bet: BetType) -> u64 {
        self.bets.get(&bet).copied().unwrap_or(0)
    }

    /// Take the wager down. Clearing an absent bet is a no-op.
    pub fn clear_bet(&mut self, bet: BetType) -> Option<u64> {
        self.bets.remove(&bet)
    }

    /// Open bets in catalog order
    pub fn snapshot(&self) -> Vec<(BetType, u64)> {
        let mut bets: Vec<_> = self.bets.iter().map(|(bet, amount)| (*bet, *amount)).collect();
        bets.sort_by_key(|(bet, _)| *bet);
        bets
    }

    pub fn total_wagered(&self) -> u64 {
        self.bets.values().sum()
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    pub fn begin_resolution(&mut self) {
        self.resolving = true;
    }

    pub fn end_resolution(&mut self) {
        self.resolving = false;
    }

    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// Remove every wager when the table is cleared. Refused while a roll is
    /// being resolved.
    pub fn reset(&mut self) -> Result<Vec<(BetType, u64)>> {
        if self.resolving {
            return Err(Error::LedgerBusy);
        }
        let cleared = self.snapshot();
        self.bets.clear();
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewager_accumulates() {
        let mut ledger = BetLedger::new();
        assert_eq!(ledger.add_bet(BetType::Field, 500).unwrap(), 500);
        assert_eq!(ledger.add_bet(BetType::Field, 2500).unwrap(), 3000);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(BetType::Field), 3000);
    }

    #[test]
    fn test_zero_wager_rejected() {
        let mut ledger = BetLedger::new();
        assert!(matches!(ledger.add_bet(BetType::Come, 0), Err(Error::InvalidAmount(0))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_wager_ceiling() {
        let mut ledger = BetLedger::new();
        assert_eq!(ledger.add_bet(BetType::Field, MAX_WAGER - 100).unwrap(), MAX_WAGER - 100);
        assert_eq!(ledger.add_bet(BetType::Field, 100).unwrap(), MAX_WAGER);
        assert!(matches!(ledger.add_bet(BetType::Field, 100), Err(Error::InvalidAmount(100))));
        assert!(matches!(
            ledger.add_bet(BetType::Field, u64::MAX),
            Err(Error::InvalidAmount(u64::MAX))
        ));
        assert_eq!(ledger.get(BetType::Field), MAX_WAGER);

        assert!(matches!(
            ledger.add_bet(BetType::Come, u64::MAX),
            Err(Error::InvalidAmount(u64::MAX))
        ));
        assert_eq!(ledger.get(BetType::Come), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_clear_removes_entry() {
        let mut ledger = BetLedger::new();
        ledger.add_bet(BetType::Hard8, 100).unwrap();
        assert_eq!(ledger.clear_bet(BetType::Hard8), Some(100));
        assert_eq!(ledger.get(BetType::Hard8), 0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.clear_bet(BetType::Hard8), None);
    }

    #[test]
    fn test_snapshot_in_catalog_order() {
        let mut ledger = BetLedger::new();
        ledger.add_bet(BetType::AnyCraps, 100).unwrap();
        ledger.add_bet(BetType::PassLine, 500).unwrap();
        ledger.add_bet(BetType::Place8, 600).unwrap();
        let order: Vec<_> = ledger.snapshot().into_iter().map(|(bet, _)| bet).collect();
        assert_eq!(order, vec![BetType::PassLine, BetType::Place8, BetType::AnyCraps]);
        assert_eq!(ledger.total_wagered(), 1200);
    }

    #[test]
    fn test_reset_refused_mid_resolution() {
        let mut ledger = BetLedger::new();
        ledger.add_bet(BetType::PassLine, 100).unwrap();
        ledger.begin_resolution();
        assert!(matches!(ledger.reset(), Err(Error::LedgerBusy)));
        ledger.end_resolution();
        assert_eq!(ledger.reset().unwrap(), vec![(BetType::PassLine, 100)]);
        assert!(ledger.is_empty());
    }
}
