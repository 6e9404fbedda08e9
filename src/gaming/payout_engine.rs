//! Payout engine - settles every open wager against one roll
//!
//! Wins are credited and the wager stays up; losses come off the ledger;
//! pushes leave the bet untouched. The aggregate is the sum of payouts minus
//! the sum of lost wagers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::craps_rules::{resolve, BetResult, BetType, DiceRoll, Payout};
use super::ledger::BetLedger;
use super::point::Point;

/// Result of one wager against one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSettlement {
    pub bet: BetType,
    /// Wager in cents at the time of the roll
    pub amount: u64,
    pub result: BetResult,
    pub ratio: Payout,
    /// Winnings in cents, 0 unless the bet won
    pub payout: u64,
}

/// Net direction of a whole roll for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    Win,
    Lose,
    Push,
}

/// Everything a roll did to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSettlement {
    pub roll: DiceRoll,
    pub point_before: Point,
    pub bets: Vec<BetSettlement>,
    /// Payouts minus lost wagers, in cents
    pub net: i64,
}

impl RollSettlement {
    pub fn outcome(&self) -> RollOutcome {
        match self.net {
            n if n > 0 => RollOutcome::Win,
            n if n < 0 => RollOutcome::Lose,
            _ => RollOutcome::Push,
        }
    }

    pub fn net_amount(&self) -> u64 {
        self.net.unsigned_abs()
    }

    pub fn total_paid(&self) -> u64 {
        self.bets.iter().map(|s| s.payout).sum()
    }

    pub fn total_lost(&self) -> u64 {
        self.bets
            .iter()
            .filter(|s| s.result == BetResult::Lose)
            .map(|s| s.amount)
            .sum()
    }
}

/// Settle all open bets in `ledger` against `roll`.
///
/// The set of bets is captured before the first resolution, so nothing added
/// while this roll's events are still in flight is judged against it.
pub fn settle(ledger: &mut BetLedger, roll: &DiceRoll, point_before: Point) -> RollSettlement {
    let open = ledger.snapshot();
    ledger.begin_resolution();

    let mut bets = Vec::with_capacity(open.len());
    let mut net: i64 = 0;

    for (bet, amount) in open {
        let resolution = resolve(bet, roll, point_before);
        let payout = match resolution.result {
            BetResult::Win => {
                let won = resolution.payout.calculate(amount);
                net += won as i64;
                won
            }
            BetResult::Lose => {
                ledger.clear_bet(bet);
                net -= amount as i64;
                0
            }
            BetResult::Push => 0,
        };

        debug!(
            bet = bet.name(),
            amount,
            result = ?resolution.result,
            ratio = %resolution.payout,
            payout,
            "bet resolved"
        );

        bets.push(BetSettlement {
            bet,
            amount,
            result: resolution.result,
            ratio: resolution.payout,
            payout,
        });
    }

    ledger.end_resolution();

    RollSettlement {
        roll: *roll,
        point_before,
        bets,
        net,
    }
}
