//! Wagers on the table
//!
//! The bet manager is the only owner of the ledger. It places chips on bet
//! regions, keeps one chip stack per open wager, and settles every wager when
//! the dice land.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::Result;
use crate::gaming::{settle, BetLedger, BetResult, BetType, DiceRoll, RollOutcome};
use crate::ui::component::{Component, NodeContext, NodeId};
use crate::ui::events::{BetNotice, BetOutcome, BetsCleared, PointerKind, RollSummary, TableEvent};
use crate::ui::widgets::format_cents;

use super::chips::ChipStack;
use super::layout::TableLayout;

pub struct BetManager {
    ledger: BetLedger,
    stacks: HashMap<BetType, NodeId>,
    layout: TableLayout,
    denominations: Vec<u64>,
    selected_chip: u64,
}

impl BetManager {
    pub fn new(layout: TableLayout, denominations: &[u64]) -> Self {
        Self {
            ledger: BetLedger::new(),
            stacks: HashMap::new(),
            layout,
            denominations: denominations.to_vec(),
            selected_chip: denominations.iter().copied().min().unwrap_or(0),
        }
    }

    /// Replace the stack for `bet` with one matching the ledger.
    fn restack(&mut self, ctx: &mut NodeContext<'_>, bet: BetType) -> Result<()> {
        if let Some(old) = self.stacks.remove(&bet) {
            ctx.destroy(old);
        }

        let amount = self.ledger.get(bet);
        if amount == 0 {
            return Ok(());
        }
        if let Some(anchor) = self.layout.bet_anchor(bet) {
            let base = self.layout.chip_rect(anchor);
            let (_, chip_height) = self.layout.chip_size();
            let rect = ChipStack::rect_for(amount, &self.denominations, base);
            let id = ctx.spawn(rect, ChipStack::new(bet, amount, &self.denominations, chip_height))?;
            self.stacks.insert(bet, id);
        }
        Ok(())
    }

    fn publish(&self, ctx: &mut NodeContext<'_>) {
        ctx.state_mut().set_wagers(self.ledger.snapshot());
    }

    fn settle_roll(&mut self, ctx: &mut NodeContext<'_>, roll: &DiceRoll) -> Result<()> {
        let point_before = ctx.state().point.point_before(roll);
        let settlement = settle(&mut self.ledger, roll, point_before);

        for bet in &settlement.bets {
            let outcome = BetOutcome {
                roll: *roll,
                bet: bet.bet,
                bet_amount: bet.amount,
                payout: bet.payout,
            };
            let event = match bet.result {
                BetResult::Win => TableEvent::BetWin(outcome),
                BetResult::Lose => {
                    self.restack(ctx, bet.bet)?;
                    TableEvent::BetLose(outcome)
                }
                BetResult::Push => TableEvent::BetPush(outcome),
            };
            ctx.emit(event);
        }

        let summary = RollSummary {
            roll: *roll,
            net_amount: settlement.net_amount(),
        };
        info!(
            total = roll.total(),
            point = %point_before,
            bets = settlement.bets.len(),
            net = %format_cents(settlement.net),
            "roll settled"
        );
        ctx.emit(match settlement.outcome() {
            RollOutcome::Win => TableEvent::OverallWin(summary),
            RollOutcome::Lose => TableEvent::OverallLose(summary),
            RollOutcome::Push => TableEvent::OverallPush(summary),
        });

        self.publish(ctx);
        Ok(())
    }

    /// Take every wager down and hand the chips back.
    fn clear(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        let cleared = self.ledger.reset()?;
        if cleared.is_empty() {
            debug!("clear requested on an empty table");
            return Ok(());
        }
        for (bet, _) in &cleared {
            self.restack(ctx, *bet)?;
        }
        self.publish(ctx);

        let returned: u64 = cleared.iter().map(|(_, amount)| amount).sum();
        info!(bets = cleared.len(), returned = %format_cents(returned as i64), "table cleared");
        ctx.emit(TableEvent::BetsCleared(BetsCleared {
            bets: cleared.len(),
            returned,
        }));
        Ok(())
    }
}

impl Component for BetManager {
    fn name(&self) -> &'static str {
        "bet_manager"
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        match event {
            TableEvent::BetRegionHit(hit) => match hit.kind {
                PointerKind::Motion => ctx.emit(TableEvent::BetHovered(BetNotice {
                    bet: hit.bet,
                    current_amount: self.ledger.get(hit.bet),
                    amount_added: 0,
                    screen_pos: hit.screen_pos,
                })),
                PointerKind::Down => {
                    let added = self.selected_chip;
                    let current_amount = self.ledger.add_bet(hit.bet, added)?;
                    self.restack(ctx, hit.bet)?;
                    self.publish(ctx);
                    ctx.emit(TableEvent::BetPlaced(BetNotice {
                        bet: hit.bet,
                        current_amount,
                        amount_added: added,
                        screen_pos: hit.screen_pos,
                    }));
                }
            },
            TableEvent::ChipSelected(notice) => self.selected_chip = notice.selected_chip,
            TableEvent::ClearRequested => self.clear(ctx)?,
            TableEvent::DiceRolled(rolled) => self.settle_roll(ctx, &rolled.roll)?,
            _ => {}
        }
        Ok(())
    }
}
