//! Player bank
//!
//! Money leaves the bank when a wager is placed and comes back as winnings
//! or when the table is cleared; a winning wager itself stays on the table.
//! A losing wager is released from the on-table total.

use serde::Serialize;

use crate::error::Result;
use crate::ui::component::{Component, NodeContext, NodeId, Rect};
use crate::ui::events::TableEvent;
use crate::ui::widgets::format_cents;

use super::tooltip::ToolTip;

/// Bank figures in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BankStatus {
    pub bank: i64,
    pub on_table: u64,
    /// Net of the last roll, negative for a loss
    pub last_win: i64,
}

impl BankStatus {
    pub fn new(bank: i64) -> Self {
        Self {
            bank,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            "Welcome to Craps!".to_string(),
            format!("Bank: {}", format_cents(self.bank)),
            format!("Betting: {}", format_cents(self.on_table as i64)),
            format!("Last Win: {}", format_cents(self.last_win)),
        ]
    }
}

pub struct MoneyManager {
    status: BankStatus,
    panel_rect: Rect,
    panel: Option<NodeId>,
}

impl MoneyManager {
    pub fn new(starting_bank: i64, panel_rect: Rect) -> Self {
        Self {
            status: BankStatus::new(starting_bank),
            panel_rect,
            panel: None,
        }
    }

    fn refresh(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        ctx.state_mut().set_bank(self.status);
        if let Some(old) = self.panel.take() {
            ctx.destroy(old);
        }
        self.panel = Some(ctx.spawn(self.panel_rect, ToolTip::new(self.status.lines()))?);
        Ok(())
    }
}

impl Component for MoneyManager {
    fn name(&self) -> &'static str {
        "money_manager"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        self.refresh(ctx)
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        let status = &mut self.status;
        match event {
            TableEvent::BetPlaced(notice) => {
                status.bank -= notice.amount_added as i64;
                status.on_table += notice.amount_added;
            }
            TableEvent::BetWin(outcome) => status.bank += outcome.payout as i64,
            TableEvent::BetLose(outcome) => {
                status.on_table = status.on_table.saturating_sub(outcome.bet_amount);
            }
            TableEvent::BetsCleared(cleared) => {
                status.bank += cleared.returned as i64;
                status.on_table = status.on_table.saturating_sub(cleared.returned);
            }
            TableEvent::OverallWin(summary) => status.last_win = summary.net_amount as i64,
            TableEvent::OverallLose(summary) => status.last_win = -(summary.net_amount as i64),
            TableEvent::OverallPush(_) => status.last_win = 0,
            _ => return Ok(()),
        }
        self.refresh(ctx)
    }
}
