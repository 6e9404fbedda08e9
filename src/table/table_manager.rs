//! Region resolver
//!
//! The felt itself. Turns pointer input on the table into region hits, and
//! into bet-region hits where the region carries a bet.

use tracing::debug;

use crate::error::Result;
use crate::ui::component::{Component, NodeContext};
use crate::ui::events::{BetRegionHit, PointerKind, RegionHit, TableEvent};
use crate::ui::widgets::Widget;

use super::layout::{RegionLookup, RegionMap};

pub struct TableManager {
    lookup: Box<dyn RegionLookup>,
    regions: RegionMap,
}

impl TableManager {
    pub fn new(lookup: Box<dyn RegionLookup>, regions: RegionMap) -> Self {
        Self { lookup, regions }
    }
}

impl Component for TableManager {
    fn name(&self) -> &'static str {
        "table_manager"
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        let TableEvent::PointerInNode(pointer) = event else {
            return Ok(());
        };
        if pointer.node != ctx.id() {
            return Ok(());
        }

        let region = self.lookup.region_at(pointer.pos);
        let bet = self.regions.bet_for(region)?;
        if pointer.kind == PointerKind::Down {
            debug!(region = region.0, bet = ?bet, x = pointer.pos.x, y = pointer.pos.y, "table click");
        }

        ctx.emit(TableEvent::RegionHit(RegionHit {
            kind: pointer.kind,
            pos: pointer.pos,
            screen_pos: pointer.screen_pos,
            region,
        }));
        if let Some(bet) = bet {
            ctx.emit(TableEvent::BetRegionHit(BetRegionHit {
                kind: pointer.kind,
                pos: pointer.pos,
                screen_pos: pointer.screen_pos,
                region,
                bet,
            }));
        }
        Ok(())
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::Felt)
    }
}
