//! Chips, chip stacks and the chip tray

use tracing::debug;

use crate::error::Result;
use crate::gaming::BetType;
use crate::ui::component::{Component, NodeContext, NodeId, Rect};
use crate::ui::events::{ChipNotice, ChipTrayHit, PointerKind, TableEvent};
use crate::ui::widgets::Widget;

/// Greedy breakdown of `amount` into chips, largest first.
///
/// Any remainder smaller than the smallest denomination is dropped.
pub fn chip_breakdown(amount: u64, denominations: &[u64]) -> Vec<u64> {
    let mut sorted: Vec<u64> = denominations.iter().copied().filter(|d| *d > 0).collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut remaining = amount;
    let mut chips = Vec::new();
    for denomination in sorted {
        let count = remaining / denomination;
        remaining %= denomination;
        chips.extend(std::iter::repeat_n(denomination, count as usize));
    }
    chips
}

/// Slot under relative x position `x` in a tray `width` wide with `slots` chips
pub fn tray_slot(x: i32, width: i32, slots: usize) -> usize {
    if width <= 0 || slots == 0 {
        return 0;
    }
    let slot = (x.max(0) as i64 * slots as i64 / width as i64) as usize;
    slot.min(slots - 1)
}

/// Relative x at the middle of `slot`
pub fn tray_slot_center(slot: usize, width: i32, slots: usize) -> i32 {
    let slots = slots.max(1) as i64;
    ((2 * slot as i64 + 1) * width as i64 / (2 * slots)) as i32
}

pub struct Chip {
    denomination: u64,
    selected: bool,
}

impl Chip {
    pub fn new(denomination: u64) -> Self {
        Self {
            denomination,
            selected: false,
        }
    }

    pub fn selected(denomination: u64) -> Self {
        Self {
            denomination,
            selected: true,
        }
    }
}

impl Component for Chip {
    fn name(&self) -> &'static str {
        "chip"
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::Chip {
            denomination: self.denomination,
            selected: self.selected,
        })
    }
}

/// The chips making up one wager, stacked upward from the bottom of the rect
pub struct ChipStack {
    bet: BetType,
    amount: u64,
    denominations: Vec<u64>,
    chip_height: i32,
}

impl ChipStack {
    pub fn new(bet: BetType, amount: u64, denominations: &[u64], chip_height: i32) -> Self {
        Self {
            bet,
            amount,
            denominations: denominations.to_vec(),
            chip_height: chip_height.max(1),
        }
    }

    /// Rect for a stack of `amount` whose bottom chip is centred on `anchor`
    pub fn rect_for(amount: u64, denominations: &[u64], anchor_rect: Rect) -> Rect {
        let chips = chip_breakdown(amount, denominations).len().max(1) as i32;
        let height = anchor_rect.height.max(1) * chips;
        Rect::new(anchor_rect.x, anchor_rect.bottom() - height, anchor_rect.width, height)
    }
}

impl Component for ChipStack {
    fn name(&self) -> &'static str {
        "chip_stack"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        let rect = ctx.rect();
        for (index, denomination) in chip_breakdown(self.amount, &self.denominations).into_iter().enumerate() {
            let y = rect.bottom() - self.chip_height * (index as i32 + 1);
            ctx.spawn(Rect::new(rect.x, y, rect.width, self.chip_height), Chip::new(denomination))?;
        }
        Ok(())
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::ChipStack {
            bet: self.bet,
            amount: self.amount,
        })
    }
}

/// Row of selectable chips; reports which slot the pointer is over
pub struct ChipTray {
    denominations: Vec<u64>,
    selected: u64,
    chip_width: i32,
    chips: Vec<NodeId>,
}

impl ChipTray {
    pub fn new(denominations: &[u64], selected: u64, chip_width: i32) -> Self {
        Self {
            denominations: denominations.to_vec(),
            selected,
            chip_width,
            chips: Vec::new(),
        }
    }

    fn build_chips(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        for id in self.chips.drain(..) {
            ctx.destroy(id);
        }

        let rect = ctx.rect();
        let slots = self.denominations.len();
        let width = self.chip_width.min(rect.width / slots.max(1) as i32).max(1);
        for (slot, denomination) in self.denominations.iter().enumerate() {
            let center = rect.x + tray_slot_center(slot, rect.width, slots);
            let chip_rect = Rect::new(center - width / 2, rect.center().y, width, 1);
            let chip = if *denomination == self.selected {
                Chip::selected(*denomination)
            } else {
                Chip::new(*denomination)
            };
            self.chips.push(ctx.spawn(chip_rect, chip)?);
        }
        Ok(())
    }
}

impl Component for ChipTray {
    fn name(&self) -> &'static str {
        "chip_tray"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        self.build_chips(ctx)
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        match event {
            TableEvent::PointerInNode(pointer) if pointer.node == ctx.id() => {
                let slot = tray_slot(pointer.pos.x, ctx.rect().width, self.denominations.len());
                if let Some(denomination) = self.denominations.get(slot) {
                    ctx.emit(TableEvent::ChipTrayHit(ChipTrayHit {
                        kind: pointer.kind,
                        pos: pointer.pos,
                        screen_pos: pointer.screen_pos,
                        selected_chip: *denomination,
                    }));
                }
            }
            TableEvent::ChipSelected(notice) if notice.selected_chip != self.selected => {
                self.selected = notice.selected_chip;
                self.build_chips(ctx)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::ChipTray {
            denominations: self.denominations.clone(),
            selected: self.selected,
        })
    }
}

/// Owns the tray and the currently selected denomination
pub struct ChipTrayManager {
    denominations: Vec<u64>,
    selected: u64,
    tray_rect: Rect,
    chip_width: i32,
}

impl ChipTrayManager {
    /// The smallest denomination starts selected.
    pub fn new(denominations: &[u64], tray_rect: Rect, chip_width: i32) -> Self {
        let selected = denominations.iter().copied().min().unwrap_or(0);
        Self {
            denominations: denominations.to_vec(),
            selected,
            tray_rect,
            chip_width,
        }
    }
}

impl Component for ChipTrayManager {
    fn name(&self) -> &'static str {
        "chip_tray_manager"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        ctx.spawn(
            self.tray_rect,
            ChipTray::new(&self.denominations, self.selected, self.chip_width),
        )?;
        Ok(())
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        if let TableEvent::ChipTrayHit(hit) = event {
            let notice = |current_chip| ChipNotice {
                current_chip,
                selected_chip: hit.selected_chip,
                screen_pos: hit.screen_pos,
            };
            match hit.kind {
                PointerKind::Motion => ctx.emit(TableEvent::ChipHovered(notice(self.selected))),
                PointerKind::Down => {
                    self.selected = hit.selected_chip;
                    debug!(chip = self.selected, "chip selected");
                    ctx.emit(TableEvent::ChipSelected(notice(self.selected)));
                }
            }
        }
        Ok(())
    }
}
