//! Hover tooltips
//!
//! At most one hover tooltip exists at a time. Moving over bare felt marks it
//! for removal; it is destroyed on the next update unless something else has
//! asked for a new one in between.

use std::time::Duration;

use crate::error::Result;
use crate::ui::component::{Component, NodeContext, NodeId, Pos, Rect};
use crate::ui::events::TableEvent;
use crate::ui::widgets::{chip_label, format_cents, Widget};

pub struct ToolTip {
    lines: Vec<String>,
}

impl ToolTip {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Width and height needed to show `lines` inside a border
    pub fn size(lines: &[String]) -> (i32, i32) {
        let widest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32;
        (widest + 4, lines.len() as i32 + 2)
    }
}

impl Component for ToolTip {
    fn name(&self) -> &'static str {
        "tooltip"
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::Tooltip {
            lines: self.lines.clone(),
        })
    }
}

pub struct ToolTipManager {
    bounds: Rect,
    hover: Option<NodeId>,
    clear: bool,
}

impl ToolTipManager {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            hover: None,
            clear: false,
        }
    }

    fn show(&mut self, ctx: &mut NodeContext<'_>, lines: Vec<String>, pos: Pos) -> Result<()> {
        self.clear = false;
        if let Some(old) = self.hover.take() {
            ctx.destroy(old);
        }

        let (width, height) = ToolTip::size(&lines);
        // open away from the nearest edges
        let x = if (pos.x - self.bounds.x) * 2 > self.bounds.width {
            pos.x - width - 2
        } else {
            pos.x + 2
        };
        let y = if (pos.y - self.bounds.y) * 2 > self.bounds.height {
            pos.y - height - 1
        } else {
            pos.y + 1
        };

        self.hover = Some(ctx.spawn(Rect::new(x, y, width, height), ToolTip::new(lines))?);
        Ok(())
    }
}

impl Component for ToolTipManager {
    fn name(&self) -> &'static str {
        "tooltip_manager"
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        match event {
            TableEvent::RegionHit(_) => self.clear = true,
            TableEvent::BetHovered(notice) | TableEvent::BetPlaced(notice) => {
                let lines = vec![notice.bet.name().to_string(), format_cents(notice.current_amount as i64)];
                self.show(ctx, lines, notice.screen_pos)?;
            }
            TableEvent::ChipHovered(notice) | TableEvent::ChipSelected(notice) => {
                let lines = vec![
                    "Select a Chip".to_string(),
                    format!("Current: {}", chip_label(notice.current_chip)),
                    chip_label(notice.selected_chip),
                ];
                self.show(ctx, lines, notice.screen_pos)?;
            }
            TableEvent::DiceHovered(hover) => {
                let current = hover.last_roll.map_or_else(|| "-".to_string(), |roll| roll.total().to_string());
                let lines = vec!["Roll the Dice".to_string(), format!("Current: {}", current)];
                self.show(ctx, lines, hover.screen_pos)?;
            }
            TableEvent::DiceRolled(rolled) => {
                if let Some(pos) = rolled.screen_pos {
                    let lines = vec!["Roll the Dice".to_string(), format!("Current: {}", rolled.roll.total())];
                    self.show(ctx, lines, pos)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut NodeContext<'_>, _dt: Duration) -> Result<()> {
        if self.clear {
            if let Some(hover) = self.hover.take() {
                ctx.destroy(hover);
                self.clear = false;
            }
        }
        Ok(())
    }
}
