//! Dice on the table
//!
//! Clicking the dice (or a roll request from the keyboard) rolls a fresh pair
//! and replaces the displayed set.

use tracing::info;

use crate::error::Result;
use crate::gaming::{DiceRoll, DiceRoller};
use crate::ui::component::{Component, NodeContext, NodeId, Pos, Rect};
use crate::ui::events::{DiceHover, DiceRolled, DiceSetHit, PointerKind, TableEvent};
use crate::ui::widgets::Widget;

pub struct Die {
    face: u8,
}

impl Component for Die {
    fn name(&self) -> &'static str {
        "die"
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::Die { face: self.face })
    }
}

/// Two dice side by side. Before the first roll it shows no faces.
pub struct DiceSet {
    faces: Option<[u8; 2]>,
}

impl DiceSet {
    pub fn new(roll: Option<&DiceRoll>) -> Self {
        Self {
            faces: roll.map(DiceRoll::values),
        }
    }
}

impl Component for DiceSet {
    fn name(&self) -> &'static str {
        "dice_set"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        if let Some(faces) = self.faces {
            let rect = ctx.rect();
            let width = (rect.width / 2).max(1);
            for (index, face) in faces.into_iter().enumerate() {
                let die = Rect::new(rect.x + width * index as i32, rect.y, width, rect.height);
                ctx.spawn(die, Die { face })?;
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        if let TableEvent::PointerInNode(pointer) = event {
            if pointer.node == ctx.id() {
                ctx.emit(TableEvent::DiceSetHit(DiceSetHit {
                    kind: pointer.kind,
                    pos: pointer.pos,
                    screen_pos: pointer.screen_pos,
                }));
            }
        }
        Ok(())
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::DiceSet)
    }
}

pub struct DiceManager {
    roller: Box<dyn DiceRoller>,
    area: Rect,
    dice_set: Option<NodeId>,
    last_roll: Option<DiceRoll>,
}

impl DiceManager {
    pub fn new(roller: Box<dyn DiceRoller>, area: Rect) -> Self {
        Self {
            roller,
            area,
            dice_set: None,
            last_roll: None,
        }
    }

    fn show(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        if let Some(old) = self.dice_set.take() {
            ctx.destroy(old);
        }
        self.dice_set = Some(ctx.spawn(self.area, DiceSet::new(self.last_roll.as_ref()))?);
        Ok(())
    }

    fn roll(&mut self, ctx: &mut NodeContext<'_>, screen_pos: Option<Pos>) -> Result<()> {
        let roll = self.roller.roll();
        info!(
            seq = roll.seq,
            die1 = roll.die1,
            die2 = roll.die2,
            total = roll.total(),
            "dice rolled"
        );
        self.last_roll = Some(roll);
        self.show(ctx)?;
        ctx.emit(TableEvent::DiceRolled(DiceRolled { roll, screen_pos }));
        Ok(())
    }
}

impl Component for DiceManager {
    fn name(&self) -> &'static str {
        "dice_manager"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        self.show(ctx)
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        match event {
            TableEvent::DiceSetHit(hit) => match hit.kind {
                PointerKind::Motion => ctx.emit(TableEvent::DiceHovered(DiceHover {
                    last_roll: self.last_roll,
                    screen_pos: hit.screen_pos,
                })),
                PointerKind::Down => self.roll(ctx, Some(hit.screen_pos))?,
            },
            TableEvent::RollRequested => self.roll(ctx, None)?,
            _ => {}
        }
        Ok(())
    }
}
