//! Drives the point state machine and shows the ON/OFF puck

use tracing::info;

use crate::error::Result;
use crate::gaming::{Point, TransitionKind};
use crate::ui::component::{Component, NodeContext, NodeId};
use crate::ui::events::TableEvent;
use crate::ui::widgets::Widget;

use super::layout::TableLayout;

pub struct Puck {
    point: Point,
}

impl Component for Puck {
    fn name(&self) -> &'static str {
        "puck"
    }

    fn widget(&self) -> Option<Widget> {
        Some(Widget::Puck { point: self.point })
    }
}

pub struct PuckManager {
    layout: TableLayout,
    puck: Option<NodeId>,
}

impl PuckManager {
    pub fn new(layout: TableLayout) -> Self {
        Self { layout, puck: None }
    }

    fn place_puck(&mut self, ctx: &mut NodeContext<'_>, point: Point) -> Result<()> {
        if let Some(old) = self.puck.take() {
            ctx.destroy(old);
        }
        let rect = self.layout.chip_rect(self.layout.puck_anchor(point));
        self.puck = Some(ctx.spawn(rect, Puck { point })?);
        Ok(())
    }
}

impl Component for PuckManager {
    fn name(&self) -> &'static str {
        "puck_manager"
    }

    fn mount(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        let point = ctx.state().point.current();
        self.place_puck(ctx, point)
    }

    fn handle_event(&mut self, ctx: &mut NodeContext<'_>, event: &TableEvent) -> Result<()> {
        let TableEvent::DiceRolled(rolled) = event else {
            return Ok(());
        };

        if let Some(transition) = ctx.state_mut().point.apply(&rolled.roll) {
            info!(
                kind = ?transition.kind,
                previous = %transition.previous,
                current = %transition.current,
                total = rolled.roll.total(),
                "point transition"
            );
            self.place_puck(ctx, transition.current)?;
            ctx.emit(match transition.kind {
                TransitionKind::Set => TableEvent::PointSet(transition),
                TransitionKind::Win => TableEvent::PointWin(transition),
                TransitionKind::Lose => TableEvent::PointLose(transition),
            });
        }
        Ok(())
    }
}
