//! Table events
//!
//! One closed enum carries every event the table's subsystems exchange. Raw
//! pointer input enters the bus as `Pointer`; everything else is derived by
//! a component reacting to an earlier event.

use serde::Serialize;

use super::component::{NodeId, Pos};
use crate::gaming::{BetType, DiceRoll, PointTransition};
use crate::table::layout::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Motion,
    Down,
}

/// Raw pointer input in absolute table units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub pos: Pos,
}

/// Pointer input that landed inside a node's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodePointer {
    pub kind: PointerKind,
    /// Relative to the node's origin
    pub pos: Pos,
    pub screen_pos: Pos,
    pub node: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionHit {
    pub kind: PointerKind,
    pub pos: Pos,
    pub screen_pos: Pos,
    pub region: RegionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetRegionHit {
    pub kind: PointerKind,
    pub pos: Pos,
    pub screen_pos: Pos,
    pub region: RegionId,
    pub bet: BetType,
}

/// Hover or placement on a bet region. `amount_added` is 0 for hovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetNotice {
    pub bet: BetType,
    pub current_amount: u64,
    pub amount_added: u64,
    pub screen_pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChipTrayHit {
    pub kind: PointerKind,
    pub pos: Pos,
    pub screen_pos: Pos,
    /// Denomination under the pointer, in cents
    pub selected_chip: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChipNotice {
    pub current_chip: u64,
    pub selected_chip: u64,
    pub screen_pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceSetHit {
    pub kind: PointerKind,
    pub pos: Pos,
    pub screen_pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceHover {
    pub last_roll: Option<DiceRoll>,
    pub screen_pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceRolled {
    pub roll: DiceRoll,
    /// Where the roll was triggered from, when it came from the pointer
    pub screen_pos: Option<Pos>,
}

/// One wager's outcome on one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetOutcome {
    pub roll: DiceRoll,
    pub bet: BetType,
    pub bet_amount: u64,
    pub payout: u64,
}

/// Wagers taken down by a table clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BetsCleared {
    pub bets: usize,
    /// Cents handed back to the bank
    pub returned: u64,
}

/// Aggregate of every wager on one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollSummary {
    pub roll: DiceRoll,
    pub net_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TableEvent {
    Pointer(PointerInput),
    PointerInNode(NodePointer),

    RegionHit(RegionHit),
    BetRegionHit(BetRegionHit),
    BetHovered(BetNotice),
    BetPlaced(BetNotice),
    /// Take every wager down, e.g. from a key press
    ClearRequested,
    BetsCleared(BetsCleared),

    ChipTrayHit(ChipTrayHit),
    ChipHovered(ChipNotice),
    ChipSelected(ChipNotice),

    DiceSetHit(DiceSetHit),
    /// Roll without a pointer, e.g. from a key press
    RollRequested,
    DiceHovered(DiceHover),
    DiceRolled(DiceRolled),

    PointSet(PointTransition),
    PointWin(PointTransition),
    PointLose(PointTransition),

    BetWin(BetOutcome),
    BetLose(BetOutcome),
    BetPush(BetOutcome),

    OverallWin(RollSummary),
    OverallLose(RollSummary),
    OverallPush(RollSummary),
}

impl TableEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::Pointer(_) => "pointer",
            TableEvent::PointerInNode(_) => "pointer_in_node",
            TableEvent::RegionHit(_) => "region_hit",
            TableEvent::BetRegionHit(_) => "bet_region_hit",
            TableEvent::BetHovered(_) => "bet_hovered",
            TableEvent::BetPlaced(_) => "bet_placed",
            TableEvent::ClearRequested => "clear_requested",
            TableEvent::BetsCleared(_) => "bets_cleared",
            TableEvent::ChipTrayHit(_) => "chip_tray_hit",
            TableEvent::ChipHovered(_) => "chip_hovered",
            TableEvent::ChipSelected(_) => "chip_selected",
            TableEvent::DiceSetHit(_) => "dice_set_hit",
            TableEvent::RollRequested => "roll_requested",
            TableEvent::DiceHovered(_) => "dice_hovered",
            TableEvent::DiceRolled(_) => "dice_rolled",
            TableEvent::PointSet(_) => "point_set",
            TableEvent::PointWin(_) => "point_win",
            TableEvent::PointLose(_) => "point_lose",
            TableEvent::BetWin(_) => "bet_win",
            TableEvent::BetLose(_) => "bet_lose",
            TableEvent::BetPush(_) => "bet_push",
            TableEvent::OverallWin(_) => "overall_win",
            TableEvent::OverallLose(_) => "overall_lose",
            TableEvent::OverallPush(_) => "overall_push",
        }
    }

    /// Raw and hit-test events, as opposed to game events
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            TableEvent::Pointer(_)
                | TableEvent::PointerInNode(_)
                | TableEvent::RegionHit(_)
                | TableEvent::BetRegionHit(_)
                | TableEvent::ChipTrayHit(_)
                | TableEvent::DiceSetHit(_)
                | TableEvent::BetHovered(_)
                | TableEvent::ChipHovered(_)
                | TableEvent::DiceHovered(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_tagged() {
        let event = TableEvent::BetPlaced(BetNotice {
            bet: BetType::Field,
            current_amount: 600,
            amount_added: 100,
            screen_pos: Pos::new(3, 4),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "bet_placed");
        assert_eq!(json["data"]["current_amount"], 600);
        assert_eq!(json["data"]["bet"], "Field");

        let json = serde_json::to_value(TableEvent::RollRequested).unwrap();
        assert_eq!(json["event"], "roll_requested");
    }

    #[test]
    fn test_input_classification() {
        assert!(TableEvent::Pointer(PointerInput { kind: PointerKind::Motion, pos: Pos::default() }).is_input());
        assert!(!TableEvent::RollRequested.is_input());
        assert!(!TableEvent::ClearRequested.is_input());
    }
}
