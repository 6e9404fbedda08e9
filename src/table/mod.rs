//! The craps table
//!
//! A [`Table`] owns the component tree, the event bus and the table-scoped
//! state. Front-ends feed it pointer input and roll requests, call
//! [`Table::tick`] once per frame, and draw [`Table::widgets`].
//!
//! The subsystems never reference each other. They are siblings under the
//! root and talk only through events:
//!
//! - `TableManager` resolves pointer positions to bet regions
//! - `BetManager` owns the ledger, places chips and settles rolls
//! - `ChipTrayManager` tracks the selected chip
//! - `PuckManager` drives the point state machine
//! - `DiceManager` rolls the dice
//! - `MoneyManager` keeps the bank
//! - `ToolTipManager` shows hover help

pub mod bet_manager;
pub mod chips;
pub mod dice_manager;
pub mod layout;
pub mod money_manager;
pub mod puck_manager;
pub mod table_manager;
pub mod tooltip;

use std::time::Duration;
use tracing::warn;

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::gaming::{BetType, DiceRoller, Point, PointStateMachine, MAX_WAGER};
use crate::ui::component::{ComponentTree, Pos, Rect};
use crate::ui::dispatch::{DispatchReport, EventBus};
use crate::ui::events::{PointerInput, PointerKind, TableEvent};
use crate::ui::widgets::Widget;

pub use bet_manager::BetManager;
pub use chips::{chip_breakdown, ChipTrayManager};
pub use dice_manager::DiceManager;
pub use layout::{RegionId, RegionLookup, RegionMap, TableLayout};
pub use money_manager::{BankStatus, MoneyManager};
pub use puck_manager::PuckManager;
pub use table_manager::TableManager;
pub use tooltip::ToolTipManager;

/// State shared by every node on the table
#[derive(Debug, Clone, Default)]
pub struct TableState {
    /// The one point state machine for the table
    pub point: PointStateMachine,
    bank: BankStatus,
    wagers: Vec<(BetType, u64)>,
}

impl TableState {
    pub fn bank(&self) -> BankStatus {
        self.bank
    }

    /// Open wagers in catalog order, as last published by the bet manager
    pub fn wagers(&self) -> &[(BetType, u64)] {
        &self.wagers
    }

    pub(crate) fn set_bank(&mut self, bank: BankStatus) {
        self.bank = bank;
    }

    pub(crate) fn set_wagers(&mut self, wagers: Vec<(BetType, u64)>) {
        self.wagers = wagers;
    }
}

pub struct Table {
    tree: ComponentTree,
    bus: EventBus,
    state: TableState,
    layout: TableLayout,
    denominations: Vec<u64>,
    warn_threshold: usize,
}

impl Table {
    /// A standard table with the standard region map
    pub fn new(config: &TableConfig, dice: Box<dyn DiceRoller>) -> Result<Self> {
        let layout = TableLayout::standard(config.width, config.height);
        Self::with_regions(config, dice, Box::new(layout), RegionMap::standard())
    }

    /// A table whose hit-testing uses `lookup` and `regions`
    pub fn with_regions(
        config: &TableConfig,
        dice: Box<dyn DiceRoller>,
        lookup: Box<dyn RegionLookup>,
        regions: RegionMap,
    ) -> Result<Self> {
        config.validate()?;

        let layout = TableLayout::standard(config.width, config.height);
        let bounds = layout.bounds();
        let (chip_width, _) = layout.chip_size();
        let mut tree = ComponentTree::new(bounds);
        let mut state = TableState::default();
        let mut bus = EventBus::new(config.max_dispatch_passes);
        let root = tree.root_id();

        // pre-order position decides who hears an event first
        bus.extend(tree.create(root, bounds, TableManager::new(lookup, regions), &mut state)?);
        bus.extend(tree.create(
            root,
            Rect::default(),
            BetManager::new(layout.clone(), &config.chip_denominations),
            &mut state,
        )?);
        bus.extend(tree.create(
            root,
            Rect::default(),
            ChipTrayManager::new(&config.chip_denominations, layout.chip_tray(), chip_width),
            &mut state,
        )?);
        bus.extend(tree.create(root, Rect::default(), PuckManager::new(layout.clone()), &mut state)?);
        bus.extend(tree.create(
            root,
            Rect::default(),
            DiceManager::new(dice, layout.dice_area()),
            &mut state,
        )?);
        bus.extend(tree.create(
            root,
            Rect::default(),
            MoneyManager::new(config.starting_bank, layout.bank_panel()),
            &mut state,
        )?);
        bus.extend(tree.create(root, Rect::default(), ToolTipManager::new(bounds), &mut state)?);

        Ok(Self {
            tree,
            bus,
            state,
            layout,
            denominations: config.chip_denominations.clone(),
            warn_threshold: config.component_warn_threshold,
        })
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Queue raw pointer input; delivered on the next tick.
    pub fn pointer(&mut self, kind: PointerKind, pos: Pos) {
        self.bus.emit(TableEvent::Pointer(PointerInput { kind, pos }));
    }

    /// Queue a roll that did not come from clicking the dice.
    pub fn request_roll(&mut self) {
        self.bus.emit(TableEvent::RollRequested);
    }

    /// Queue any event, as if a component had emitted it.
    pub fn emit(&mut self, event: TableEvent) {
        self.bus.emit(event);
    }

    /// One frame: drain the bus, then update the tree.
    pub fn tick(&mut self, dt: Duration) -> Result<DispatchReport> {
        let report = self.bus.drain(&mut self.tree, &mut self.state)?;
        let emitted = self.tree.update(dt, &mut self.state)?;
        self.bus.extend(emitted);

        let count = self.tree.count();
        if count > self.warn_threshold {
            warn!(count, threshold = self.warn_threshold, "component count exceeds threshold");
        }
        Ok(report)
    }

    pub fn click(&mut self, pos: Pos) -> Result<DispatchReport> {
        self.pointer(PointerKind::Down, pos);
        self.tick(Duration::ZERO)
    }

    pub fn hover(&mut self, pos: Pos) -> Result<DispatchReport> {
        self.pointer(PointerKind::Motion, pos);
        self.tick(Duration::ZERO)
    }

    pub fn roll(&mut self) -> Result<DispatchReport> {
        self.request_roll();
        self.tick(Duration::ZERO)
    }

    /// Queue taking every wager down.
    pub fn request_clear(&mut self) {
        self.bus.emit(TableEvent::ClearRequested);
    }

    /// Take every wager down and return it to the bank.
    pub fn clear_bets(&mut self) -> Result<DispatchReport> {
        self.request_clear();
        self.tick(Duration::ZERO)
    }

    /// Where to click to pick `denomination` from the tray
    pub fn chip_position(&self, denomination: u64) -> Option<Pos> {
        let tray = self.layout.chip_tray();
        let slot = self.denominations.iter().position(|d| *d == denomination)?;
        let x = tray.x + chips::tray_slot_center(slot, tray.width, self.denominations.len());
        Some(Pos::new(x, tray.center().y))
    }

    pub fn select_chip(&mut self, denomination: u64) -> Result<DispatchReport> {
        let pos = self
            .chip_position(denomination)
            .ok_or(Error::InvalidAmount(denomination))?;
        self.click(pos)
    }

    /// Put `amount` on `bet` by clicking chips from the tray onto the region.
    pub fn place_bet(&mut self, bet: BetType, amount: u64) -> Result<DispatchReport> {
        if amount > MAX_WAGER {
            return Err(Error::InvalidAmount(amount));
        }
        let chips = chip_breakdown(amount, &self.denominations);
        if amount == 0 || chips.iter().sum::<u64>() != amount {
            return Err(Error::InvalidAmount(amount));
        }
        let target = self
            .layout
            .bet_anchor(bet)
            .ok_or_else(|| Error::UnknownBet(bet.name().to_string()))?;

        let mut report = DispatchReport::default();
        for chip in chips {
            for step in [self.select_chip(chip)?, self.click(target)?] {
                report.passes += step.passes;
                report.delivered.extend(step.delivered);
            }
        }
        Ok(report)
    }

    pub fn point(&self) -> Point {
        self.state.point.current()
    }

    pub fn bank(&self) -> BankStatus {
        self.state.bank()
    }

    pub fn wagers(&self) -> &[(BetType, u64)] {
        self.state.wagers()
    }

    pub fn wager(&self, bet: BetType) -> u64 {
        self.wagers()
            .iter()
            .find(|(b, _)| *b == bet)
            .map_or(0, |(_, amount)| *amount)
    }

    pub fn widgets(&self) -> Vec<(Rect, Widget)> {
        self.tree.widgets()
    }

    pub fn component_count(&self) -> usize {
        self.tree.count()
    }

    pub fn pending_events(&self) -> usize {
        self.bus.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaming::ScriptedDice;

    fn table(rolls: &[(u8, u8)]) -> Table {
        let dice = ScriptedDice::new(rolls.iter().copied()).unwrap();
        Table::new(&TableConfig::default(), Box::new(dice)).unwrap()
    }

    #[test]
    fn test_fresh_table() {
        let table = table(&[]);
        assert_eq!(table.point(), Point::Off);
        assert_eq!(table.bank().bank, 10_000);
        assert!(table.wagers().is_empty());
        // root, 7 managers, chip tray + 4 chips, puck, dice set, bank panel
        assert_eq!(table.component_count(), 16);
    }

    #[test]
    fn test_chip_positions_hit_their_slots() {
        let mut table = table(&[]);
        for denomination in [2500, 100, 10_000, 500] {
            let report = table.select_chip(denomination).unwrap();
            assert_eq!(
                report.count(|e| matches!(e, TableEvent::ChipSelected(n) if n.selected_chip == denomination)),
                1
            );
        }
        assert!(table.chip_position(42).is_none());
    }

    #[test]
    fn test_place_bet_rejects_unpayable_amounts() {
        let mut table = table(&[]);
        assert!(matches!(table.place_bet(BetType::Field, 0), Err(Error::InvalidAmount(0))));
        assert!(matches!(table.place_bet(BetType::Field, 150), Err(Error::InvalidAmount(150))));
        assert!(matches!(
            table.place_bet(BetType::Field, u64::MAX),
            Err(Error::InvalidAmount(u64::MAX))
        ));
        assert!(matches!(
            table.place_bet(BetType::Field, MAX_WAGER + 10_000),
            Err(Error::InvalidAmount(_))
        ));
        assert!(table.wagers().is_empty());
        assert_eq!(table.bank().on_table, 0);
    }

    #[test]
    fn test_unmapped_region_fails_the_tick() {
        struct Broken;
        impl RegionLookup for Broken {
            fn region_at(&self, _pos: Pos) -> RegionId {
                RegionId(201)
            }
        }

        let dice = ScriptedDice::new(std::iter::empty()).unwrap();
        let mut table = Table::with_regions(
            &TableConfig::default(),
            Box::new(dice),
            Box::new(Broken),
            RegionMap::standard(),
        )
        .unwrap();
        assert!(matches!(table.click(Pos::new(5, 5)), Err(Error::UnmappedRegion(201))));
        assert_eq!(table.pending_events(), 0);
    }
}
