//! Table geometry and the region map
//!
//! Hit-testing is split in two: a [`RegionLookup`] turns a position into an
//! opaque region id, and the [`RegionMap`] turns that id into a bet (or bare
//! felt). An id the map does not know is a malformed mapping and an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::gaming::{BetType, Point, POINT_NUMBERS};
use crate::ui::component::{Pos, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u8);

impl RegionId {
    /// Felt with no bet on it
    pub const FELT: RegionId = RegionId(0);
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position (relative to the table origin) to region id
pub trait RegionLookup {
    fn region_at(&self, pos: Pos) -> RegionId;
}

/// Region ids of the standard felt
const STANDARD_REGIONS: [(u8, BetType); 23] = [
    (50, BetType::PassLine),
    (55, BetType::DontPass),
    (60, BetType::Big6),
    (65, BetType::Big8),
    (70, BetType::Field),
    (75, BetType::Come),
    (80, BetType::DontCome),
    (85, BetType::Place4),
    (90, BetType::Place5),
    (95, BetType::Place6),
    (100, BetType::Place8),
    (105, BetType::Place9),
    (110, BetType::Place10),
    (115, BetType::Any7),
    (120, BetType::Hard6),
    (125, BetType::Hard10),
    (130, BetType::Hard8),
    (135, BetType::Hard4),
    (140, BetType::Three),
    (145, BetType::Two),
    (150, BetType::Twelve),
    (155, BetType::Eleven),
    (160, BetType::AnyCraps),
];

#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    entries: HashMap<RegionId, Option<BetType>>,
}

impl RegionMap {
    /// A map with only the bare felt
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(RegionId::FELT, None);
        Self { entries }
    }

    pub fn standard() -> Self {
        let mut map = Self::new();
        for (id, bet) in STANDARD_REGIONS {
            map.insert(RegionId(id), Some(bet));
        }
        map
    }

    pub fn insert(&mut self, region: RegionId, bet: Option<BetType>) {
        self.entries.insert(region, bet);
    }

    /// The bet a region stands for, `None` for felt
    pub fn bet_for(&self, region: RegionId) -> Result<Option<BetType>> {
        self.entries
            .get(&region)
            .copied()
            .ok_or(Error::UnmappedRegion(region.0))
    }

    pub fn region_for(&self, bet: BetType) -> Option<RegionId> {
        self.entries
            .iter()
            .find(|(_, mapped)| **mapped == Some(bet))
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Region rectangles as fractions of the table: x0, y0, x1, y1
const STANDARD_RECTS: [(BetType, [f32; 4]); 23] = [
    (BetType::PassLine, [0.12, 0.72, 0.70, 0.84]),
    (BetType::DontPass, [0.23, 0.64, 0.70, 0.72]),
    (BetType::Big6, [0.12, 0.36, 0.23, 0.56]),
    (BetType::Big8, [0.12, 0.56, 0.23, 0.72]),
    (BetType::Field, [0.23, 0.50, 0.70, 0.64]),
    (BetType::Come, [0.23, 0.36, 0.70, 0.50]),
    (BetType::DontCome, [0.12, 0.18, 0.23, 0.36]),
    (BetType::Place4, [0.230, 0.18, 0.308, 0.36]),
    (BetType::Place5, [0.308, 0.18, 0.386, 0.36]),
    (BetType::Place6, [0.386, 0.18, 0.464, 0.36]),
    (BetType::Place8, [0.464, 0.18, 0.542, 0.36]),
    (BetType::Place9, [0.542, 0.18, 0.620, 0.36]),
    (BetType::Place10, [0.620, 0.18, 0.700, 0.36]),
    (BetType::Any7, [0.72, 0.36, 0.96, 0.45]),
    (BetType::Hard6, [0.72, 0.45, 0.84, 0.56]),
    (BetType::Hard10, [0.84, 0.45, 0.96, 0.56]),
    (BetType::Hard8, [0.72, 0.56, 0.84, 0.67]),
    (BetType::Hard4, [0.84, 0.56, 0.96, 0.67]),
    (BetType::Three, [0.72, 0.67, 0.79, 0.78]),
    (BetType::Two, [0.79, 0.67, 0.88, 0.78]),
    (BetType::Twelve, [0.88, 0.67, 0.96, 0.78]),
    (BetType::Eleven, [0.72, 0.78, 0.96, 0.87]),
    (BetType::AnyCraps, [0.72, 0.87, 0.96, 0.95]),
];

const PUCK_ROW: [f32; 2] = [0.06, 0.18];
const CHIP_TRAY: [f32; 4] = [0.01, 0.86, 0.25, 0.98];
const DICE_AREA: [f32; 4] = [0.27, 0.86, 0.37, 0.98];
const BANK_PANEL: [f32; 4] = [0.72, 0.02, 0.97, 0.34];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRegion {
    pub id: RegionId,
    pub bet: BetType,
    pub rect: Rect,
}

/// Where everything sits on a table of a given size
#[derive(Debug, Clone)]
pub struct TableLayout {
    bounds: Rect,
    regions: Vec<LayoutRegion>,
    puck_anchors: Vec<(Point, Pos)>,
    chip_tray: Rect,
    dice_area: Rect,
    bank_panel: Rect,
    chip_width: i32,
    chip_height: i32,
}

impl TableLayout {
    pub fn standard(width: i32, height: i32) -> Self {
        let bounds = Rect::new(0, 0, width, height);
        let map = RegionMap::standard();

        let regions: Vec<LayoutRegion> = STANDARD_RECTS
            .iter()
            .filter_map(|(bet, frac)| {
                map.region_for(*bet).map(|id| LayoutRegion {
                    id,
                    bet: *bet,
                    rect: scale_rect(bounds, *frac),
                })
            })
            .collect();

        let puck_y = scale(PUCK_ROW[0] + (PUCK_ROW[1] - PUCK_ROW[0]) / 2.0, height);
        let mut puck_anchors = Vec::with_capacity(POINT_NUMBERS.len() + 1);
        let column_x = |bet: BetType| {
            regions
                .iter()
                .find(|r| r.bet == bet)
                .map_or(0, |r| r.rect.center().x)
        };
        puck_anchors.push((Point::Off, Pos::new(column_x(BetType::DontCome), puck_y)));
        for (number, bet) in POINT_NUMBERS.iter().zip(PLACE_BETS) {
            puck_anchors.push((Point::On(*number), Pos::new(column_x(bet), puck_y)));
        }

        Self {
            bounds,
            regions,
            puck_anchors,
            chip_tray: scale_rect(bounds, CHIP_TRAY),
            dice_area: scale_rect(bounds, DICE_AREA),
            bank_panel: scale_rect(bounds, BANK_PANEL),
            chip_width: (width / 20).max(4),
            chip_height: (height / 40).max(1),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn regions(&self) -> &[LayoutRegion] {
        &self.regions
    }

    pub fn region_rect(&self, bet: BetType) -> Option<Rect> {
        self.regions.iter().find(|r| r.bet == bet).map(|r| r.rect)
    }

    /// Where a wager's chip stack sits
    pub fn bet_anchor(&self, bet: BetType) -> Option<Pos> {
        self.region_rect(bet).map(|rect| rect.center())
    }

    pub fn puck_anchor(&self, point: Point) -> Pos {
        self.puck_anchors
            .iter()
            .find(|(p, _)| *p == point)
            .map_or(self.bounds.center(), |(_, pos)| *pos)
    }

    pub fn chip_tray(&self) -> Rect {
        self.chip_tray
    }

    pub fn dice_area(&self) -> Rect {
        self.dice_area
    }

    pub fn bank_panel(&self) -> Rect {
        self.bank_panel
    }

    pub fn chip_size(&self) -> (i32, i32) {
        (self.chip_width, self.chip_height)
    }

    /// A chip-sized rectangle centred on `pos`
    pub fn chip_rect(&self, pos: Pos) -> Rect {
        Rect::new(
            pos.x - self.chip_width / 2,
            pos.y - self.chip_height / 2,
            self.chip_width,
            self.chip_height,
        )
    }
}

impl RegionLookup for TableLayout {
    fn region_at(&self, pos: Pos) -> RegionId {
        let absolute = Pos::new(pos.x + self.bounds.x, pos.y + self.bounds.y);
        self.regions
            .iter()
            .find(|r| r.rect.contains(absolute))
            .map_or(RegionId::FELT, |r| r.id)
    }
}

const PLACE_BETS: [BetType; 6] = [
    BetType::Place4,
    BetType::Place5,
    BetType::Place6,
    BetType::Place8,
    BetType::Place9,
    BetType::Place10,
];

fn scale(frac: f32, total: i32) -> i32 {
    (frac * total as f32).round() as i32
}

fn scale_rect(bounds: Rect, [x0, y0, x1, y1]: [f32; 4]) -> Rect {
    let left = bounds.x + scale(x0, bounds.width);
    let top = bounds.y + scale(y0, bounds.height);
    let right = bounds.x + scale(x1, bounds.width);
    let bottom = bounds.y + scale(y1, bounds.height);
    Rect::new(left, top, right - left, bottom - top)
}
