//! Point state machine
//!
//! The puck is OFF until a come-out roll lands on a box number, then ON that
//! number until the shooter repeats it (point win) or sevens out (point lose).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::craps_rules::DiceRoll;
use crate::error::{Error, Result};

/// Box numbers a point can be established on
pub const POINT_NUMBERS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Whether a point is established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Point {
    #[default]
    Off,
    On(u8),
}

impl Point {
    /// `0` means off, any box number means on.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Point::Off),
            v if POINT_NUMBERS.contains(&v) => Ok(Point::On(v)),
            v => Err(Error::InvalidPoint(v)),
        }
    }

    /// Numeric form used on the wire: 0 for off
    pub fn value(&self) -> u8 {
        match self {
            Point::Off => 0,
            Point::On(n) => *n,
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, Point::On(_))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Off => f.write_str("OFF"),
            Point::On(n) => write!(f, "ON {}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Set,
    Win,
    Lose,
}

/// A change of point caused by one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTransition {
    pub kind: TransitionKind,
    pub roll: DiceRoll,
    pub previous: Point,
    pub current: Point,
}

/// The table's single authoritative point.
#[derive(Debug, Clone, Default)]
pub struct PointStateMachine {
    current: Point,
    /// Sequence number of the last applied roll and the point before it
    last_applied: Option<(u64, Point)>,
}

impl PointStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Point {
        self.current
    }

    /// The point as it stood before `roll` was applied.
    ///
    /// Consumers that judge a roll call this instead of `current()` so the
    /// answer does not depend on whether the transition has been applied yet.
    pub fn point_before(&self, roll: &DiceRoll) -> Point {
        match self.last_applied {
            Some((seq, before)) if seq == roll.seq => before,
            _ => self.current,
        }
    }

    /// Advance on `roll`. Applying the same roll twice is a no-op.
    pub fn apply(&mut self, roll: &DiceRoll) -> Option<PointTransition> {
        if matches!(self.last_applied, Some((seq, _)) if seq == roll.seq) {
            return None;
        }

        let previous = self.current;
        self.last_applied = Some((roll.seq, previous));

        let total = roll.total();
        let (kind, next) = match previous {
            Point::Off if POINT_NUMBERS.contains(&total) => (TransitionKind::Set, Point::On(total)),
            Point::On(n) if total == n => (TransitionKind::Win, Point::Off),
            Point::On(_) if total == 7 => (TransitionKind::Lose, Point::Off),
            _ => return None,
        };

        self.current = next;
        Some(PointTransition {
            kind,
            roll: *roll,
            previous,
            current: next,
        })
    }
}
