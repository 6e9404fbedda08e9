//! Render descriptions
//!
//! Components describe what they look like; front-ends decide how to draw it.

use serde::Serialize;

use crate::gaming::{BetType, Point};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// The table surface
    Felt,
    /// One chip, `denomination` in cents
    Chip { denomination: u64, selected: bool },
    /// Wager on a bet region; its chips are child nodes
    ChipStack { bet: BetType, amount: u64 },
    ChipTray { denominations: Vec<u64>, selected: u64 },
    Puck { point: Point },
    DiceSet,
    Die { face: u8 },
    Tooltip { lines: Vec<String> },
}

/// `$12.34` style rendering of a cent amount
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Chip face label, whole dollars when possible
pub fn chip_label(denomination: u64) -> String {
    if denomination % 100 == 0 {
        format!("${}", denomination / 100)
    } else {
        format_cents(denomination as i64)
    }
}
