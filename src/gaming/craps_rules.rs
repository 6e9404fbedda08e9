//! Craps rules for the fixed house table
//!
//! This module implements the rule table the table pays against:
//! - Pass/Don't Pass line bets
//! - Come/Don't Come bets
//! - Field and Big 6/8
//! - Place bets
//! - Hardways
//! - Proposition bets (Any 7, Any Craps, Two, Three, Eleven, Twelve)
//!
//! Every bet resolves through one exhaustive match, so a catalog entry without
//! a rule is a compile error rather than a silent push.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::point::Point;

/// The 22 bets available on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BetType {
    // Line Bets
    PassLine,
    DontPass,

    // Big 6/8
    Big6,
    Big8,

    // Field Bet
    Field,

    // Come Bets
    Come,
    DontCome,

    // Place Bets
    Place4,
    Place5,
    Place6,
    Place8,
    Place9,
    Place10,

    // Proposition Bets
    Any7,

    // Hardways
    Hard4,
    Hard6,
    Hard8,
    Hard10,

    Three,
    Two,
    Twelve,
    Eleven,
    AnyCraps,
}

impl BetType {
    /// Catalog order; resolution and display iterate in this order.
    pub const ALL: [BetType; 23] = [
        BetType::PassLine,
        BetType::DontPass,
        BetType::Big6,
        BetType::Big8,
        BetType::Field,
        BetType::Come,
        BetType::DontCome,
        BetType::Place4,
        BetType::Place5,
        BetType::Place6,
        BetType::Place8,
        BetType::Place9,
        BetType::Place10,
        BetType::Any7,
        BetType::Hard4,
        BetType::Hard6,
        BetType::Hard8,
        BetType::Hard10,
        BetType::Three,
        BetType::Two,
        BetType::Twelve,
        BetType::Eleven,
        BetType::AnyCraps,
    ];

    /// Name printed on the felt
    pub fn name(&self) -> &'static str {
        match self {
            BetType::PassLine => "Pass Line",
            BetType::DontPass => "Don't Pass",
            BetType::Big6 => "Big 6",
            BetType::Big8 => "Big 8",
            BetType::Field => "Field",
            BetType::Come => "Come",
            BetType::DontCome => "Don't Come",
            BetType::Place4 => "Place 4",
            BetType::Place5 => "Place 5",
            BetType::Place6 => "Place 6",
            BetType::Place8 => "Place 8",
            BetType::Place9 => "Place 9",
            BetType::Place10 => "Place 10",
            BetType::Any7 => "Any 7",
            BetType::Hard4 => "Hard 4",
            BetType::Hard6 => "Hard 6",
            BetType::Hard8 => "Hard 8",
            BetType::Hard10 => "Hard 10",
            BetType::Three => "Three",
            BetType::Two => "Two",
            BetType::Twelve => "Twelve",
            BetType::Eleven => "Eleven",
            BetType::AnyCraps => "Any Craps",
        }
    }

    /// Ratio paid when the bet wins
    pub fn payout(&self) -> Payout {
        match self {
            BetType::PassLine
            | BetType::DontPass
            | BetType::Big6
            | BetType::Big8
            | BetType::Come
            | BetType::DontCome => Payout::EVEN,
            // 2 and 12 pay double; see `evaluate_field`
            BetType::Field => Payout::EVEN,
            BetType::Place4 | BetType::Place10 => Payout::new(9, 5),
            BetType::Place5 | BetType::Place9 => Payout::new(7, 5),
            BetType::Place6 | BetType::Place8 => Payout::new(7, 6),
            BetType::Any7 => Payout::new(4, 1),
            BetType::Hard4 | BetType::Hard10 => Payout::new(7, 1),
            BetType::Hard6 | BetType::Hard8 => Payout::new(9, 1),
            BetType::Three | BetType::Eleven => Payout::new(15, 1),
            BetType::Two | BetType::Twelve => Payout::new(30, 1),
            BetType::AnyCraps => Payout::new(7, 1),
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BetType {
    type Err = Error;

    /// Accepts the felt name ("Don't Pass") or a compact spelling ("dont-pass", "dontpass").
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        let bet = match key.as_str() {
            "passline" | "pass" => BetType::PassLine,
            "dontpass" | "dontpassline" => BetType::DontPass,
            "big6" => BetType::Big6,
            "big8" => BetType::Big8,
            "field" => BetType::Field,
            "come" => BetType::Come,
            "dontcome" => BetType::DontCome,
            "place4" => BetType::Place4,
            "place5" => BetType::Place5,
            "place6" => BetType::Place6,
            "place8" => BetType::Place8,
            "place9" => BetType::Place9,
            "place10" => BetType::Place10,
            "any7" | "anyseven" => BetType::Any7,
            "hard4" => BetType::Hard4,
            "hard6" => BetType::Hard6,
            "hard8" => BetType::Hard8,
            "hard10" => BetType::Hard10,
            "three" => BetType::Three,
            "two" => BetType::Two,
            "twelve" => BetType::Twelve,
            "eleven" | "yo" => BetType::Eleven,
            "anycraps" => BetType::AnyCraps,
            _ => return Err(Error::UnknownBet(s.to_string())),
        };
        Ok(bet)
    }
}

/// Dice roll result
///
/// Serializes with its `values` and `total` alongside the faces; both are
/// ignored when reading a roll back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "DiceRollRecord")]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
    /// Position of this roll in the session, assigned by the roller
    pub seq: u64,
}

#[derive(Serialize)]
struct DiceRollRecord {
    die1: u8,
    die2: u8,
    values: [u8; 2],
    total: u8,
    seq: u64,
}

impl From<DiceRoll> for DiceRollRecord {
    fn from(roll: DiceRoll) -> Self {
        Self {
            die1: roll.die1,
            die2: roll.die2,
            values: roll.values(),
            total: roll.total(),
            seq: roll.seq,
        }
    }
}

impl DiceRoll {
    pub fn new(die1: u8, die2: u8, seq: u64) -> Result<Self> {
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(Error::InvalidDice { die1, die2 });
        }
        Ok(Self { die1, die2, seq })
    }

    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    pub fn values(&self) -> [u8; 2] {
        [self.die1, self.die2]
    }

    /// Both dice show the same face
    pub fn is_hard(&self) -> bool {
        self.die1 == self.die2
    }

    pub fn is_craps(&self) -> bool {
        matches!(self.total(), 2 | 3 | 12)
    }

    pub fn is_natural(&self) -> bool {
        matches!(self.total(), 7 | 11)
    }
}

/// Bet payout ratio, numerator:denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub numerator: u32,
    pub denominator: u32,
}

impl Payout {
    pub const EVEN: Self = Self { numerator: 1, denominator: 1 };
    /// Ratio carried by losing and pushing resolutions.
    pub const NONE: Self = Self { numerator: 0, denominator: 1 };

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self { numerator, denominator }
    }

    /// Winnings for `amount` cents, truncated to whole cents.
    ///
    /// Saturates at `u64::MAX`; ledger wagers are capped well below that.
    pub fn calculate(&self, amount: u64) -> u64 {
        let won = u128::from(amount) * u128::from(self.numerator) / u128::from(self.denominator.max(1));
        u64::try_from(won).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Bet resolution result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetResult {
    Win,
    Lose,
    Push,
}

/// Outcome of one bet against one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub result: BetResult,
    pub payout: Payout,
}

impl Resolution {
    fn win(payout: Payout) -> Self {
        Self { result: BetResult::Win, payout }
    }

    fn lose() -> Self {
        Self { result: BetResult::Lose, payout: Payout::NONE }
    }

    fn push() -> Self {
        Self { result: BetResult::Push, payout: Payout::NONE }
    }
}

/// Resolve `bet` against `roll`, judged with the point as it stood before the roll.
pub fn resolve(bet: BetType, roll: &DiceRoll, point_before: Point) -> Resolution {
    let total = roll.total();
    let point_on = point_before.is_on();

    match bet {
        BetType::PassLine => evaluate_pass_line(point_before, total),
        BetType::DontPass => evaluate_dont_pass(point_before, total),
        BetType::Big6 => evaluate_big(6, total),
        BetType::Big8 => evaluate_big(8, total),
        BetType::Field => evaluate_field(total),
        BetType::Come => match total {
            7 | 11 => Resolution::win(bet.payout()),
            2 | 3 | 12 => Resolution::lose(),
            _ => Resolution::push(),
        },
        BetType::DontCome => match total {
            2 | 3 => Resolution::win(bet.payout()),
            7 | 11 => Resolution::lose(),
            _ => Resolution::push(),
        },
        BetType::Place4 => evaluate_place(bet, 4, total, point_on),
        BetType::Place5 => evaluate_place(bet, 5, total, point_on),
        BetType::Place6 => evaluate_place(bet, 6, total, point_on),
        BetType::Place8 => evaluate_place(bet, 8, total, point_on),
        BetType::Place9 => evaluate_place(bet, 9, total, point_on),
        BetType::Place10 => evaluate_place(bet, 10, total, point_on),
        BetType::Hard4 => evaluate_hardway(bet, 2, roll, point_on),
        BetType::Hard6 => evaluate_hardway(bet, 3, roll, point_on),
        BetType::Hard8 => evaluate_hardway(bet, 4, roll, point_on),
        BetType::Hard10 => evaluate_hardway(bet, 5, roll, point_on),
        BetType::Any7 => evaluate_one_roll(bet, total == 7),
        BetType::Three => evaluate_one_roll(bet, total == 3),
        BetType::Two => evaluate_one_roll(bet, total == 2),
        BetType::Twelve => evaluate_one_roll(bet, total == 12),
        BetType::Eleven => evaluate_one_roll(bet, total == 11),
        BetType::AnyCraps => evaluate_one_roll(bet, roll.is_craps()),
    }
}

fn evaluate_pass_line(point: Point, total: u8) -> Resolution {
    match point {
        Point::Off => match total {
            7 | 11 => Resolution::win(Payout::EVEN),
            2 | 3 | 12 => Resolution::lose(),
            _ => Resolution::push(),
        },
        Point::On(point) => match total {
            t if t == point => Resolution::win(Payout::EVEN),
            7 => Resolution::lose(),
            _ => Resolution::push(),
        },
    }
}

fn evaluate_dont_pass(point: Point, total: u8) -> Resolution {
    match point {
        Point::Off => match total {
            2 | 3 => Resolution::win(Payout::EVEN),
            7 | 11 => Resolution::lose(),
            // 12 is barred
            _ => Resolution::push(),
        },
        Point::On(point) => match total {
            7 => Resolution::win(Payout::EVEN),
            t if t == point => Resolution::lose(),
            _ => Resolution::push(),
        },
    }
}

fn evaluate_big(number: u8, total: u8) -> Resolution {
    match total {
        t if t == number => Resolution::win(Payout::EVEN),
        7 => Resolution::lose(),
        _ => Resolution::push(),
    }
}

fn evaluate_field(total: u8) -> Resolution {
    match total {
        2 | 12 => Resolution::win(Payout::new(2, 1)),
        3 | 4 | 9 | 10 | 11 => Resolution::win(Payout::EVEN),
        _ => Resolution::lose(),
    }
}

/// Place bets are off on the come-out: a 7 only takes them down once a point is up.
fn evaluate_place(bet: BetType, number: u8, total: u8, point_on: bool) -> Resolution {
    if total == number {
        Resolution::win(bet.payout())
    } else if total == 7 && point_on {
        Resolution::lose()
    } else {
        Resolution::push()
    }
}

/// `face` is the die value that makes the hard number (2 for Hard 4, and so on).
fn evaluate_hardway(bet: BetType, face: u8, roll: &DiceRoll, point_on: bool) -> Resolution {
    let number = face * 2;
    let total = roll.total();

    if roll.die1 == face && roll.die2 == face {
        Resolution::win(bet.payout())
    } else if (total == number || total == 7) && point_on {
        Resolution::lose()
    } else {
        Resolution::push()
    }
}

fn evaluate_one_roll(bet: BetType, hit: bool) -> Resolution {
    if hit {
        Resolution::win(bet.payout())
    } else {
        Resolution::lose()
    }
}
