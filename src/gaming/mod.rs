//! Gaming module for the craps table
//!
//! This module carries the rules engine:
//!
//! ## Rules
//! - The fixed bet catalog and its payout ratios
//! - Win/lose/push resolution for every bet against a roll
//!
//! ## Table state
//! - The point state machine (puck OFF / ON n)
//! - The bet ledger, one wager per bet
//! - Dice rollers
//!
//! ## Settlement
//! - Per-roll settlement of all open wagers with an aggregate net

pub mod craps_rules;
pub mod dice;
pub mod ledger;
pub mod payout_engine;
pub mod point;

pub use craps_rules::{resolve, BetResult, BetType, DiceRoll, Payout, Resolution};
pub use dice::{DiceRoller, RandomDice, ScriptedDice};
pub use ledger::{BetLedger, MAX_WAGER};
pub use payout_engine::{settle, BetSettlement, RollOutcome, RollSettlement};
pub use point::{Point, PointStateMachine, PointTransition, TransitionKind, POINT_NUMBERS};
