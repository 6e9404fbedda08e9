//! Dice rollers
//!
//! A roll happens only when the player asks for one; the roller hands back a
//! fresh `DiceRoll` tagged with its sequence number.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

use super::craps_rules::DiceRoll;
use crate::error::{Error, Result};

pub trait DiceRoller {
    fn roll(&mut self) -> DiceRoll;
}

/// Two independent uniform dice
pub struct RandomDice {
    rng: ChaCha20Rng,
    rolls: u64,
}

impl RandomDice {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
            rolls: 0,
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            rolls: 0,
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceRoller for RandomDice {
    fn roll(&mut self) -> DiceRoll {
        self.rolls += 1;
        DiceRoll {
            die1: self.rng.gen_range(1..=6),
            die2: self.rng.gen_range(1..=6),
            seq: self.rolls,
        }
    }
}

/// Plays back a fixed list of rolls, then falls back to random dice.
pub struct ScriptedDice {
    script: VecDeque<(u8, u8)>,
    fallback: RandomDice,
    rolls: u64,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = (u8, u8)>) -> Result<Self> {
        let script: VecDeque<_> = script.into_iter().collect();
        if let Some(&(die1, die2)) = script
            .iter()
            .find(|(d1, d2)| !(1..=6).contains(d1) || !(1..=6).contains(d2))
        {
            return Err(Error::InvalidDice { die1, die2 });
        }
        Ok(Self {
            script,
            fallback: RandomDice::new(),
            rolls: 0,
        })
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll(&mut self) -> DiceRoll {
        self.rolls += 1;
        let (die1, die2) = match self.script.pop_front() {
            Some(faces) => faces,
            None => {
                let roll = self.fallback.roll();
                (roll.die1, roll.die2)
            }
        };
        DiceRoll {
            die1,
            die2,
            seq: self.rolls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_dice_in_range_and_sequenced() {
        let mut dice = RandomDice::seeded(7);
        for expected_seq in 1..=500 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll.die1));
            assert!((1..=6).contains(&roll.die2));
            assert_eq!(roll.seq, expected_seq);
        }
    }

    #[test]
    fn test_seeded_dice_reproducible() {
        let mut a = RandomDice::seeded(42);
        let mut b = RandomDice::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_all_faces_appear() {
        let mut dice = RandomDice::seeded(1);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let roll = dice.roll();
            seen[(roll.die1 - 1) as usize] = true;
            seen[(roll.die2 - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_scripted_dice() {
        let mut dice = ScriptedDice::new([(3, 4), (6, 6)]).unwrap();
        assert_eq!(dice.roll(), DiceRoll { die1: 3, die2: 4, seq: 1 });
        assert_eq!(dice.roll(), DiceRoll { die1: 6, die2: 6, seq: 2 });
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll().seq, 3);
        assert!(ScriptedDice::new([(0, 3)]).is_err());
    }
}
