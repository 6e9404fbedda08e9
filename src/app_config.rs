//! Command-line interface definition and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use craps_table::gaming::{BetType, MAX_WAGER};

/// Command-line interface for the craps table
#[derive(Parser)]
#[command(name = "craps-table")]
#[command(about = "Craps table simulator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play at the table in the terminal (mouse to bet, `r` to roll, `q` to quit)
    Play,

    /// Place bets and roll without a UI, printing what happened
    Simulate {
        /// Wager as "Bet Name=cents", e.g. "Pass Line=1000" (repeatable)
        #[arg(long = "bet", value_parser = parse_bet_spec)]
        bets: Vec<(BetType, u64)>,

        /// Scripted roll as "die1,die2", e.g. "3,4" (repeatable)
        #[arg(long = "roll", value_parser = parse_roll_spec)]
        rolls: Vec<(u8, u8)>,

        /// Random rolls to make when no --roll is given
        #[arg(long, default_value = "1")]
        random_rolls: usize,

        /// Seed for the random rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Print the event journal as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the bet catalog with payout ratios
    Rules,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play => "play",
            Commands::Simulate { .. } => "simulate",
            Commands::Rules => "rules",
        }
    }
}

/// Parse "Bet Name=cents"
pub fn parse_bet_spec(spec: &str) -> Result<(BetType, u64), String> {
    let (name, amount) = spec
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=CENTS, got '{}'", spec))?;

    let bet: BetType = name.trim().parse().map_err(|e| format!("{}", e))?;
    let amount: u64 = amount
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount '{}'", amount.trim()))?;

    if amount == 0 {
        return Err("amount must be greater than zero".to_string());
    }
    if amount > MAX_WAGER {
        return Err(format!("amount {} is over the table limit of {} cents", amount, MAX_WAGER));
    }
    Ok((bet, amount))
}

/// Parse "die1,die2"
pub fn parse_roll_spec(spec: &str) -> Result<(u8, u8), String> {
    let (d1, d2) = spec
        .split_once(',')
        .ok_or_else(|| format!("expected DIE1,DIE2, got '{}'", spec))?;

    let face = |s: &str| -> Result<u8, String> {
        match s.trim().parse::<u8>() {
            Ok(v) if (1..=6).contains(&v) => Ok(v),
            _ => Err(format!("die face must be 1-6, got '{}'", s.trim())),
        }
    };
    Ok((face(d1)?, face(d2)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bet_spec() {
        assert_eq!(parse_bet_spec("Pass Line=1000"), Ok((BetType::PassLine, 1000)));
        assert_eq!(parse_bet_spec("hard8 = 500"), Ok((BetType::Hard8, 500)));
        assert_eq!(parse_bet_spec("Don't Pass=100"), Ok((BetType::DontPass, 100)));
        assert!(parse_bet_spec("Pass Line").is_err());
        assert!(parse_bet_spec("Lottery=100").is_err());
        assert!(parse_bet_spec("Field=0").is_err());
        assert!(parse_bet_spec("Field=-5").is_err());
        assert_eq!(parse_bet_spec("Field=100000000"), Ok((BetType::Field, MAX_WAGER)));
        assert!(parse_bet_spec("Field=100000100").is_err());
        assert!(parse_bet_spec("Field=18446744073709551615").is_err());
    }

    #[test]
    fn test_parse_roll_spec() {
        assert_eq!(parse_roll_spec("3,4"), Ok((3, 4)));
        assert_eq!(parse_roll_spec(" 6 , 6 "), Ok((6, 6)));
        assert!(parse_roll_spec("0,4").is_err());
        assert!(parse_roll_spec("7").is_err());
    }

    #[test]
    fn test_simulate_args() {
        let cli = Cli::try_parse_from([
            "craps-table",
            "simulate",
            "--bet",
            "Pass Line=1000",
            "--bet",
            "Field=500",
            "--roll",
            "3,4",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate { bets, rolls, json, .. } => {
                assert_eq!(bets, vec![(BetType::PassLine, 1000), (BetType::Field, 500)]);
                assert_eq!(rolls, vec![(3, 4)]);
                assert!(json);
            }
            _ => panic!("expected simulate"),
        }
    }
}
