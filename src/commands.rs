//! Command implementations for the craps-table CLI

use std::io::Write;
use tracing::info;

use craps_table::gaming::{BetType, DiceRoller, RandomDice, ScriptedDice};
use craps_table::ui::events::TableEvent;
use craps_table::ui::widgets::format_cents;
use craps_table::{Result, Table, TableConfig};

/// Open the terminal table.
pub fn play(config: &TableConfig) -> Result<()> {
    #[cfg(feature = "ui")]
    {
        craps_table::ui::tui::run(config)
    }
    #[cfg(not(feature = "ui"))]
    {
        let _ = config;
        Err(craps_table::Error::Config(
            "this build has no terminal UI; rebuild with `--features ui`".to_string(),
        ))
    }
}

/// What `simulate` should do
pub struct SimulateOptions<'a> {
    pub bets: &'a [(BetType, u64)],
    pub rolls: &'a [(u8, u8)],
    pub random_rolls: usize,
    pub seed: Option<u64>,
    pub json: bool,
}

/// Place the bets, roll, and write the journal to `out`.
pub fn simulate(config: &TableConfig, options: &SimulateOptions<'_>, out: &mut impl Write) -> Result<()> {
    let (dice, roll_count): (Box<dyn DiceRoller>, usize) = if options.rolls.is_empty() {
        let seed = options.seed.or(config.dice_seed);
        (Box::new(RandomDice::from_seed(seed)), options.random_rolls)
    } else {
        (Box::new(ScriptedDice::new(options.rolls.iter().copied())?), options.rolls.len())
    };

    let mut table = Table::new(config, dice)?;

    for (bet, amount) in options.bets {
        let report = table.place_bet(*bet, *amount)?;
        journal(out, report.game_events(), options.json)?;
    }

    for _ in 0..roll_count {
        let report = table.roll()?;
        journal(out, report.game_events(), options.json)?;
    }

    let bank = table.bank();
    info!(bank = bank.bank, on_table = bank.on_table, rolls = roll_count, "simulation finished");

    if options.json {
        writeln!(out, "{}", serde_json::json!({ "event": "summary", "data": {
            "point": table.point(),
            "bank": bank,
            "wagers": table.wagers(),
        }}))?;
    } else {
        writeln!(out, "point  {}", table.point())?;
        writeln!(out, "bank   {}  on table {}", format_cents(bank.bank), format_cents(bank.on_table as i64))?;
        for (bet, amount) in table.wagers() {
            writeln!(out, "open   {:<12} {}", bet.name(), format_cents(*amount as i64))?;
        }
    }
    Ok(())
}

fn journal<'e>(out: &mut impl Write, events: impl Iterator<Item = &'e TableEvent>, json: bool) -> Result<()> {
    for event in events {
        if json {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
        } else if let Some(line) = describe(event) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// One human-readable line per game event worth reporting
pub fn describe(event: &TableEvent) -> Option<String> {
    let cents = |amount: u64| format_cents(amount as i64);
    let line = match event {
        TableEvent::BetPlaced(n) => format!(
            "bet    {:<12} +{}  now {}",
            n.bet.name(),
            cents(n.amount_added),
            cents(n.current_amount)
        ),
        TableEvent::DiceRolled(r) => format!("roll   {} + {} = {}", r.roll.die1, r.roll.die2, r.roll.total()),
        TableEvent::PointSet(t) => format!("point  {}", t.current),
        TableEvent::PointWin(t) => format!("point  {} made, puck {}", t.previous, t.current),
        TableEvent::PointLose(t) => format!("point  seven out on {}, puck {}", t.previous, t.current),
        TableEvent::BetWin(o) => format!("win    {:<12} {} pays {}", o.bet.name(), cents(o.bet_amount), cents(o.payout)),
        TableEvent::BetLose(o) => format!("lose   {:<12} {}", o.bet.name(), cents(o.bet_amount)),
        TableEvent::BetPush(o) => format!("push   {:<12} {}", o.bet.name(), cents(o.bet_amount)),
        TableEvent::OverallWin(s) => format!("net    +{}", cents(s.net_amount)),
        TableEvent::OverallLose(s) => format!("net    -{}", cents(s.net_amount)),
        TableEvent::OverallPush(_) => "net    even".to_string(),
        TableEvent::BetsCleared(c) => format!("clear  {} bets, {} returned", c.bets, cents(c.returned)),
        _ => return None,
    };
    Some(line)
}

/// Print the bet catalog.
pub fn rules(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:<12} {:>6}", "Bet", "Pays")?;
    for bet in BetType::ALL {
        writeln!(out, "{:<12} {:>6}", bet.name(), bet.payout().to_string())?;
    }
    Ok(())
}
