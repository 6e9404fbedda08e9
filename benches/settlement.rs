//! Settlement and dispatch benchmarks
//!
//! Measures the rules engine on its own and a full roll cascade through the
//! component tree.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use craps_table::gaming::{settle, BetLedger, BetType, DiceRoll, Point, RandomDice};
use craps_table::{Table, TableConfig};

fn full_ledger() -> BetLedger {
    let mut ledger = BetLedger::new();
    for bet in BetType::ALL {
        let _ = ledger.add_bet(bet, 500);
    }
    ledger
}

/// Benchmark the rules engine against every catalog bet
fn benchmark_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement");

    let roll = DiceRoll::new(3, 3, 1).unwrap_or_else(|e| panic!("{}", e));
    group.bench_function("settle_full_catalog", |b| {
        b.iter(|| {
            let mut ledger = full_ledger();
            settle(black_box(&mut ledger), black_box(&roll), black_box(Point::On(6)))
        })
    });

    group.finish();
}

/// Benchmark one roll through the event bus, bets included
fn benchmark_roll_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("roll_cascade");
    group.sample_size(50);

    group.bench_function("roll_with_open_bets", |b| {
        let config = TableConfig::default();
        let dice = RandomDice::seeded(7);
        let mut table = Table::new(&config, Box::new(dice)).unwrap_or_else(|e| panic!("{}", e));
        for bet in [BetType::PassLine, BetType::Field, BetType::Place6, BetType::Hard8] {
            let _ = table.place_bet(bet, 100);
        }
        b.iter(|| table.roll())
    });

    group.bench_function("hover_bet_region", |b| {
        let config = TableConfig::default();
        let mut table = Table::new(&config, Box::new(RandomDice::seeded(7))).unwrap_or_else(|e| panic!("{}", e));
        let come = table.layout().bet_anchor(BetType::Come).unwrap_or_default();
        b.iter(|| table.hover(black_box(come)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_settlement, benchmark_roll_cascade);
criterion_main!(benches);
