//! End-to-end table tests
//!
//! Every test drives the table the way a front-end would: pointer input and
//! roll requests in, events and widgets out.

use craps_table::gaming::ScriptedDice;
use craps_table::ui::Widget;
use craps_table::{BetType, Point, Pos, Table, TableConfig, TableEvent};

fn table_with_rolls(rolls: &[(u8, u8)]) -> Table {
    let dice = ScriptedDice::new(rolls.iter().copied()).unwrap();
    Table::new(&TableConfig::default(), Box::new(dice)).unwrap()
}

fn tooltips(table: &Table) -> Vec<Vec<String>> {
    table
        .widgets()
        .into_iter()
        .filter_map(|(_, widget)| match widget {
            Widget::Tooltip { lines } => Some(lines),
            _ => None,
        })
        .collect()
}

#[test]
fn test_natural_settles_every_wager() {
    let mut table = table_with_rolls(&[(3, 4)]);
    table.place_bet(BetType::PassLine, 1000).unwrap();
    table.place_bet(BetType::Any7, 100).unwrap();
    table.place_bet(BetType::Field, 500).unwrap();

    let bank = table.bank();
    assert_eq!(bank.bank, 8_400);
    assert_eq!(bank.on_table, 1_600);

    let report = table.roll().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::DiceRolled(_))), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetWin(_))), 2);
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::BetLose(o) if o.bet == BetType::Field && o.bet_amount == 500)),
        1
    );
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::OverallWin(s) if s.net_amount == 900)),
        1
    );
    // a natural on the come-out leaves the puck off
    assert_eq!(report.count(|e| matches!(e, TableEvent::PointSet(_))), 0);
    assert_eq!(table.point(), Point::Off);

    let bank = table.bank();
    assert_eq!(bank.bank, 9_800);
    assert_eq!(bank.on_table, 1_100);
    assert_eq!(bank.last_win, 900);
    assert_eq!(table.wager(BetType::PassLine), 1000);
    assert_eq!(table.wager(BetType::Any7), 100);
    assert_eq!(table.wager(BetType::Field), 0);
}

#[test]
fn test_point_set_then_seven_out() {
    let mut table = table_with_rolls(&[(2, 4), (5, 2)]);
    table.place_bet(BetType::PassLine, 1000).unwrap();
    table.place_bet(BetType::DontPass, 500).unwrap();

    let report = table.roll().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::PointSet(t) if t.current == Point::On(6))), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetPush(_))), 2);
    assert_eq!(report.count(|e| matches!(e, TableEvent::OverallPush(_))), 1);
    assert_eq!(table.point(), Point::On(6));

    let puck = table
        .widgets()
        .into_iter()
        .find_map(|(rect, widget)| match widget {
            Widget::Puck { point } => Some((rect, point)),
            _ => None,
        })
        .unwrap();
    assert_eq!(puck.1, Point::On(6));
    assert!(puck.0.contains(table.layout().puck_anchor(Point::On(6))));

    let report = table.roll().unwrap();
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::PointLose(t) if t.previous == Point::On(6) && t.current == Point::Off)),
        1
    );
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetLose(o) if o.bet == BetType::PassLine)), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetWin(o) if o.bet == BetType::DontPass && o.payout == 500)), 1);
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::OverallLose(s) if s.net_amount == 500)),
        1
    );

    assert_eq!(table.point(), Point::Off);
    let bank = table.bank();
    assert_eq!(bank.bank, 9_000);
    assert_eq!(bank.on_table, 500);
    assert_eq!(bank.last_win, -500);
    assert_eq!(table.wagers(), &[(BetType::DontPass, 500)]);
}

#[test]
fn test_making_the_point_pays_the_line() {
    let mut table = table_with_rolls(&[(5, 5), (3, 3), (6, 4)]);
    table.place_bet(BetType::PassLine, 500).unwrap();
    table.roll().unwrap();
    assert_eq!(table.point(), Point::On(10));

    // a six while the point is ten does nothing to the line
    let report = table.roll().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetPush(_))), 1);

    let report = table.roll().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::PointWin(_))), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetWin(o) if o.payout == 500)), 1);
    assert_eq!(table.point(), Point::Off);
    assert_eq!(table.bank().bank, 10_000);
}

#[test]
fn test_bet_placement_follows_selected_chip() {
    let mut table = table_with_rolls(&[]);
    let field = table.layout().bet_anchor(BetType::Field).unwrap();

    let report = table.click(field).unwrap();
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::BetPlaced(n) if n.amount_added == 100 && n.current_amount == 100)),
        1
    );
    assert_eq!(report.count(|e| matches!(e, TableEvent::DiceRolled(_))), 0);
    assert_eq!(report.count(|e| matches!(e, TableEvent::RollRequested)), 0);

    // hovering a chip previews it without selecting
    let big = table.chip_position(2500).unwrap();
    let report = table.hover(big).unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::ChipHovered(n) if n.selected_chip == 2500)), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::ChipSelected(_))), 0);
    table.click(field).unwrap();
    assert_eq!(table.wager(BetType::Field), 200);

    table.select_chip(2500).unwrap();
    let report = table.click(field).unwrap();
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::BetPlaced(n) if n.amount_added == 2500 && n.current_amount == 2700)),
        1
    );
    assert_eq!(table.bank().bank, 10_000 - 2700);
    assert_eq!(table.bank().on_table, 2700);
}

#[test]
fn test_chip_stack_sits_on_its_region() {
    let mut table = table_with_rolls(&[]);
    table.place_bet(BetType::Hard8, 600).unwrap();

    let anchor = table.layout().bet_anchor(BetType::Hard8).unwrap();
    let stack = table
        .widgets()
        .into_iter()
        .find_map(|(rect, widget)| match widget {
            Widget::ChipStack { bet: BetType::Hard8, amount } => Some((rect, amount)),
            _ => None,
        })
        .unwrap();
    assert_eq!(stack.1, 600);
    assert!(stack.0.contains(anchor));
    assert!(table.layout().region_rect(BetType::Hard8).unwrap().contains(anchor));
}

#[test]
fn test_hover_tooltip_comes_and_goes() {
    let mut table = table_with_rolls(&[]);
    let fresh = table.component_count();
    let come = table.layout().bet_anchor(BetType::Come).unwrap();

    let report = table.hover(come).unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetHovered(n) if n.bet == BetType::Come)), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetPlaced(_))), 0);
    assert_eq!(table.component_count(), fresh + 1);
    assert!(tooltips(&table).contains(&vec!["Come".to_string(), "$0.00".to_string()]));

    // moving within the region replaces the tooltip rather than stacking
    table.hover(Pos::new(come.x + 1, come.y)).unwrap();
    assert_eq!(table.component_count(), fresh + 1);

    let report = table.hover(Pos::new(0, 0)).unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::RegionHit(_))), 1);
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetRegionHit(_))), 0);
    assert_eq!(table.component_count(), fresh);
}

#[test]
fn test_clicking_the_dice_rolls() {
    let mut table = table_with_rolls(&[(6, 6)]);
    table.place_bet(BetType::Twelve, 100).unwrap();
    let dice = table.layout().dice_area().center();

    let report = table.hover(dice).unwrap();
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::DiceHovered(h) if h.last_roll.is_none())),
        1
    );
    assert_eq!(report.count(|e| matches!(e, TableEvent::DiceRolled(_))), 0);

    let report = table.click(dice).unwrap();
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::DiceRolled(r) if r.roll.total() == 12 && r.screen_pos == Some(dice))),
        1
    );
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetWin(o) if o.payout == 3000)), 1);

    let faces: Vec<u8> = table
        .widgets()
        .into_iter()
        .filter_map(|(_, widget)| match widget {
            Widget::Die { face } => Some(face),
            _ => None,
        })
        .collect();
    assert_eq!(faces, vec![6, 6]);
    assert!(tooltips(&table).contains(&vec!["Roll the Dice".to_string(), "Current: 12".to_string()]));
}

#[test]
fn test_bank_panel_tracks_money() {
    let mut table = table_with_rolls(&[(1, 1)]);
    assert!(tooltips(&table).contains(&vec![
        "Welcome to Craps!".to_string(),
        "Bank: $100.00".to_string(),
        "Betting: $0.00".to_string(),
        "Last Win: $0.00".to_string(),
    ]));

    table.place_bet(BetType::PassLine, 500).unwrap();
    table.roll().unwrap();
    assert!(tooltips(&table).contains(&vec![
        "Welcome to Craps!".to_string(),
        "Bank: $95.00".to_string(),
        "Betting: $0.00".to_string(),
        "Last Win: -$5.00".to_string(),
    ]));
}

#[test]
fn test_bets_added_after_a_roll_wait_for_the_next() {
    let mut table = table_with_rolls(&[(3, 4), (3, 4)]);
    table.roll().unwrap();
    table.place_bet(BetType::Any7, 100).unwrap();
    assert_eq!(table.bank().bank, 9_900);

    let report = table.roll().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetWin(o) if o.bet == BetType::Any7)), 1);
    assert_eq!(table.bank().bank, 10_300);
}

#[test]
fn test_clearing_the_table_returns_every_wager() {
    let mut table = table_with_rolls(&[(3, 4)]);
    let fresh = table.component_count();
    table.place_bet(BetType::PassLine, 500).unwrap();
    table.place_bet(BetType::Field, 100).unwrap();
    assert_eq!(table.bank().bank, 9_400);

    let report = table.clear_bets().unwrap();
    assert_eq!(
        report.count(|e| matches!(e, TableEvent::BetsCleared(c) if c.bets == 2 && c.returned == 600)),
        1
    );
    assert_eq!(report.count(|e| matches!(e, TableEvent::DiceRolled(_))), 0);
    assert!(table.wagers().is_empty());
    assert_eq!(table.bank().bank, 10_000);
    assert_eq!(table.bank().on_table, 0);
    // chip stacks are gone once the tick prunes them
    assert_eq!(table.component_count(), fresh);

    // nothing left to take down
    let report = table.clear_bets().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetsCleared(_))), 0);

    let report = table.roll().unwrap();
    assert_eq!(report.count(|e| matches!(e, TableEvent::BetWin(_) | TableEvent::BetLose(_))), 0);
    assert_eq!(table.bank().bank, 10_000);
}

#[test]
fn test_seeded_tables_roll_alike() {
    let config = TableConfig {
        dice_seed: Some(42),
        ..TableConfig::default()
    };
    let rolls = |config: &TableConfig| -> Vec<u8> {
        let dice = craps_table::gaming::RandomDice::from_seed(config.dice_seed);
        let mut table = Table::new(config, Box::new(dice)).unwrap();
        (0..20)
            .map(|_| {
                let report = table.roll().unwrap();
                let total = report
                    .game_events()
                    .find_map(|e| match e {
                        TableEvent::DiceRolled(r) => Some(r.roll.total()),
                        _ => None,
                    })
                    .unwrap();
                total
            })
            .collect()
    };
    assert_eq!(rolls(&config), rolls(&config));
}
