//! Craps table simulator
//!
//! A single-player craps table built as a tree of components that talk only
//! through events:
//! - gaming: the rules engine (bet catalog, point, ledger, settlement, dice)
//! - ui: the component tree, the event bus and render descriptions
//! - table: the subsystems that make up the table and the `Table` facade
//! - config: table configuration from TOML, environment and defaults
//! - logging: tracing subscriber setup

pub mod config;
pub mod error;
pub mod gaming;
pub mod logging;
pub mod table;
pub mod ui;

pub use config::TableConfig;
pub use error::{Error, Result};
pub use gaming::{BetType, DiceRoll, Point};
pub use table::{BankStatus, Table};
pub use ui::{PointerKind, Pos, TableEvent};
