//! Error types and handling for the craps table

use thiserror::Error;

use crate::ui::component::NodeId;

/// Result type alias for table operations
pub type Result<T> = std::result::Result<T, Error>;

/// Craps table error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A bet name outside the fixed catalog reached the rules engine.
    #[error("Unknown bet: {0}")]
    UnknownBet(String),

    /// The region lookup produced an id the region map has no entry for.
    #[error("Region {0} has no entry in the region map")]
    UnmappedRegion(u8),

    #[error("Invalid dice values: {die1}, {die2} (each must be 1-6)")]
    InvalidDice { die1: u8, die2: u8 },

    #[error("Invalid point value: {0}")]
    InvalidPoint(u8),

    #[error("Invalid wager amount: {0}")]
    InvalidAmount(u64),

    #[error("Node {0} not found in the component tree")]
    NodeNotFound(NodeId),

    /// A listener kept re-emitting events and the drain never became quiescent.
    #[error("Event cascade did not settle after {passes} passes")]
    CascadeOverflow { passes: usize },

    #[error("Ledger cannot be reset while a roll is being resolved")]
    LedgerBusy,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
