//! Engine error taxonomy.
//!
//! Every operation is all-or-nothing: on any error no partial state mutation
//! is retained, except the lazy deadline-driven phase advance, which is an
//! observation of time rather than part of the failing operation.

use crate::round::Phase;
use snitch_ledger::LedgerError;
use snitch_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("game has not been initialized")]
    NotInitialized,

    #[error("game is already initialized")]
    AlreadyInitialized,

    #[error("caller is not the game authority")]
    Unauthorized,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("game is currently paused")]
    GamePaused,

    #[error("an interrogation round is already active")]
    RoundActive,

    #[error("no active interrogation round")]
    NoActiveRound,

    #[error("not enough eligible players: found {eligible}, need 2")]
    InsufficientEligiblePlayers { eligible: usize },

    #[error("round randomness failed verification")]
    InvalidRandomness,

    #[error("player is not a participant in the active round")]
    NotAParticipant,

    #[error("operation not valid in phase {phase:?}")]
    WrongPhase { phase: Phase },

    #[error("commit window has closed")]
    CommitWindowClosed,

    #[error("reveal window has closed")]
    RevealWindowClosed,

    #[error("player has already committed")]
    AlreadyCommitted,

    #[error("player has no stored commitment")]
    NotCommitted,

    #[error("player has already revealed")]
    AlreadyRevealed,

    #[error("reveal does not reproduce the stored commitment")]
    InvalidReveal,

    #[error("arithmetic overflow in settlement computation")]
    Overflow,

    #[error("token ledger failure: {0}")]
    LedgerFailure(#[from] LedgerError),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}
