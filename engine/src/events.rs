//! Game events and the notification sink.
//!
//! Emission is fire-and-forget: the sink signature is infallible so a
//! misbehaving announcement pipeline can never affect settlement.

use serde::{Deserialize, Serialize};
use snitch_types::{PlayerAddress, Timestamp};

use crate::round::{Choice, Outcome};

/// Everything the engine announces to the outside world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundOpened {
        round_id: u64,
        player_a: PlayerAddress,
        player_b: PlayerAddress,
        commit_deadline: Timestamp,
        reveal_deadline: Timestamp,
        at: Timestamp,
    },
    ChoiceCommitted {
        round_id: u64,
        player: PlayerAddress,
        at: Timestamp,
    },
    ChoiceRevealed {
        round_id: u64,
        player: PlayerAddress,
        choice: Choice,
        at: Timestamp,
    },
    RoundResolved {
        round_id: u64,
        player_a: PlayerAddress,
        player_b: PlayerAddress,
        /// `None` when the player never revealed.
        choice_a: Option<Choice>,
        choice_b: Option<Choice>,
        outcome: Outcome,
        delta_a: i128,
        delta_b: i128,
        vault_delta: i128,
        resolved_at: Timestamp,
    },
}

/// One-way outlet for game events (announcement bots, analytics).
pub trait NotificationSink {
    fn emit(&self, event: GameEvent);
}

/// A sink that drops everything.
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn emit(&self, _event: GameEvent) {}
}
