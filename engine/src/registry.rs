//! Global game registry: configuration, authority, round counter, pause flag.

use serde::{Deserialize, Serialize};
use snitch_types::PlayerAddress;

use crate::config::GameConfig;
use crate::error::GameError;

/// The singleton root record gating every other component.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry {
    pub authority: PlayerAddress,
    /// Ledger account the yield is paid from and penalties/taxes flow into.
    pub vault: PlayerAddress,
    pub config: GameConfig,
    /// Monotonic round counter; the next round to open takes this id.
    pub current_round_id: u64,
    /// At most one round is active at a time.
    pub active_round: Option<u64>,
    pub paused: bool,
    // Advisory totals, never consulted by protocol logic.
    pub rounds_completed: u64,
    pub total_yield_paid: u64,
    pub total_vault_retained: u64,
}

impl Registry {
    pub fn new(config: GameConfig, authority: PlayerAddress, vault: PlayerAddress) -> Self {
        Self {
            authority,
            vault,
            config,
            current_round_id: 0,
            active_round: None,
            paused: false,
            rounds_completed: 0,
            total_yield_paid: 0,
            total_vault_retained: 0,
        }
    }

    pub fn require_authority(&self, caller: &PlayerAddress) -> Result<(), GameError> {
        if *caller != self.authority {
            return Err(GameError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_not_paused(&self) -> Result<(), GameError> {
        if self.paused {
            return Err(GameError::GamePaused);
        }
        Ok(())
    }
}
