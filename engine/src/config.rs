//! Game configuration.
//!
//! Replaced wholesale by the authority; applies to future rounds only —
//! deadlines of an in-flight round were fixed when it opened.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use snitch_types::PublicKey;

/// All tunable parameters of the interrogation game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum token balance to be eligible for selection.
    pub min_balance_threshold: u64,
    /// Seconds a player is ineligible after being selected.
    pub cooldown_period: u64,
    /// Commit window length in seconds.
    pub commit_duration: u64,
    /// Reveal window length in seconds.
    pub reveal_duration: u64,
    /// Yield each player earns on mutual cooperation, in basis points of
    /// their own balance.
    pub cooperation_yield_bps: u16,
    /// Share of the victim's balance a lone betrayer takes, in basis points.
    pub snitch_reward_bps: u16,
    /// Share of each balance forfeited on mutual betrayal, in basis points.
    pub double_snitch_penalty_bps: u16,
    /// Tax on the snitch reward, retained by the vault, in basis points.
    pub transfer_tax_bps: u16,
    /// Basis-point denominator (10000 = 100%).
    pub bps_denominator: u16,
    /// Require an oracle-verified seed for player selection.
    pub use_vrf: bool,
    /// The oracle identity seeds are verified against when `use_vrf` is set.
    pub vrf_oracle: Option<PublicKey>,
}

impl GameConfig {
    /// Validate internal consistency. Called on initialize and every update.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.bps_denominator == 0 {
            return Err(GameError::InvalidConfig("bps_denominator is zero".into()));
        }
        let denom = self.bps_denominator;
        for (name, rate) in [
            ("cooperation_yield_bps", self.cooperation_yield_bps),
            ("snitch_reward_bps", self.snitch_reward_bps),
            ("double_snitch_penalty_bps", self.double_snitch_penalty_bps),
            ("transfer_tax_bps", self.transfer_tax_bps),
        ] {
            if rate > denom {
                return Err(GameError::InvalidConfig(format!(
                    "{name} ({rate}) exceeds denominator ({denom})"
                )));
            }
        }
        if self.commit_duration == 0 || self.reveal_duration == 0 {
            return Err(GameError::InvalidConfig(
                "commit and reveal windows must be non-zero".into(),
            ));
        }
        if self.cooldown_period == 0 {
            return Err(GameError::InvalidConfig("cooldown must be non-zero".into()));
        }
        if self.use_vrf && self.vrf_oracle.is_none() {
            return Err(GameError::InvalidConfig(
                "use_vrf requires a vrf_oracle identity".into(),
            ));
        }
        Ok(())
    }

    /// The production parameter set: 7-day cooldown, 12-hour windows,
    /// 5% cooperation yield, 50% snitch take, 25% mutual-betrayal forfeit,
    /// 2% transfer tax.
    pub fn recommended(min_balance_threshold: u64) -> Self {
        Self {
            min_balance_threshold,
            cooldown_period: 604_800,
            commit_duration: 43_200,
            reveal_duration: 43_200,
            cooperation_yield_bps: 500,
            snitch_reward_bps: 5_000,
            double_snitch_penalty_bps: 2_500,
            transfer_tax_bps: 200,
            bps_denominator: 10_000,
            use_vrf: false,
            vrf_oracle: None,
        }
    }
}
