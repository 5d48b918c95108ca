//! Per-player participation record.
//!
//! Created lazily on first selection, never deleted. Everything beyond
//! `last_interrogation_at` is advisory — the protocol never consults the
//! cumulative stats.

use serde::{Deserialize, Serialize};
use snitch_types::{PlayerAddress, Timestamp};

use crate::round::Choice;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player: PlayerAddress,
    /// When this player was last selected. `None` means no cooldown applies
    /// (never selected, or cleared by the authority).
    pub last_interrogation_at: Option<Timestamp>,
    pub rounds_played: u64,
    pub times_cooperated: u64,
    pub times_betrayed: u64,
}

impl PlayerProfile {
    pub fn new(player: PlayerAddress) -> Self {
        Self {
            player,
            last_interrogation_at: None,
            rounds_played: 0,
            times_cooperated: 0,
            times_betrayed: 0,
        }
    }

    /// Whether the cooldown window is still running at `now`.
    pub fn is_on_cooldown(&self, cooldown_period: u64, now: Timestamp) -> bool {
        match self.last_interrogation_at {
            None => false,
            Some(at) => !at.has_expired(cooldown_period, now),
        }
    }

    /// Stamp a selection: starts the cooldown and counts the round.
    pub fn record_selection(&mut self, now: Timestamp) {
        self.last_interrogation_at = Some(now);
        self.rounds_played = self.rounds_played.saturating_add(1);
    }

    /// Count a revealed choice (advisory stats only).
    pub fn record_choice(&mut self, choice: Choice) {
        match choice {
            Choice::Cooperate => {
                self.times_cooperated = self.times_cooperated.saturating_add(1)
            }
            Choice::Betray => self.times_betrayed = self.times_betrayed.saturating_add(1),
        }
    }

    /// Authority escape hatch: clear the cooldown.
    pub fn clear_cooldown(&mut self) {
        self.last_interrogation_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> PlayerProfile {
        PlayerProfile::new(PlayerAddress::new("snch_p"))
    }

    #[test]
    fn fresh_profile_is_not_on_cooldown() {
        assert!(!profile().is_on_cooldown(1000, Timestamp::new(0)));
    }

    #[test]
    fn cooldown_runs_from_selection() {
        let mut p = profile();
        p.record_selection(Timestamp::new(1000));
        assert!(p.is_on_cooldown(100, Timestamp::new(1099)));
        assert!(!p.is_on_cooldown(100, Timestamp::new(1100)));
    }

    #[test]
    fn clear_cooldown_makes_eligible() {
        let mut p = profile();
        p.record_selection(Timestamp::new(1000));
        p.clear_cooldown();
        assert!(!p.is_on_cooldown(1_000_000, Timestamp::new(1001)));
    }

    #[test]
    fn stats_accumulate() {
        let mut p = profile();
        p.record_selection(Timestamp::new(1));
        p.record_selection(Timestamp::new(2));
        p.record_choice(Choice::Cooperate);
        p.record_choice(Choice::Betray);
        p.record_choice(Choice::Betray);
        assert_eq!(p.rounds_played, 2);
        assert_eq!(p.times_cooperated, 1);
        assert_eq!(p.times_betrayed, 2);
    }
}
