//! A single interrogation round and its phase machinery.
//!
//! Phase is a function of stored deadlines plus "now": there are no timers.
//! The stored `phase` field only ever moves forward; `current_phase(now)`
//! derives where the round should be, and the engine commits that advance
//! before processing any operation that touches the round.

use crate::config::GameConfig;
use serde::{Deserialize, Serialize};
use snitch_types::{CommitmentHash, PlayerAddress, Timestamp};

/// A player's hidden decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Cooperate,
    Betray,
}

impl Choice {
    /// Wire byte used inside the commitment preimage.
    pub fn as_byte(self) -> u8 {
        match self {
            Choice::Cooperate => 0,
            Choice::Betray => 1,
        }
    }
}

/// Lifecycle phase of a round. Forward-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Committing,
    Revealing,
    Resolved,
    Expired,
}

/// Joint result of a settled round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    MutualCooperation,
    BetrayalByA,
    BetrayalByB,
    MutualBetrayal,
    /// Commit window lapsed without both commitments; no value moved.
    Expired,
}

/// Which chair a participant occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    A,
    B,
}

/// One interrogation: two players, a commit-reveal exchange, a settlement.
///
/// Identity fields are immutable after creation; rounds are retired (never
/// deleted) once `Resolved` or `Expired`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub round_id: u64,
    pub player_a: PlayerAddress,
    pub player_b: PlayerAddress,
    pub phase: Phase,
    pub commitment_a: Option<CommitmentHash>,
    pub commitment_b: Option<CommitmentHash>,
    pub revealed_a: Option<Choice>,
    pub revealed_b: Option<Choice>,
    pub opened_at: Timestamp,
    pub commit_deadline: Timestamp,
    pub reveal_deadline: Timestamp,
    /// Set exactly once, at settlement.
    pub outcome: Option<Outcome>,
    pub delta_a: i128,
    pub delta_b: i128,
    pub vault_delta: i128,
}

impl Round {
    pub fn open(
        round_id: u64,
        player_a: PlayerAddress,
        player_b: PlayerAddress,
        config: &GameConfig,
        now: Timestamp,
    ) -> Self {
        let commit_deadline = now.plus(config.commit_duration);
        let reveal_deadline = commit_deadline.plus(config.reveal_duration);
        Self {
            round_id,
            player_a,
            player_b,
            phase: Phase::Committing,
            commitment_a: None,
            commitment_b: None,
            revealed_a: None,
            revealed_b: None,
            opened_at: now,
            commit_deadline,
            reveal_deadline,
            outcome: None,
            delta_a: 0,
            delta_b: 0,
            vault_delta: 0,
        }
    }

    pub fn seat_of(&self, player: &PlayerAddress) -> Option<Seat> {
        if *player == self.player_a {
            Some(Seat::A)
        } else if *player == self.player_b {
            Some(Seat::B)
        } else {
            None
        }
    }

    pub fn commitment(&self, seat: Seat) -> Option<&CommitmentHash> {
        match seat {
            Seat::A => self.commitment_a.as_ref(),
            Seat::B => self.commitment_b.as_ref(),
        }
    }

    pub fn set_commitment(&mut self, seat: Seat, hash: CommitmentHash) {
        match seat {
            Seat::A => self.commitment_a = Some(hash),
            Seat::B => self.commitment_b = Some(hash),
        }
    }

    pub fn revealed(&self, seat: Seat) -> Option<Choice> {
        match seat {
            Seat::A => self.revealed_a,
            Seat::B => self.revealed_b,
        }
    }

    pub fn set_revealed(&mut self, seat: Seat, choice: Choice) {
        match seat {
            Seat::A => self.revealed_a = Some(choice),
            Seat::B => self.revealed_b = Some(choice),
        }
    }

    pub fn both_committed(&self) -> bool {
        self.commitment_a.is_some() && self.commitment_b.is_some()
    }

    pub fn both_revealed(&self) -> bool {
        self.revealed_a.is_some() && self.revealed_b.is_some()
    }

    /// The phase the round should be in at `now`.
    ///
    /// Terminal phases are sticky. A `Committing` round advances to
    /// `Revealing` as soon as both commitments are in, or when the commit
    /// deadline passes with both present; with fewer than two commitments at
    /// the deadline it advances to `Expired` (no reveal is possible).
    pub fn current_phase(&self, now: Timestamp) -> Phase {
        match self.phase {
            Phase::Resolved | Phase::Expired | Phase::Revealing => self.phase,
            Phase::Committing => {
                if self.both_committed() {
                    Phase::Revealing
                } else if now >= self.commit_deadline {
                    Phase::Expired
                } else {
                    Phase::Committing
                }
            }
        }
    }

    /// Whether the resolving operation may settle this round at `now`.
    pub fn can_resolve(&self, now: Timestamp) -> bool {
        match self.current_phase(now) {
            Phase::Revealing => self.both_revealed() || now >= self.reveal_deadline,
            // Expired rounds settle as a no-op; already-settled rounds cannot.
            Phase::Expired => self.outcome.is_none(),
            _ => false,
        }
    }

    /// Whether settlement has already happened.
    pub fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_round() -> Round {
        let config = GameConfig {
            commit_duration: 100,
            reveal_duration: 100,
            ..GameConfig::recommended(0)
        };
        Round::open(
            0,
            PlayerAddress::new("snch_a"),
            PlayerAddress::new("snch_b"),
            &config,
            Timestamp::new(1000),
        )
    }

    #[test]
    fn deadlines_are_fixed_at_creation() {
        let round = test_round();
        assert_eq!(round.commit_deadline, Timestamp::new(1100));
        assert_eq!(round.reveal_deadline, Timestamp::new(1200));
    }

    #[test]
    fn starts_committing() {
        let round = test_round();
        assert_eq!(round.current_phase(Timestamp::new(1000)), Phase::Committing);
        assert_eq!(round.current_phase(Timestamp::new(1099)), Phase::Committing);
    }

    #[test]
    fn both_commitments_advance_early() {
        let mut round = test_round();
        round.set_commitment(Seat::A, CommitmentHash::new([1; 32]));
        assert_eq!(round.current_phase(Timestamp::new(1050)), Phase::Committing);
        round.set_commitment(Seat::B, CommitmentHash::new([2; 32]));
        assert_eq!(round.current_phase(Timestamp::new(1050)), Phase::Revealing);
    }

    #[test]
    fn deadline_without_both_commitments_expires() {
        let mut round = test_round();
        round.set_commitment(Seat::A, CommitmentHash::new([1; 32]));
        assert_eq!(round.current_phase(Timestamp::new(1100)), Phase::Expired);
    }

    #[test]
    fn terminal_phase_is_sticky() {
        let mut round = test_round();
        round.phase = Phase::Resolved;
        assert_eq!(round.current_phase(Timestamp::new(9999)), Phase::Resolved);
    }

    #[test]
    fn resolvable_after_reveal_deadline() {
        let mut round = test_round();
        round.set_commitment(Seat::A, CommitmentHash::new([1; 32]));
        round.set_commitment(Seat::B, CommitmentHash::new([2; 32]));
        round.phase = Phase::Revealing;
        round.set_revealed(Seat::A, Choice::Cooperate);
        assert!(!round.can_resolve(Timestamp::new(1150)));
        assert!(round.can_resolve(Timestamp::new(1200)));
    }

    #[test]
    fn resolvable_once_both_revealed() {
        let mut round = test_round();
        round.set_commitment(Seat::A, CommitmentHash::new([1; 32]));
        round.set_commitment(Seat::B, CommitmentHash::new([2; 32]));
        round.phase = Phase::Revealing;
        round.set_revealed(Seat::A, Choice::Cooperate);
        round.set_revealed(Seat::B, Choice::Betray);
        assert!(round.can_resolve(Timestamp::new(1150)));
    }

    #[test]
    fn seat_lookup() {
        let round = test_round();
        assert_eq!(round.seat_of(&PlayerAddress::new("snch_a")), Some(Seat::A));
        assert_eq!(round.seat_of(&PlayerAddress::new("snch_b")), Some(Seat::B));
        assert_eq!(round.seat_of(&PlayerAddress::new("snch_c")), None);
    }
}
