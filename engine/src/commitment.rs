//! Commitment codec for the commit-reveal exchange.
//!
//! The digest binds player identity, choice, salt, and round id:
//!
//! ```text
//! blake2b256(player_address ∥ choice_byte ∥ salt ∥ round_id_le)
//! ```
//!
//! Binding the identity prevents a player from replaying the other seat's
//! observed commitment; binding the round id prevents replaying a commitment
//! from an earlier round.

use snitch_crypto::blake2b_256_multi;
use snitch_types::{CommitmentHash, PlayerAddress, Salt};

use crate::round::Choice;

/// Build the commitment digest for a (player, choice, salt, round) tuple.
pub fn commitment_digest(
    player: &PlayerAddress,
    choice: Choice,
    salt: &Salt,
    round_id: u64,
) -> CommitmentHash {
    let round_bytes = round_id.to_le_bytes();
    let digest = blake2b_256_multi(&[
        player.as_str().as_bytes(),
        &[choice.as_byte()],
        salt.as_bytes(),
        &round_bytes,
    ]);
    CommitmentHash::new(digest)
}

/// Check a revealed (choice, salt) pair against a stored commitment.
pub fn verify_commitment(
    player: &PlayerAddress,
    choice: Choice,
    salt: &Salt,
    round_id: u64,
    expected: &CommitmentHash,
) -> bool {
    commitment_digest(player, choice, salt, round_id) == *expected
}

/// Generate a fresh random salt.
///
/// Client-side helper: the engine itself only ever verifies salts.
pub fn generate_salt() -> Salt {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).expect("OS entropy source unavailable");
    Salt::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(s: &str) -> PlayerAddress {
        PlayerAddress::new(format!("snch_{s}"))
    }

    #[test]
    fn exact_tuple_verifies() {
        let salt = Salt::new([9u8; 32]);
        let commitment = commitment_digest(&player("a"), Choice::Betray, &salt, 3);
        assert!(verify_commitment(
            &player("a"),
            Choice::Betray,
            &salt,
            3,
            &commitment
        ));
    }

    #[test]
    fn wrong_choice_fails() {
        let salt = Salt::new([9u8; 32]);
        let commitment = commitment_digest(&player("a"), Choice::Betray, &salt, 3);
        assert!(!verify_commitment(
            &player("a"),
            Choice::Cooperate,
            &salt,
            3,
            &commitment
        ));
    }

    #[test]
    fn wrong_salt_fails() {
        let salt = Salt::new([9u8; 32]);
        let commitment = commitment_digest(&player("a"), Choice::Betray, &salt, 3);
        assert!(!verify_commitment(
            &player("a"),
            Choice::Betray,
            &Salt::new([8u8; 32]),
            3,
            &commitment
        ));
    }

    #[test]
    fn cross_player_replay_fails() {
        let salt = Salt::new([9u8; 32]);
        let commitment = commitment_digest(&player("a"), Choice::Betray, &salt, 3);
        assert!(!verify_commitment(
            &player("b"),
            Choice::Betray,
            &salt,
            3,
            &commitment
        ));
    }

    #[test]
    fn cross_round_replay_fails() {
        let salt = Salt::new([9u8; 32]);
        let commitment = commitment_digest(&player("a"), Choice::Betray, &salt, 3);
        assert!(!verify_commitment(
            &player("a"),
            Choice::Betray,
            &salt,
            4,
            &commitment
        ));
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
