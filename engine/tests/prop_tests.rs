use proptest::prelude::*;

use snitch_engine::{
    commitment_digest, compute_settlement, is_eligible, select_distinct_pair, verify_commitment,
    Choice, GameConfig, Outcome,
};
use snitch_types::{PlayerAddress, Salt, Timestamp};

fn addr(n: usize) -> PlayerAddress {
    PlayerAddress::new(format!("snch_p{n}"))
}

fn weighted_pool(balances: &[u64]) -> Vec<(PlayerAddress, u64)> {
    balances
        .iter()
        .enumerate()
        .map(|(i, &b)| (addr(i), b))
        .collect()
}

proptest! {
    /// Selection only ever returns two distinct members of the pool.
    #[test]
    fn selection_returns_distinct_pool_members(
        balances in prop::collection::vec(0u64..10_000_000, 2..40),
        seed in prop::array::uniform32(0u8..),
    ) {
        let pool = weighted_pool(&balances);
        let (a, b) = select_distinct_pair(&pool, &seed).unwrap();
        prop_assert_ne!(&a, &b, "selected the same player twice");
        prop_assert!(pool.iter().any(|(p, _)| *p == a));
        prop_assert!(pool.iter().any(|(p, _)| *p == b));
    }

    /// Selection is deterministic in (seed, pool).
    #[test]
    fn selection_is_deterministic(
        balances in prop::collection::vec(1u64..1_000_000, 2..20),
        seed in prop::array::uniform32(0u8..),
    ) {
        let pool = weighted_pool(&balances);
        prop_assert_eq!(
            select_distinct_pair(&pool, &seed),
            select_distinct_pair(&pool, &seed)
        );
    }

    /// A zero-balance candidate is never selected while any weight remains.
    #[test]
    fn zero_weight_candidates_lose_to_weighted_ones(
        nonzero in prop::collection::vec(1u64..1_000_000, 2..10),
        seed in prop::array::uniform32(0u8..),
    ) {
        // One zero-balance candidate among weighted ones.
        let mut balances = nonzero;
        balances.push(0);
        let zero_player = addr(balances.len() - 1);
        let pool = weighted_pool(&balances);
        let (a, b) = select_distinct_pair(&pool, &seed).unwrap();
        prop_assert_ne!(&a, &zero_player);
        prop_assert_ne!(&b, &zero_player);
    }

    /// The eligibility predicate over randomized pools: selected players
    /// always satisfy threshold and cooldown.
    #[test]
    fn eligibility_filter_is_sound(
        entries in prop::collection::vec((0u64..10_000, 0u64..20_000), 0..30),
        threshold in 0u64..10_000,
        cooldown in 1u64..10_000,
    ) {
        let now = Timestamp::new(20_000);
        for (balance, last) in entries {
            let last_at = if last == 0 { None } else { Some(Timestamp::new(last)) };
            if is_eligible(balance, threshold, last_at, cooldown, now) {
                prop_assert!(balance >= threshold);
                if let Some(at) = last_at {
                    prop_assert!(now.as_secs() - at.as_secs() >= cooldown);
                }
            }
        }
    }

    /// Config validation rejects exactly the rates above the denominator.
    #[test]
    fn config_rejects_rates_above_denominator(
        yield_bps in 0u16..u16::MAX,
        snitch_bps in 0u16..u16::MAX,
        penalty_bps in 0u16..u16::MAX,
        tax_bps in 0u16..u16::MAX,
        denominator in 1u16..u16::MAX,
    ) {
        let config = GameConfig {
            cooperation_yield_bps: yield_bps,
            snitch_reward_bps: snitch_bps,
            double_snitch_penalty_bps: penalty_bps,
            transfer_tax_bps: tax_bps,
            bps_denominator: denominator,
            ..GameConfig::recommended(0)
        };
        let all_within = yield_bps <= denominator
            && snitch_bps <= denominator
            && penalty_bps <= denominator
            && tax_bps <= denominator;
        prop_assert_eq!(config.validate().is_ok(), all_within);
    }

    /// A commitment verifies for its exact tuple and nothing else.
    #[test]
    fn commitment_binds_every_field(
        suffix in "[a-z0-9]{1,12}",
        salt_bytes in prop::array::uniform32(0u8..),
        round_id in 0u64..1_000_000,
        choice_byte in 0u8..2,
    ) {
        let player = PlayerAddress::new(format!("snch_{suffix}"));
        let salt = Salt::new(salt_bytes);
        let choice = if choice_byte == 0 { Choice::Cooperate } else { Choice::Betray };
        let other_choice = if choice_byte == 0 { Choice::Betray } else { Choice::Cooperate };
        let commitment = commitment_digest(&player, choice, &salt, round_id);

        prop_assert!(verify_commitment(&player, choice, &salt, round_id, &commitment));
        prop_assert!(!verify_commitment(&player, other_choice, &salt, round_id, &commitment));
        prop_assert!(!verify_commitment(&player, choice, &salt, round_id + 1, &commitment));
        let other_player = PlayerAddress::new(format!("snch_{suffix}x"));
        prop_assert!(!verify_commitment(&other_player, choice, &salt, round_id, &commitment));
    }

    /// Betrayal settlement conserves value: the victim's loss equals the
    /// betrayer's gain plus the vault's tax.
    #[test]
    fn betrayal_settlement_conserves_value(
        balance_a in 0u64..u64::MAX / 2,
        balance_b in 0u64..u64::MAX / 2,
    ) {
        let config = GameConfig::recommended(0);
        let s = compute_settlement(Choice::Betray, Choice::Cooperate, balance_a, balance_b, &config)
            .unwrap();
        prop_assert_eq!(s.outcome, Outcome::BetrayalByA);
        prop_assert_eq!(-s.delta_b(), s.delta_a() + s.vault_delta());
    }

    /// Mutual outcomes balance against the vault.
    #[test]
    fn mutual_outcomes_balance_against_vault(
        balance_a in 0u64..u64::MAX / 2,
        balance_b in 0u64..u64::MAX / 2,
    ) {
        let config = GameConfig::recommended(0);
        let cc = compute_settlement(Choice::Cooperate, Choice::Cooperate, balance_a, balance_b, &config)
            .unwrap();
        prop_assert_eq!(cc.vault_delta(), -(cc.delta_a() + cc.delta_b()));
        let bb = compute_settlement(Choice::Betray, Choice::Betray, balance_a, balance_b, &config)
            .unwrap();
        prop_assert_eq!(bb.vault_delta(), -(bb.delta_a() + bb.delta_b()));
    }

    /// No settlement ever moves more than the configured share of a balance.
    #[test]
    fn settlement_never_exceeds_the_rate(
        balance_a in 0u64..u64::MAX / 2,
        balance_b in 0u64..u64::MAX / 2,
    ) {
        let config = GameConfig::recommended(0);
        let s = compute_settlement(Choice::Betray, Choice::Cooperate, balance_a, balance_b, &config)
            .unwrap();
        // The victim never loses more than snitch_reward_bps of their balance.
        prop_assert!(-s.delta_b() <= balance_b as i128 / 2 + 1);
        let bb = compute_settlement(Choice::Betray, Choice::Betray, balance_a, balance_b, &config)
            .unwrap();
        prop_assert!(-bb.delta_a() <= balance_a as i128 / 4 + 1);
        prop_assert!(-bb.delta_b() <= balance_b as i128 / 4 + 1);
    }
}
