//! Eligibility predicate and weighted player selection.
//!
//! Selection is deterministic given the same seed and pool: any observer can
//! re-derive which two players were chosen. Each draw hashes the seed with a
//! draw counter and walks the cumulative weight table, so the probability of
//! being picked is proportional to balance, without replacement.

use snitch_crypto::blake2b_256_multi;
use snitch_types::{PlayerAddress, Timestamp};

/// Domain separator for selection draws.
const SELECT_DOMAIN: &[u8] = b"snitch-select";

/// The eligibility predicate: enough balance, cooldown elapsed.
///
/// `last_interrogation_at == None` (no profile yet) counts as eligible.
pub fn is_eligible(
    balance: u64,
    min_balance_threshold: u64,
    last_interrogation_at: Option<Timestamp>,
    cooldown_period: u64,
    now: Timestamp,
) -> bool {
    if balance < min_balance_threshold {
        return false;
    }
    match last_interrogation_at {
        None => true,
        Some(at) => at.has_expired(cooldown_period, now),
    }
}

/// Deterministically pick two distinct indices from a weighted pool.
///
/// Weights are balances; an all-zero-weight pool (possible when the balance
/// threshold is zero) degrades to uniform weights so selection stays total.
/// Returns `None` when the pool has fewer than two entries.
pub fn select_distinct_pair(
    pool: &[(PlayerAddress, u64)],
    seed: &[u8; 32],
) -> Option<(PlayerAddress, PlayerAddress)> {
    if pool.len() < 2 {
        return None;
    }
    let mut remaining: Vec<usize> = (0..pool.len()).collect();
    let first = draw_weighted(pool, &remaining, seed, 0);
    remaining.retain(|&i| i != first);
    let second = draw_weighted(pool, &remaining, seed, 1);
    Some((pool[first].0.clone(), pool[second].0.clone()))
}

/// One weighted draw over the indices in `remaining`.
fn draw_weighted(
    pool: &[(PlayerAddress, u64)],
    remaining: &[usize],
    seed: &[u8; 32],
    draw: u64,
) -> usize {
    let total: u128 = remaining.iter().map(|&i| pool[i].1 as u128).sum();
    let value = draw_value(seed, draw);
    if total == 0 {
        // Uniform fallback: every remaining candidate weighs the same.
        return remaining[(value % remaining.len() as u128) as usize];
    }
    let mut target = value % total;
    for &i in remaining {
        let weight = pool[i].1 as u128;
        if target < weight {
            return i;
        }
        target -= weight;
    }
    // Unreachable: target < total and the weights sum to total.
    remaining[remaining.len() - 1]
}

/// Derive the pseudo-random value for draw number `draw`.
fn draw_value(seed: &[u8; 32], draw: u64) -> u128 {
    let digest = blake2b_256_multi(&[SELECT_DOMAIN, seed, &draw.to_le_bytes()]);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: usize) -> PlayerAddress {
        PlayerAddress::new(format!("snch_p{n}"))
    }

    fn pool(balances: &[u64]) -> Vec<(PlayerAddress, u64)> {
        balances
            .iter()
            .enumerate()
            .map(|(i, &b)| (addr(i), b))
            .collect()
    }

    #[test]
    fn eligibility_requires_balance_and_cooldown() {
        let now = Timestamp::new(10_000);
        assert!(is_eligible(500, 500, None, 1000, now));
        assert!(!is_eligible(499, 500, None, 1000, now));
        assert!(is_eligible(500, 500, Some(Timestamp::new(9_000)), 1000, now));
        assert!(!is_eligible(500, 500, Some(Timestamp::new(9_001)), 1000, now));
    }

    #[test]
    fn selection_is_deterministic() {
        let pool = pool(&[100, 200, 300, 400]);
        let seed = [42u8; 32];
        assert_eq!(
            select_distinct_pair(&pool, &seed),
            select_distinct_pair(&pool, &seed)
        );
    }

    #[test]
    fn selection_returns_distinct_players() {
        let pool = pool(&[100, 200, 300, 400]);
        for byte in 0u8..=50 {
            let (a, b) = select_distinct_pair(&pool, &[byte; 32]).unwrap();
            assert_ne!(a, b, "seed {byte} selected the same player twice");
        }
    }

    #[test]
    fn pool_of_one_is_rejected() {
        let pool = pool(&[100]);
        assert!(select_distinct_pair(&pool, &[1u8; 32]).is_none());
    }

    #[test]
    fn pool_of_two_selects_both() {
        let pool = pool(&[100, 900]);
        let (a, b) = select_distinct_pair(&pool, &[7u8; 32]).unwrap();
        let mut selected = [a, b];
        selected.sort();
        assert_eq!(selected, [addr(0), addr(1)]);
    }

    #[test]
    fn all_zero_weights_fall_back_to_uniform() {
        let pool = pool(&[0, 0, 0]);
        let (a, b) = select_distinct_pair(&pool, &[3u8; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn heavier_balance_is_selected_more_often() {
        // One whale (90% of weight) among nine minnows: over many seeds the
        // whale must land a first-or-second slot far more often than any minnow.
        let mut balances = vec![9_000u64];
        balances.extend(std::iter::repeat(111).take(9));
        let pool = pool(&balances);

        let mut whale_hits = 0;
        let trials = 200;
        for t in 0u8..200 {
            let (a, b) = select_distinct_pair(&pool, &[t; 32]).unwrap();
            if a == addr(0) || b == addr(0) {
                whale_hits += 1;
            }
        }
        // Uniform selection would give the whale ~20% of pairs; proportional
        // weighting pushes it above 90%. Anything past half the trials rules
        // out uniform sampling.
        assert!(
            whale_hits > trials / 2,
            "whale selected only {whale_hits}/{trials} times"
        );
    }

    #[test]
    fn different_seeds_vary_the_selection() {
        let pool = pool(&[100, 100, 100, 100, 100, 100, 100, 100]);
        let mut distinct_pairs = std::collections::HashSet::new();
        for byte in 0u8..30 {
            distinct_pairs.insert(select_distinct_pair(&pool, &[byte; 32]).unwrap());
        }
        assert!(
            distinct_pairs.len() > 1,
            "30 seeds all produced the same pair"
        );
    }
}
