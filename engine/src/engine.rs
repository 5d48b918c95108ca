//! The game engine — a single context object owning registry, rounds, and
//! player profiles.
//!
//! Every externally invoked operation executes as one indivisible step
//! against this state: callers never observe a partially applied operation,
//! and a failed operation leaves state unchanged. Time never flows on its
//! own — each operation receives `now` and performs any deadline-driven
//! phase advance it observes before proceeding.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use snitch_ledger::TokenLedger;
use snitch_store::{GameStore, StoreError};
use snitch_types::{CommitmentHash, PlayerAddress, Salt, Timestamp};
use snitch_vrf::{RandomOutput, VrfProvider};

use crate::commitment::verify_commitment;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{GameEvent, NotificationSink};
use crate::profile::PlayerProfile;
use crate::registry::Registry;
use crate::round::{Choice, Outcome, Phase, Round};
use crate::selection::{is_eligible, select_distinct_pair};
use crate::settlement::{compute_settlement, Settlement};

/// Serialized-operation game state. One per deployment.
pub struct GameEngine {
    registry: Option<Registry>,
    profiles: HashMap<PlayerAddress, PlayerProfile>,
    /// All rounds ever opened, retired rounds included.
    rounds: BTreeMap<u64, Round>,
}

/// The seed-verification context for a round: any observer (and the oracle)
/// derives the same bytes.
pub fn round_context(round_id: u64) -> Vec<u8> {
    let mut context = Vec::with_capacity(20);
    context.extend_from_slice(b"snitch-round");
    context.extend_from_slice(&round_id.to_le_bytes());
    context
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            registry: None,
            profiles: HashMap::new(),
            rounds: BTreeMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Admin surface
    // ------------------------------------------------------------------

    /// One-time setup of the registry.
    pub fn initialize(
        &mut self,
        config: GameConfig,
        authority: PlayerAddress,
        vault: PlayerAddress,
    ) -> Result<(), GameError> {
        if self.registry.is_some() {
            return Err(GameError::AlreadyInitialized);
        }
        config.validate()?;
        info!(authority = %authority, vault = %vault, "game initialized");
        self.registry = Some(Registry::new(config, authority, vault));
        Ok(())
    }

    /// Replace the configuration wholesale. In-flight round deadlines were
    /// fixed at opening and are not touched.
    pub fn update_config(
        &mut self,
        caller: &PlayerAddress,
        config: GameConfig,
    ) -> Result<(), GameError> {
        let registry = self.registry.as_ref().ok_or(GameError::NotInitialized)?;
        registry.require_authority(caller)?;
        config.validate()?;
        info!(caller = %caller, "configuration updated");
        self.registry.as_mut().ok_or(GameError::NotInitialized)?.config = config;
        Ok(())
    }

    pub fn pause(&mut self, caller: &PlayerAddress) -> Result<(), GameError> {
        let registry = self.registry.as_mut().ok_or(GameError::NotInitialized)?;
        registry.require_authority(caller)?;
        registry.paused = true;
        info!(caller = %caller, "game paused");
        Ok(())
    }

    pub fn resume(&mut self, caller: &PlayerAddress) -> Result<(), GameError> {
        let registry = self.registry.as_mut().ok_or(GameError::NotInitialized)?;
        registry.require_authority(caller)?;
        registry.paused = false;
        info!(caller = %caller, "game resumed");
        Ok(())
    }

    /// Authority escape hatch: clear a player's cooldown.
    pub fn reset_cooldown(
        &mut self,
        caller: &PlayerAddress,
        player: &PlayerAddress,
    ) -> Result<(), GameError> {
        let registry = self.registry.as_ref().ok_or(GameError::NotInitialized)?;
        registry.require_authority(caller)?;
        if let Some(profile) = self.profiles.get_mut(player) {
            profile.clear_cooldown();
            info!(player = %player, "cooldown cleared");
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Round lifecycle
    // ------------------------------------------------------------------

    /// Open a new interrogation round by selecting two eligible holders.
    ///
    /// When `use_vrf` is configured the seed must verify against `vrf` for
    /// this round's context; otherwise the seed value is taken as supplied.
    /// Candidate balances come from the ledger at call time.
    pub fn open_round(
        &mut self,
        candidates: &[PlayerAddress],
        seed: &RandomOutput,
        vrf: Option<&dyn VrfProvider>,
        ledger: &dyn TokenLedger,
        sink: &dyn NotificationSink,
        now: Timestamp,
    ) -> Result<u64, GameError> {
        let registry = self.registry.as_ref().ok_or(GameError::NotInitialized)?;
        registry.require_not_paused()?;
        if registry.active_round.is_some() {
            return Err(GameError::RoundActive);
        }
        let round_id = registry.current_round_id;
        if registry.config.use_vrf {
            let provider = vrf.ok_or(GameError::InvalidRandomness)?;
            match provider.verify(&round_context(round_id), seed) {
                Ok(true) => {}
                Ok(false) | Err(_) => return Err(GameError::InvalidRandomness),
            }
        }

        let config = registry.config.clone();
        let mut seen = HashSet::new();
        let mut pool = Vec::new();
        for candidate in candidates {
            if !seen.insert(candidate.clone()) {
                continue;
            }
            let balance = ledger.balance_of(candidate)?;
            let last = self
                .profiles
                .get(candidate)
                .and_then(|p| p.last_interrogation_at);
            if is_eligible(
                balance,
                config.min_balance_threshold,
                last,
                config.cooldown_period,
                now,
            ) {
                pool.push((candidate.clone(), balance));
            }
        }
        if pool.len() < 2 {
            return Err(GameError::InsufficientEligiblePlayers {
                eligible: pool.len(),
            });
        }
        let (player_a, player_b) = select_distinct_pair(&pool, &seed.value).ok_or(
            GameError::InsufficientEligiblePlayers {
                eligible: pool.len(),
            },
        )?;

        // Validation done; commit the mutation.
        let round = Round::open(round_id, player_a.clone(), player_b.clone(), &config, now);
        let event = GameEvent::RoundOpened {
            round_id,
            player_a: player_a.clone(),
            player_b: player_b.clone(),
            commit_deadline: round.commit_deadline,
            reveal_deadline: round.reveal_deadline,
            at: now,
        };
        self.rounds.insert(round_id, round);
        for player in [&player_a, &player_b] {
            self.profiles
                .entry(player.clone())
                .or_insert_with(|| PlayerProfile::new(player.clone()))
                .record_selection(now);
        }
        let registry = self.registry.as_mut().ok_or(GameError::NotInitialized)?;
        registry.active_round = Some(round_id);
        registry.current_round_id = registry
            .current_round_id
            .checked_add(1)
            .ok_or(GameError::Overflow)?;

        info!(round_id, player_a = %player_a, player_b = %player_b, "interrogation round opened");
        sink.emit(event);
        Ok(round_id)
    }

    /// Store a player's commitment hash, verbatim and opaque.
    pub fn commit_choice(
        &mut self,
        player: &PlayerAddress,
        commitment: CommitmentHash,
        sink: &dyn NotificationSink,
        now: Timestamp,
    ) -> Result<(), GameError> {
        let registry = self.registry.as_ref().ok_or(GameError::NotInitialized)?;
        registry.require_not_paused()?;
        let round_id = registry.active_round.ok_or(GameError::NoActiveRound)?;
        self.sync_phase(round_id, now);

        let round = self.rounds.get_mut(&round_id).ok_or(GameError::NoActiveRound)?;
        let seat = round.seat_of(player).ok_or(GameError::NotAParticipant)?;
        match round.phase {
            Phase::Committing => {}
            _ if now >= round.commit_deadline => return Err(GameError::CommitWindowClosed),
            phase => return Err(GameError::WrongPhase { phase }),
        }
        if round.commitment(seat).is_some() {
            return Err(GameError::AlreadyCommitted);
        }
        round.set_commitment(seat, commitment);
        debug!(round_id, player = %player, "choice committed");
        sink.emit(GameEvent::ChoiceCommitted {
            round_id,
            player: player.clone(),
            at: now,
        });
        Ok(())
    }

    /// Disclose a choice/salt pair; it must reproduce the stored commitment.
    pub fn reveal_choice(
        &mut self,
        player: &PlayerAddress,
        choice: Choice,
        salt: &Salt,
        sink: &dyn NotificationSink,
        now: Timestamp,
    ) -> Result<(), GameError> {
        let registry = self.registry.as_ref().ok_or(GameError::NotInitialized)?;
        registry.require_not_paused()?;
        let round_id = registry.active_round.ok_or(GameError::NoActiveRound)?;
        self.sync_phase(round_id, now);

        let round = self.rounds.get_mut(&round_id).ok_or(GameError::NoActiveRound)?;
        let seat = round.seat_of(player).ok_or(GameError::NotAParticipant)?;
        match round.phase {
            Phase::Revealing => {}
            Phase::Committing => {
                return Err(GameError::WrongPhase {
                    phase: Phase::Committing,
                })
            }
            phase => {
                return if now >= round.reveal_deadline {
                    Err(GameError::RevealWindowClosed)
                } else {
                    Err(GameError::WrongPhase { phase })
                }
            }
        }
        if now >= round.reveal_deadline {
            return Err(GameError::RevealWindowClosed);
        }
        if round.revealed(seat).is_some() {
            return Err(GameError::AlreadyRevealed);
        }
        let stored = round.commitment(seat).ok_or(GameError::NotCommitted)?;
        if !verify_commitment(player, choice, salt, round.round_id, stored) {
            return Err(GameError::InvalidReveal);
        }
        round.set_revealed(seat, choice);
        if let Some(profile) = self.profiles.get_mut(player) {
            profile.record_choice(choice);
        }
        debug!(round_id, player = %player, ?choice, "choice revealed");
        sink.emit(GameEvent::ChoiceRevealed {
            round_id,
            player: player.clone(),
            choice,
            at: now,
        });
        Ok(())
    }

    /// Settle the active round: both revealed, reveal deadline passed, or
    /// the round expired in the commit window.
    ///
    /// A committed-but-silent player is settled as an implicit Betray. The
    /// ledger is driven to completion before any engine state is mutated, so
    /// a `LedgerFailure` leaves the round pre-settlement and the call
    /// retryable.
    pub fn resolve_round(
        &mut self,
        ledger: &dyn TokenLedger,
        sink: &dyn NotificationSink,
        now: Timestamp,
    ) -> Result<Outcome, GameError> {
        let registry = self.registry.as_ref().ok_or(GameError::NotInitialized)?;
        registry.require_not_paused()?;
        let round_id = registry.active_round.ok_or(GameError::NoActiveRound)?;
        let vault = registry.vault.clone();
        let config = registry.config.clone();
        self.sync_phase(round_id, now);

        let round = self.rounds.get(&round_id).ok_or(GameError::NoActiveRound)?;
        if round.is_settled() {
            return Err(GameError::WrongPhase { phase: round.phase });
        }
        let settlement = match round.phase {
            Phase::Expired => Settlement::expired(),
            Phase::Revealing => {
                if !round.both_revealed() && now < round.reveal_deadline {
                    return Err(GameError::WrongPhase {
                        phase: Phase::Revealing,
                    });
                }
                let choice_a = round.revealed_a.unwrap_or(Choice::Betray);
                let choice_b = round.revealed_b.unwrap_or(Choice::Betray);
                let balance_a = ledger.balance_of(&round.player_a)?;
                let balance_b = ledger.balance_of(&round.player_b)?;
                compute_settlement(choice_a, choice_b, balance_a, balance_b, &config)?
            }
            phase => return Err(GameError::WrongPhase { phase }),
        };

        apply_settlement(ledger, &vault, &round.player_a, &round.player_b, &settlement)?;

        // Ledger is through; commit engine state.
        let (delta_a, delta_b, vault_delta) = (
            settlement.delta_a(),
            settlement.delta_b(),
            settlement.vault_delta(),
        );
        let outcome = settlement.outcome;
        let round = self.rounds.get_mut(&round_id).ok_or(GameError::NoActiveRound)?;
        round.outcome = Some(outcome);
        round.delta_a = delta_a;
        round.delta_b = delta_b;
        round.vault_delta = vault_delta;
        round.phase = if outcome == Outcome::Expired {
            Phase::Expired
        } else {
            Phase::Resolved
        };
        let event = GameEvent::RoundResolved {
            round_id,
            player_a: round.player_a.clone(),
            player_b: round.player_b.clone(),
            choice_a: round.revealed_a,
            choice_b: round.revealed_b,
            outcome,
            delta_a,
            delta_b,
            vault_delta,
            resolved_at: now,
        };

        let registry = self.registry.as_mut().ok_or(GameError::NotInitialized)?;
        registry.active_round = None;
        registry.rounds_completed = registry.rounds_completed.saturating_add(1);
        if vault_delta < 0 {
            let paid = u64::try_from(vault_delta.unsigned_abs()).unwrap_or(u64::MAX);
            registry.total_yield_paid = registry.total_yield_paid.saturating_add(paid);
        } else {
            let retained = u64::try_from(vault_delta).unwrap_or(u64::MAX);
            registry.total_vault_retained =
                registry.total_vault_retained.saturating_add(retained);
        }

        info!(round_id, ?outcome, delta_a, delta_b, vault_delta, "round resolved");
        sink.emit(event);
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    pub fn round(&self, round_id: u64) -> Option<&Round> {
        self.rounds.get(&round_id)
    }

    pub fn active_round(&self) -> Option<&Round> {
        let id = self.registry.as_ref()?.active_round?;
        self.rounds.get(&id)
    }

    pub fn profile(&self, player: &PlayerAddress) -> Option<&PlayerProfile> {
        self.profiles.get(player)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Snapshot all engine state into a store.
    pub fn save_to_store(&self, store: &dyn GameStore) -> Result<(), GameError> {
        if let Some(registry) = &self.registry {
            store.put_registry(&encode(registry)?)?;
        }
        for (id, round) in &self.rounds {
            store.put_round(*id, &encode(round)?)?;
        }
        for (player, profile) in &self.profiles {
            store.put_profile(player, &encode(profile)?)?;
        }
        Ok(())
    }

    /// Restore engine state from a store.
    pub fn load_from_store(store: &dyn GameStore) -> Result<Self, GameError> {
        let registry = match store.get_registry()? {
            Some(bytes) => Some(decode(&bytes)?),
            None => None,
        };
        let mut rounds = BTreeMap::new();
        for (id, bytes) in store.iter_rounds()? {
            rounds.insert(id, decode(&bytes)?);
        }
        let mut profiles = HashMap::new();
        for (player, bytes) in store.iter_profiles()? {
            profiles.insert(player, decode(&bytes)?);
        }
        Ok(Self {
            registry,
            profiles,
            rounds,
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Commit the deadline-driven phase advance the current time implies.
    fn sync_phase(&mut self, round_id: u64, now: Timestamp) {
        if let Some(round) = self.rounds.get_mut(&round_id) {
            let derived = round.current_phase(now);
            if round.phase != derived {
                if derived == Phase::Expired {
                    warn!(
                        round_id,
                        "commit window lapsed without both commitments; round expired"
                    );
                }
                round.phase = derived;
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive the computed settlement through the token ledger.
fn apply_settlement(
    ledger: &dyn TokenLedger,
    vault: &PlayerAddress,
    player_a: &PlayerAddress,
    player_b: &PlayerAddress,
    settlement: &Settlement,
) -> Result<(), GameError> {
    match settlement.outcome {
        Outcome::MutualCooperation => {
            pay_from_vault(ledger, vault, player_a, settlement.yield_a)?;
            pay_from_vault(ledger, vault, player_b, settlement.yield_b)?;
        }
        Outcome::BetrayalByA => {
            ledger.transfer(player_b, player_a, settlement.reward_transfer)?;
            ledger.transfer(player_b, vault, settlement.tax)?;
        }
        Outcome::BetrayalByB => {
            ledger.transfer(player_a, player_b, settlement.reward_transfer)?;
            ledger.transfer(player_a, vault, settlement.tax)?;
        }
        Outcome::MutualBetrayal => {
            ledger.transfer(player_a, vault, settlement.forfeit_a)?;
            ledger.transfer(player_b, vault, settlement.forfeit_b)?;
        }
        Outcome::Expired => {}
    }
    Ok(())
}

/// Pay `amount` to `to` out of the vault, minting only the shortfall.
fn pay_from_vault(
    ledger: &dyn TokenLedger,
    vault: &PlayerAddress,
    to: &PlayerAddress,
    amount: u64,
) -> Result<(), GameError> {
    if amount == 0 {
        return Ok(());
    }
    let vault_balance = ledger.balance_of(vault)?;
    let from_vault = amount.min(vault_balance);
    if from_vault > 0 {
        ledger.transfer(vault, to, from_vault)?;
    }
    if amount > from_vault {
        ledger.mint(to, amount - from_vault)?;
    }
    Ok(())
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, GameError> {
    bincode::serialize(value)
        .map_err(|e| GameError::Storage(StoreError::Serialization(e.to_string())))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GameError> {
    bincode::deserialize(bytes)
        .map_err(|e| GameError::Storage(StoreError::Serialization(e.to_string())))
}
