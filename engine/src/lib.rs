//! Interrogation-round engine for the snitch protocol.
//!
//! A recurring two-party commit-reveal game of trust played over token
//! balances: each round two eligible holders are chosen by weighted random
//! selection, each secretly commits to cooperate or betray, both later
//! reveal, and value moves between the pair (or the vault) according to the
//! joint outcome.
//!
//! The engine is a library with no internal parallelism: every operation on
//! [`GameEngine`] is an indivisible, serialized step, time-based transitions
//! are evaluated lazily from caller-supplied timestamps, and collaborators
//! (token ledger, record store, randomness, notification sink) enter through
//! traits at the call boundary.

pub mod commitment;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod profile;
pub mod registry;
pub mod round;
pub mod selection;
pub mod settlement;

pub use commitment::{commitment_digest, generate_salt, verify_commitment};
pub use config::GameConfig;
pub use engine::{round_context, GameEngine};
pub use error::GameError;
pub use events::{GameEvent, NoopSink, NotificationSink};
pub use profile::PlayerProfile;
pub use registry::Registry;
pub use round::{Choice, Outcome, Phase, Round, Seat};
pub use selection::{is_eligible, select_distinct_pair};
pub use settlement::{compute_settlement, Settlement};
