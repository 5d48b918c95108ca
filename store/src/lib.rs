//! Abstract storage trait for snitch game state.
//!
//! Every storage backend (embedded KV, SQL, in-memory for testing)
//! implements [`GameStore`]. The engine depends only on the trait and treats
//! each call as atomic; replication and durability belong to the backend.

pub mod error;

pub use error::StoreError;

use snitch_types::PlayerAddress;

/// Keyed persistence for registry, round, and player-profile records.
///
/// Payloads are opaque `Vec<u8>` so the store doesn't depend on the engine
/// crate (which would create a circular dependency). The engine
/// serializes/deserializes its own types.
pub trait GameStore {
    fn get_registry(&self) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_registry(&self, bytes: &[u8]) -> Result<(), StoreError>;

    fn get_round(&self, round_id: u64) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_round(&self, round_id: u64, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_rounds(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError>;

    fn get_profile(&self, player: &PlayerAddress) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_profile(&self, player: &PlayerAddress, bytes: &[u8]) -> Result<(), StoreError>;
    fn iter_profiles(&self) -> Result<Vec<(PlayerAddress, Vec<u8>)>, StoreError>;
}
