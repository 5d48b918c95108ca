//! Nullable store — thread-safe in-memory storage for testing.

use snitch_store::{GameStore, StoreError};
use snitch_types::PlayerAddress;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// An in-memory game store for testing.
pub struct NullStore {
    registry: Mutex<Option<Vec<u8>>>,
    rounds: Mutex<BTreeMap<u64, Vec<u8>>>,
    profiles: Mutex<BTreeMap<String, (PlayerAddress, Vec<u8>)>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(None),
            rounds: Mutex::new(BTreeMap::new()),
            profiles: Mutex::new(BTreeMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore for NullStore {
    fn get_registry(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.registry.lock().unwrap().clone())
    }

    fn put_registry(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.registry.lock().unwrap() = Some(bytes.to_vec());
        Ok(())
    }

    fn get_round(&self, round_id: u64) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.rounds.lock().unwrap().get(&round_id).cloned())
    }

    fn put_round(&self, round_id: u64, bytes: &[u8]) -> Result<(), StoreError> {
        self.rounds.lock().unwrap().insert(round_id, bytes.to_vec());
        Ok(())
    }

    fn iter_rounds(&self) -> Result<Vec<(u64, Vec<u8>)>, StoreError> {
        Ok(self
            .rounds
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }

    fn get_profile(&self, player: &PlayerAddress) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .get(player.as_str())
            .map(|(_, bytes)| bytes.clone()))
    }

    fn put_profile(&self, player: &PlayerAddress, bytes: &[u8]) -> Result<(), StoreError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(player.as_str().to_string(), (player.clone(), bytes.to_vec()));
        Ok(())
    }

    fn iter_profiles(&self) -> Result<Vec<(PlayerAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_roundtrip() {
        let store = NullStore::new();
        assert!(store.get_registry().unwrap().is_none());
        store.put_registry(b"registry-bytes").unwrap();
        assert_eq!(store.get_registry().unwrap().unwrap(), b"registry-bytes");
    }

    #[test]
    fn rounds_iterate_in_id_order() {
        let store = NullStore::new();
        store.put_round(2, b"two").unwrap();
        store.put_round(0, b"zero").unwrap();
        store.put_round(1, b"one").unwrap();
        let ids: Vec<u64> = store.iter_rounds().unwrap().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn profile_roundtrip() {
        let store = NullStore::new();
        let player = PlayerAddress::new("snch_p1");
        assert!(store.get_profile(&player).unwrap().is_none());
        store.put_profile(&player, b"profile").unwrap();
        assert_eq!(store.get_profile(&player).unwrap().unwrap(), b"profile");
        assert_eq!(store.iter_profiles().unwrap().len(), 1);
    }
}
