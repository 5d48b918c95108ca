//! Ed25519 key derivation.
//!
//! The engine only ever verifies signatures; it never generates keys from an
//! OS entropy source. Deterministic seed derivation is what tests and tooling
//! need.

use ed25519_dalek::SigningKey;
use snitch_types::{KeyPair, PrivateKey, PublicKey};

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    let signing_key = SigningKey::from_bytes(seed);
    let verifying_key = signing_key.verifying_key();
    KeyPair {
        public: PublicKey(verifying_key.to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(&private.0);
    PublicKey(signing_key.verifying_key().to_bytes())
}
