//! Cryptographic primitives for the snitch protocol.
//!
//! - **Blake2b-256** for hashing (commitment digests, seed derivation)
//! - **Ed25519** for oracle signature verification

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
