//! Fundamental types for the snitch protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: player addresses, commitment hashes, salts, timestamps, and key
//! material. It carries no game logic.

pub mod address;
pub mod hash;
pub mod keys;
pub mod time;

pub use address::PlayerAddress;
pub use hash::{CommitmentHash, Salt};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
