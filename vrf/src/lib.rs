//! Verifiable randomness for player selection.
//!
//! Two modes, mirroring the `use_vrf` configuration flag:
//! - **Manual**: the operator supplies a raw 32-byte seed and no verification
//!   happens (selection is still deterministic in the seed).
//! - **Oracle**: the seed must be an [`Ed25519Oracle`]-verifiable output —
//!   the proof is the oracle's signature over the round context, and the
//!   random value is derived from the signature itself.

pub mod error;
pub mod oracle;

pub use error::VrfError;
pub use oracle::Ed25519Oracle;

/// Trait for verifying (and, where the provider supports it, producing)
/// randomness bound to a context.
pub trait VrfProvider: Send + Sync {
    /// Get randomness for a given context (e.g. a round id).
    fn get_randomness(&self, context: &[u8]) -> Result<RandomOutput, VrfError>;

    /// Verify that a randomness output was correctly generated for `context`.
    fn verify(&self, context: &[u8], output: &RandomOutput) -> Result<bool, VrfError>;

    /// Human-readable name of this provider.
    fn name(&self) -> &str;
}

/// The output of a randomness request — a random value with its proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomOutput {
    /// The random bytes (32 bytes).
    pub value: [u8; 32],
    /// Proof that the value was correctly generated (empty in manual mode).
    pub proof: Vec<u8>,
}

impl RandomOutput {
    /// An unproven seed, as supplied by an operator in manual mode.
    pub fn unproven(value: [u8; 32]) -> Self {
        Self {
            value,
            proof: Vec::new(),
        }
    }
}
