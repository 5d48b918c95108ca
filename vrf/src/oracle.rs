//! Oracle-signed randomness.
//!
//! The oracle signs the round context off-process; the engine holds only the
//! oracle's public key. A valid output carries the signature as its proof,
//! and its value must equal `blake2b256(signature)` — so neither the oracle
//! nor the submitter can pick the random value independently of the context.

use crate::{RandomOutput, VrfError, VrfProvider};
use snitch_crypto::{blake2b_256, verify_signature};
use snitch_types::{PublicKey, Signature};

/// Verifier for seeds signed by a configured oracle identity.
pub struct Ed25519Oracle {
    public_key: PublicKey,
}

impl Ed25519Oracle {
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Derive the random value implied by a signature proof.
    pub fn value_from_proof(proof: &[u8]) -> [u8; 32] {
        blake2b_256(proof)
    }
}

impl VrfProvider for Ed25519Oracle {
    fn get_randomness(&self, _context: &[u8]) -> Result<RandomOutput, VrfError> {
        // Seeds are produced by the oracle off-process; this side only verifies.
        Err(VrfError::Unavailable(
            "oracle seeds are produced by the oracle, not the verifier".into(),
        ))
    }

    fn verify(&self, context: &[u8], output: &RandomOutput) -> Result<bool, VrfError> {
        let sig_bytes: [u8; 64] = output
            .proof
            .as_slice()
            .try_into()
            .map_err(|_| VrfError::InvalidProof)?;
        let signature = Signature(sig_bytes);
        if !verify_signature(context, &signature, &self.public_key) {
            return Ok(false);
        }
        Ok(output.value == Self::value_from_proof(&output.proof))
    }

    fn name(&self) -> &str {
        "ed25519-oracle"
    }
}
