//! Nullable random — deterministic randomness provider.

use snitch_vrf::{RandomOutput, VrfError, VrfProvider};
use std::sync::Mutex;

/// A deterministic randomness provider for testing.
///
/// Returns pre-configured values in order; verification always succeeds
/// unless the provider was built with [`NullRandom::rejecting`].
pub struct NullRandom {
    outputs: Mutex<Vec<[u8; 32]>>,
    index: Mutex<usize>,
    reject: bool,
}

impl NullRandom {
    /// Create with a sequence of deterministic random values.
    pub fn new(outputs: Vec<[u8; 32]>) -> Self {
        Self {
            outputs: Mutex::new(outputs),
            index: Mutex::new(0),
            reject: false,
        }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: [u8; 32]) -> Self {
        Self::new(vec![value])
    }

    /// A provider whose verification always fails — for exercising the
    /// invalid-randomness path.
    pub fn rejecting() -> Self {
        Self {
            outputs: Mutex::new(vec![[0u8; 32]]),
            index: Mutex::new(0),
            reject: true,
        }
    }
}

impl VrfProvider for NullRandom {
    fn get_randomness(&self, _context: &[u8]) -> Result<RandomOutput, VrfError> {
        let outputs = self.outputs.lock().unwrap();
        let mut idx = self.index.lock().unwrap();
        let current = *idx % outputs.len();
        *idx += 1;
        Ok(RandomOutput {
            value: outputs[current],
            proof: Vec::new(),
        })
    }

    fn verify(&self, _context: &[u8], _output: &RandomOutput) -> Result<bool, VrfError> {
        Ok(!self.reject)
    }

    fn name(&self) -> &str {
        "null-random"
    }
}
