//! Player address type with `snch_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token-holder address, always prefixed with `snch_`.
///
/// The engine treats addresses as opaque identities; derivation from key
/// material (and the encoding of the tail) belongs to the wallet layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerAddress(String);

impl PlayerAddress {
    /// The standard prefix for all snitch-protocol addresses.
    pub const PREFIX: &'static str = "snch_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `snch_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with snch_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for PlayerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
