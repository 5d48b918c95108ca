//! Token ledger collaborator.
//!
//! The engine never owns token balances; it moves value through this trait
//! at settlement time and treats any failure as fatal to that operation.
//! Methods take `&self` — implementations use interior mutability so a
//! `&dyn TokenLedger` can be threaded through engine operations.

pub mod error;
pub mod memory;

pub use error::LedgerError;
pub use memory::MemoryLedger;

use snitch_types::PlayerAddress;

/// The fungible-token ledger the game is played over.
///
/// Amounts are raw token units (`u64`). Each call is atomic: it either fully
/// applies or returns an error leaving balances unchanged.
pub trait TokenLedger {
    /// Current balance of `holder`. Unknown accounts hold zero.
    fn balance_of(&self, holder: &PlayerAddress) -> Result<u64, LedgerError>;

    /// Move `amount` from `from` to `to`.
    fn transfer(&self, from: &PlayerAddress, to: &PlayerAddress, amount: u64)
        -> Result<(), LedgerError>;

    /// Create `amount` new tokens in `to`.
    fn mint(&self, to: &PlayerAddress, amount: u64) -> Result<(), LedgerError>;

    /// Destroy `amount` tokens held by `from`.
    fn burn(&self, from: &PlayerAddress, amount: u64) -> Result<(), LedgerError>;
}
