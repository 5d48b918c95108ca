//! In-memory token ledger.
//!
//! Thread-safe map of balances, suitable for tests and single-process
//! deployments. Real deployments put the actual token mint behind the same
//! trait.

use crate::{LedgerError, TokenLedger};
use snitch_types::PlayerAddress;
use std::collections::HashMap;
use std::sync::Mutex;

/// A Mutex-guarded balance map implementing [`TokenLedger`].
pub struct MemoryLedger {
    balances: Mutex<HashMap<PlayerAddress, u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
        }
    }

    /// Create a ledger pre-funded with the given balances.
    pub fn with_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (PlayerAddress, u64)>,
    {
        Self {
            balances: Mutex::new(balances.into_iter().collect()),
        }
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> u64 {
        self.balances.lock().unwrap().values().sum()
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenLedger for MemoryLedger {
    fn balance_of(&self, holder: &PlayerAddress) -> Result<u64, LedgerError> {
        Ok(*self.balances.lock().unwrap().get(holder).unwrap_or(&0))
    }

    fn transfer(
        &self,
        from: &PlayerAddress,
        to: &PlayerAddress,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let mut balances = self.balances.lock().unwrap();
        let from_balance = *balances.get(from).unwrap_or(&0);
        if from_balance < amount {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available: from_balance,
            });
        }
        let to_balance = *balances.get(to).unwrap_or(&0);
        let to_new = to_balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        balances.insert(from.clone(), from_balance - amount);
        balances.insert(to.clone(), to_new);
        Ok(())
    }

    fn mint(&self, to: &PlayerAddress, amount: u64) -> Result<(), LedgerError> {
        let mut balances = self.balances.lock().unwrap();
        let balance = *balances.get(to).unwrap_or(&0);
        let new = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        balances.insert(to.clone(), new);
        Ok(())
    }

    fn burn(&self, from: &PlayerAddress, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Ok(());
        }
        let mut balances = self.balances.lock().unwrap();
        let balance = *balances.get(from).unwrap_or(&0);
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available: balance,
            });
        }
        balances.insert(from.clone(), balance - amount);
        Ok(())
    }
}
