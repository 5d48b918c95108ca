//! Nullable ledger faults — a wrapper that fails on command.

use snitch_ledger::{LedgerError, TokenLedger};
use snitch_types::PlayerAddress;
use std::sync::Mutex;

/// Wraps any ledger and injects a backend failure after a configured number
/// of successful mutating calls. Reads always pass through.
///
/// Lets tests prove that a mid-settlement ledger failure leaves the round
/// pre-settlement and retryable.
pub struct FailingLedger<L: TokenLedger> {
    inner: L,
    mutations_before_failure: Mutex<Option<u32>>,
}

impl<L: TokenLedger> FailingLedger<L> {
    /// Never fails until `arm` is called.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            mutations_before_failure: Mutex::new(None),
        }
    }

    /// Fail every mutating call after the next `successes` succeed.
    pub fn arm(&self, successes: u32) {
        *self.mutations_before_failure.lock().unwrap() = Some(successes);
    }

    /// Stop injecting failures.
    pub fn disarm(&self) {
        *self.mutations_before_failure.lock().unwrap() = None;
    }

    fn check_fault(&self) -> Result<(), LedgerError> {
        let mut remaining = self.mutations_before_failure.lock().unwrap();
        match remaining.as_mut() {
            None => Ok(()),
            Some(0) => Err(LedgerError::Backend("injected fault".into())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
        }
    }
}

impl<L: TokenLedger> TokenLedger for FailingLedger<L> {
    fn balance_of(&self, holder: &PlayerAddress) -> Result<u64, LedgerError> {
        self.inner.balance_of(holder)
    }

    fn transfer(
        &self,
        from: &PlayerAddress,
        to: &PlayerAddress,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.check_fault()?;
        self.inner.transfer(from, to, amount)
    }

    fn mint(&self, to: &PlayerAddress, amount: u64) -> Result<(), LedgerError> {
        self.check_fault()?;
        self.inner.mint(to, amount)
    }

    fn burn(&self, from: &PlayerAddress, amount: u64) -> Result<(), LedgerError> {
        self.check_fault()?;
        self.inner.burn(from, amount)
    }
}
