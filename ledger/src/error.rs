use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("arithmetic overflow in ledger operation")]
    Overflow,

    #[error("ledger backend error: {0}")]
    Backend(String),
}
