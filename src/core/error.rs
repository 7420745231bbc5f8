use thiserror::Error;

use crate::core::{AccountId, Amount};

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Occurs when a deposit, withdrawal or transfer
    /// is given an amount that is zero or negative.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Amount),
    /// Occurs when a withdrawal or transfer asks for
    /// more than the source account holds.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount
    },
    /// Occurs when an account id does not resolve
    /// to an account held by the ledger.
    #[error("no such account: {0}")]
    NotAnAccount(AccountId),
    /// Occurs when creating or loading an account whose id
    /// is already held by the ledger.
    #[error("account already exists: {0}")]
    DuplicateAccount(AccountId),
    /// Occurs when crediting an account would take its balance
    /// past the largest representable amount.
    #[error("balance of account {0} would overflow")]
    BalanceOverflow(AccountId),
    #[error("cannot transfer from account {0} to itself")]
    SelfTransfer(AccountId)
}

pub type LedgerResult<T> = Result<T, LedgerError>;
