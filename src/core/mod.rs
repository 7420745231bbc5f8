pub mod account;
pub mod transaction;
pub mod ledger;
pub mod error;

pub use account::{Account, AccountId};
pub use transaction::{Amount, Timestamp, Transaction, TransactionKind};
pub use ledger::Ledger;
pub use error::{LedgerError, LedgerResult};
