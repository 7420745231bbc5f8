pub mod core;
pub mod backend;
pub mod config;
pub mod menu;

pub use crate::core::{Account, AccountId, Amount, Ledger, LedgerError, Transaction, TransactionKind};
pub use crate::core::{account, ledger, transaction};
pub use crate::backend::{JsonStore, LedgerStore};
