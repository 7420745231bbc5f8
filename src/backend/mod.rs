mod json_store;
mod interface;

pub use interface::{LedgerStore, Loaded, Result, BackendError};
pub use json_store::JsonStore;
