use std::io;
use std::path::PathBuf;

use log::warn;
use thiserror::Error;

use crate::core::Ledger;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The stored data exists but does not describe a valid ledger.
    #[error("store {path} is corrupt: {reason}")]
    CorruptStore {
        path: PathBuf,
        reason: String
    },
    #[error("failed to read store {path}")]
    StoreReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("failed to write store {path}")]
    StoreWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error
    }
}

impl BackendError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, BackendError::CorruptStore { .. })
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Outcome of a lenient load: the ledger to start from, plus the
/// reason it had to be emptied, if it was.
#[derive(Debug)]
pub struct Loaded {
    pub ledger: Ledger,
    pub issue: Option<BackendError>
}

pub trait LedgerStore {
    /// Reads the stored ledger. A store that does not exist yet reads as empty.
    fn read(&self) -> Result<Ledger>;

    /// Replaces the stored ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Like `read`, but never fails: an unreadable or corrupt store
    /// degrades to an empty ledger and the error is returned alongside.
    fn load(&self) -> Loaded {
        match self.read() {
            Ok(ledger) => Loaded { ledger, issue: None },
            Err(err) => {
                warn!("starting from an empty ledger: {}", err);
                Loaded { ledger: Ledger::new(), issue: Some(err) }
            }
        }
    }
}
