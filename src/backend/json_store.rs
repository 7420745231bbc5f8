use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::backend::interface::{BackendError, LedgerStore, Result};
use crate::core::{Account, Amount, Ledger};

/// Keeps a ledger as a JSON array of accounts in a single file.
pub struct JsonStore {
    path: PathBuf
}

impl JsonStore {
    const INDENT: &'static [u8] = b"    ";

    pub fn new(path: impl AsRef<Path>) -> JsonStore {
        JsonStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Copies the current store file to `<name>.corrupt` so a later
    /// save does not destroy the only copy of data that failed to load.
    pub fn keep_damaged_copy(&self) -> Result<PathBuf> {
        let copy = self.sibling_path(".corrupt");
        fs::copy(&self.path, &copy)
            .map_err(|source| BackendError::StoreWriteFailed { path: copy.clone(), source })?;
        warn!("kept a copy of the damaged store at {}", copy.display());
        Ok(copy)
    }

    fn corrupt(&self, reason: impl ToString) -> BackendError {
        BackendError::CorruptStore { path: self.path.clone(), reason: reason.to_string() }
    }

    fn write_failed(&self, source: io::Error) -> BackendError {
        BackendError::StoreWriteFailed { path: self.path.clone(), source }
    }

    fn parse(&self, content: &str) -> Result<Ledger> {
        let accounts: Vec<Account> = serde_json::from_str(content)
            .map_err(|err| self.corrupt(err))?;

        for account in &accounts {
            if account.balance() < Amount::ZERO {
                return Err(self.corrupt(format!("account {} has a negative balance", account.id())));
            }
            if account.transactions().iter().any(|t| t.amount <= Amount::ZERO) {
                return Err(self.corrupt(format!("account {} has a non-positive transaction amount", account.id())));
            }
        }
        Ledger::from_accounts(accounts).map_err(|err| self.corrupt(err))
    }

    fn encode(ledger: &Ledger) -> serde_json::Result<Vec<u8>> {
        let accounts: Vec<&Account> = ledger.accounts().collect();
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buffer, PrettyFormatter::with_indent(Self::INDENT));
        accounts.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

impl LedgerStore for JsonStore {
    fn read(&self) -> Result<Ledger> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no store at {}, starting empty", self.path.display());
                return Ok(Ledger::new());
            },
            Err(source) => return Err(BackendError::StoreReadFailed { path: self.path.clone(), source })
        };

        let ledger = self.parse(&content)?;
        info!("loaded {} accounts from {}", ledger.len(), self.path.display());
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let buffer = JsonStore::encode(ledger)
            .map_err(|err| self.write_failed(err.into()))?;

        // the destination is only ever replaced by a complete file
        let temp = self.sibling_path(".tmp");
        if let Err(err) = fs::write(&temp, &buffer).and_then(|_| fs::rename(&temp, &self.path)) {
            let _ = fs::remove_file(&temp);
            return Err(self.write_failed(err));
        }

        info!("saved {} accounts to {}", ledger.len(), self.path.display());
        Ok(())
    }
}
