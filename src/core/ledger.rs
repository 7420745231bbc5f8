use log::debug;

use crate::core::account::Account;
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::transaction::{Amount, Transaction};

/// Every account known to the process, in the order they were
/// created or loaded. Account ids are unique within a ledger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    accounts: Vec<Account>
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger { accounts: Vec::new() }
    }

    /// Builds a ledger from already existing accounts, keeping
    /// their balances and histories exactly as given.
    pub fn from_accounts(accounts: Vec<Account>) -> LedgerResult<Ledger> {
        let mut ledger = Ledger::new();
        for account in accounts {
            if ledger.position(account.id()).is_some() {
                return Err(LedgerError::DuplicateAccount(account.id().to_owned()));
            }
            ledger.accounts.push(account);
        }
        Ok(ledger)
    }

    pub fn create_account(&mut self, id: &str, holder: &str) -> LedgerResult<&Account> {
        if self.position(id).is_some() {
            return Err(LedgerError::DuplicateAccount(id.to_owned()));
        }
        debug!("creating account {} for {}", id, holder);
        self.accounts.push(Account::new(id, holder));
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    pub fn account(&self, id: &str) -> LedgerResult<&Account> {
        self.position(id)
            .map(|index| &self.accounts[index])
            .ok_or_else(|| LedgerError::NotAnAccount(id.to_owned()))
    }

    pub fn accounts(&self) -> impl DoubleEndedIterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn deposit(&mut self, id: &str, amount: Amount) -> LedgerResult<Amount> {
        self.account_mut(id)?.deposit(amount)
    }

    pub fn withdraw(&mut self, id: &str, amount: Amount) -> LedgerResult<Amount> {
        self.account_mut(id)?.withdraw(amount)
    }

    /// Returns the balances of source and target after the transfer.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Amount) -> LedgerResult<(Amount, Amount)> {
        let source = self.index_of(from)?;
        let target = self.index_of(to)?;
        if source == target {
            return Err(LedgerError::SelfTransfer(from.to_owned()));
        }

        let (source, target) = self.pair_mut(source, target);
        source.transfer_to(target, amount)?;
        Ok((source.balance(), target.balance()))
    }

    pub fn transactions(&self, id: &str) -> LedgerResult<&[Transaction]> {
        Ok(self.account(id)?.transactions())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.accounts.iter().position(|account| account.id() == id)
    }

    fn index_of(&self, id: &str) -> LedgerResult<usize> {
        self.position(id).ok_or_else(|| LedgerError::NotAnAccount(id.to_owned()))
    }

    fn account_mut(&mut self, id: &str) -> LedgerResult<&mut Account> {
        let index = self.index_of(id)?;
        Ok(&mut self.accounts[index])
    }

    // both indices must be valid and distinct
    fn pair_mut(&mut self, first: usize, second: usize) -> (&mut Account, &mut Account) {
        if first < second {
            let (head, tail) = self.accounts.split_at_mut(second);
            (&mut head[first], &mut tail[0])
        } else {
            let (head, tail) = self.accounts.split_at_mut(first);
            (&mut tail[0], &mut head[second])
        }
    }
}
