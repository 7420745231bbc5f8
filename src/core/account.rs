use std::fmt;

use log::debug;
use serde::{Serialize, Deserialize};

use crate::core::error::{LedgerError, LedgerResult};
use crate::core::transaction::{Amount, Transaction, TransactionKind};

pub type AccountId = String;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "account_number")]
    id: AccountId,
    #[serde(rename = "account_holder")]
    holder: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    balance: Amount,
    transactions: Vec<Transaction>
}

impl Account {
    pub fn new(id: &str, holder: &str) -> Account {
        Account {
            id: id.to_owned(),
            holder: holder.to_owned(),
            balance: Amount::ZERO,
            transactions: Vec::new()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Recorded transactions, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn deposit(&mut self, amount: Amount) -> LedgerResult<Amount> {
        Account::check_positive(amount)?;
        self.balance = self.credited(amount)?;
        self.record_transaction(TransactionKind::Deposit, amount);
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Amount) -> LedgerResult<Amount> {
        self.check_withdrawable(amount)?;
        self.balance -= amount;
        self.record_transaction(TransactionKind::Withdrawal, amount);
        Ok(self.balance)
    }

    /// Moves `amount` from this account into `target`.
    ///
    /// Every precondition is checked before either account is touched,
    /// so a failed transfer leaves both balances and logs as they were.
    pub fn transfer_to(&mut self, target: &mut Account, amount: Amount) -> LedgerResult<()> {
        if self.id == target.id {
            return Err(LedgerError::SelfTransfer(self.id.clone()));
        }
        self.check_withdrawable(amount)?;
        let target_balance = target.credited(amount)?;

        self.balance -= amount;
        self.record_transaction(TransactionKind::Withdrawal, amount);
        target.balance = target_balance;
        target.record_transaction(TransactionKind::Deposit, amount);
        Ok(())
    }

    fn check_positive(amount: Amount) -> LedgerResult<()> {
        if amount <= Amount::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(())
    }

    fn check_withdrawable(&self, amount: Amount) -> LedgerResult<()> {
        Account::check_positive(amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds { requested: amount, available: self.balance });
        }
        Ok(())
    }

    fn credited(&self, amount: Amount) -> LedgerResult<Amount> {
        self.balance.checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(self.id.clone()))
    }

    fn record_transaction(&mut self, kind: TransactionKind, amount: Amount) {
        let transaction = Transaction::new(kind, amount);
        debug!("account {}: {} of {}", self.id, kind, amount);
        self.transactions.push(transaction);
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): ${}", self.id, self.holder, self.balance)
    }
}
