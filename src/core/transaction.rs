use std::str::FromStr;

use chrono::{Local, NaiveDateTime, SubsecRound};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::{Serialize, Deserialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

pub type Amount = Decimal;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal"
        };
        write!(f, "{}", disp)
    }
}

/// Wall-clock time a transaction was recorded, kept at second
/// precision so that it survives the store's text format unchanged.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, SerializeDisplay, DeserializeFromStr)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn now() -> Timestamp {
        Timestamp(Local::now().naive_local().trunc_subsecs(0))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(time: NaiveDateTime) -> Self {
        Timestamp(time.trunc_subsecs(0))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, Self::FORMAT).map(Timestamp)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Amount,
    #[serde(rename = "date")]
    pub timestamp: Timestamp
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}: ${}", self.timestamp, self.kind.to_string().bold(), self.amount)
    }
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Amount) -> Transaction {
        Transaction { kind, amount, timestamp: Timestamp::now() }
    }

    /// The amount as it applies to the balance:
    /// positive for deposits, negative for withdrawals.
    pub fn signed_amount(&self) -> Amount {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdrawal => -self.amount
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::core::transaction::{Timestamp, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn morning() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
            .and_hms_milli_opt(9, 5, 7, 250).unwrap()
            .into()
    }

    #[fixture]
    fn withdrawal(morning: Timestamp) -> Transaction {
        Transaction { kind: TransactionKind::Withdrawal, amount: dec!(12.50), timestamp: morning }
    }

    #[rstest]
    fn can_print(withdrawal: Transaction) {
        colored::control::set_override(false);
        assert_eq!(withdrawal.to_string(), "2024-03-09 09:05:07 - Withdrawal: $12.50");
    }

    #[rstest]
    fn timestamp_drops_subseconds(morning: Timestamp) {
        let parsed: Timestamp = morning.to_string().parse().unwrap();
        assert_eq!(parsed, morning);
    }

    #[rstest]
    #[case("2024-03-09")]
    #[case("09:05:07")]
    #[case("yesterday")]
    fn timestamp_rejects_other_formats(#[case] text: &str) {
        assert!(text.parse::<Timestamp>().is_err());
    }

    #[rstest]
    fn signed_amounts(withdrawal: Transaction) {
        let deposit = Transaction::new(TransactionKind::Deposit, dec!(3));
        assert_eq!(deposit.signed_amount(), dec!(3));
        assert_eq!(withdrawal.signed_amount(), dec!(-12.50));
    }

    #[rstest]
    fn serialize(withdrawal: Transaction) {
        let text = serde_json::to_string(&withdrawal).unwrap();
        assert_eq!(text, r#"{"type":"Withdrawal","amount":12.50,"date":"2024-03-09 09:05:07"}"#);
    }

    #[rstest]
    fn deserialize_float_amount() {
        let text = r#"{"type": "Deposit", "amount": 100.1, "date": "2023-12-31 23:59:59"}"#;
        let parsed: Transaction = serde_json::from_str(text).unwrap();
        assert_eq!(parsed.kind, TransactionKind::Deposit);
        assert_eq!(parsed.amount, dec!(100.1));
        assert_eq!(parsed.timestamp.to_string(), "2023-12-31 23:59:59");
    }

    #[rstest]
    fn deserialize_unknown_kind() {
        let text = r#"{"type": "Refund", "amount": 1, "date": "2023-12-31 23:59:59"}"#;
        assert!(serde_json::from_str::<Transaction>(text).is_err());
    }
}
