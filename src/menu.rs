//! Numbered-menu session over any line-based input and output.
//!
//! The session only changes the ledger it is given. Persisting the
//! result is left to whoever started it.

use std::io::{self, BufRead, Write};

use crate::core::{Amount, Ledger, LedgerError};

const MENU: &str = "
Banking menu:
1. Create account
2. Deposit
3. Withdraw
4. Transfer
5. Show transactions
6. Save and exit";

enum Flow {
    Continue,
    Exit
}

fn report(output: &mut impl Write, err: &LedgerError) -> io::Result<Flow> {
    writeln!(output, "Error: {}", err)?;
    Ok(Flow::Continue)
}

pub struct Session<'a, R, W> {
    ledger: &'a mut Ledger,
    input: R,
    output: W
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, input: R, output: W) -> Self {
        Session { ledger, input, output }
    }

    /// Runs until the user picks "save and exit" or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option (1-6): ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.create_account()?,
                "2" => self.deposit()?,
                "3" => self.withdraw()?,
                "4" => self.transfer()?,
                "5" => self.show_transactions()?,
                "6" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_amount(&mut self, question: &str) -> io::Result<Option<Option<Amount>>> {
        let Some(text) = self.prompt(question)? else {
            return Ok(None);
        };
        match text.parse::<Amount>() {
            Ok(amount) => Ok(Some(Some(amount))),
            Err(_) => {
                writeln!(self.output, "Invalid input. Please enter a numeric value.")?;
                Ok(Some(None))
            }
        }
    }

    fn create_account(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("Enter account number: ")? else { return Ok(Flow::Exit) };
        let Some(holder) = self.prompt("Enter account holder name: ")? else { return Ok(Flow::Exit) };

        match self.ledger.create_account(&id, &holder) {
            Ok(_) => writeln!(self.output, "Account {} created.", id)?,
            Err(err) => return report(&mut self.output, &err)
        }
        Ok(Flow::Continue)
    }

    fn deposit(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("Enter account number: ")? else { return Ok(Flow::Exit) };
        if let Err(err) = self.ledger.account(&id) {
            return report(&mut self.output, &err);
        }
        let Some(amount) = self.prompt_amount("Enter amount to deposit: ")? else { return Ok(Flow::Exit) };
        let Some(amount) = amount else { return Ok(Flow::Continue) };

        match self.ledger.deposit(&id, amount) {
            Ok(balance) => writeln!(self.output,
                "Deposited ${} into account {}. New balance: ${}", amount, id, balance)?,
            Err(err) => return report(&mut self.output, &err)
        }
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("Enter account number: ")? else { return Ok(Flow::Exit) };
        if let Err(err) = self.ledger.account(&id) {
            return report(&mut self.output, &err);
        }
        let Some(amount) = self.prompt_amount("Enter amount to withdraw: ")? else { return Ok(Flow::Exit) };
        let Some(amount) = amount else { return Ok(Flow::Continue) };

        match self.ledger.withdraw(&id, amount) {
            Ok(balance) => writeln!(self.output,
                "Withdrew ${} from account {}. New balance: ${}", amount, id, balance)?,
            Err(err) => return report(&mut self.output, &err)
        }
        Ok(Flow::Continue)
    }

    fn transfer(&mut self) -> io::Result<Flow> {
        let Some(from) = self.prompt("Enter source account number: ")? else { return Ok(Flow::Exit) };
        let Some(to) = self.prompt("Enter target account number: ")? else { return Ok(Flow::Exit) };
        for id in [&from, &to] {
            if let Err(err) = self.ledger.account(id) {
                return report(&mut self.output, &err);
            }
        }
        let Some(amount) = self.prompt_amount("Enter amount to transfer: ")? else { return Ok(Flow::Exit) };
        let Some(amount) = amount else { return Ok(Flow::Continue) };

        match self.ledger.transfer(&from, &to, amount) {
            Ok((source_balance, _)) => writeln!(self.output,
                "Transferred ${} from account {} to account {}. New balance: ${}",
                amount, from, to, source_balance)?,
            Err(err) => return report(&mut self.output, &err)
        }
        Ok(Flow::Continue)
    }

    fn show_transactions(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("Enter account number: ")? else { return Ok(Flow::Exit) };
        let transactions = match self.ledger.transactions(&id) {
            Ok(transactions) => transactions,
            Err(err) => return report(&mut self.output, &err)
        };

        writeln!(self.output, "Transaction history for account {}:", id)?;
        for transaction in transactions {
            writeln!(self.output, "{}", transaction)?;
        }
        Ok(Flow::Continue)
    }
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::core::{Ledger, TransactionKind};
    use crate::menu::Session;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    fn run(ledger: &mut Ledger, input: &str) -> String {
        let mut output = Vec::new();
        Session::new(ledger, Cursor::new(input), &mut output).run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[fixture]
    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.create_account("S", "Bilbo").unwrap();
        ledger.create_account("T", "Frodo").unwrap();
        ledger.deposit("S", dec!(100)).unwrap();
        ledger
    }

    #[rstest]
    fn create_deposit_withdraw() {
        let mut ledger = Ledger::new();
        let output = run(&mut ledger, "1\nA-1\nAda\n2\nA-1\n50.25\n3\nA-1\n0.25\n6\n");

        let account = ledger.account("A-1").unwrap();
        assert_eq!(account.holder(), "Ada");
        assert_eq!(account.balance(), dec!(50.00));
        assert_eq!(account.transactions().len(), 2);
        assert!(output.contains("Account A-1 created."));
        assert!(output.contains("Deposited $50.25 into account A-1. New balance: $50.25"));
        assert!(output.contains("Withdrew $0.25 from account A-1. New balance: $50.00"));
    }

    #[rstest]
    fn transfer(mut ledger: Ledger) {
        let output = run(&mut ledger, "4\nS\nT\n40\n6\n");

        assert_eq!(ledger.account("S").unwrap().balance(), dec!(60));
        assert_eq!(ledger.account("T").unwrap().balance(), dec!(40));
        assert_eq!(ledger.transactions("T").unwrap()[0].kind, TransactionKind::Deposit);
        assert!(output.contains("Transferred $40 from account S to account T. New balance: $60"));
    }

    #[rstest]
    fn errors_are_reported(mut ledger: Ledger) {
        let before = ledger.clone();
        let output = run(&mut ledger, "3\nS\n500\n2\nS\n-1\n4\nS\nNobody\n1\nT\nLegolas\n");

        assert_eq!(ledger, before);
        assert!(output.contains("Error: insufficient funds: requested 500, available 100"));
        assert!(output.contains("Error: amount must be positive, got -1"));
        assert!(output.contains("Error: no such account: Nobody"));
        assert!(output.contains("Error: account already exists: T"));
    }

    #[rstest]
    fn non_numeric_amount(mut ledger: Ledger) {
        let output = run(&mut ledger, "2\nS\nten\n5\nS\n6\n");

        assert_eq!(ledger.account("S").unwrap().balance(), dec!(100));
        assert!(output.contains("Invalid input. Please enter a numeric value."));
        assert!(output.contains("Transaction history for account S:"));
    }

    #[rstest]
    fn unknown_choice_and_end_of_input(mut ledger: Ledger) {
        let output = run(&mut ledger, "9\n2\nS\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(ledger.account("S").unwrap().balance(), dec!(100));
    }

    #[rstest]
    fn exit_stops_reading(mut ledger: Ledger) {
        run(&mut ledger, "6\n2\nS\n10\n");
        assert_eq!(ledger.account("S").unwrap().balance(), dec!(100));
    }
}
