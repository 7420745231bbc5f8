use bankbook::{Ledger, LedgerError,
    backend::{LedgerStore, JsonStore, Loaded},
    config::AppConfig,
    menu::Session,
    transaction::Amount};

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use colored::Colorize;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to a TOML config file (defaults to ./bankbook.toml if present)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Path to the accounts file, overriding the config
    #[clap(short, long, value_parser)]
    store: Option<PathBuf>,

    /// Action to perform; runs the interactive menu when omitted
    #[clap(subcommand)]
    action: Option<Subcommands>,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Open a new empty account
    CreateAccount(CreateAccount),
    /// Put money into an account
    Deposit(Movement),
    /// Take money out of an account
    Withdraw(Movement),
    /// Move money between two accounts
    Transfer(Transfer),
    /// List the transactions of one account
    History(History),
    /// Read and display balances
    Balances,
    /// Run the numbered menu on the terminal
    Interactive,
}

#[derive(Args, Debug)]
struct CreateAccount {
    /// Account number, unique in the store
    #[clap(value_parser)]
    id: String,

    /// Name of the account holder
    #[clap(value_parser)]
    holder: String,
}

#[derive(Args, Debug)]
struct Movement {
    #[clap(short='a', long, value_parser)]
    account: String,

    #[clap(long, value_parser, allow_hyphen_values = true)]
    amount: Amount,
}

#[derive(Args, Debug)]
struct Transfer {
    /// Account that pays
    #[clap(short='f', long, value_parser)]
    from: String,

    /// Account that gets paid
    #[clap(short='t', long, value_parser)]
    to: String,

    #[clap(long, value_parser, allow_hyphen_values = true)]
    amount: Amount,
}

#[derive(Args, Debug)]
struct History {
    #[clap(value_parser)]
    account: String,
}

fn print_balances(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("{}", "No accounts yet.".dimmed());
    }
    for account in ledger.accounts() {
        let balance = account.balance();
        let fmt_balance = if balance > Amount::ZERO {
            format!("${}", balance).green()
        } else {
            format!("${}", balance).normal()
        };
        println!("{} ({}): {}", account.id().bold(), account.holder(), fmt_balance);
    }
}

fn report(err: &LedgerError) {
    eprintln!("{} {}", "error:".bright_red().bold(), err);
}

fn print_history(ledger: &Ledger, id: &str) -> Result<(), LedgerError> {
    let transactions = ledger.transactions(id)?;
    println!("Transaction history for account {}:", id.bold());
    for t in transactions {
        println!("{}", t);
    }
    Ok(())
}

fn run(args: Cli) -> anyhow::Result<bool> {
    let config = AppConfig::resolve(args.config.as_deref())?;
    let store = JsonStore::new(config.store_path(args.store.as_deref()));

    let Loaded { mut ledger, issue } = store.load();
    if let Some(issue) = issue {
        // an unreadable store would be clobbered by the next save
        if !issue.is_corrupt() {
            return Err(issue.into());
        }
        let copy = store.keep_damaged_copy()?;
        eprintln!("{} {}; starting with no accounts (damaged file kept at {})",
            "warning:".yellow().bold(), issue, copy.display());
    }

    // Some(message) when the ledger changed and has to be saved
    let outcome = match args.action.unwrap_or(Subcommands::Interactive) {
        Subcommands::Balances => {
            print_balances(&ledger);
            Ok(None)
        },
        Subcommands::History(history) => {
            print_history(&ledger, &history.account).map(|_| None)
        },
        Subcommands::Interactive => {
            let stdin = std::io::stdin();
            Session::new(&mut ledger, stdin.lock(), std::io::stdout()).run()
                .context("interactive session failed")?;
            Ok(Some("Accounts saved. Exiting the application.".to_owned()))
        },
        Subcommands::CreateAccount(create) => {
            ledger.create_account(&create.id, &create.holder)
                .map(|_| Some(format!("Account {} created for {}.", create.id, create.holder)))
        },
        Subcommands::Deposit(movement) => {
            ledger.deposit(&movement.account, movement.amount)
                .map(|balance| Some(format!("Deposited ${} into account {}. New balance: ${}",
                    movement.amount, movement.account, balance)))
        },
        Subcommands::Withdraw(movement) => {
            ledger.withdraw(&movement.account, movement.amount)
                .map(|balance| Some(format!("Withdrew ${} from account {}. New balance: ${}",
                    movement.amount, movement.account, balance)))
        },
        Subcommands::Transfer(transfer) => {
            ledger.transfer(&transfer.from, &transfer.to, transfer.amount)
                .map(|(from_balance, to_balance)| Some(format!(
                    "Transferred ${} from account {} (now ${}) to account {} (now ${}).",
                    transfer.amount, transfer.from, from_balance, transfer.to, to_balance)))
        }
    };

    match outcome {
        Ok(None) => (),
        Ok(Some(message)) => {
            store.save(&ledger)?;
            println!("{}", message);
        },
        Err(err) => {
            report(&err);
            return Ok(false);
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Cli::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
