//! Operator commands understood by the interpreter

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// One interpreter line
#[derive(Debug, Parser)]
#[command(name = "bank", no_binary_name = true, disable_version_flag = true)]
pub struct CommandLine {
    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
#[allow(missing_docs)]
pub enum Command {
    /// Register a client. An existing client with the same id is reused.
    #[command(alias = "create-user")]
    CreateClient { client_id: String },

    /// Open an account for an existing client. Example: `create-account asd 123 100.00`
    CreateAccount {
        account_id: String,
        owner_id: String,
        /// opening balance, at most 2 decimals
        #[arg(default_value = "0", allow_negative_numbers = true)]
        balance: String,
    },

    /// Remove a client together with its account
    #[command(alias = "delete-user")]
    DeleteClient { client_id: String },

    /// Close an account, its owner stays registered
    DeleteAccount { account_id: String },

    /// Deposit money to a client's account. Example: `deposit 123 15421.22`
    Deposit {
        client_id: String,
        /// amount of money, e.g. `100.12` or `500`
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// description of the deposit [default: ATM Deposit]
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Withdraw money from a client's account. Example: `withdraw 123 100.01`
    Withdraw {
        client_id: String,
        /// amount of money, e.g. `100.12` or `500`
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// description of the withdrawal [default: ATM Withdrawal]
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Print account history with running balances
    #[command(alias = "show-bank-statement")]
    Statement {
        client_id: String,
        /// only entries after this moment (`YYYY-MM-DD[ HH:MM:SS]`)
        #[arg(long)]
        since: Option<String>,
        /// only entries before this moment (`YYYY-MM-DD[ HH:MM:SS]`)
        #[arg(long)]
        till: Option<String>,
        /// also save the statement as csv file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List registered clients
    #[command(alias = "display-users")]
    ListClients,

    /// List open accounts
    #[command(alias = "display-accounts")]
    ListAccounts,

    /// Leave the interpreter
    #[command(alias = "quit")]
    Exit,
}

#[cfg(test)]
mod test {
    use super::{Command, CommandLine};
    use clap::{error::ErrorKind, Parser};

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        CommandLine::try_parse_from(args).map(|c| c.command)
    }

    #[test]
    fn negative_amount_reaches_ledger() {
        assert_eq!(
            parse(&["deposit", "123", "-10"]).unwrap(),
            Command::Deposit {
                client_id: "123".into(),
                amount: "-10".into(),
                description: None
            }
        );
    }

    #[test]
    fn defaults_and_aliases() {
        assert_eq!(
            parse(&["create-account", "asd", "123"]).unwrap(),
            Command::CreateAccount {
                account_id: "asd".into(),
                owner_id: "123".into(),
                balance: "0".into()
            }
        );
        assert_eq!(parse(&["quit"]).unwrap(), Command::Exit);
        assert_eq!(
            parse(&["withdraw", "123", "5", "-d", "rent"]).unwrap(),
            Command::Withdraw {
                client_id: "123".into(),
                amount: "5".into(),
                description: Some("rent".into())
            }
        );
    }

    #[test]
    fn missing_and_excess_arguments() {
        assert_eq!(
            parse(&["deposit", "123"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["delete-client", "a", "b"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert_eq!(parse(&["help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }
}
