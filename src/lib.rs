//! Simple in-memory bank ledger: clients, accounts, deposits, withdrawals and statements.

#![deny(missing_docs)]

pub mod account;
pub mod amount;
pub mod bank;
pub mod client;
pub mod clock;
pub mod csv;
pub mod errors;
pub mod money;
pub mod repl;

pub use account::{Account, StatementOutcome};
pub use bank::Bank;
pub use client::Client;
pub use money::Money;

/// Client identifier. Unique across [`client::ClientRegistry`]
pub type ClientID = String;
/// Account identifier. Unique across [`account::AccountRegistry`]
pub type AccountID = String;
