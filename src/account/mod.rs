//! Account traits and structs
use crate::money::Money;

pub(crate) mod bank_account;
pub(crate) mod registry;
pub mod statement;
pub mod transactions;

pub use bank_account::Account;
pub use registry::AccountRegistry;
pub use statement::{Statement, StatementOutcome, StatementRange};
pub use transactions::{TransKind, Transaction};

/// Balance with the append-only history that produced it
pub trait Ledger {
    /// balance recorded when account was opened
    fn opening_balance(&self) -> Money;
    /// current balance
    fn balance(&self) -> Money;
    /// entries in insertion order
    fn history(&self) -> &[Transaction];

    /// Every entry moves the previous balance by its amount in its direction and the last
    /// snapshot equals the current balance.
    fn is_consistent(&self) -> bool {
        let mut previous = self.opening_balance();
        for trans in self.history() {
            if trans.kind().apply(previous, &trans.amount()) != Some(trans.resulting_balance()) {
                return false;
            }
            previous = trans.resulting_balance();
        }
        previous == self.balance()
    }

    /// Report of entries recorded strictly inside `range`
    fn statement(&self, range: &StatementRange) -> Statement {
        Statement::build(self.opening_balance(), self.history(), range)
    }
}
