//! Represents client account
use chrono::NaiveDateTime;

use super::transactions::*;
use super::Ledger;
use crate::{amount::Amount, errors::LedgerErr, money::Money, AccountID, ClientID};

/// Client current balance and transactions history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountID,
    owner: ClientID,
    opening_balance: Money,
    balance: Money,
    history: Vec<Transaction>,
}

impl Account {
    /// Create new [`Account`] with empty history owned by `owner`
    pub fn new(
        id: impl Into<AccountID>,
        owner: impl Into<ClientID>,
        opening_balance: Money,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            opening_balance,
            balance: opening_balance,
            history: Vec::new(),
        }
    }

    #[cfg(test)]
    /// Account opened with $10.00 and history of 3 deposits of $10.00, one per second
    pub fn new_test_account() -> Self {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let mut a = Account::new("asd", "123", Money::from_cents(1000));
        for s in 0..3 {
            let at = start + chrono::Duration::seconds(s);
            a.record_deposit(at, Amount::parse(10_i64).unwrap(), None).unwrap();
        }

        assert_eq!(a.balance(), Money::from_cents(4000));

        a
    }

    /// identifier of account
    pub fn id(&self) -> &str {
        &self.id
    }

    /// identifier of owning client
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// increase balance and record the entry
    pub(crate) fn record_deposit(
        &mut self,
        at: NaiveDateTime,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<&Transaction, LedgerErr> {
        self.record(at, TransKind::Deposit, amount, description)
    }

    /// decrease balance and record the entry.
    ///
    /// Balance is allowed to drop below zero.
    pub(crate) fn record_withdraw(
        &mut self,
        at: NaiveDateTime,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<&Transaction, LedgerErr> {
        self.record(at, TransKind::Withdrawal, amount, description)
    }

    fn record(
        &mut self,
        at: NaiveDateTime,
        kind: TransKind,
        amount: Amount,
        description: Option<&str>,
    ) -> Result<&Transaction, LedgerErr> {
        let description = description
            .unwrap_or_else(|| kind.default_description())
            .to_owned();
        // account stays untouched when the new balance does not fit
        let trans = Transaction::new(at, kind, amount, description, self.balance)
            .ok_or_else(|| LedgerErr::BalanceOverflow(self.id.clone()))?;

        self.balance = trans.resulting_balance();
        let index = self.history.len();
        self.history.push(trans);
        Ok(&self.history[index])
    }
}

impl Ledger for Account {
    fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    fn balance(&self) -> Money {
        self.balance
    }

    fn history(&self) -> &[Transaction] {
        &self.history
    }
}
