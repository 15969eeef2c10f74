//! Represents ledger entries
use chrono::NaiveDateTime;

use crate::{amount::Amount, money::Money};

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransKind {
    /// increase balance
    Deposit,
    /// decrease balance, overdraft is not prevented
    Withdrawal,
}

impl TransKind {
    /// Description used when the operator gives none
    pub fn default_description(&self) -> &'static str {
        match self {
            TransKind::Deposit => "ATM Deposit",
            TransKind::Withdrawal => "ATM Withdrawal",
        }
    }

    /// Balance after moving `amount` in this direction, `None` on overflow
    pub fn apply(&self, balance: Money, amount: &Amount) -> Option<Money> {
        match self {
            TransKind::Deposit => balance.checked_add(amount.money()),
            TransKind::Withdrawal => balance.checked_sub(amount.money()),
        }
    }
}

/// Single immutable entry of account history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    timestamp: NaiveDateTime,
    kind: TransKind,
    amount: Amount,
    description: String,
    resulting_balance: Money,
}

impl Transaction {
    /// Entry that moves `previous` balance by `amount`. `None` when the new balance does not
    /// fit.
    pub(crate) fn new(
        timestamp: NaiveDateTime,
        kind: TransKind,
        amount: Amount,
        description: String,
        previous: Money,
    ) -> Option<Self> {
        Some(Self {
            timestamp,
            kind,
            amount,
            resulting_balance: kind.apply(previous, &amount)?,
            description,
        })
    }

    /// when entry was recorded
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// deposit or withdrawal
    pub fn kind(&self) -> TransKind {
        self.kind
    }

    /// always positive, direction comes from [`Transaction::kind`]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// free text given by operator
    pub fn description(&self) -> &str {
        &self.description
    }

    /// balance snapshot right after this entry
    pub fn resulting_balance(&self) -> Money {
        self.resulting_balance
    }
}
