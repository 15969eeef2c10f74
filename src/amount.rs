//! Protect before using non-positive or over-precise amount for deposits and withdraws.

use std::{borrow::Borrow, ops::Deref, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::Money;

/// Reasons a raw amount was refused before it reached the ledger
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountErr {
    /// input is not a number at all
    #[error("`{0}` is not a valid amount of money")]
    Format(String),
    /// zero or negative transaction amount
    #[error("amount must be a positive number (amount > 0)")]
    NegativeAmount,
    /// more than two fractional digits
    #[error("amount `{0}` must have 2 decimals (e.g. `10.95`) or none (e.g. `500`)")]
    WrongAmountFormat(String),
}

/// Amount as handed over by a caller, before any validation
#[derive(Debug, Clone, PartialEq)]
pub enum RawAmount {
    /// typed by an operator
    Text(String),
    /// already numeric
    Number(Decimal),
}

impl RawAmount {
    /// Interpret as a number. Non-numeric input fails with [`AmountErr::Format`].
    pub fn to_decimal(&self) -> Result<Decimal, AmountErr> {
        match self {
            RawAmount::Number(d) => Ok(*d),
            RawAmount::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s).map_err(|_| AmountErr::Format(s.to_owned()))
            }
        }
    }

    /// Any-sign money value such as an opening balance.
    pub fn to_money(&self) -> Result<Money, AmountErr> {
        Money::try_from(self.to_decimal()?)
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_owned())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

impl From<Decimal> for RawAmount {
    fn from(d: Decimal) -> Self {
        RawAmount::Number(d)
    }
}

impl From<i64> for RawAmount {
    fn from(n: i64) -> Self {
        RawAmount::Number(Decimal::from(n))
    }
}

impl From<f64> for RawAmount {
    // shortest round-trip representation, so `10.01_f64` keeps two decimals
    fn from(n: f64) -> Self {
        RawAmount::Text(n.to_string())
    }
}

/// Represent positive financial amount of money with at most cent precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Money);

impl Amount {
    /// Run the numeric, sign and precision checks in that order, stopping at the first failure
    pub fn parse(raw: impl Into<RawAmount>) -> Result<Amount, AmountErr> {
        let value = raw.into().to_decimal()?;
        value.try_into()
    }

    /// Amount as plain money
    pub fn money(&self) -> Money {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountErr;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value <= Decimal::ZERO {
            return Err(AmountErr::NegativeAmount);
        }
        Money::try_from(value).map(Self)
    }
}

impl FromStr for Amount {
    type Err = AmountErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl From<Amount> for Money {
    fn from(this: Amount) -> Self {
        this.0
    }
}

impl Borrow<Money> for Amount {
    fn borrow(&self) -> &Money {
        &self.0
    }
}

impl Deref for Amount {
    type Target = Money;
    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}
