//! Exact cent-precision money value.
//!
//! Balances are kept as an integer number of cents so that any number of sequential
//! additions and subtractions never drifts. [`Decimal`] is only used at the edges: for
//! parsing user input and for rendering.

use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::amount::AmountErr;

/// Number of fractional digits every monetary value carries
pub const CENT_SCALE: u32 = 2;

/// Signed monetary value with exact cent precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Zero dollars
    pub const ZERO: Money = Money(0);

    /// Create money from an integer amount of cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Amount of cents represented by this value
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// `true` when value is below zero (overdrawn balance)
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Exact decimal view of this value, always with two fractional digits
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, CENT_SCALE)
    }

    /// Add cents of both operands. `None` when the result does not fit.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtract cents of `other`. `None` when the result does not fit.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Add cents of both operands, clamping at the representable range
    pub fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtract cents of `other`, clamping at the representable range
    pub fn subtract(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money::add(self, rhs)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        self.subtract(rhs)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::add)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = AmountErr;

    /// Accepts any sign, rejects values with more than two significant fractional digits.
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let normalized = value.normalize();
        if normalized.scale() > CENT_SCALE {
            return Err(AmountErr::WrongAmountFormat(value.to_string()));
        }

        normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| AmountErr::Format(value.to_string()))
    }
}

impl FromStr for Money {
    type Err = AmountErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = Decimal::from_str(s).map_err(|_| AmountErr::Format(s.to_owned()))?;
        Money::try_from(value)
    }
}

impl From<Money> for Decimal {
    fn from(this: Money) -> Self {
        this.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.to_decimal().abs();
        if self.is_negative() {
            write!(f, "-${abs}")
        } else {
            write!(f, "${abs}")
        }
    }
}

#[cfg(test)]
mod test {
    use super::Money;
    use crate::amount::AmountErr;
    use rust_decimal::Decimal;

    #[test]
    fn repeated_additions_stay_exact() {
        let mut balance = Money::ZERO;
        for _ in 0..1000 {
            balance = balance + "0.10".parse().unwrap();
        }
        assert_eq!(balance, Money::from_cents(10_000));

        let balance = Money::ZERO
            .add("10".parse().unwrap())
            .add("20.50".parse().unwrap())
            .add("1.50".parse().unwrap());
        assert_eq!(balance.to_decimal(), Decimal::new(4200, 2));
        assert_eq!(balance.to_string(), "$42.00");
    }

    #[test]
    fn render_sign_before_currency() {
        assert_eq!(Money::from_cents(1000).to_string(), "$10.00");
        assert_eq!(Money::from_cents(-1000).to_string(), "-$10.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn parse_rejects_garbage_and_extra_precision() {
        assert_eq!(
            "lkjhg".parse::<Money>().unwrap_err(),
            AmountErr::Format("lkjhg".into())
        );
        assert_eq!(
            "10.00111".parse::<Money>().unwrap_err(),
            AmountErr::WrongAmountFormat("10.00111".into())
        );
        // trailing zeros carry no precision
        assert_eq!("10.100".parse::<Money>().unwrap(), Money::from_cents(1010));
        assert_eq!("-3".parse::<Money>().unwrap(), Money::from_cents(-300));
    }

    #[test]
    fn out_of_range_is_a_format_error() {
        assert_eq!(
            Money::try_from(Decimal::MAX).unwrap_err(),
            AmountErr::Format(Decimal::MAX.to_string())
        );
        assert_eq!(
            "100000000000000000000".parse::<Money>().unwrap_err(),
            AmountErr::Format("100000000000000000000".into())
        );
        assert_eq!(
            "92233720368547758.07".parse::<Money>().unwrap(),
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn checked_arithmetic_refuses_overflow() {
        let big = Money::from_cents(9_000_000_000_000_000_000);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(Money::from_cents(-2).checked_sub(Money::from_cents(i64::MAX)), None);
        assert_eq!(
            big.checked_sub(Money::from_cents(1)),
            Some(Money::from_cents(8_999_999_999_999_999_999))
        );
        // plain operators clamp instead of wrapping
        assert_eq!(big + big, Money::from_cents(i64::MAX));
    }

    #[test]
    fn ordering_uses_cents() {
        let a: Money = "0.1".parse().unwrap();
        let b: Money = "0.10".parse().unwrap();
        assert_eq!(a, b);
        assert!(Money::from_cents(-1) < Money::ZERO);
        assert!("0.01".parse::<Money>().unwrap() > Money::ZERO);
    }
}
