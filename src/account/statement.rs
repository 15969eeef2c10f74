//! Time-bounded account statements
//!
//! A statement starts with the opening balance, lists every entry recorded strictly between
//! `since` and `till` and ends with withdrawal and deposit totals plus the balance those
//! entries lead to.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::transactions::{TransKind, Transaction};
use crate::money::Money;

/// Date-time layout used for statement dates and range bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Open interval of timestamps. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementRange {
    /// entries must be strictly after this instant
    pub since: Option<NaiveDateTime>,
    /// entries must be strictly before this instant
    pub till: Option<NaiveDateTime>,
}

impl StatementRange {
    /// Whole history
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parse operator supplied bounds. A bound that cannot be read is treated as absent.
    pub fn parse(since: Option<&str>, till: Option<&str>) -> Self {
        Self {
            since: since.and_then(parse_bound),
            till: till.and_then(parse_bound),
        }
    }

    /// `true` when `at` lies strictly inside the range
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.since.map_or(true, |since| at > since) && self.till.map_or(true, |till| at < till)
    }
}

fn parse_bound(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let parsed = NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });
    if parsed.is_none() {
        debug!(bound = raw, "unreadable statement bound, using open range");
    }
    parsed
}

/// One entry of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    /// when entry was recorded
    pub date: NaiveDateTime,
    /// entry description
    pub description: String,
    /// set for withdrawals
    pub withdrawal: Option<Money>,
    /// set for deposits
    pub deposit: Option<Money>,
    /// balance snapshot after the entry
    pub balance: Money,
}

impl From<&Transaction> for StatementRow {
    fn from(trans: &Transaction) -> Self {
        let (withdrawal, deposit) = match trans.kind() {
            TransKind::Withdrawal => (Some(trans.amount().money()), None),
            TransKind::Deposit => (None, Some(trans.amount().money())),
        };
        Self {
            date: trans.timestamp(),
            description: trans.description().to_owned(),
            withdrawal,
            deposit,
            balance: trans.resulting_balance(),
        }
    }
}

/// Trailing sums of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatementTotals {
    /// sum of included withdrawals
    pub withdrawals: Money,
    /// sum of included deposits
    pub deposits: Money,
    /// opening balance moved by every included entry
    pub balance: Money,
}

/// Report of account activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// balance the account was opened with
    pub opening_balance: Money,
    /// included entries in insertion order
    pub rows: Vec<StatementRow>,
    /// sums over `rows`
    pub totals: StatementTotals,
}

impl Statement {
    /// Collect entries of `history` that fall into `range`
    pub fn build(opening_balance: Money, history: &[Transaction], range: &StatementRange) -> Self {
        let rows: Vec<StatementRow> = history
            .iter()
            .filter(|t| range.contains(t.timestamp()))
            .map(StatementRow::from)
            .collect();

        let withdrawals: Money = rows.iter().filter_map(|r| r.withdrawal).sum();
        let deposits: Money = rows.iter().filter_map(|r| r.deposit).sum();

        Self {
            opening_balance,
            totals: StatementTotals {
                withdrawals,
                deposits,
                balance: opening_balance.add(deposits).subtract(withdrawals),
            },
            rows,
        }
    }
}

/// Result of asking for a client's statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    /// client owns an account
    Report(Statement),
    /// client exists but has no account
    NoAccount,
}

const HEADERS: [&str; 5] = ["Date", "Description", "Withdrawals", "Deposits", "Balance"];

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let money = |m: Option<Money>| m.map(|m| m.to_string()).unwrap_or_default();

        let mut lines: Vec<[String; 5]> = Vec::with_capacity(self.rows.len() + 2);
        lines.push([
            String::new(),
            "Previous balance".into(),
            String::new(),
            String::new(),
            self.opening_balance.to_string(),
        ]);
        for row in &self.rows {
            lines.push([
                row.date.format(DATE_FORMAT).to_string(),
                row.description.clone(),
                money(row.withdrawal),
                money(row.deposit),
                row.balance.to_string(),
            ]);
        }
        lines.push([
            String::new(),
            "Totals".into(),
            self.totals.withdrawals.to_string(),
            self.totals.deposits.to_string(),
            self.totals.balance.to_string(),
        ]);

        let mut widths = HEADERS.map(str::len);
        for line in &lines {
            for (w, cell) in widths.iter_mut().zip(line) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");

        write_cells(f, &widths, &HEADERS)?;
        writeln!(f, "{rule}")?;
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            if i == last {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<&str> = line.iter().map(String::as_str).collect();
            write_cells(f, &widths, &cells)?;
            if i == 0 {
                writeln!(f, "{rule}")?;
            }
        }
        Ok(())
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[&str]) -> fmt::Result {
    let mut out = Vec::with_capacity(cells.len());
    for (i, (cell, w)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        // money columns are right aligned
        if i >= 2 {
            out.push(format!("{cell:>w$}"));
        } else {
            out.push(format!("{cell:<w$}"));
        }
    }
    writeln!(f, "{}", out.join(" | ").trim_end())
}

#[cfg(test)]
mod test {
    use super::{Statement, StatementRange};
    use crate::account::{Account, Ledger};
    use crate::amount::Amount;
    use crate::money::Money;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample() -> Account {
        let mut a = Account::new("asd", "123", Money::from_cents(90_000));
        a.record_deposit(at(10, 0, 0), Amount::parse("100").unwrap(), None).unwrap();
        a.record_deposit(at(11, 0, 0), Amount::parse("5000000.50").unwrap(), None).unwrap();
        a.record_withdraw(at(12, 0, 0), Amount::parse("180000").unwrap(), None).unwrap();
        a
    }

    #[test]
    fn whole_history_totals() {
        let s = sample().statement(&StatementRange::unbounded());

        assert_eq!(s.rows.len(), 3);
        assert_eq!(s.totals.withdrawals, Money::from_cents(18_000_000));
        assert_eq!(s.totals.deposits, Money::from_cents(500_010_050));
        assert_eq!(s.totals.balance, Money::from_cents(482_100_050));
        assert_eq!(s.totals.balance, s.rows[2].balance);
    }

    #[test]
    fn range_bounds_are_exclusive() {
        let account = sample();
        let range = StatementRange {
            since: Some(at(10, 0, 0)),
            till: Some(at(12, 0, 0)),
        };
        let s = account.statement(&range);

        assert_eq!(s.rows.len(), 1);
        assert_eq!(s.rows[0].deposit, Some(Money::from_cents(500_000_050)));
        assert_eq!(s.totals.withdrawals, Money::ZERO);
        assert_eq!(
            s.totals.balance,
            Money::from_cents(90_000 + 500_000_050)
        );
    }

    #[test]
    fn unreadable_bounds_fall_back_to_open_range() {
        let range = StatementRange::parse(Some("yesterday"), Some("2024-01-01 11:30:00"));
        assert_eq!(range.since, None);
        assert_eq!(range.till, Some(at(11, 30, 0)));

        let range = StatementRange::parse(Some("2024-01-01"), None);
        assert_eq!(range.since, Some(at(0, 0, 0)));

        assert_eq!(sample().statement(&range).rows.len(), 3);
    }

    #[test]
    fn renders_table() {
        let account = sample();
        let s = Statement::build(
            Money::from_cents(1000),
            account.history(),
            &StatementRange::default(),
        );
        let out = s.to_string();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Date"));
        assert!(lines[2].contains("Previous balance"));
        assert!(lines[2].ends_with("$10.00"));
        assert!(lines[4].starts_with("2024-01-01 10:00:00 | ATM Deposit"));
        assert!(lines[6].contains("$180000.00"));
        assert!(lines.last().unwrap().contains("Totals"));
    }
}
