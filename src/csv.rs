//! csv output format of account statements

use csv_async::{AsyncWriterBuilder, Terminator};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWrite;

use crate::{
    account::{statement::DATE_FORMAT, Statement},
    money::Money,
};

/// single line of exported statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct StatementRecord {
    pub date: String,
    pub description: String,
    pub withdrawal: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub balance: Decimal,
}

impl StatementRecord {
    fn summary(
        description: &str,
        withdrawal: Option<Money>,
        deposit: Option<Money>,
        balance: Money,
    ) -> Self {
        Self {
            date: String::new(),
            description: description.to_owned(),
            withdrawal: withdrawal.map(Decimal::from),
            deposit: deposit.map(Decimal::from),
            balance: balance.into(),
        }
    }

    /// Previous balance line, every entry, then totals line
    pub fn from_statement(statement: &Statement) -> Vec<StatementRecord> {
        let mut records = Vec::with_capacity(statement.rows.len() + 2);
        records.push(Self::summary(
            "Previous balance",
            None,
            None,
            statement.opening_balance,
        ));
        records.extend(statement.rows.iter().map(|row| StatementRecord {
            date: row.date.format(DATE_FORMAT).to_string(),
            description: row.description.clone(),
            withdrawal: row.withdrawal.map(Decimal::from),
            deposit: row.deposit.map(Decimal::from),
            balance: row.balance.into(),
        }));
        let totals = &statement.totals;
        records.push(Self::summary(
            "Totals",
            Some(totals.withdrawals),
            Some(totals.deposits),
            totals.balance,
        ));
        records
    }
}

/// save `statement` as csv into `wr`. Headers will be included automatically. Terminator is
/// `\r\n`.
pub async fn write_statement(
    statement: &Statement,
    wr: impl AsyncWrite + Unpin,
) -> anyhow::Result<()> {
    let mut builder = AsyncWriterBuilder::new();
    builder.terminator(Terminator::CRLF);

    let mut wr = builder.create_serializer(wr);

    for record in StatementRecord::from_statement(statement) {
        wr.serialize(record).await?;
    }

    wr.flush().await?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::write_statement;
    use crate::account::{Account, Ledger, StatementRange};
    use crate::amount::Amount;
    use crate::money::Money;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn ser_output_format() -> anyhow::Result<()> {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0).unwrap();
        let mut a = Account::new("asd", "123", Money::from_cents(1000));
        a.record_deposit(at, Amount::parse("5.5").unwrap(), Some("salary, late")).unwrap();
        a.record_withdraw(at, Amount::parse("20").unwrap(), None).unwrap();

        let output = Vec::with_capacity(8192);
        let mut wr = tokio::io::BufWriter::new(output);

        write_statement(&a.statement(&StatementRange::unbounded()), &mut wr).await?;

        let expected = "date,description,withdrawal,deposit,balance\r\n\
            ,Previous balance,,,10.00\r\n\
            2024-01-01 10:00:00,\"salary, late\",,5.50,15.50\r\n\
            2024-01-01 10:00:00,ATM Withdrawal,20.00,,-4.50\r\n\
            ,Totals,20.00,5.50,-4.50\r\n";

        let output_str = String::from_utf8(wr.into_inner()).unwrap();

        assert_eq!(output_str, expected);

        Ok(())
    }
}
