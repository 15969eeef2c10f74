use std::{fs::File, io::Read};

use assert_cmd::Command;
use bank_ledger::csv::StatementRecord;
use rust_decimal::Decimal;

fn executable() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn read_statement(reader: impl Read) -> anyhow::Result<Vec<StatementRecord>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let mut records = Vec::new();
    for record in rdr.deserialize() {
        records.push(record?);
    }

    Ok(records)
}

#[test]
fn system_test() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("statement.csv");
    let script = dir.path().join("session.txt");
    std::fs::write(
        &script,
        format!(
            "create-client 123\n\
             create-account asd 123 10\n\
             deposit 123 20.50 --description \"birthday gift\"\n\
             withdraw 123 40\n\
             withdraw 123 10.00111\n\
             deposit 456 1\n\
             statement 123 --csv {}\n",
            export.display()
        ),
    )
    .unwrap();

    let out = executable()
        .arg(&script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("123 deposited $20.50 for 'birthday gift', balance $30.50"));
    assert!(out.contains("123 withdrew $40.00 for 'ATM Withdrawal', balance -$9.50"));
    assert!(out.contains("error: amount `10.00111` must have 2 decimals"));
    assert!(out.contains("error: client `456` not found"));
    assert!(out.contains("statement saved to"));

    let records = read_statement(File::open(&export).unwrap()).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].description, "Previous balance");
    assert_eq!(records[0].balance, Decimal::new(1000, 2));
    assert_eq!(records[1].description, "birthday gift");
    assert_eq!(records[1].deposit, Some(Decimal::new(2050, 2)));
    assert_eq!(records[2].withdrawal, Some(Decimal::new(4000, 2)));
    assert_eq!(records[2].deposit, None);
    assert_eq!(records[3].description, "Totals");
    assert_eq!(records[3].balance, Decimal::new(-950, 2));
}

#[test]
fn stdin_session_ends_on_exit() {
    let out = executable()
        .arg("--quiet")
        .write_stdin("create-client qwe\nexit\ncreate-client never\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(String::from_utf8(out).unwrap(), "client `qwe` ready\n");
}

#[test]
fn missing_script_fails() {
    executable().arg("/no/such/script.txt").assert().failure();
}
