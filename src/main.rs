//! # Bank-ledger
//! Interactive in-memory bank. Reads commands line by line from stdin (or from a script
//! file) and prints replies to stdout. Logs go to stderr.
//!
//! ## Commands
//!
//! ```text
//! create-client 123
//! create-account asd 123 100.00
//! deposit 123 10.50 --description "salary"
//! withdraw 123 5
//! statement 123 --since 2024-01-01 --csv statement.csv
//! list-clients
//! exit
//! ```

#![deny(missing_docs)]

use anyhow::Context;
use bank_ledger::{repl::Interpreter, Bank};
use clap::Parser;
use std::{io::IsTerminal, path::PathBuf};
use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::EnvFilter;

/// Command line arguments of the binary
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run commands from this file instead of stdin
    script: Option<PathBuf>,

    /// Log filter, e.g. `info` or `bank_ledger=debug`. Falls back to `RUST_LOG`, then `warn`.
    #[arg(long)]
    log_level: Option<String>,

    /// Do not print the `> ` prompt
    #[arg(long, short)]
    quiet: bool,
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // CLI handle
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let mut interpreter = Interpreter::new(Bank::new(), stdout());

    match args.script {
        Some(path) => {
            let f = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("access script file {}", path.display()))?;
            interpreter.run(BufReader::new(f), false).await?;
        }
        None => {
            let prompt = !args.quiet && std::io::stdin().is_terminal();
            interpreter.run(BufReader::new(stdin()), prompt).await?;
        }
    }

    Ok(())
}
