//! Line-oriented command interpreter on top of [`Bank`]
//!
//! Every line is split into arguments, parsed into a [`Command`] and executed. Ledger and
//! export errors are reported to the operator and the interpreter keeps going. Only failures
//! of the command input or the reply output end it.

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::wrappers::LinesStream;
use tracing::{debug, warn};

use crate::{
    account::{Ledger, Statement, StatementOutcome, StatementRange},
    bank::Bank,
    csv,
    errors::LedgerErr,
};

pub mod command;
pub mod tokenize;

pub use command::{Command, CommandLine};

/// What the caller should do after a line was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// read next line
    Continue,
    /// operator asked to leave
    Exit,
}

/// Executes operator commands against a bank and writes replies to `out`
#[derive(Debug)]
pub struct Interpreter<W> {
    bank: Bank,
    out: W,
}

impl<W: AsyncWrite + Unpin> Interpreter<W> {
    /// Interpreter over `bank` replying into `out`
    pub fn new(bank: Bank, out: W) -> Self {
        Self { bank, out }
    }

    /// bank state
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Read lines from `input` until it ends or `exit` is given
    pub async fn run(
        &mut self,
        input: impl AsyncBufRead + Unpin,
        prompt: bool,
    ) -> anyhow::Result<()> {
        let mut lines = LinesStream::new(input.lines());
        loop {
            if prompt {
                self.out.write_all(b"> ").await?;
                self.out.flush().await?;
            }
            let Some(line) = lines.next().await else {
                break;
            };
            let line = line.context("failed to read command")?;
            if self.execute(&line).await? == Flow::Exit {
                break;
            }
        }
        self.out.flush().await?;
        Ok(())
    }

    /// Execute one line
    pub async fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let args = match tokenize::split_line(line) {
            Ok(args) if args.is_empty() => return Ok(Flow::Continue),
            Ok(args) => args,
            Err(e) => {
                self.reply(&format!("error: {e}")).await?;
                return Ok(Flow::Continue);
            }
        };

        let command = match CommandLine::try_parse_from(&args) {
            Ok(cl) => cl.command,
            Err(e) => {
                // help output and usage errors alike
                self.reply(e.to_string().trim_end()).await?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "executing");

        self.dispatch(command).await
    }

    async fn dispatch(&mut self, command: Command) -> anyhow::Result<Flow> {
        let bank = &mut self.bank;
        let reply: Result<String, LedgerErr> = match command {
            Command::CreateClient { client_id } => {
                let existed = bank.client(&client_id).is_some();
                let client = bank.create_client(&client_id);
                let mut reply = if existed {
                    format!("client `{client_id}` already exists, reusing")
                } else {
                    format!("client `{client_id}` ready")
                };
                if let Some(account) = client.account() {
                    reply.push_str(&format!(" (account `{account}`)"));
                }
                Ok(reply)
            }
            Command::CreateAccount {
                account_id,
                owner_id,
                balance,
            } => bank
                .create_account(&account_id, &owner_id, balance)
                .map(|a| {
                    format!(
                        "account `{account_id}` opened for `{owner_id}` with balance {}",
                        a.balance()
                    )
                }),
            Command::DeleteClient { client_id } => bank
                .delete_client(&client_id)
                .map(|_| format!("client `{client_id}` deleted")),
            Command::DeleteAccount { account_id } => bank
                .delete_account(&account_id)
                .map(|_| format!("account `{account_id}` deleted")),
            Command::Deposit {
                client_id,
                amount,
                description,
            } => bank
                .deposit(&client_id, amount, description.as_deref())
                .map(|t| {
                    format!(
                        "{client_id} deposited {} for '{}', balance {}",
                        t.amount().money(),
                        t.description(),
                        t.resulting_balance()
                    )
                }),
            Command::Withdraw {
                client_id,
                amount,
                description,
            } => bank
                .withdraw(&client_id, amount, description.as_deref())
                .map(|t| {
                    format!(
                        "{client_id} withdrew {} for '{}', balance {}",
                        t.amount().money(),
                        t.description(),
                        t.resulting_balance()
                    )
                }),
            Command::Statement {
                client_id,
                since,
                till,
                csv: export,
            } => {
                let range = StatementRange::parse(since.as_deref(), till.as_deref());
                match bank.statement(&client_id, &range) {
                    Ok(StatementOutcome::Report(statement)) => {
                        let mut reply = statement.to_string();
                        if let Some(path) = export {
                            match save_statement(&statement, &path).await {
                                Ok(()) => reply
                                    .push_str(&format!("statement saved to {}", path.display())),
                                Err(e) => {
                                    warn!(path = %path.display(), error = %e, "export failed");
                                    reply.push_str(&format!("error: {e:#}"));
                                }
                            }
                        }
                        Ok(reply.trim_end().to_owned())
                    }
                    Ok(StatementOutcome::NoAccount) => {
                        Ok(format!("client `{client_id}` has no account"))
                    }
                    Err(e) => Err(e),
                }
            }
            Command::ListClients => Ok(self.list_clients()),
            Command::ListAccounts => Ok(self.list_accounts()),
            Command::Exit => return Ok(Flow::Exit),
        };

        match reply {
            Ok(reply) => self.reply(&reply).await?,
            Err(e) => self.reply(&format!("error: {e}")).await?,
        }
        Ok(Flow::Continue)
    }

    fn list_clients(&self) -> String {
        let lines: Vec<String> = self
            .bank
            .list_clients()
            .map(|c| format!("{}\t{}", c.id(), c.account().unwrap_or("-")))
            .collect();
        if lines.is_empty() {
            "no clients".into()
        } else {
            lines.join("\n")
        }
    }

    fn list_accounts(&self) -> String {
        let lines: Vec<String> = self
            .bank
            .list_accounts()
            .map(|a| format!("{}\t{}\t{}", a.id(), a.owner(), a.balance()))
            .collect();
        if lines.is_empty() {
            "no accounts".into()
        } else {
            lines.join("\n")
        }
    }

    async fn reply(&mut self, msg: &str) -> anyhow::Result<()> {
        self.out.write_all(msg.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        Ok(())
    }
}

async fn save_statement(statement: &Statement, path: &Path) -> anyhow::Result<()> {
    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("failed to create {}", path.display()))?;
    csv::write_statement(statement, file)
        .await
        .context("failed to save statement")
}
