//! Bank context: both registries, the clock and every operator command.
//!
//! Deposits and withdrawals pass the same guard before anything is mutated:
//!
//! 1. the client must exist,
//! 2. the client must own an account,
//! 3. the amount must be a number,
//! 4. the amount must be greater than zero,
//! 5. the amount must have at most two fractional digits.
//!
//! The first violated rule is reported and the account is left untouched. An operation that
//! would move the balance out of the range [`crate::Money`] can hold is refused the same way.

use tracing::{debug, info, warn};

use crate::{
    account::{
        Account, AccountRegistry, Ledger, StatementOutcome, StatementRange, TransKind,
        Transaction,
    },
    amount::{Amount, RawAmount},
    client::{Client, ClientRegistry},
    clock::{Clock, SystemClock},
    errors::LedgerErr,
    AccountID,
};

/// In-memory bank. Owns every client and account for its whole lifetime.
pub struct Bank {
    clients: ClientRegistry,
    accounts: AccountRegistry,
    clock: Box<dyn Clock>,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bank")
            .field("clients", &self.clients)
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}

impl Bank {
    /// Empty bank stamping transactions with the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Empty bank with custom time source
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clients: ClientRegistry::new(),
            accounts: AccountRegistry::new(),
            clock: Box::new(clock),
        }
    }

    /// Register client, or return the already registered one with the same id
    pub fn create_client(&mut self, id: &str) -> &Client {
        self.clients.create(id)
    }

    /// Open account `id` for existing client `owner_id`
    pub fn create_account(
        &mut self,
        id: &str,
        owner_id: &str,
        opening_balance: impl Into<RawAmount>,
    ) -> Result<&Account, LedgerErr> {
        if self.accounts.contains(id) {
            return Err(LedgerErr::AccountAlreadyExists(id.to_owned()));
        }
        let owner = self
            .clients
            .get_mut(owner_id)
            .ok_or_else(|| LedgerErr::ClientDoesNotExist(owner_id.to_owned()))?;
        if let Some(account) = owner.account() {
            return Err(LedgerErr::AccountAlreadyAssigned {
                client: owner_id.to_owned(),
                account: account.to_owned(),
            });
        }
        let opening_balance = opening_balance.into().to_money()?;

        owner.assign_account(id.to_owned());
        info!(account = id, client = owner_id, %opening_balance, "account created");
        Ok(self
            .accounts
            .insert(Account::new(id, owner_id, opening_balance)))
    }

    /// Remove client together with its account
    pub fn delete_client(&mut self, id: &str) -> Result<(), LedgerErr> {
        let mut client = self
            .clients
            .remove(id)
            .ok_or_else(|| LedgerErr::ClientNotFound(id.to_owned()))?;
        if let Some(account_id) = client.release_account() {
            self.accounts.remove(&account_id);
            info!(account = %account_id, client = id, "account deleted with its owner");
        }
        info!(client = id, "client deleted");
        Ok(())
    }

    /// Close account. Its owner stays registered without an account.
    pub fn delete_account(&mut self, id: &str) -> Result<(), LedgerErr> {
        let account = self
            .accounts
            .remove(id)
            .ok_or_else(|| LedgerErr::AccountNotFound(id.to_owned()))?;
        if let Some(owner) = self.clients.get_mut(account.owner()) {
            owner.release_account();
        }
        info!(account = id, client = account.owner(), "account deleted");
        Ok(())
    }

    /// Add money to the client's account
    pub fn deposit(
        &mut self,
        client_id: &str,
        amount: impl Into<RawAmount>,
        description: Option<&str>,
    ) -> Result<&Transaction, LedgerErr> {
        self.apply(TransKind::Deposit, client_id, amount.into(), description)
    }

    /// Take money from the client's account. Balance may go below zero.
    pub fn withdraw(
        &mut self,
        client_id: &str,
        amount: impl Into<RawAmount>,
        description: Option<&str>,
    ) -> Result<&Transaction, LedgerErr> {
        self.apply(TransKind::Withdrawal, client_id, amount.into(), description)
    }

    fn apply(
        &mut self,
        kind: TransKind,
        client_id: &str,
        amount: RawAmount,
        description: Option<&str>,
    ) -> Result<&Transaction, LedgerErr> {
        let (account_id, amount) = self.validate(client_id, &amount).map_err(|e| {
            debug!(client = client_id, ?kind, error = %e, "command rejected");
            e
        })?;

        let at = self.clock.now();
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| LedgerErr::AccountDoesNotExist(client_id.to_owned()))?;
        let trans = match kind {
            TransKind::Deposit => account.record_deposit(at, amount, description),
            TransKind::Withdrawal => account.record_withdraw(at, amount, description),
        }
        .map_err(|e| {
            warn!(client = client_id, ?kind, error = %e, "command rejected");
            e
        })?;
        info!(
            client = client_id,
            account = %account_id,
            ?kind,
            amount = %trans.amount().money(),
            balance = %trans.resulting_balance(),
            "transaction recorded"
        );
        Ok(trans)
    }

    /// Guard shared by deposit and withdraw
    fn validate(
        &self,
        client_id: &str,
        amount: &RawAmount,
    ) -> Result<(AccountID, Amount), LedgerErr> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| LedgerErr::ClientNotFound(client_id.to_owned()))?;
        let account_id = client
            .account()
            .ok_or_else(|| LedgerErr::AccountDoesNotExist(client_id.to_owned()))?;
        let amount = Amount::parse(amount.clone())?;

        Ok((account_id.to_owned(), amount))
    }

    /// Statement of the client's account over `range`
    pub fn statement(
        &self,
        client_id: &str,
        range: &StatementRange,
    ) -> Result<StatementOutcome, LedgerErr> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| LedgerErr::ClientNotFound(client_id.to_owned()))?;

        Ok(client
            .account()
            .and_then(|id| self.accounts.get(id))
            .map_or(StatementOutcome::NoAccount, |account| {
                StatementOutcome::Report(account.statement(range))
            }))
    }

    /// look up a client
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    /// look up an account
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Clients in registration order
    pub fn list_clients(&self) -> impl Iterator<Item = &Client> + '_ {
        self.clients.list()
    }

    /// Accounts in opening order
    pub fn list_accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.list()
    }

    /// Forget every client and account
    pub fn reset(&mut self) {
        self.accounts.clear();
        self.clients.clear();
        info!("bank reset");
    }
}
