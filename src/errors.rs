//! Possible errors

use crate::{amount::AmountErr, AccountID, ClientID};
use thiserror::Error;

/// Group all errors that can occurs within the ledger
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerErr {
    #[error("client `{0}` not found")]
    ClientNotFound(ClientID),
    /// account was about to be assigned to an unknown client
    #[error("cannot assign account to client `{0}`: client does not exist")]
    ClientDoesNotExist(ClientID),
    #[error("account `{0}` not found")]
    AccountNotFound(AccountID),
    /// client exists but has no account to operate on
    #[error("client `{0}` has no account")]
    AccountDoesNotExist(ClientID),
    #[error("account `{0}` already exists")]
    AccountAlreadyExists(AccountID),
    #[error("client `{client}` already has account `{account}`")]
    AccountAlreadyAssigned { client: ClientID, account: AccountID },
    /// the new balance would not fit into [`crate::Money`]
    #[error("balance of account `{0}` would go out of range, operation refused")]
    BalanceOverflow(AccountID),
    #[error(transparent)]
    Amount(#[from] AmountErr),
}
