use std::collections::HashMap;

use super::Account;
use crate::AccountID;

/// All open accounts, kept in opening order.
///
/// Ownership checks need the client registry as well and live in [`crate::Bank`].
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: HashMap<AccountID, Account>,
    order: Vec<AccountID>,
}

impl AccountRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when `id` is taken
    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// look up an account
    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    pub(crate) fn insert(&mut self, account: Account) -> &Account {
        let id = account.id().to_owned();
        debug_assert!(!self.accounts.contains_key(&id));
        self.order.push(id.clone());
        self.accounts.entry(id).or_insert(account)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Account> {
        let account = self.accounts.remove(id)?;
        self.order.retain(|a| a != id);
        Some(account)
    }

    /// Accounts in opening order. Each call starts a fresh iteration.
    pub fn list(&self) -> impl Iterator<Item = &Account> + '_ {
        self.order.iter().filter_map(|id| self.accounts.get(id))
    }

    /// number of open accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// `true` when no account is open
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// forget every account
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.order.clear();
    }
}
