//! Clients and the registry that owns them
use std::collections::HashMap;

use tracing::{info, warn};

use crate::{AccountID, ClientID};

/// Registered account holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientID,
    account: Option<AccountID>,
}

impl Client {
    /// Create client without account
    pub fn new(id: impl Into<ClientID>) -> Self {
        Self {
            id: id.into(),
            account: None,
        }
    }

    /// identifier of client
    pub fn id(&self) -> &str {
        &self.id
    }

    /// identifier of owned account, if any
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub(crate) fn assign_account(&mut self, account_id: AccountID) {
        debug_assert!(self.account.is_none());
        self.account = Some(account_id);
    }

    pub(crate) fn release_account(&mut self) -> Option<AccountID> {
        self.account.take()
    }
}

/// All clients known to the bank, kept in registration order
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<ClientID, Client>,
    order: Vec<ClientID>,
}

impl ClientRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register new client. When `id` is already taken the existing client is returned
    /// unchanged.
    pub fn create(&mut self, id: &str) -> &Client {
        if self.clients.contains_key(id) {
            warn!(client = id, "client already exists, reusing it");
        } else {
            self.clients.insert(id.to_owned(), Client::new(id));
            self.order.push(id.to_owned());
            info!(client = id, "client created");
        }
        &self.clients[id]
    }

    /// look up a client
    pub fn get(&self, id: &str) -> Option<&Client> {
        self.clients.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    /// Unregister client. Account ownership is not touched here.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Client> {
        let client = self.clients.remove(id)?;
        self.order.retain(|c| c != id);
        Some(client)
    }

    /// Clients in registration order. Each call starts a fresh iteration.
    pub fn list(&self) -> impl Iterator<Item = &Client> + '_ {
        self.order.iter().filter_map(|id| self.clients.get(id))
    }

    /// number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// `true` when nobody is registered
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// forget every client
    pub fn clear(&mut self) {
        self.clients.clear();
        self.order.clear();
    }
}
