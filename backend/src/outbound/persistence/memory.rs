//! In-memory store adapters.
//!
//! Each collection sits behind its own `tokio::sync::RwLock`, which gives
//! the per-document atomicity the domain assumes: inserts and removals are
//! single critical sections, and no operation here reads-then-writes based
//! on state observed outside its own lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, EmailAddress};
use crate::domain::ports::{
    AccountStore, AccountStoreError, DuplicateAccountField, TripStore, TripStoreError,
};
use crate::domain::trip::{Trip, TripId};

/// Account collection held in process memory.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl MemoryAccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        for existing in accounts.values() {
            if existing.email() == account.email() {
                return Err(AccountStoreError::duplicate(DuplicateAccountField::Email));
            }
            if existing.username() == account.username() {
                return Err(AccountStoreError::duplicate(DuplicateAccountField::Username));
            }
        }
        accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }
}

/// Trip collection held in process memory.
#[derive(Default)]
pub struct MemoryTripStore {
    trips: RwLock<HashMap<TripId, Trip>>,
}

impl MemoryTripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn insert(&self, trip: &Trip) -> Result<(), TripStoreError> {
        let mut trips = self.trips.write().await;
        trips.insert(trip.id(), trip.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Trip>, TripStoreError> {
        let trips = self.trips.read().await;
        let mut owned: Vec<Trip> = trips
            .values()
            .filter(|trip| trip.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|trip| (trip.created_at(), *trip.id().as_uuid()));
        Ok(owned)
    }

    async fn find_by_id(&self, id: TripId) -> Result<Option<Trip>, TripStoreError> {
        let trips = self.trips.read().await;
        Ok(trips.get(&id).cloned())
    }

    async fn remove(&self, id: TripId) -> Result<bool, TripStoreError> {
        let mut trips = self.trips.write().await;
        Ok(trips.remove(&id).is_some())
    }
}
