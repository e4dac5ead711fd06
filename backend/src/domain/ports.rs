//! Domain ports for the document store.
//!
//! The storage layer is an external collaborator: these traits describe the
//! operations the domain expects from it (constrained insert, lookup by
//! indexed field, lookup by identifier, delete by identifier) with strongly
//! typed errors so adapters map their failures into predictable variants.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use super::account::{Account, AccountId, EmailAddress};
use super::trip::{Trip, TripId};

/// Which unique account field collided on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateAccountField {
    /// The display name is already registered.
    Username,
    /// The (case-normalised) email is already registered.
    Email,
}

impl fmt::Display for DuplicateAccountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => write!(f, "username"),
            Self::Email => write!(f, "email"),
        }
    }
}

/// Errors surfaced by [`AccountStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountStoreError {
    /// A uniqueness constraint rejected the insert.
    #[error("duplicate account {field}")]
    Duplicate { field: DuplicateAccountField },
    /// Store connectivity failure.
    #[error("account store unavailable: {message}")]
    Unavailable { message: String },
    /// Query or mutation failed during execution.
    #[error("account store query failed: {message}")]
    Query { message: String },
}

impl AccountStoreError {
    /// Helper for uniqueness violations.
    pub fn duplicate(field: DuplicateAccountField) -> Self {
        Self::Duplicate { field }
    }

    /// Helper for connectivity failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Errors surfaced by [`TripStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripStoreError {
    /// Store connectivity failure.
    #[error("trip store unavailable: {message}")]
    Unavailable { message: String },
    /// Query or mutation failed during execution.
    #[error("trip store query failed: {message}")]
    Query { message: String },
}

impl TripStoreError {
    /// Helper for connectivity failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for account records.
///
/// `insert` is unique-constrained on both username and email; adapters
/// report a collision as [`AccountStoreError::Duplicate`] rather than
/// overwriting.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a freshly registered account.
    async fn insert(&self, account: &Account) -> Result<(), AccountStoreError>;

    /// Fetch an account by its normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError>;
}

/// Persistence port for trip documents, stops embedded.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Insert a new trip document.
    async fn insert(&self, trip: &Trip) -> Result<(), TripStoreError>;

    /// All trips owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Trip>, TripStoreError>;

    /// Fetch a trip by identifier.
    async fn find_by_id(&self, id: TripId) -> Result<Option<Trip>, TripStoreError>;

    /// Delete a trip by identifier, reporting whether a document was
    /// removed.
    async fn remove(&self, id: TripId) -> Result<bool, TripStoreError>;
}
