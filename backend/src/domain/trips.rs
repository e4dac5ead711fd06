//! Trip service enforcing ownership scoping around the trip store.

use std::sync::Arc;

use super::account::AccountProfile;
use super::error::Error;
use super::ports::{TripStore, TripStoreError};
use super::trip::{Trip, TripDraft, TripId};

/// A trip paired with its owner's display name, as returned to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedTrip {
    /// The stored trip.
    pub trip: Trip,
    /// Display name of the owning account.
    pub owner_name: String,
}

/// Ownership-scoped trip operations.
///
/// Depends on the credential layer only through [`AccountProfile`]: callers
/// establish who is asking before any operation here runs.
#[derive(Clone)]
pub struct TripService {
    trips: Arc<dyn TripStore>,
}

impl TripService {
    /// Build the service over a trip store.
    pub fn new(trips: Arc<dyn TripStore>) -> Self {
        Self { trips }
    }

    /// All trips owned by the requesting account, oldest first, with the
    /// owner's display name resolved. An empty list is a valid outcome.
    pub async fn list(&self, owner: &AccountProfile) -> Result<Vec<OwnedTrip>, Error> {
        let trips = self
            .trips
            .list_by_owner(owner.id())
            .await
            .map_err(map_store_error)?;
        Ok(trips
            .into_iter()
            .map(|trip| OwnedTrip {
                trip,
                owner_name: owner.username().as_ref().to_owned(),
            })
            .collect())
    }

    /// Persist a new trip owned by the requesting account.
    ///
    /// The draft is already validated ([`TripDraft::new`]), so the store is
    /// never touched for an empty title or an empty stop list.
    pub async fn create(
        &self,
        owner: &AccountProfile,
        draft: TripDraft,
    ) -> Result<OwnedTrip, Error> {
        let trip = Trip::create(owner.id(), draft);
        self.trips.insert(&trip).await.map_err(map_store_error)?;
        Ok(OwnedTrip {
            trip,
            owner_name: owner.username().as_ref().to_owned(),
        })
    }

    /// Delete a trip owned by the requesting account.
    ///
    /// "Not found" and "not yours" are distinct failures: a missing trip is
    /// `NotFound` while an existing trip under someone else's ownership is
    /// `Forbidden`, and the latter leaves the trip untouched.
    pub async fn delete(&self, owner: &AccountProfile, id: TripId) -> Result<(), Error> {
        let trip = self
            .trips
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("trip not found"))?;

        if trip.owner() != owner.id() {
            return Err(Error::forbidden("not authorised to delete this trip"));
        }

        let removed = self.trips.remove(id).await.map_err(map_store_error)?;
        if !removed {
            // Raced with another delete of the same trip.
            return Err(Error::not_found("trip not found"));
        }
        Ok(())
    }
}

fn map_store_error(err: TripStoreError) -> Error {
    Error::internal("trip store failure").with_detail(err.to_string())
}
