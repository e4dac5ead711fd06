//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data`, so they depend only on
//! domain services and ports and remain testable without a running server.

use std::sync::Arc;

use crate::domain::ports::AccountStore;
use crate::domain::{CredentialService, TripService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and token verification.
    pub credentials: Arc<CredentialService>,
    /// Ownership-scoped trip operations.
    pub trips: Arc<TripService>,
    /// Account lookups for the authorization layer.
    pub accounts: Arc<dyn AccountStore>,
}

impl HttpState {
    /// Bundle the services and the account store handlers need.
    pub fn new(
        credentials: Arc<CredentialService>,
        trips: Arc<TripService>,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            credentials,
            trips,
            accounts,
        }
    }
}
