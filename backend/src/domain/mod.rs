//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Types are immutable once constructed; constructors
//! enforce the invariants documented on each type.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `Account`, `AccountProfile` — registered user identity.
//! - `Trip`, `TripDraft`, `Stop` — trip aggregate and its waypoints.
//! - `CredentialService` — registration, login, token issuance/verification.
//! - `TripService` — ownership-scoped trip operations.

pub mod account;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod token;
pub mod trip;
pub mod trips;

pub use self::account::{
    Account, AccountId, AccountProfile, AccountValidationError, EmailAddress, PasswordVerifier,
    Username,
};
pub use self::credentials::{CredentialService, LoginAttempt, Registration, Session};
pub use self::error::{Error, ErrorCode};
pub use self::token::{TOKEN_VALIDITY_DAYS, TokenSigner};
pub use self::trip::{Stop, Trip, TripDraft, TripId, TripValidationError};
pub use self::trips::{OwnedTrip, TripService};
