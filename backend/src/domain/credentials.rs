//! Credential service: registration, login, and identity tokens.
//!
//! Turns a plaintext password into a non-reversible verifier at registration
//! time, checks plaintext against that verifier at login time, and issues
//! and validates the time-bound tokens the authorization layer consumes.

use std::sync::Arc;

use zeroize::Zeroizing;

use super::account::{
    Account, AccountId, AccountProfile, AccountValidationError, EmailAddress, PasswordVerifier,
    Username,
};
use super::error::Error;
use super::ports::{AccountStore, AccountStoreError};
use super::token::TokenSigner;

/// Validated registration input.
///
/// ## Invariants
/// - `username` and `email` are trimmed and non-empty; the email is
///   case-normalised.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw request inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AccountValidationError> {
        if password.is_empty() {
            return Err(AccountValidationError::EmptyPassword);
        }
        Ok(Self {
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }
}

/// Validated login input.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginAttempt {
    /// Construct a login attempt from raw request inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AccountValidationError> {
        if password.is_empty() {
            return Err(AccountValidationError::EmptyPassword);
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }
}

/// Successful authentication outcome: the identity plus a fresh token.
#[derive(Debug, Clone)]
pub struct Session {
    /// Authenticated identity, verifier excluded.
    pub account: AccountProfile,
    /// Signed bearer token for subsequent requests.
    pub token: String,
}

/// Registers accounts, verifies login credentials, and issues/validates
/// bearer tokens.
#[derive(Clone)]
pub struct CredentialService {
    accounts: Arc<dyn AccountStore>,
    signer: TokenSigner,
}

impl CredentialService {
    /// Build the service over an account store and a token signer.
    pub fn new(accounts: Arc<dyn AccountStore>, signer: TokenSigner) -> Self {
        Self { accounts, signer }
    }

    /// Create an account with a freshly computed password verifier and log
    /// it in.
    ///
    /// # Errors
    /// [`ErrorCode::Conflict`](super::ErrorCode::Conflict) when an account
    /// with the same email or username already exists; internal errors when
    /// hashing or the store fail.
    pub async fn register(&self, registration: Registration) -> Result<Session, Error> {
        let Registration {
            username,
            email,
            password,
        } = registration;

        // The slow hash runs here, on the explicit set-password path, and
        // nowhere else.
        let verifier = PasswordVerifier::derive(&password)
            .map_err(|err| Error::internal("failed to hash password").with_detail(err.to_string()))?;

        let account = Account::register(username, email, verifier);
        self.accounts
            .insert(&account)
            .await
            .map_err(map_insert_error)?;

        let token = self.signer.issue(account.id())?;
        Ok(Session {
            account: account.profile(),
            token,
        })
    }

    /// Verify credentials against the stored verifier.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller: both fail with the same `Unauthorized` error.
    pub async fn login(&self, attempt: LoginAttempt) -> Result<Session, Error> {
        let LoginAttempt { email, password } = attempt;

        let account = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(invalid_credentials)?;

        if !account.verifier().matches(&password) {
            return Err(invalid_credentials());
        }

        let token = self.signer.issue(account.id())?;
        Ok(Session {
            account: account.profile(),
            token,
        })
    }

    /// Produce a signed token for an account identifier.
    pub fn issue_token(&self, account: AccountId) -> Result<String, Error> {
        self.signer.issue(account)
    }

    /// Validate a token's signature and expiry, returning the embedded
    /// account identifier.
    pub fn verify_token(&self, token: &str) -> Result<AccountId, Error> {
        self.signer.verify(token)
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn map_insert_error(err: AccountStoreError) -> Error {
    match err {
        AccountStoreError::Duplicate { field } => {
            Error::conflict(format!("an account with this {field} already exists"))
        }
        other => map_lookup_error(other),
    }
}

fn map_lookup_error(err: AccountStoreError) -> Error {
    Error::internal("account store failure").with_detail(err.to_string())
}
