//! Account aggregate and its validated components.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! The password is only ever held as a [`PasswordVerifier`]; the plaintext
//! never reaches an [`Account`].

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString, rand_core::OsRng,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors returned by account component constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Identifier was not a valid UUID.
    InvalidId,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::InvalidId => write!(f, "account id must be a valid UUID"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccountId {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }
}

/// Unique display name chosen at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Case-normalised email address.
///
/// ## Invariants
/// - Stored lower-cased so lookups and the uniqueness constraint are
///   case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`], normalising the case.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Salted, one-way-hashed representation of a password (Argon2id, PHC
/// string). Stored in place of the plaintext.
///
/// [`PasswordVerifier::derive`] is the only constructor, so the slow hash
/// runs exactly when a password is being set and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordVerifier(String);

impl PasswordVerifier {
    /// Hash a plaintext password with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(Self(hash.to_string()))
    }

    /// Check a plaintext password against the stored verifier.
    ///
    /// A verifier that fails to parse never matches; verifiers are only
    /// produced by [`PasswordVerifier::derive`], so that path is unreachable
    /// for records written by this service.
    pub fn matches(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// PHC-format string for persistence adapters.
    pub fn as_phc_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Registered account as held by the account store.
///
/// ## Invariants
/// - `username` and `email` are each unique across all accounts (enforced by
///   the store's constrained insert).
/// - Immutable after registration; no exposed operation deletes an account.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: Username,
    email: EmailAddress,
    verifier: PasswordVerifier,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Register a new account with a freshly assigned identifier.
    pub fn register(username: Username, email: EmailAddress, verifier: PasswordVerifier) -> Self {
        Self {
            id: AccountId::random(),
            username,
            email,
            verifier,
            created_at: Utc::now(),
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Display name shown alongside owned resources.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Normalised email address used for login lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password verifier.
    pub fn verifier(&self) -> &PasswordVerifier {
        &self.verifier
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The account minus its password verifier, safe to hand downstream.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Authenticated identity passed to handlers once authorization succeeds.
///
/// Deliberately excludes the password verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    id: AccountId,
    username: Username,
    email: EmailAddress,
}

impl AccountProfile {
    /// Stable account identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Display name shown alongside owned resources.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", AccountValidationError::EmptyUsername)]
    #[case("   ", AccountValidationError::EmptyUsername)]
    fn username_rejects_blank(#[case] value: &str, #[case] expected: AccountValidationError) {
        assert_eq!(Username::new(value).expect_err("blank rejected"), expected);
    }

    #[test]
    fn username_trims_whitespace() {
        let name = Username::new("  alice  ").expect("valid username");
        assert_eq!(name.as_ref(), "alice");
    }

    #[rstest]
    #[case("Alice@X.COM", "alice@x.com")]
    #[case("  bob@example.org ", "bob@example.org")]
    fn email_is_case_normalised(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), expected);
    }

    #[test]
    fn email_rejects_blank() {
        assert_eq!(
            EmailAddress::new("  ").expect_err("blank rejected"),
            AccountValidationError::EmptyEmail
        );
    }

    #[test]
    fn verifier_round_trips_and_salts_freshly() {
        let first = PasswordVerifier::derive("pw123456").expect("hashing succeeds");
        let second = PasswordVerifier::derive("pw123456").expect("hashing succeeds");
        assert_ne!(first.as_phc_str(), second.as_phc_str());
        assert!(first.matches("pw123456"));
        assert!(second.matches("pw123456"));
        assert!(!first.matches("pw1234567"));
    }

    #[test]
    fn malformed_verifier_never_matches() {
        let verifier = PasswordVerifier("not-a-phc-string".into());
        assert!(!verifier.matches("anything"));
    }

    #[test]
    fn profile_excludes_verifier_but_keeps_identity() {
        let account = Account::register(
            Username::new("alice").expect("valid username"),
            EmailAddress::new("alice@x.com").expect("valid email"),
            PasswordVerifier::derive("pw123456").expect("hashing succeeds"),
        );
        let profile = account.profile();
        assert_eq!(profile.id(), account.id());
        assert_eq!(profile.username().as_ref(), "alice");
        assert_eq!(profile.email().as_ref(), "alice@x.com");
    }

    #[test]
    fn account_id_parses_its_display_form() {
        let id = AccountId::random();
        let parsed: AccountId = id.to_string().parse().expect("round trip");
        assert_eq!(parsed, id);
    }

    #[test]
    fn account_id_rejects_garbage() {
        assert_eq!(
            "not-a-uuid".parse::<AccountId>().expect_err("rejected"),
            AccountValidationError::InvalidId
        );
    }
}
