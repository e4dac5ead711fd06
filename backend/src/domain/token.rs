//! Signed bearer tokens asserting an account's identity.
//!
//! Tokens are stateless JWTs (HS256): nothing is persisted server-side, so a
//! token's validity is entirely a function of its signature and expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::account::AccountId;
use super::error::Error;

/// Fixed validity window for issued tokens.
pub const TOKEN_VALIDITY_DAYS: i64 = 30;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Standard JWT subject: the account identifier.
    sub: String,
    /// Issued-at (unix timestamp, seconds).
    iat: i64,
    /// Expiry (unix timestamp, seconds).
    exp: i64,
}

/// Issues and verifies identity tokens with a process-wide signing key.
///
/// Construction happens once at startup from configuration; issuance and
/// verification are pure computations with no side effects, so multiple
/// issuances for the same account yield distinct, individually valid tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenSigner {
    /// Build a signer with the standard 30-day validity window.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_validity(secret, Duration::days(TOKEN_VALIDITY_DAYS))
    }

    /// Build a signer with an explicit validity window.
    pub fn with_validity(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validity,
        }
    }

    /// Produce a signed token embedding `account`, valid from now until the
    /// configured window elapses.
    pub fn issue(&self, account: AccountId) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: account.to_string(),
            iat: now.timestamp(),
            exp: (now + self.validity).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal("failed to sign token").with_detail(err.to_string()))
    }

    /// Validate signature and expiry, returning the embedded account
    /// identifier.
    pub fn verify(&self, token: &str) -> Result<AccountId, Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| Error::unauthorized("token invalid"))?;
        data.claims
            .sub
            .parse()
            .map_err(|_| Error::unauthorized("token invalid"))
    }
}
