//! Server configuration assembled once at process start.
//!
//! Request-handling code never reads the environment; everything it needs
//! arrives through this struct.

use std::env;
use std::net::SocketAddr;

use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

/// Process-wide configuration for the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: Zeroizing<String>,
    pub(crate) frontend_origin: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        token_secret: impl Into<String>,
        frontend_origin: Option<String>,
    ) -> Self {
        Self {
            bind_addr,
            token_secret: Zeroizing::new(token_secret.into()),
            frontend_origin,
        }
    }

    /// Read configuration from the environment.
    ///
    /// Consumed variables: `HOST` (default `0.0.0.0`), `PORT` (default
    /// `8080`), `TOKEN_SECRET`, `FRONTEND_ORIGIN`. A missing `TOKEN_SECRET`
    /// falls back to an ephemeral secret in development builds only;
    /// release builds refuse to start without one.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] for an unparsable host/port pair or a
    /// missing secret in release builds.
    pub fn from_env() -> std::io::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let port = match env::var("PORT") {
            Err(_) => 8080,
            Ok(raw) => raw.parse::<u16>().map_err(|err| {
                std::io::Error::other(format!("invalid PORT value {raw}: {err}"))
            })?,
        };
        let bind_addr = format!("{host}:{port}")
            .parse()
            .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

        let token_secret = match env::var("TOKEN_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => ephemeral_secret()?,
        };

        let frontend_origin = env::var("FRONTEND_ORIGIN").ok().filter(|v| !v.is_empty());

        Ok(Self {
            bind_addr,
            token_secret: Zeroizing::new(token_secret),
            frontend_origin,
        })
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Generate a throwaway signing secret for development runs.
///
/// Tokens issued under it die with the process, which is acceptable only in
/// development; release builds must configure `TOKEN_SECRET`.
fn ephemeral_secret() -> std::io::Result<String> {
    let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
    if cfg!(debug_assertions) || allow_dev {
        warn!("TOKEN_SECRET not set; using a temporary signing secret (dev only)");
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(hex::encode(bytes))
    } else {
        Err(std::io::Error::other(
            "TOKEN_SECRET must be set outside development builds",
        ))
    }
}
