//! Bearer-token authorization for HTTP handlers.
//!
//! [`authorize`] is a plain function from (optional token, account store) to
//! an authenticated identity; the [`AuthenticatedAccount`] extractor wraps
//! it so the request pipeline short-circuits with `401 Unauthorized` before
//! any handler logic runs.

use std::ops::Deref;

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::AccountStore;
use crate::domain::{AccountProfile, CredentialService, Error};

use super::state::HttpState;

/// Resolve an optional bearer token into an authenticated account.
///
/// Failure modes, all `Unauthorized`:
/// - no token supplied;
/// - signature or expiry check fails;
/// - the token is valid but its account no longer exists in the store. The
///   last case is deliberate: downstream code must never see a token-bearing
///   request without a live owner.
pub async fn authorize(
    bearer: Option<&str>,
    credentials: &CredentialService,
    accounts: &dyn AccountStore,
) -> Result<AccountProfile, Error> {
    let token = bearer.ok_or_else(|| Error::unauthorized("no token"))?;
    let account_id = credentials.verify_token(token)?;

    let account = accounts
        .find_by_id(account_id)
        .await
        .map_err(|err| Error::internal("account store failure").with_detail(err.to_string()))?
        .ok_or_else(|| Error::unauthorized("token invalid"))?;

    Ok(account.profile())
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}

/// Authenticated identity extractor.
///
/// Dereferences to [`AccountProfile`], so handlers read `account.id()` and
/// `account.username()` directly.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(AccountProfile);

impl Deref for AuthenticatedAccount {
    type Target = AccountProfile;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedAccount {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("http state not configured on this app"))?;
            let profile =
                authorize(token.as_deref(), &state.credentials, state.accounts.as_ref()).await?;
            Ok(Self(profile))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::domain::{Registration, TokenSigner, TripService};
    use crate::outbound::persistence::{MemoryAccountStore, MemoryTripStore};

    const SECRET: &[u8] = b"auth-extractor-tests";

    fn state() -> web::Data<HttpState> {
        let accounts: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        let credentials = Arc::new(CredentialService::new(
            Arc::clone(&accounts),
            TokenSigner::new(SECRET),
        ));
        let trips = Arc::new(TripService::new(Arc::new(MemoryTripStore::new())));
        web::Data::new(HttpState::new(credentials, trips, accounts))
    }

    async fn whoami(account: AuthenticatedAccount) -> HttpResponse {
        HttpResponse::Ok().body(account.username().as_ref().to_owned())
    }

    async fn status_with_header(
        state: web::Data<HttpState>,
        authorization: Option<&str>,
    ) -> StatusCode {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        test::call_service(&app, request.to_request()).await.status()
    }

    #[actix_web::test]
    async fn missing_header_is_rejected_before_the_handler() {
        assert_eq!(
            status_with_header(state(), None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[rstest::rstest]
    #[case("Bearer ")]
    #[case("Bearer not-a-token")]
    #[case("Basic dXNlcjpwdw==")]
    #[actix_web::test]
    async fn malformed_or_invalid_tokens_are_rejected(#[case] header_value: &str) {
        assert_eq!(
            status_with_header(state(), Some(header_value)).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn valid_token_for_a_missing_account_is_rejected() {
        let state = state();
        let orphan = crate::domain::AccountId::random();
        let token = state.credentials.issue_token(orphan).expect("token issued");
        assert_eq!(
            status_with_header(state, Some(&format!("Bearer {token}"))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn registered_account_passes_and_reaches_the_handler() {
        let state = state();
        let session = state
            .credentials
            .register(
                Registration::try_from_parts("alice", "alice@x.com", "pw123456")
                    .expect("valid registration"),
            )
            .await
            .expect("registration succeeds");

        let app = test::init_service(
            App::new()
                .app_data(state)
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let request = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", session.token)))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, "alice");
    }
}
