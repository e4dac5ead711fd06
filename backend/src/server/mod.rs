//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::AccountStore;
use crate::domain::{CredentialService, TokenSigner, TripService};
use crate::inbound::http::accounts::{login, signup};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::trips::{create_trip, delete_trip, list_trips};
use crate::middleware::request_log::RequestLog;
use crate::outbound::persistence::{MemoryAccountStore, MemoryTripStore};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Dependency bundle handed to each worker's app factory.
#[derive(Clone)]
pub struct AppDependencies {
    /// Shared handler state.
    pub state: web::Data<HttpState>,
    /// Readiness flag surfaced by the probes.
    pub health: web::Data<HealthState>,
    /// Frontend origin allowed for cross-origin requests, if any.
    pub frontend_origin: Option<String>,
}

fn build_cors(frontend_origin: Option<&str>) -> Cors {
    let cors = match frontend_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        // No configured origin: cross-origin requests stay rejected.
        None => Cors::default(),
    };
    cors.allowed_methods(vec!["GET", "POST", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600)
}

/// Assemble the application: API scope, probes, CORS, logging, and (debug
/// builds) Swagger UI.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        state,
        health,
        frontend_origin,
    } = deps;

    let api = web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(signup)
        .service(login)
        .service(list_trips)
        .service(create_trip)
        .service(delete_trip);

    let app = App::new()
        .app_data(state)
        .app_data(health)
        .wrap(RequestLog)
        .wrap(build_cors(frontend_origin.as_deref()))
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over fresh in-memory stores.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let accounts: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
    let signer = TokenSigner::new(config.token_secret.as_bytes());
    let credentials = Arc::new(CredentialService::new(Arc::clone(&accounts), signer));
    let trips = Arc::new(TripService::new(Arc::new(MemoryTripStore::new())));

    let state = web::Data::new(HttpState::new(credentials, trips, accounts));
    let health = web::Data::new(HealthState::new());

    let server_health = health.clone();
    let frontend_origin = config.frontend_origin.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            state: state.clone(),
            health: server_health.clone(),
            frontend_origin: frontend_origin.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health.mark_ready();
    Ok(server)
}
