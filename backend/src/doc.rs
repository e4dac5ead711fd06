//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification for the REST API: the auth and
//! trip endpoints, the health probes, and the shared error envelope. The
//! generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::accounts::{LoginRequest, SessionResponse, SignupRequest};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::trips::{
    CreateTripRequest, DeletionResponse, StopPayload, TripOwnerPayload, TripResponse,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Trip planner backend API",
        description = "HTTP interface for account registration, login, and ownership-scoped trip management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::trips::list_trips,
        crate::inbound::http::trips::create_trip,
        crate::inbound::http::trips::delete_trip,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        SessionResponse,
        StopPayload,
        CreateTripRequest,
        TripOwnerPayload,
        TripResponse,
        DeletionResponse,
        ErrorBody,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/auth/signup",
            "/api/auth/login",
            "/api/trips",
            "/api/trips/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
