//! Trip API handlers.
//!
//! ```text
//! GET    /api/trips
//! POST   /api/trips {"title":"Coastal Run","locations":[{"name":"Pier","latitude":34.0,"longitude":-118.5}]}
//! DELETE /api/trips/{id}
//! ```
//!
//! All three sit behind the [`AuthenticatedAccount`] extractor, so an
//! unauthenticated request never reaches a handler body.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, OwnedTrip, Stop, TripDraft, TripId, TripValidationError};

use super::ApiResult;
use super::auth::AuthenticatedAccount;
use super::error::ErrorBody;
use super::state::HttpState;

/// One waypoint as carried on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StopPayload {
    /// Display name of the waypoint.
    pub name: String,
    /// Latitude in signed degrees; accepted as-is.
    pub latitude: f64,
    /// Longitude in signed degrees; accepted as-is.
    pub longitude: f64,
}

impl From<StopPayload> for Stop {
    fn from(payload: StopPayload) -> Self {
        Self::new(payload.name, payload.latitude, payload.longitude)
    }
}

impl From<&Stop> for StopPayload {
    fn from(stop: &Stop) -> Self {
        Self {
            name: stop.name().to_owned(),
            latitude: stop.latitude(),
            longitude: stop.longitude(),
        }
    }
}

/// Request body for `POST /api/trips`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateTripRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Stops in visiting order.
    #[serde(default)]
    pub locations: Vec<StopPayload>,
}

/// Owner summary embedded in each trip payload.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TripOwnerPayload {
    /// Owning account identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Owner display name.
    pub username: String,
}

/// Trip payload returned by list and create.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    /// Server-assigned trip identifier.
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Stops in visiting order.
    pub locations: Vec<StopPayload>,
    pub owner: TripOwnerPayload,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<OwnedTrip> for TripResponse {
    fn from(owned: OwnedTrip) -> Self {
        let OwnedTrip { trip, owner_name } = owned;
        Self {
            id: trip.id().to_string(),
            title: trip.title().to_owned(),
            description: trip.description().map(ToOwned::to_owned),
            locations: trip.stops().iter().map(StopPayload::from).collect(),
            owner: TripOwnerPayload {
                id: trip.owner().to_string(),
                username: owner_name,
            },
            created_at: trip.created_at(),
        }
    }
}

/// Confirmation payload for `DELETE /api/trips/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeletionResponse {
    pub message: String,
}

fn map_draft_error(err: TripValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// List the authenticated account's trips.
#[utoipa::path(
    get,
    path = "/api/trips",
    responses(
        (status = 200, description = "Trips owned by the caller", body = [TripResponse]),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["trips"],
    operation_id = "listTrips"
)]
#[get("/trips")]
pub async fn list_trips(
    account: AuthenticatedAccount,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TripResponse>>> {
    let trips = state.trips.list(&account).await?;
    Ok(web::Json(trips.into_iter().map(TripResponse::from).collect()))
}

/// Create a trip owned by the authenticated account.
#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Created trip", body = TripResponse),
        (status = 400, description = "Missing title or locations", body = ErrorBody),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["trips"],
    operation_id = "createTrip"
)]
#[post("/trips")]
pub async fn create_trip(
    account: AuthenticatedAccount,
    state: web::Data<HttpState>,
    payload: web::Json<CreateTripRequest>,
) -> ApiResult<HttpResponse> {
    let CreateTripRequest {
        title,
        description,
        locations,
    } = payload.into_inner();
    let stops: Vec<Stop> = locations.into_iter().map(Stop::from).collect();
    let draft = TripDraft::new(&title, description, stops).map_err(map_draft_error)?;
    let created = state.trips.create(&account, draft).await?;
    Ok(HttpResponse::Created().json(TripResponse::from(created)))
}

/// Delete a trip owned by the authenticated account.
///
/// "Not found" and "not yours" stay distinct: 404 for an unknown trip, 403
/// when the trip exists under someone else's ownership.
#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    params(
        ("id" = String, Path, description = "Trip identifier")
    ),
    responses(
        (status = 200, description = "Deletion confirmation", body = DeletionResponse),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 403, description = "Trip belongs to another account", body = ErrorBody),
        (status = 404, description = "No such trip", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["trips"],
    operation_id = "deleteTrip"
)]
#[delete("/trips/{id}")]
pub async fn delete_trip(
    account: AuthenticatedAccount,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionResponse>> {
    // An identifier that does not parse cannot name a stored trip.
    let id: TripId = path
        .into_inner()
        .parse()
        .map_err(|_| Error::not_found("trip not found"))?;
    state.trips.delete(&account, id).await?;
    Ok(web::Json(DeletionResponse {
        message: "trip deleted".to_owned(),
    }))
}
