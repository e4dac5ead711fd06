//! Trip aggregate and its waypoints.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::account::AccountId;

/// Validation errors returned by [`TripDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    /// Title was missing or blank once trimmed.
    EmptyTitle,
    /// The draft carried no stops.
    NoStops,
}

impl fmt::Display for TripValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "trip title must not be empty"),
            Self::NoStops => write!(f, "a trip needs at least one stop"),
        }
    }
}

impl std::error::Error for TripValidationError {}

/// Stable trip identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripId(Uuid);

impl TripId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TripId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One named, coordinate-tagged waypoint within a trip's itinerary.
///
/// Coordinates are stored as-is: the core applies no range validation, so a
/// stop at latitude 400 is accepted and rendered (or not) by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Stop {
    /// Build a stop from its display name and coordinates.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Display name of the waypoint.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Latitude in signed degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in signed degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Validated input for creating a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    title: String,
    description: Option<String>,
    stops: Vec<Stop>,
}

impl TripDraft {
    /// Validate a draft: the title must be non-blank and at least one stop
    /// is required.
    pub fn new(
        title: impl AsRef<str>,
        description: Option<String>,
        stops: Vec<Stop>,
    ) -> Result<Self, TripValidationError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(TripValidationError::EmptyTitle);
        }
        if stops.is_empty() {
            return Err(TripValidationError::NoStops);
        }
        Ok(Self {
            title: title.to_owned(),
            description,
            stops,
        })
    }
}

/// A stored road trip: a titled, ordered itinerary owned by one account.
///
/// ## Invariants
/// - Always has at least one stop (guaranteed by [`TripDraft::new`]).
/// - Exactly one owner, set at creation and never reassigned.
/// - Immutable once created; the only exposed mutation is deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    id: TripId,
    owner: AccountId,
    title: String,
    description: Option<String>,
    stops: Vec<Stop>,
    created_at: DateTime<Utc>,
}

impl Trip {
    /// Create a trip from a validated draft, assigning identifier and
    /// creation timestamp.
    pub fn create(owner: AccountId, draft: TripDraft) -> Self {
        let TripDraft {
            title,
            description,
            stops,
        } = draft;
        Self {
            id: TripId::random(),
            owner,
            title,
            description,
            stops,
            created_at: Utc::now(),
        }
    }

    /// Stable trip identifier.
    pub fn id(&self) -> TripId {
        self.id
    }

    /// Owning account, set at creation.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Trip title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Creation timestamp assigned by the server.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
