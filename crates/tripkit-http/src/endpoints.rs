//! Endpoint paths and request bodies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Paths
// ============================================================================

pub const PING: &str = "/ping";

pub const REFRESH_TOKEN: &str = "/auth/refreshToken";

pub const VERSION: &str = "/platform/version";

pub const LOCATE_AUTO_COMPLETE: &str = "/platform/locate/auto-complete";

pub const LOCATE_LOCATION: &str = "/platform/locate/location";

pub const LOCATE_DIRECTION: &str = "/platform/locate/direction";

pub const LOCATE_PIN: &str = "/platform/locate/pin";

pub const LOCATE_PLACE_PHOTO: &str = "/platform/locate/place-photo";

pub const LOCATE_COUNTRIES: &str = "/platform/locate/countries";

pub const SESSION: &str = "/platform/session";

pub const SCHEDULE: &str = "/platform/schedule";

pub const LOCATION: &str = "/platform/location";

pub const BUDGET: &str = "/platform/budget";

pub const BUDGET_LIST: &str = "/platform/budget/list";

// ============================================================================
// Sign-in providers
// ============================================================================

/// Identity providers the backend accepts tokens from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Facebook,
    Naver,
    Kakao,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Google,
        Provider::Facebook,
        Provider::Naver,
        Provider::Kakao,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
            Provider::Naver => "naver",
            Provider::Kakao => "kakao",
        }
    }

    /// The sign-in endpoint for this provider.
    pub fn sign_path(&self) -> String {
        format!("/auth/{}/sign", self.as_str())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown provider '{s}' (expected google, facebook, naver or kakao)"))
    }
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body for the provider sign-in endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct SignRequest<'a> {
    pub id_token: &'a str,
}

/// Body for place autocomplete.
#[derive(Debug, Serialize)]
pub(crate) struct AutoCompleteRequest<'a> {
    pub input: &'a str,
}

/// Body for trip session deletion.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteSessionRequest<'a> {
    pub session_id: &'a str,
}

/// Body for schedule deletion.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteScheduleRequest<'a> {
    pub schedule_id: &'a str,
}

/// Body for adding a place to a trip.
#[derive(Debug, Serialize)]
pub(crate) struct CreateLocationRequest<'a> {
    pub session_id: &'a str,
    pub place_id: &'a str,
}

/// Body for removing a place from a trip.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteLocationRequest<'a> {
    pub location_id: &'a str,
}

/// A new trip session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTripSession {
    pub country_codes: Vec<String>,
    /// Start of the trip, Unix milliseconds.
    pub start_at: i64,
    /// End of the trip, Unix milliseconds.
    pub end_at: i64,
}

/// A new schedule item within a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub session_id: String,
    pub place_id: String,
    pub name: String,
    /// Unix milliseconds.
    pub start_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Replacement values for an existing schedule item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub schedule_id: String,
    pub place_id: String,
    pub name: String,
    /// Unix milliseconds.
    pub start_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// A new budget entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub sessiontoken: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
}
