//! Typed backend endpoints.
//!
//! Results are opaque JSON passed through from the backend, except where a
//! caller needs to tell outcomes apart (sign-in, duplicate locations,
//! binary photos).

use serde_json::Value;
use tracing::{info, instrument};

use tripkit_core::{ApiRequest, Error, ResponseKind, Result, Transport, UserSession};

use crate::client::{ApiClient, encode};
use crate::endpoints::*;

/// Result of adding a place to a trip.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// The place was added; carries the backend's response (the location id).
    Created(Value),
    /// The place is already part of the trip (HTTP 409).
    Duplicate,
}

impl<T: Transport> ApiClient<T> {
    // ========================================================================
    // Service
    // ========================================================================

    /// Liveness check.
    pub async fn ping(&self) -> Result<Value> {
        self.request_json(ApiRequest::get(PING)).await
    }

    /// Backend version string.
    pub async fn version(&self) -> Result<Value> {
        self.request_json(ApiRequest::get(VERSION)).await
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Exchange an identity-provider token for a session.
    ///
    /// The session is installed in the auth state and persisted.
    #[instrument(skip(self, id_token))]
    pub async fn sign_in(&self, provider: Provider, id_token: &str) -> Result<UserSession> {
        let body = encode(&SignRequest { id_token })?;
        let session: UserSession = self
            .request_json(ApiRequest::post(provider.sign_path()).json(body))
            .await?;

        self.install_session(&session).await?;
        info!(%provider, "Signed in");
        Ok(session)
    }

    // ========================================================================
    // Locate
    // ========================================================================

    /// Place suggestions for a partial query.
    pub async fn locate_auto_complete(&self, input: &str) -> Result<Value> {
        let body = encode(&AutoCompleteRequest { input })?;
        self.request_json(ApiRequest::post(LOCATE_AUTO_COMPLETE).json(body))
            .await
    }

    /// Place detail by place id.
    pub async fn locate_location(&self, place_id: &str) -> Result<Value> {
        self.request_json(ApiRequest::get(LOCATE_LOCATION).query("place_id", place_id))
            .await
    }

    /// Route between two places.
    pub async fn locate_direction(
        &self,
        origin_place_id: &str,
        destination_place_id: &str,
    ) -> Result<Value> {
        self.request_json(
            ApiRequest::get(LOCATE_DIRECTION)
                .query("origin_place_id", origin_place_id)
                .query("destination_place_id", destination_place_id),
        )
        .await
    }

    /// Reverse geocode a coordinate.
    pub async fn locate_pin(&self, latitude: f64, longitude: f64) -> Result<Value> {
        self.request_json(
            ApiRequest::get(LOCATE_PIN)
                .query("latitude", latitude)
                .query("longitude", longitude),
        )
        .await
    }

    /// Raw image bytes for a place photo reference.
    pub async fn locate_place_photo(&self, reference: &str, max_width: u32) -> Result<Vec<u8>> {
        let response = self
            .request(
                ApiRequest::get(LOCATE_PLACE_PHOTO)
                    .query("reference", reference)
                    .query("max_width", max_width)
                    .response_kind(ResponseKind::Bytes),
            )
            .await?;
        Ok(response.into_bytes())
    }

    pub async fn locate_countries(&self) -> Result<Value> {
        self.request_json(ApiRequest::get(LOCATE_COUNTRIES)).await
    }

    // ========================================================================
    // Trip sessions
    // ========================================================================

    pub async fn sessions(&self) -> Result<Value> {
        self.request_json(ApiRequest::get(SESSION)).await
    }

    pub async fn create_session(&self, session: &NewTripSession) -> Result<Value> {
        let body = encode(session)?;
        self.request_json(ApiRequest::put(SESSION).json(body)).await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<Value> {
        let body = encode(&DeleteSessionRequest { session_id })?;
        self.request_json(ApiRequest::delete(SESSION).json(body)).await
    }

    // ========================================================================
    // Schedules
    // ========================================================================

    /// Schedule items of a trip on a given day.
    pub async fn schedules(&self, session_id: &str, day: i64) -> Result<Value> {
        self.request_json(
            ApiRequest::get(SCHEDULE)
                .query("session_id", session_id)
                .query("day", day),
        )
        .await
    }

    pub async fn create_schedule(&self, schedule: &NewSchedule) -> Result<Value> {
        let body = encode(schedule)?;
        self.request_json(ApiRequest::put(SCHEDULE).json(body)).await
    }

    pub async fn update_schedule(&self, update: &ScheduleUpdate) -> Result<Value> {
        let body = encode(update)?;
        self.request_json(ApiRequest::post(SCHEDULE).json(body)).await
    }

    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<Value> {
        let body = encode(&DeleteScheduleRequest { schedule_id })?;
        self.request_json(ApiRequest::delete(SCHEDULE).json(body)).await
    }

    // ========================================================================
    // Trip locations
    // ========================================================================

    pub async fn locations(&self, session_id: &str) -> Result<Value> {
        self.request_json(ApiRequest::get(LOCATION).query("session_id", session_id))
            .await
    }

    /// Add a place to a trip. A 409 becomes [`LocationOutcome::Duplicate`].
    pub async fn create_location(&self, session_id: &str, place_id: &str) -> Result<LocationOutcome> {
        let body = encode(&CreateLocationRequest {
            session_id,
            place_id,
        })?;

        match self
            .request_json(ApiRequest::put(LOCATION).json(body))
            .await
        {
            Ok(created) => Ok(LocationOutcome::Created(created)),
            Err(Error::Http(e)) if e.is_conflict() => Ok(LocationOutcome::Duplicate),
            Err(e) => Err(e),
        }
    }

    pub async fn delete_location(&self, location_id: &str) -> Result<Value> {
        let body = encode(&DeleteLocationRequest { location_id })?;
        self.request_json(ApiRequest::delete(LOCATION).json(body))
            .await
    }

    // ========================================================================
    // Budget
    // ========================================================================

    pub async fn budgets(&self) -> Result<Value> {
        self.request_json(ApiRequest::get(BUDGET_LIST)).await
    }

    pub async fn create_budget(&self, budget: &NewBudget) -> Result<Value> {
        let body = encode(budget)?;
        self.request_json(ApiRequest::post(BUDGET).json(body)).await
    }
}
