use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{validate_window, ReservationError, ReservationStatus, TimeWindow};

/// Typed reservation form input, as collected by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReservationForm {
    pub amenity_id: i64,
    pub user_id: i64,
    pub start: String,
    pub end: String,
}

/// Body of `POST /api/reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub amenity_id: i64,
    pub user_id: i64,
    pub start_at: String,
    pub end_at: String,
}

/// Reservation record returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub amenity_id: i64,
    pub user_id: i64,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl ReservationForm {
    pub fn new(
        amenity_id: i64,
        user_id: i64,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            amenity_id,
            user_id,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Check ids, then run the window checks against `now`.
    pub fn validate(
        &self,
        now: NaiveDateTime,
        max_minutes: i64,
    ) -> Result<TimeWindow, ReservationError> {
        if self.amenity_id <= 0 {
            return Err(ReservationError::InvalidAmenityId(self.amenity_id));
        }

        if self.user_id <= 0 {
            return Err(ReservationError::InvalidUserId(self.user_id));
        }

        Ok(validate_window(&self.start, &self.end, now, max_minutes)?)
    }
}

impl ReservationRequest {
    pub fn new(form: &ReservationForm, window: &TimeWindow) -> Self {
        let (start_at, end_at) = window.to_transport();
        Self {
            amenity_id: form.amenity_id,
            user_id: form.user_id,
            start_at,
            end_at,
        }
    }

    pub fn to_json(&self) -> Result<String, ReservationError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Reservation {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_at,
            end: self.end_at,
        }
    }

    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        self.window().overlaps(window)
    }
}
