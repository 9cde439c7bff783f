mod rejection;

use thiserror::Error;

pub use rejection::*;

/// Why a proposed reservation window was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    #[error("invalid date")]
    InvalidDate,

    #[error("end must be after start")]
    EndBeforeStart,

    #[error("start is in the past")]
    StartInPast,

    #[error("duration of {0} minutes is outside 1..={1}")]
    DurationOutOfRange(i64, i64),
}

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("invalid window: {0}")]
    Window(#[from] WindowError),

    #[error("invalid userid: {0}")]
    InvalidUserId(i64),

    #[error("invalid amenity id: {0}")]
    InvalidAmenityId(i64),

    #[error("rejected by backend ({0}): {1}")]
    Rejected(u16, RejectionInfo),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PartialEq for ReservationError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // serde_json::Error has no PartialEq
            (Self::Serialize(_), Self::Serialize(_)) => true,
            (Self::Window(v1), Self::Window(v2)) => v1 == v2,
            (Self::InvalidUserId(v1), Self::InvalidUserId(v2)) => v1 == v2,
            (Self::InvalidAmenityId(v1), Self::InvalidAmenityId(v2)) => v1 == v2,
            (Self::Rejected(s1, v1), Self::Rejected(s2, v2)) => s1 == s2 && v1 == v2,
            (Self::Transport(v1), Self::Transport(v2)) => v1 == v2,
            _ => false,
        }
    }
}

impl ReservationError {
    /// Build a rejection from an HTTP status and raw response body.
    pub fn rejected(status: u16, body: &str) -> Self {
        // RejectionInfo parsing is infallible
        let info = body.parse::<RejectionInfo>().unwrap_or_else(|e| match e {});
        Self::Rejected(status, info)
    }

    /// true when the backend refused because the slot is taken
    pub fn is_slot_unavailable(&self) -> bool {
        matches!(self, Self::Rejected(_, RejectionInfo::SlotUnavailable))
    }
}
