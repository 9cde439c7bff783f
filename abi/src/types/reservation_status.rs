use core::fmt;
use std::{convert::Infallible, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl FromStr for ReservationStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pending" => ReservationStatus::Pending,
            "approved" => ReservationStatus::Approved,
            "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Unknown,
        })
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "pending"),
            ReservationStatus::Approved => write!(f, "approved"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
            ReservationStatus::Unknown => write!(f, "unknown"),
        }
    }
}
