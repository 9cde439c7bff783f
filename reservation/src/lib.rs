use std::sync::Arc;

use abi::{Reservation, ReservationError, ReservationForm, ReservationRequest};
use async_trait::async_trait;
use tokio::sync::RwLock;

mod clock;
mod manager;

pub use clock::{Clock, FixedClock, LocalClock};

pub struct ReservationManager {
    api: Arc<dyn ReservationApi>,
    clock: Arc<dyn Clock>,
    max_minutes: i64,
    listed: RwLock<Option<Vec<Reservation>>>,
}

/// Transport to the reservation backend.
///
/// Implementors resolve their endpoint from `abi::ApiConfig::reservations_url`.
#[async_trait]
pub trait ReservationApi: Send + Sync {
    /// `POST /api/reservations`
    async fn create(&self, req: &ReservationRequest) -> Result<Reservation, ReservationError>;
    /// `GET /api/reservations`
    async fn list(&self) -> Result<Vec<Reservation>, ReservationError>;
}

#[async_trait]
pub trait Rsvp {
    /// validate the form and build the request body, no I/O
    fn prepare(&self, form: ReservationForm) -> Result<ReservationRequest, ReservationError>;
    /// make a reservation
    async fn reserve(&self, form: ReservationForm) -> Result<Reservation, ReservationError>;
    /// list reservations, served from memo after the first fetch
    async fn list(&self) -> Result<Vec<Reservation>, ReservationError>;
    /// drop the memo and fetch again
    async fn refresh(&self) -> Result<Vec<Reservation>, ReservationError>;
}
