use std::sync::Arc;

use abi::{Config, Reservation, ReservationError, ReservationForm, ReservationRequest};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::{Clock, LocalClock, ReservationApi, ReservationManager, Rsvp};

#[async_trait]
impl Rsvp for ReservationManager {
    fn prepare(&self, form: ReservationForm) -> Result<ReservationRequest, ReservationError> {
        let now = self.clock.now();
        let window = form.validate(now, self.max_minutes).map_err(|e| {
            debug!(%now, start = %form.start, end = %form.end, "reservation form rejected: {}", e);
            e
        })?;

        Ok(ReservationRequest::new(&form, &window))
    }

    async fn reserve(&self, form: ReservationForm) -> Result<Reservation, ReservationError> {
        let req = self.prepare(form)?;

        let rsvp = self.api.create(&req).await.map_err(|e| {
            warn!(amenity_id = req.amenity_id, "failed to reserve: {}", e);
            e
        })?;

        info!(
            id = rsvp.id,
            amenity_id = rsvp.amenity_id,
            start_at = %req.start_at,
            end_at = %req.end_at,
            "reservation created"
        );

        // the cached list no longer reflects the backend
        self.listed.write().await.take();
        Ok(rsvp)
    }

    async fn list(&self) -> Result<Vec<Reservation>, ReservationError> {
        if let Some(listed) = self.listed.read().await.as_ref() {
            debug!(count = listed.len(), "serving reservations from memo");
            return Ok(listed.clone());
        }

        let mut guard = self.listed.write().await;
        // another caller may have filled it while we waited
        if let Some(listed) = guard.as_ref() {
            return Ok(listed.clone());
        }

        let listed = self.api.list().await?;
        debug!(count = listed.len(), "fetched reservations");
        *guard = Some(listed.clone());
        Ok(listed)
    }

    async fn refresh(&self) -> Result<Vec<Reservation>, ReservationError> {
        self.listed.write().await.take();
        self.list().await
    }
}

impl ReservationManager {
    pub fn new(api: Arc<dyn ReservationApi>, clock: Arc<dyn Clock>, max_minutes: i64) -> Self {
        Self {
            api,
            clock,
            max_minutes,
            listed: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config, api: Arc<dyn ReservationApi>) -> Self {
        Self::new(api, Arc::new(LocalClock), config.policy.max_minutes)
    }

    pub fn max_minutes(&self) -> i64 {
        self.max_minutes
    }
}
