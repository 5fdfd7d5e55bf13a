//! Charging station use cases.
//!
//! [`StationService`] implements both station driving ports over a single
//! [`StationRepository`]. Timestamps come from the injected clock so tests
//! can pin `createdAt`/`updatedAt`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    StationPersistenceError, StationRepository, StationsCommand, StationsQuery,
};
use crate::domain::{
    Error, Station, StationDraft, StationFilter, StationId, StationPatch, UserId,
};

const NOT_FOUND_MESSAGE: &str = "Charging station not found";
const UNAVAILABLE_MESSAGE: &str = "Charging station store is unavailable";

/// Station service implementing [`StationsCommand`] and [`StationsQuery`].
pub struct StationService<R: ?Sized> {
    stations: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> Clone for StationService<R> {
    fn clone(&self) -> Self {
        Self {
            stations: Arc::clone(&self.stations),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ?Sized> StationService<R> {
    /// Create a service over `stations`, stamping times from `clock`.
    pub fn new(stations: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { stations, clock }
    }
}

/// Map a persistence failure to a caller-facing error with a fixed message.
fn map_persistence_error(err: StationPersistenceError, failure_message: &'static str) -> Error {
    match err {
        StationPersistenceError::Connection { message } => {
            warn!(error = %message, "station repository unavailable");
            Error::service_unavailable(UNAVAILABLE_MESSAGE)
        }
        StationPersistenceError::Query { message } => {
            error!(error = %message, "station repository query failed");
            Error::internal(failure_message)
        }
    }
}

fn not_found() -> Error {
    Error::not_found(NOT_FOUND_MESSAGE)
}

#[async_trait]
impl<R> StationsCommand for StationService<R>
where
    R: StationRepository + ?Sized,
{
    async fn create(&self, owner: &UserId, draft: StationDraft) -> Result<Station, Error> {
        const FAILURE: &str = "Error creating charging station";
        let station = Station::create(draft, owner.clone(), self.clock.utc());
        self.stations
            .insert(&station)
            .await
            .map_err(|err| map_persistence_error(err, FAILURE))?;
        info!(station_id = %station.id(), owner = %owner, "charging station created");
        Ok(station)
    }

    async fn update(&self, id: &StationId, patch: StationPatch) -> Result<Station, Error> {
        const FAILURE: &str = "Error updating charging station";
        let current = self
            .stations
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error(err, FAILURE))?
            .ok_or_else(not_found)?;

        let updated = current.apply(patch, self.clock.utc());
        let matched = self
            .stations
            .update(&updated)
            .await
            .map_err(|err| map_persistence_error(err, FAILURE))?;
        if !matched {
            return Err(not_found());
        }
        info!(station_id = %id, "charging station updated");
        Ok(updated)
    }

    async fn delete(&self, id: &StationId) -> Result<(), Error> {
        const FAILURE: &str = "Error deleting charging station";
        let removed = self
            .stations
            .delete(id)
            .await
            .map_err(|err| map_persistence_error(err, FAILURE))?;
        if !removed {
            return Err(not_found());
        }
        info!(station_id = %id, "charging station deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> StationsQuery for StationService<R>
where
    R: StationRepository + ?Sized,
{
    async fn list(&self, filter: StationFilter) -> Result<Vec<Station>, Error> {
        self.stations
            .list(&filter)
            .await
            .map_err(|err| map_persistence_error(err, "Error fetching charging stations"))
    }

    async fn get(&self, id: &StationId) -> Result<Station, Error> {
        self.stations
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error(err, "Error fetching charging station"))?
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
#[path = "station_service_tests.rs"]
mod tests;
