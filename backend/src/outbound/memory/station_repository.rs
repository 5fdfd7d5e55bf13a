//! In-memory station storage.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{StationPersistenceError, StationRepository};
use crate::domain::{Station, StationFilter, StationId};

/// Stations kept in insertion order, which doubles as creation order.
#[derive(Debug, Default)]
pub struct InMemoryStationRepository {
    stations: Mutex<Vec<Station>>,
}

impl InMemoryStationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Station>>, StationPersistenceError> {
        self.stations
            .lock()
            .map_err(|_| StationPersistenceError::connection("station store lock poisoned"))
    }
}

#[async_trait]
impl StationRepository for InMemoryStationRepository {
    async fn insert(&self, station: &Station) -> Result<(), StationPersistenceError> {
        self.lock()?.push(station.clone());
        Ok(())
    }

    async fn list(&self, filter: &StationFilter) -> Result<Vec<Station>, StationPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|station| filter.matches(station))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &StationId) -> Result<Option<Station>, StationPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|station| station.id() == *id)
            .cloned())
    }

    async fn update(&self, station: &Station) -> Result<bool, StationPersistenceError> {
        let mut stations = self.lock()?;
        match stations.iter_mut().find(|stored| stored.id() == station.id()) {
            Some(slot) => {
                *slot = station.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &StationId) -> Result<bool, StationPersistenceError> {
        let mut stations = self.lock()?;
        let before = stations.len();
        stations.retain(|station| station.id() != *id);
        Ok(stations.len() < before)
    }
}
