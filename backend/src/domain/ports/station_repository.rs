//! Driven port for charging station storage.
use async_trait::async_trait;

use crate::domain::{Station, StationFilter, StationId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by station repository adapters.
    pub enum StationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "station repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "station repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Persist a newly created station.
    async fn insert(&self, station: &Station) -> Result<(), StationPersistenceError>;

    /// Return every station matching `filter`, oldest first.
    async fn list(&self, filter: &StationFilter) -> Result<Vec<Station>, StationPersistenceError>;

    /// Fetch a single station.
    async fn find_by_id(&self, id: &StationId) -> Result<Option<Station>, StationPersistenceError>;

    /// Overwrite the mutable fields of an existing station.
    ///
    /// Returns `false` when no row matched.
    async fn update(&self, station: &Station) -> Result<bool, StationPersistenceError>;

    /// Remove a station. Returns `false` when no row matched.
    async fn delete(&self, id: &StationId) -> Result<bool, StationPersistenceError>;
}
