//! Driving port for station mutations.
use async_trait::async_trait;

use crate::domain::{Error, Station, StationDraft, StationId, StationPatch, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StationsCommand: Send + Sync {
    /// Create a station owned by `owner`.
    async fn create(&self, owner: &UserId, draft: StationDraft) -> Result<Station, Error>;

    /// Merge `patch` into the station and return the stored result.
    ///
    /// # Errors
    /// `NotFound` when no station has the identifier.
    async fn update(&self, id: &StationId, patch: StationPatch) -> Result<Station, Error>;

    /// Delete the station.
    ///
    /// # Errors
    /// `NotFound` when no station has the identifier.
    async fn delete(&self, id: &StationId) -> Result<(), Error>;
}
