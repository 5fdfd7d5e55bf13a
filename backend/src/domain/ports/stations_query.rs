//! Driving port for station reads.
use async_trait::async_trait;

use crate::domain::{Error, Station, StationFilter, StationId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StationsQuery: Send + Sync {
    /// List stations matching every criterion in `filter`.
    async fn list(&self, filter: StationFilter) -> Result<Vec<Station>, Error>;

    /// Fetch one station or fail with `NotFound`.
    async fn get(&self, id: &StationId) -> Result<Station, Error>;
}
