//! PostgreSQL-backed [`StationRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StationPersistenceError, StationRepository};
use crate::domain::{
    ConnectorType, GeoLocation, PowerOutput, Station, StationDraft, StationFilter, StationId,
    StationName, StationRecord, StationStatus, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewStationRow, StationRow, StationUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::charging_stations;

/// Diesel implementation of station storage.
#[derive(Clone)]
pub struct DieselStationRepository {
    pool: DbPool,
}

impl DieselStationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StationPersistenceError {
    map_basic_pool_error(error, StationPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StationPersistenceError {
    map_basic_diesel_error(
        error,
        StationPersistenceError::query,
        StationPersistenceError::connection,
    )
}

fn row_to_station(row: StationRow) -> Result<Station, StationPersistenceError> {
    let invalid =
        |err| StationPersistenceError::query(format!("stored station {} is invalid: {err}", row.id));
    let draft = StationDraft {
        name: StationName::new(row.name.clone()).map_err(invalid)?,
        location: GeoLocation::new(row.latitude, row.longitude).map_err(invalid)?,
        status: row.status.parse::<StationStatus>().map_err(invalid)?,
        power_output: PowerOutput::new(row.power_output).map_err(invalid)?,
        connector_type: ConnectorType::new(row.connector_type.clone()).map_err(invalid)?,
    };
    Ok(Station::from_record(StationRecord {
        id: StationId::from_uuid(row.id),
        draft,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl StationRepository for DieselStationRepository {
    async fn insert(&self, station: &Station) -> Result<(), StationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let location = station.location();
        let row = NewStationRow {
            id: *station.id().as_uuid(),
            name: station.name().as_ref(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            status: station.status().as_str(),
            power_output: station.power_output().kilowatts(),
            connector_type: station.connector_type().as_ref(),
            created_by: *station.created_by().as_uuid(),
            created_at: station.created_at(),
            updated_at: station.updated_at(),
        };
        diesel::insert_into(charging_stations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self, filter: &StationFilter) -> Result<Vec<Station>, StationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = charging_stations::table
            .select(StationRow::as_select())
            .into_boxed();
        if let Some(status) = filter.status() {
            query = query.filter(charging_stations::status.eq(status.as_str()));
        }
        if let Some(connector) = filter.connector_type() {
            query = query.filter(charging_stations::connector_type.eq(connector.as_ref().to_owned()));
        }
        if let Some(min) = filter.min_power() {
            query = query.filter(charging_stations::power_output.ge(min));
        }
        if let Some(max) = filter.max_power() {
            query = query.filter(charging_stations::power_output.le(max));
        }

        let rows: Vec<StationRow> = query
            .order((charging_stations::created_at.asc(), charging_stations::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_station).collect()
    }

    async fn find_by_id(&self, id: &StationId) -> Result<Option<Station>, StationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StationRow> = charging_stations::table
            .find(*id.as_uuid())
            .select(StationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_station).transpose()
    }

    async fn update(&self, station: &Station) -> Result<bool, StationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let location = station.location();
        let changes = StationUpdate {
            name: station.name().as_ref(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            status: station.status().as_str(),
            power_output: station.power_output().kilowatts(),
            connector_type: station.connector_type().as_ref(),
            updated_at: station.updated_at(),
        };
        let affected = diesel::update(charging_stations::table.find(*station.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &StationId) -> Result<bool, StationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(charging_stations::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
