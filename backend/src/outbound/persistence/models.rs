//! Internal Diesel row structs.
//!
//! Never exposed to the domain; repositories convert at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{charging_stations, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Insertable `users` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub password_hash: &'a str,
}

/// Row read from `charging_stations`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = charging_stations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StationRow {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: String,
    pub power_output: f64,
    pub connector_type: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable `charging_stations` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = charging_stations)]
pub(crate) struct NewStationRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub status: &'a str,
    pub power_output: f64,
    pub connector_type: &'a str,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable station columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = charging_stations)]
pub(crate) struct StationUpdate<'a> {
    pub name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub status: &'a str,
    pub power_output: f64,
    pub connector_type: &'a str,
    pub updated_at: DateTime<Utc>,
}
