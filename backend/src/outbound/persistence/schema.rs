//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Registered identities. `email` carries a UNIQUE constraint.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Nullable<Varchar>,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Charging stations, each owned by the user that created it.
    charging_stations (id) {
        id -> Uuid,
        name -> Varchar,
        latitude -> Float8,
        longitude -> Float8,
        status -> Varchar,
        power_output -> Float8,
        connector_type -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(charging_stations -> users (created_by));
diesel::allow_tables_to_appear_in_same_query!(users, charging_stations);
