//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel with a bb8 pool.
//! - **memory**: process-local repositories for development and tests.
//! - **crypto**: bcrypt password hashing and HS256 identity tokens.
//!
//! Adapters translate between domain types and infrastructure types and
//! carry no business rules.

pub mod crypto;
pub mod memory;
pub mod persistence;
