//! Process-local adapters used when no database is configured and in tests.
//!
//! State lives behind a `std::sync::Mutex`; no lock is held across an await.

mod station_repository;
mod user_repository;

pub use station_repository::InMemoryStationRepository;
pub use user_repository::InMemoryUserRepository;
