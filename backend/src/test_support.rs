//! Test doubles shared by unit tests and the behaviour suites under `tests/`.

mod clock;

pub use clock::MutableClock;
