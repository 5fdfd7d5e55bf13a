//! Cryptographic adapters: bcrypt password hashing and HS256 identity tokens.

mod jwt;
mod password;

pub use jwt::JwtTokenService;
pub use password::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
