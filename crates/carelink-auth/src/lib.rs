//! # carelink-auth
//!
//! Authentication primitives for CareLink: JWT encoding/decoding and
//! Argon2id password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
