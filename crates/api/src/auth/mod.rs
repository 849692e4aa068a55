//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT generation, validation and the session cookie.

pub mod jwt;
pub mod password;
