//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, from a Bearer token or
//!   the session cookie.

pub mod auth;
