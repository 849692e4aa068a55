//! Request handlers.
//!
//! `series` and `book` manage the owner-scoped parents. `plot`,
//! `plot_reference` and `weapon` are child resources reached through a
//! parent scope; they delegate every decision to
//! [`inkwell_core::ownership::OwnershipResolver`] and map its outcomes via
//! [`crate::error::AppError`].

pub mod auth;
pub mod book;
pub mod plot;
pub mod plot_reference;
pub mod series;
pub mod weapon;
