//! Domain types and the ownership policy for the Inkwell backend.
//!
//! Nothing in this crate performs I/O. Storage is reached through the
//! traits in [`ownership`], implemented by `inkwell-db`.

pub mod error;
pub mod fields;
pub mod ownership;
pub mod plot;
pub mod plot_reference;
pub mod scope;
pub mod types;
pub mod weapon;
