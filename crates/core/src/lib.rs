//! Survey domain logic.
//!
//! Pure functions and types shared by the database and HTTP layers. Nothing
//! in this crate performs I/O.

pub mod error;
pub mod types;
pub mod validation;
