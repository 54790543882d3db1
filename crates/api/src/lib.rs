//! Survey API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests and the binaries can share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
