//! Webdesk API server library.
//!
//! Exposes the building blocks (config, state, error handling, the
//! notification dispatcher and expiry scanner, routes) so integration
//! tests and the binary entrypoint can both access them.

pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod response;
pub mod routes;
pub mod state;
