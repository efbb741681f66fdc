//! HTTP surface of the car inventory service.

pub mod errors;
pub mod response;
pub mod routes;
pub mod state;
pub mod startup;

pub use startup::{build_app, run, serve_with_shutdown};
