//! Shared building blocks for the car inventory service: logging setup and
//! small HTTP payload types used by more than one crate.

pub mod types;
pub mod utils;
