//! Car inventory: domain types, the storage contract and its adapters.

pub mod domain;
pub mod repository;
pub mod repo;

pub use domain::{CarId, CarInput, CarModel};
pub use repository::CarRepository;
