//! Storage layer of the car inventory service.
//! - `CarRepository` is the store-agnostic contract the HTTP layer calls.
//! - Adapters: SeaORM/PostgreSQL and an in-memory map.
//! - Every call carries a `Context` with a deadline and cancel signal.

pub mod errors;
pub mod context;
pub mod car;
#[cfg(test)]
pub mod test_support;

pub use car::repository::memory::MemoryCarRepository;
pub use car::repo::SeaOrmCarRepository;
pub use car::{CarId, CarInput, CarModel, CarRepository};
pub use context::{Canceller, Context};
pub use errors::CarError;
