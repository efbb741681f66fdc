pub mod errors;
pub mod status;
pub mod car_model;
pub mod db;

pub use status::Status;
