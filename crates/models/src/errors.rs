use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown car status label: {0:?}")]
    UnknownStatus(String),
}
