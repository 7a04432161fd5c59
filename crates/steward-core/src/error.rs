//! Error types for `steward-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("agreement not found: {0}")]
  AgreementNotFound(i64),

  #[error("property {0:?} already exists")]
  DuplicateProperty(String),

  #[error("email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("no property named {0:?}")]
  UnknownProperty(String),

  #[error("price must be non-negative, got {0}")]
  NegativePrice(f64),

  #[error("increase percent must be non-negative, got {0}")]
  NegativeIncrease(f64),

  #[error("unknown agreement status: {0:?}")]
  UnknownStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
