//! Error types for `loja-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown alert kind discriminant: {0:?}")]
  UnknownAlertKind(String),

  #[error("unknown severity: {0:?}")]
  UnknownSeverity(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
