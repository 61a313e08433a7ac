use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("division by zero in fixed-point arithmetic")]
  DivisionByZero,

  #[error("settlement {0} not found")]
  SettlementNotFound(u64),
}

pub type Result<T> = std::result::Result<T, VaultError>;

/// Return early with the given error when the condition does not hold
macro_rules! require {
  ($cond:expr, $err:expr) => {
    if !($cond) {
      return Err($err);
    }
  };
}

pub(crate) use require;
