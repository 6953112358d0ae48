use thiserror::Error;

/// Errors raised while configuring a filter at runtime.
///
/// Everything that can be checked from the filter's type parameters is
/// rejected at compile time instead, so this only covers inputs that are
/// not known until runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Wrong number of hash functions: expected {expected}, got {actual}")]
    HashFunctionCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
