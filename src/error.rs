use thiserror::Error;

/// Errors reported by tree operations.
///
/// Every failing operation performs its lookup before touching the tree, so
/// an `Err` always means nothing was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `insert` was called with a key that is already stored.
    #[error("key {0} is already present")]
    DuplicateKey(i32),
    /// `delete` or a prefix query was called with a key that is not stored.
    #[error("key {0} is not present")]
    KeyNotFound(i32),
}

pub type Result<T> = std::result::Result<T, Error>;
