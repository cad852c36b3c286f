//! Error types for the parameter model.
//!
//! Lookups are soft by design: `get`/`contains`/`exists`/`find` report
//! absence through `Option`/`bool`, whether the cause is a missing name or
//! a name/type mismatch. The one hard failure is the direct accessor
//! [`ParameterSet::parameter`](crate::paramset::ParameterSet::parameter),
//! which returns [`Error::MissingKey`] when a key the caller asserted must
//! exist is absent. That failure is not recovered internally; it propagates
//! to the caller.

use crate::keytype::KeyType;
use thiserror::Error;

/// Result type alias for parameter-model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the parameter model
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// No member matches the requested (name, type) pair
    #[error("missing key: no parameter named '{name}' of type {key_type}")]
    MissingKey {
        /// Display name of the requested key
        name: String,
        /// Registry tag of the requested key
        key_type: KeyType,
    },
}
