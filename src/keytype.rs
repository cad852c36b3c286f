//! The closed registry of parameter element types.
//!
//! Every [`Key`](crate::key::Key) is tagged with exactly one `KeyType`, and
//! the pair (name, KeyType) is the identity of a parameter slot. Two keys
//! with the same display name but different tags address *different* slots.
//!
//! ## Contract
//!
//! The registry is closed: the set of tags is fixed at compile time and
//! shared process-wide. Each tag has a stable registry name used for
//! runtime identity and diagnostics:
//!
//! - `Boolean` / `"boolean"`
//! - `Integer` / `"integer"`
//! - `Float` / `"float"`
//! - `String` / `"string"`
//! - `IntegerArray` / `"integer_array"`
//! - `FloatArray` / `"float_array"`
//! - `Struct` / `"struct"`
//!
//! Constructing a key with a tag outside the registry is a compile-time
//! impossibility: the Rust element type itself (via
//! [`ParamType`](crate::value::ParamType)) is the witness of the tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag identifying the element type a key may hold
///
/// Equality is by variant. Tags are `Copy` constants; there is no dynamic
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Boolean elements (`bool`)
    Boolean,
    /// 64-bit signed integer elements (`i64`)
    Integer,
    /// 64-bit IEEE-754 float elements (`f64`)
    Float,
    /// UTF-8 string elements (`String`)
    String,
    /// Integer-array elements (`Vec<i64>`)
    IntegerArray,
    /// Float-array elements (`Vec<f64>`)
    FloatArray,
    /// Nested parameter-set elements ([`ParameterSet`](crate::paramset::ParameterSet))
    Struct,
}

impl KeyType {
    /// Every tag in the registry, in declaration order
    pub const ALL: [KeyType; 7] = [
        KeyType::Boolean,
        KeyType::Integer,
        KeyType::Float,
        KeyType::String,
        KeyType::IntegerArray,
        KeyType::FloatArray,
        KeyType::Struct,
    ];

    /// Get the stable registry name of this tag
    pub fn name(&self) -> &'static str {
        match self {
            KeyType::Boolean => "boolean",
            KeyType::Integer => "integer",
            KeyType::Float => "float",
            KeyType::String => "string",
            KeyType::IntegerArray => "integer_array",
            KeyType::FloatArray => "float_array",
            KeyType::Struct => "struct",
        }
    }

    /// Look up a tag by its registry name
    ///
    /// Returns `None` for names not present in the registry.
    pub fn from_name(name: &str) -> Option<Self> {
        KeyType::ALL.iter().copied().find(|kt| kt.name() == name)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
