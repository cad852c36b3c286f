//! Typed keys identifying parameter slots.
//!
//! A key is an immutable (name, [`KeyType`]) pair. The tag comes from the
//! key's Rust element type `T`, so a `Key<i64>` named `"epoch"` and a
//! `Key<String>` named `"epoch"` are distinct slots even though their
//! display names collide. Keys are created once and reused both to build
//! parameters and to look them up.
//!
//! ```
//! use obs_params::{IntegerKey, StringKey};
//!
//! let encoder = IntegerKey::make("encoder");
//! let epoch = StringKey::make("epoch");
//!
//! let param = encoder.set([22, 33]);
//! assert_eq!(param.values(), &[22, 33]);
//! assert_ne!(encoder.key_type(), epoch.key_type());
//! ```

use crate::keytype::KeyType;
use crate::parameter::Parameter;
use crate::paramset::ParameterSet;
use crate::value::ParamType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Immutable (name, type-tag) identifier for a parameter slot
///
/// The element type `T` is the compile-time witness of the slot's
/// [`KeyType`]; equality and hashing combine the name with that tag.
pub struct Key<T: ParamType> {
    name: String,
    _type: PhantomData<fn() -> T>,
}

/// Key for boolean parameters
pub type BooleanKey = Key<bool>;
/// Key for 64-bit integer parameters
pub type IntegerKey = Key<i64>;
/// Key for 64-bit float parameters
pub type FloatKey = Key<f64>;
/// Key for string parameters
pub type StringKey = Key<String>;
/// Key for integer-array parameters
pub type IntegerArrayKey = Key<Vec<i64>>;
/// Key for float-array parameters
pub type FloatArrayKey = Key<Vec<f64>>;
/// Key for nested parameter-set parameters
pub type StructKey = Key<ParameterSet>;

impl<T: ParamType> Key<T> {
    /// Create a key with the given display name
    pub fn make(name: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            _type: PhantomData,
        }
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the registry tag supplied by `T`
    pub fn key_type(&self) -> KeyType {
        T::KEY_TYPE
    }

    /// Bind a value sequence to this key, producing an immutable parameter
    ///
    /// Accepts any sequence whose items convert into `T`; an empty sequence
    /// is allowed. The parameter carries
    /// [`Units::NoUnits`](crate::units::Units::NoUnits) until rebound with
    /// [`Parameter::with_units`].
    pub fn set<I>(&self, values: I) -> Parameter<T>
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        Parameter::new(self.clone(), values)
    }

    /// Erase the element type, keeping the (name, tag) identity
    pub fn to_any(&self) -> AnyKey {
        AnyKey {
            name: self.name.clone(),
            key_type: T::KEY_TYPE,
        }
    }
}

// Manual impls: the derives would put unnecessary bounds on T.

impl<T: ParamType> Clone for Key<T> {
    fn clone(&self) -> Self {
        Key {
            name: self.name.clone(),
            _type: PhantomData,
        }
    }
}

impl<T: ParamType> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        // Same T means same tag; only names can differ
        self.name == other.name
    }
}

impl<T: ParamType> Eq for Key<T> {}

impl<T: ParamType> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        T::KEY_TYPE.hash(state);
    }
}

impl<T: ParamType> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("key_type", &T::KEY_TYPE)
            .finish()
    }
}

impl<T: ParamType> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Erased key: the (name, tag) pair without the compile-time witness
///
/// This is the form used where keys of differing element types travel
/// together, e.g. [`ParameterSet::missing_keys`](crate::paramset::ParameterSet::missing_keys).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnyKey {
    name: String,
    key_type: KeyType,
}

impl AnyKey {
    /// Create an erased key from its raw (name, tag) pair
    pub fn new(name: impl Into<String>, key_type: KeyType) -> Self {
        AnyKey {
            name: name.into(),
            key_type,
        }
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the registry tag
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Consume and return the display name
    pub fn into_name(self) -> String {
        self.name
    }
}

impl<T: ParamType> From<&Key<T>> for AnyKey {
    fn from(key: &Key<T>) -> Self {
        key.to_any()
    }
}

impl<T: ParamType> From<Key<T>> for AnyKey {
    fn from(key: Key<T>) -> Self {
        AnyKey {
            name: key.name,
            key_type: T::KEY_TYPE,
        }
    }
}

impl fmt::Display for AnyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.key_type)
    }
}
