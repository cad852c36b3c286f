//! Parameters: value sequences bound to keys.
//!
//! A [`Parameter<T>`] is an immutable, ordered sequence of `T` values bound
//! to one [`Key<T>`], optionally annotated with a unit. "Updating" a
//! parameter means producing a new value; nothing is mutated in place.
//!
//! [`AnyParameter`] is the erased form: the same data with the element type
//! folded into [`ParamValue`] variants. It is what a
//! [`ParameterSet`](crate::paramset::ParameterSet) stores and what snapshot
//! consumers enumerate. The two forms convert both ways; recovering a typed
//! view checks the tag and misses on a mismatch.

use crate::key::Key;
use crate::keytype::KeyType;
use crate::units::Units;
use crate::value::{ParamType, ParamValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable value sequence bound to one key
///
/// Equality is structural: same key, same value sequence (order-sensitive,
/// duplicates allowed), same unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter<T: ParamType> {
    key: Key<T>,
    values: Vec<T>,
    units: Units,
}

impl<T: ParamType> Parameter<T> {
    /// Bind a value sequence to a key
    ///
    /// Usually reached through [`Key::set`]. The sequence may be empty.
    pub fn new<I>(key: Key<T>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        Parameter {
            key,
            values: values.into_iter().map(Into::into).collect(),
            units: Units::NoUnits,
        }
    }

    /// Get the key this parameter is bound to
    pub fn key(&self) -> &Key<T> {
        &self.key
    }

    /// Get the key's display name
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// Get the key's registry tag
    pub fn key_type(&self) -> KeyType {
        T::KEY_TYPE
    }

    /// Get the value sequence
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Get the value at `index`, if present
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Get the first value, if present
    pub fn head(&self) -> Option<&T> {
        self.values.first()
    }

    /// Number of values in the sequence
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the unit annotation
    pub fn units(&self) -> Units {
        self.units
    }

    /// Produce a new parameter with the unit rebound
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Erase the element type, consuming the parameter
    pub fn into_any(self) -> AnyParameter {
        AnyParameter {
            name: self.key.name().to_string(),
            key_type: T::KEY_TYPE,
            values: self.values.into_iter().map(T::into_value).collect(),
            units: self.units,
        }
    }

    /// Erase the element type, cloning the data
    pub fn to_any(&self) -> AnyParameter {
        self.clone().into_any()
    }
}

impl<T: ParamType> fmt::Display for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name(), self.to_any().joined_values())
    }
}

impl<T: ParamType> From<Parameter<T>> for AnyParameter {
    fn from(parameter: Parameter<T>) -> Self {
        parameter.into_any()
    }
}

/// Erased parameter: name, tag, erased values, unit
///
/// The serializable storage and snapshot form. The invariant that every
/// element carries the parameter's own tag is maintained by construction
/// from typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyParameter {
    name: String,
    key_type: KeyType,
    values: Vec<ParamValue>,
    units: Units,
}

impl AnyParameter {
    /// Get the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the registry tag
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Get the erased value sequence
    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    /// Number of values in the sequence
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the unit annotation
    pub fn units(&self) -> Units {
        self.units
    }

    /// Recover the typed view, or `None` when `T` carries a different tag
    ///
    /// A same-named parameter of a different element type is a different
    /// slot; probing it with the wrong `T` misses rather than partially
    /// matching.
    pub fn typed<T: ParamType>(&self) -> Option<Parameter<T>> {
        if self.key_type != T::KEY_TYPE {
            return None;
        }
        let mut values = Vec::with_capacity(self.values.len());
        for value in &self.values {
            values.push(T::from_value(value.clone())?);
        }
        Some(Parameter {
            key: Key::make(self.name.clone()),
            values,
            units: self.units,
        })
    }

    /// Deterministic comma-joined rendering of the value sequence
    ///
    /// This is the rendering higher-level diagnostics consume, e.g. through
    /// [`ParameterSet::to_string_map`](crate::paramset::ParameterSet::to_string_map).
    pub fn joined_values(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for AnyParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.joined_values())
    }
}
