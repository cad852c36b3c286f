//! Erased element values and the compile-time type witness.
//!
//! This module bridges the typed world ([`Key<T>`](crate::key::Key),
//! [`Parameter<T>`](crate::parameter::Parameter)) and the erased world
//! ([`AnyParameter`](crate::parameter::AnyParameter),
//! [`ParameterSet`](crate::paramset::ParameterSet)):
//!
//! - [`ParamValue`] is the erased representation of a single element, one
//!   variant per [`KeyType`] tag.
//! - [`ParamType`] is a sealed trait binding each Rust element type to its
//!   tag. It is the witness the type system uses to make "a key with a tag
//!   outside the registry" unrepresentable.
//!
//! ## Type Rules
//!
//! - Different variants are never equal, even when the carried value "looks"
//!   the same: `Integer(1) != Float(1.0)`.
//! - Float equality is IEEE-754: `NaN != NaN`, `-0.0 == 0.0`.

use crate::keytype::KeyType;
use crate::paramset::ParameterSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Erased representation of a single parameter element
///
/// Exactly one variant per registry tag. Typed access goes through
/// [`ParamType`]; this enum is what the set stores and what snapshot
/// consumers (transports, diagnostics) see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Boolean element
    Boolean(bool),
    /// 64-bit signed integer element
    Integer(i64),
    /// 64-bit IEEE-754 float element
    Float(f64),
    /// UTF-8 string element
    String(String),
    /// Integer-array element
    IntegerArray(Vec<i64>),
    /// Float-array element
    FloatArray(Vec<f64>),
    /// Nested parameter-set element
    Struct(ParameterSet),
}

impl ParamValue {
    /// Get the registry tag of this element
    pub fn key_type(&self) -> KeyType {
        match self {
            ParamValue::Boolean(_) => KeyType::Boolean,
            ParamValue::Integer(_) => KeyType::Integer,
            ParamValue::Float(_) => KeyType::Float,
            ParamValue::String(_) => KeyType::String,
            ParamValue::IntegerArray(_) => KeyType::IntegerArray,
            ParamValue::FloatArray(_) => KeyType::FloatArray,
            ParamValue::Struct(_) => KeyType::Struct,
        }
    }
}

impl fmt::Display for ParamValue {
    /// Deterministic rendering used by diagnostics
    ///
    /// Scalars render bare, arrays render as `[a,b]`, nested sets render
    /// with the set's own `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }

        match self {
            ParamValue::Boolean(b) => write!(f, "{}", b),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::String(s) => write!(f, "{}", s),
            ParamValue::IntegerArray(a) => write!(f, "[{}]", join(a)),
            ParamValue::FloatArray(a) => write!(f, "[{}]", join(a)),
            ParamValue::Struct(s) => write!(f, "{}", s),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for String {}
    impl Sealed for Vec<i64> {}
    impl Sealed for Vec<f64> {}
    impl Sealed for crate::paramset::ParameterSet {}
}

/// Compile-time witness that a Rust type is a registered element type
///
/// Implemented for exactly the seven element types in the [`KeyType`]
/// registry; the trait is sealed, so the registry cannot grow outside this
/// crate. `KEY_TYPE` supplies the tag a [`Key<T>`](crate::key::Key) carries,
/// and the two conversions move single elements across the typed/erased
/// boundary.
pub trait ParamType: sealed::Sealed + Clone + PartialEq + fmt::Debug {
    /// The registry tag for this element type
    const KEY_TYPE: KeyType;

    /// Wrap one element into its erased representation
    fn into_value(self) -> ParamValue;

    /// Recover one typed element from the erased representation
    ///
    /// Returns `None` when the value carries a different tag.
    fn from_value(value: ParamValue) -> Option<Self>;
}

impl ParamType for bool {
    const KEY_TYPE: KeyType = KeyType::Boolean;

    fn into_value(self) -> ParamValue {
        ParamValue::Boolean(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl ParamType for i64 {
    const KEY_TYPE: KeyType = KeyType::Integer;

    fn into_value(self) -> ParamValue {
        ParamValue::Integer(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl ParamType for f64 {
    const KEY_TYPE: KeyType = KeyType::Float;

    fn into_value(self) -> ParamValue {
        ParamValue::Float(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Float(x) => Some(x),
            _ => None,
        }
    }
}

impl ParamType for String {
    const KEY_TYPE: KeyType = KeyType::String;

    fn into_value(self) -> ParamValue {
        ParamValue::String(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl ParamType for Vec<i64> {
    const KEY_TYPE: KeyType = KeyType::IntegerArray;

    fn into_value(self) -> ParamValue {
        ParamValue::IntegerArray(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::IntegerArray(a) => Some(a),
            _ => None,
        }
    }
}

impl ParamType for Vec<f64> {
    const KEY_TYPE: KeyType = KeyType::FloatArray;

    fn into_value(self) -> ParamValue {
        ParamValue::FloatArray(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::FloatArray(a) => Some(a),
            _ => None,
        }
    }
}

impl ParamType for ParameterSet {
    const KEY_TYPE: KeyType = KeyType::Struct;

    fn into_value(self) -> ParamValue {
        ParamValue::Struct(self)
    }

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Struct(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_type_per_variant() {
        assert_eq!(ParamValue::Boolean(true).key_type(), KeyType::Boolean);
        assert_eq!(ParamValue::Integer(1).key_type(), KeyType::Integer);
        assert_eq!(ParamValue::Float(1.0).key_type(), KeyType::Float);
        assert_eq!(
            ParamValue::String("x".to_string()).key_type(),
            KeyType::String
        );
        assert_eq!(
            ParamValue::IntegerArray(vec![1]).key_type(),
            KeyType::IntegerArray
        );
        assert_eq!(
            ParamValue::FloatArray(vec![1.0]).key_type(),
            KeyType::FloatArray
        );
        assert_eq!(
            ParamValue::Struct(ParameterSet::new()).key_type(),
            KeyType::Struct
        );
    }

    #[test]
    fn test_cross_variant_inequality() {
        assert_ne!(ParamValue::Integer(1), ParamValue::Float(1.0));
        assert_ne!(
            ParamValue::String("1".to_string()),
            ParamValue::Integer(1)
        );
        assert_ne!(ParamValue::Boolean(false), ParamValue::Integer(0));
    }

    #[test]
    fn test_float_ieee_equality() {
        assert_ne!(ParamValue::Float(f64::NAN), ParamValue::Float(f64::NAN));
        assert_eq!(ParamValue::Float(-0.0), ParamValue::Float(0.0));
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(ParamValue::Integer(22).to_string(), "22");
        assert_eq!(ParamValue::Boolean(true).to_string(), "true");
        assert_eq!(ParamValue::String("A".to_string()).to_string(), "A");
        assert_eq!(ParamValue::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_display_arrays() {
        assert_eq!(
            ParamValue::IntegerArray(vec![1, 2, 3]).to_string(),
            "[1,2,3]"
        );
        assert_eq!(ParamValue::FloatArray(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_witness_tags() {
        assert_eq!(<bool as ParamType>::KEY_TYPE, KeyType::Boolean);
        assert_eq!(<i64 as ParamType>::KEY_TYPE, KeyType::Integer);
        assert_eq!(<f64 as ParamType>::KEY_TYPE, KeyType::Float);
        assert_eq!(<String as ParamType>::KEY_TYPE, KeyType::String);
        assert_eq!(<Vec<i64> as ParamType>::KEY_TYPE, KeyType::IntegerArray);
        assert_eq!(<Vec<f64> as ParamType>::KEY_TYPE, KeyType::FloatArray);
        assert_eq!(<ParameterSet as ParamType>::KEY_TYPE, KeyType::Struct);
    }

    #[test]
    fn test_round_trip_through_erased_form() {
        assert_eq!(i64::from_value(42i64.into_value()), Some(42));
        assert_eq!(
            String::from_value("obs".to_string().into_value()),
            Some("obs".to_string())
        );
        assert_eq!(
            <Vec<i64>>::from_value(vec![1i64, 2].into_value()),
            Some(vec![1, 2])
        );
    }

    #[test]
    fn test_from_value_rejects_wrong_tag() {
        assert_eq!(i64::from_value(ParamValue::Float(1.0)), None);
        assert_eq!(String::from_value(ParamValue::Integer(1)), None);
        assert_eq!(bool::from_value(ParamValue::String("true".into())), None);
    }

    #[test]
    fn test_serialization_round_trip() {
        let values = vec![
            ParamValue::Boolean(true),
            ParamValue::Integer(-7),
            ParamValue::Float(3.25),
            ParamValue::String("epoch".to_string()),
            ParamValue::IntegerArray(vec![1, 2]),
            ParamValue::FloatArray(vec![0.5]),
            ParamValue::Struct(ParameterSet::new()),
        ];
        for v in values {
            let json = serde_json::to_string(&v).unwrap();
            let restored: ParamValue = serde_json::from_str(&json).unwrap();
            assert_eq!(v, restored);
        }
    }
}
