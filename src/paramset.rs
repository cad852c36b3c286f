//! Immutable parameter collections, unique by key.
//!
//! A [`ParameterSet`] holds at most one parameter per (name, [`KeyType`])
//! pair. The value space partitions by that composite identity, never by
//! name alone: two parameters may coexist under the same display name as
//! long as their tags differ, and a wrong-typed probe misses instead of
//! partially matching.
//!
//! ## Semantics
//!
//! - [`add`](ParameterSet::add) is copy-on-write: it returns a new set in
//!   which any member sharing the incoming parameter's key is replaced and
//!   all others are preserved. The receiver is never mutated.
//! - Equality is set equality over the members, ignoring insertion order.
//! - Insertion order is still observable through
//!   [`to_string_map`](ParameterSet::to_string_map), which iterates members
//!   in the order they were first added.
//!
//! Because every operation is a pure computation over immutable inputs,
//! sets can be shared across threads freely; there is nothing to lock.
//!
//! ```
//! use obs_params::{IntegerKey, StringKey, ParameterSet};
//!
//! let encoder = IntegerKey::make("encoder");
//! let epoch = StringKey::make("epoch");
//!
//! let set = ParameterSet::new()
//!     .add(encoder.set([22, 33]))
//!     .add(epoch.set(["A", "B"]));
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.get(&encoder).unwrap().values(), &[22, 33]);
//! // Same name, different type: a distinct slot, absent here
//! assert!(set.get(&IntegerKey::make("epoch")).is_none());
//! ```

use crate::error::{Error, Result};
use crate::key::{AnyKey, Key};
use crate::keytype::KeyType;
use crate::parameter::{AnyParameter, Parameter};
use crate::value::ParamType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Immutable collection of parameters, unique by (name, tag)
///
/// Internally a small insertion-ordered vector; replace-or-insert copies
/// the vector, so existing references to the old version stay valid
/// forever.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterSet {
    params: Vec<AnyParameter>,
}

impl ParameterSet {
    /// Create an empty set
    pub fn new() -> Self {
        ParameterSet { params: Vec::new() }
    }

    fn position(&self, name: &str, key_type: KeyType) -> Option<usize> {
        self.params
            .iter()
            .position(|p| p.name() == name && p.key_type() == key_type)
    }

    /// Whether a member exists for `key`'s exact (name, tag) pair
    ///
    /// A same-named member of a different tag does not count.
    pub fn contains<T: ParamType>(&self, key: &Key<T>) -> bool {
        self.position(key.name(), T::KEY_TYPE).is_some()
    }

    /// Alias for [`contains`](ParameterSet::contains), identical semantics
    pub fn exists<T: ParamType>(&self, key: &Key<T>) -> bool {
        self.contains(key)
    }

    /// Fetch the member with `parameter`'s key, by key identity only
    ///
    /// The probe's values are ignored; the returned parameter may differ in
    /// its stored values. This is "fetch by slot identity", not a
    /// membership test by full equality.
    pub fn find<T: ParamType>(&self, parameter: &Parameter<T>) -> Option<Parameter<T>> {
        self.get(parameter.key())
    }

    /// Get the member for `key`'s exact (name, tag) pair
    ///
    /// Empty when absent, and also when a member with the same name but a
    /// different tag exists; name alone never causes a match.
    pub fn get<T: ParamType>(&self, key: &Key<T>) -> Option<Parameter<T>> {
        self.get_any(key.name(), T::KEY_TYPE)
            .and_then(|p| p.typed())
    }

    /// Get the member for a raw (name, tag) pair
    ///
    /// Same contract as [`get`](ParameterSet::get); for equivalent inputs
    /// the two produce identical results.
    pub fn get_any(&self, name: &str, key_type: KeyType) -> Option<&AnyParameter> {
        self.position(name, key_type).map(|i| &self.params[i])
    }

    /// Number of members (distinct (name, tag) pairs)
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Snapshot of all members, in insertion order
    pub fn parameters(&self) -> &[AnyParameter] {
        &self.params
    }

    /// Iterate over the members, in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, AnyParameter> {
        self.params.iter()
    }

    /// Direct accessor for a member the caller knows must exist
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingKey`] when no member matches the (name,
    /// tag) pair; it never silently returns a wrong-typed member. Callers
    /// are expected to have established presence via
    /// [`contains`](ParameterSet::contains) or
    /// [`missing_keys`](ParameterSet::missing_keys) first.
    pub fn parameter<T: ParamType>(&self, key: &Key<T>) -> Result<Parameter<T>> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            name: key.name().to_string(),
            key_type: T::KEY_TYPE,
        })
    }

    /// Names of the supplied keys that have no matching member
    ///
    /// Keys of differing element types may be mixed in one call (pass their
    /// erased [`AnyKey`] forms). A key's name is included iff no member
    /// matches its (name, tag) pair.
    pub fn missing_keys<I>(&self, keys: I) -> HashSet<String>
    where
        I: IntoIterator,
        I::Item: Into<AnyKey>,
    {
        keys.into_iter()
            .map(Into::into)
            .filter(|k| self.position(k.name(), k.key_type()).is_none())
            .map(AnyKey::into_name)
            .collect()
    }

    /// Return a new set with `parameter` inserted, replacing any member
    /// that shares its key
    ///
    /// The receiver is left untouched. A replaced member's slot keeps its
    /// original position in the insertion order.
    pub fn add<T: ParamType>(&self, parameter: Parameter<T>) -> ParameterSet {
        self.add_any(parameter.into_any())
    }

    /// [`add`](ParameterSet::add) for an already-erased parameter
    pub fn add_any(&self, parameter: AnyParameter) -> ParameterSet {
        let mut params = self.params.clone();
        match self.position(parameter.name(), parameter.key_type()) {
            Some(i) => params[i] = parameter,
            None => params.push(parameter),
        }
        ParameterSet { params }
    }

    /// Return a new set with every parameter in `parameters` added in order
    ///
    /// Each insertion threads the replace-on-collision semantics of
    /// [`add`](ParameterSet::add).
    pub fn add_all<I>(&self, parameters: I) -> ParameterSet
    where
        I: IntoIterator<Item = AnyParameter>,
    {
        parameters.into_iter().fold(self.clone(), |set, p| set.add_any(p))
    }

    /// Insertion-ordered mapping from key name to comma-joined values
    ///
    /// The diagnostics rendering: iteration order equals the order members
    /// were first added, even though set equality ignores it.
    pub fn to_string_map(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|p| (p.name().to_string(), p.joined_values()))
            .collect()
    }
}

/// Set equality over the members, ignoring insertion order
impl PartialEq for ParameterSet {
    fn eq(&self, other: &Self) -> bool {
        // Members are unique by key, so equal lengths plus one-directional
        // containment is enough
        self.params.len() == other.params.len()
            && self.params.iter().all(|p| other.params.contains(p))
    }
}

impl FromIterator<AnyParameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = AnyParameter>>(iter: I) -> Self {
        ParameterSet::new().add_all(iter)
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a AnyParameter;
    type IntoIter = std::slice::Iter<'a, AnyParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .params
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({})", rendered)
    }
}

/// The parameter-set capability shared by payload variants
///
/// Payload variants ([`Setup`](crate::commands::Setup),
/// [`Observe`](crate::commands::Observe),
/// [`SystemEvent`](crate::events::SystemEvent),
/// [`ObserveEvent`](crate::events::ObserveEvent)) hold a [`ParameterSet`]
/// by composition and expose its read operations through this trait; each
/// variant's own `add` rewraps a new set with the variant's unchanged
/// source and metadata.
pub trait ParameterSetLike {
    /// The underlying parameter set
    fn param_set(&self) -> &ParameterSet;

    /// See [`ParameterSet::contains`]
    fn contains<T: ParamType>(&self, key: &Key<T>) -> bool {
        self.param_set().contains(key)
    }

    /// See [`ParameterSet::exists`]
    fn exists<T: ParamType>(&self, key: &Key<T>) -> bool {
        self.param_set().exists(key)
    }

    /// See [`ParameterSet::find`]
    fn find<T: ParamType>(&self, parameter: &Parameter<T>) -> Option<Parameter<T>> {
        self.param_set().find(parameter)
    }

    /// See [`ParameterSet::get`]
    fn get<T: ParamType>(&self, key: &Key<T>) -> Option<Parameter<T>> {
        self.param_set().get(key)
    }

    /// See [`ParameterSet::get_any`]
    fn get_any(&self, name: &str, key_type: KeyType) -> Option<&AnyParameter> {
        self.param_set().get_any(name, key_type)
    }

    /// See [`ParameterSet::len`]
    fn len(&self) -> usize {
        self.param_set().len()
    }

    /// See [`ParameterSet::is_empty`]
    fn is_empty(&self) -> bool {
        self.param_set().is_empty()
    }

    /// See [`ParameterSet::parameters`]
    fn parameters(&self) -> &[AnyParameter] {
        self.param_set().parameters()
    }

    /// See [`ParameterSet::parameter`]
    fn parameter<T: ParamType>(&self, key: &Key<T>) -> Result<Parameter<T>> {
        self.param_set().parameter(key)
    }

    /// See [`ParameterSet::missing_keys`]
    fn missing_keys<I>(&self, keys: I) -> HashSet<String>
    where
        I: IntoIterator,
        I::Item: Into<AnyKey>,
        Self: Sized,
    {
        self.param_set().missing_keys(keys)
    }

    /// See [`ParameterSet::to_string_map`]
    fn to_string_map(&self) -> Vec<(String, String)> {
        self.param_set().to_string_map()
    }
}

impl ParameterSetLike for ParameterSet {
    fn param_set(&self) -> &ParameterSet {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{FloatKey, IntegerKey, StringKey, StructKey};
    use crate::units::Units;

    fn encoder() -> Key<i64> {
        IntegerKey::make("encoder")
    }

    fn epoch_string() -> Key<String> {
        StringKey::make("epoch")
    }

    fn epoch_int() -> Key<i64> {
        IntegerKey::make("epoch")
    }

    fn sample_set() -> ParameterSet {
        ParameterSet::new()
            .add(encoder().set([22, 33]))
            .add(epoch_string().set(["A", "B"]))
    }

    #[test]
    fn test_new_is_empty() {
        let set = ParameterSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set, ParameterSet::default());
    }

    #[test]
    fn test_add_fresh_key_grows_set() {
        let set = sample_set();
        let key = FloatKey::make("exposure");
        let grown = set.add(key.set([1.5]));

        assert!(grown.contains(&key));
        assert_eq!(grown.len(), set.len() + 1);
        // Receiver untouched
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&key));
    }

    #[test]
    fn test_add_same_key_replaces() {
        let set = sample_set();
        let replaced = set.add(encoder().set([99]));

        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced.get(&encoder()).unwrap().values(), &[99]);
        // Copy-on-write: the original still sees the old values
        assert_eq!(set.get(&encoder()).unwrap().values(), &[22, 33]);
    }

    #[test]
    fn test_add_is_idempotent_for_same_parameter() {
        let set = sample_set();
        let p = encoder().set([1, 2]);

        let once = set.add(p.clone());
        let twice = once.add(p);
        assert_eq!(once, twice);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_replace_keeps_slot_position() {
        let set = sample_set().add(encoder().set([99]));
        let map = set.to_string_map();

        assert_eq!(
            map,
            vec![
                ("encoder".to_string(), "99".to_string()),
                ("epoch".to_string(), "A,B".to_string()),
            ]
        );
    }

    #[test]
    fn test_contains_and_exists_require_name_and_type() {
        let set = sample_set();

        assert!(set.contains(&encoder()));
        assert!(set.contains(&epoch_string()));
        // Same name, wrong tag: miss
        assert!(!set.contains(&epoch_int()));
        assert!(!set.exists(&epoch_int()));
        assert!(set.exists(&epoch_string()));
        assert!(!set.contains(&IntegerKey::make("notUsed")));
    }

    #[test]
    fn test_get_misses_on_type_collision() {
        let set = sample_set();

        let stored = set.get(&epoch_string()).unwrap();
        assert_eq!(stored.values(), &["A".to_string(), "B".to_string()]);
        assert_eq!(set.get(&epoch_int()), None);
    }

    #[test]
    fn test_get_any_agrees_with_get() {
        let set = sample_set();

        let by_raw = set.get_any("epoch", KeyType::String).unwrap();
        assert_eq!(by_raw.typed::<String>(), set.get(&epoch_string()));
        assert!(set.get_any("epoch", KeyType::Integer).is_none());
        assert!(set.get_any("notUsed", KeyType::Integer).is_none());
    }

    #[test]
    fn test_find_matches_by_key_not_values() {
        let set = sample_set();

        // Probe carries different values; the stored member comes back
        let probe = encoder().set([0]);
        assert_eq!(set.find(&probe), set.get(&encoder()));

        // Wrong-typed probe misses
        let probe = epoch_int().set([44, 55]);
        assert_eq!(set.find(&probe), None);
    }

    #[test]
    fn test_parameter_hard_accessor() {
        let set = sample_set();

        assert_eq!(
            set.parameter(&encoder()).unwrap(),
            set.get(&encoder()).unwrap()
        );

        let err = set.parameter(&epoch_int()).unwrap_err();
        assert_eq!(
            err,
            Error::MissingKey {
                name: "epoch".to_string(),
                key_type: KeyType::Integer,
            }
        );
        assert!(err.to_string().contains("epoch"));
        assert!(err.to_string().contains("integer"));
    }

    #[test]
    fn test_missing_keys_heterogeneous() {
        let set = sample_set();
        let not_used = IntegerKey::make("notUsed");

        let missing = set.missing_keys([
            encoder().to_any(),
            epoch_string().to_any(),
            not_used.to_any(),
        ]);
        let expected: HashSet<String> = ["notUsed".to_string()].into_iter().collect();
        assert_eq!(missing, expected);
    }

    #[test]
    fn test_missing_keys_counts_type_mismatch_as_missing() {
        let set = sample_set();

        let missing = set.missing_keys([epoch_int().to_any()]);
        assert!(missing.contains("epoch"));
    }

    #[test]
    fn test_missing_keys_empty_input() {
        assert!(sample_set().missing_keys(Vec::<AnyKey>::new()).is_empty());
    }

    #[test]
    fn test_name_collision_both_slots_coexist() {
        let set = sample_set().add(epoch_int().set([44, 55]));

        assert_eq!(set.len(), 3);
        assert_eq!(
            set.get(&epoch_string()).unwrap().values(),
            &["A".to_string(), "B".to_string()]
        );
        assert_eq!(set.get(&epoch_int()).unwrap().values(), &[44, 55]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = ParameterSet::new()
            .add(encoder().set([22, 33]))
            .add(epoch_string().set(["A", "B"]));
        let b = ParameterSet::new()
            .add(epoch_string().set(["A", "B"]))
            .add(encoder().set([22, 33]));

        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_is_value_sensitive() {
        let a = sample_set();
        let b = sample_set().add(encoder().set([22]));
        let c = ParameterSet::new().add(encoder().set([22, 33]));

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_to_string_map_insertion_order() {
        let set = sample_set();
        assert_eq!(
            set.to_string_map(),
            vec![
                ("encoder".to_string(), "22,33".to_string()),
                ("epoch".to_string(), "A,B".to_string()),
            ]
        );
    }

    #[test]
    fn test_to_string_map_shows_both_name_collided_slots() {
        let set = sample_set().add(epoch_int().set([44, 55]));
        let map = set.to_string_map();

        assert_eq!(map.len(), 3);
        assert_eq!(map[1], ("epoch".to_string(), "A,B".to_string()));
        assert_eq!(map[2], ("epoch".to_string(), "44,55".to_string()));
    }

    #[test]
    fn test_add_all_threads_replace_semantics() {
        let set = sample_set().add_all(vec![
            encoder().set([1]).into_any(),
            FloatKey::make("exposure").set([0.5]).into_any(),
        ]);

        assert_eq!(set.len(), 3);
        assert_eq!(set.get(&encoder()).unwrap().values(), &[1]);
    }

    #[test]
    fn test_from_iterator_replaces_on_collision() {
        let set: ParameterSet = vec![
            encoder().set([1]).into_any(),
            encoder().set([2]).into_any(),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&encoder()).unwrap().values(), &[2]);
    }

    #[test]
    fn test_iteration_in_insertion_order() {
        let set = sample_set();
        let names: Vec<&str> = set.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["encoder", "epoch"]);

        let names: Vec<&str> = (&set).into_iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["encoder", "epoch"]);
    }

    #[test]
    fn test_units_participate_in_member_equality() {
        let plain = ParameterSet::new().add(FloatKey::make("focus").set([1.0]));
        let with_units = ParameterSet::new()
            .add(FloatKey::make("focus").set([1.0]).with_units(Units::Millimeter));

        assert_ne!(plain, with_units);
    }

    #[test]
    fn test_nested_struct_parameter() {
        let inner = ParameterSet::new().add(encoder().set([7]));
        let outer_key = StructKey::make("detector");
        let outer = ParameterSet::new().add(outer_key.set([inner.clone()]));

        let stored = outer.get(&outer_key).unwrap();
        assert_eq!(stored.values(), &[inner]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample_set().to_string(),
            "(encoder=22,33, epoch=A,B)"
        );
        assert_eq!(ParameterSet::new().to_string(), "()");
    }

    #[test]
    fn test_serialization_round_trip() {
        let set = sample_set().add(epoch_int().set([44, 55]));
        let json = serde_json::to_string(&set).unwrap();
        let restored: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, restored);
    }

    #[test]
    fn test_trait_view_delegates() {
        fn total_len<S: ParameterSetLike>(s: &S) -> usize {
            s.len()
        }

        let set = sample_set();
        assert_eq!(total_len(&set), 2);
    }
}
