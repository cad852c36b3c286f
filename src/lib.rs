//! Immutable, typed parameter sets for instrument command and event payloads.
//!
//! This crate defines the value model carried between components of an
//! observatory control system:
//!
//! - [`KeyType`]: closed registry of parameter element types
//! - [`Key<T>`](Key): immutable (name, type-tag) slot identifier
//! - [`Parameter<T>`](Parameter): ordered value sequence bound to a key,
//!   with an optional [`Units`] annotation
//! - [`ParameterSet`]: unique-by-key immutable collection with typed lookup
//!   and copy-on-write set algebra
//! - Payload variants: [`Setup`] and [`Observe`] commands, [`SystemEvent`]
//!   and [`ObserveEvent`] events, each a parameter set tagged with its
//!   source [`Prefix`] (events also carry [`EventTime`]/[`ObsId`] metadata)
//!
//! The central invariant: parameter slots are identified by (name, type),
//! never by name alone. Keys with colliding display names but different
//! element types address different slots, and a wrong-typed lookup misses
//! instead of partially matching.
//!
//! Everything is a value. No operation mutates its receiver; "writers"
//! produce new versions, so payloads can be shared across threads without
//! synchronization. Transports serialize payload variants with serde and
//! reconstruct each member from its (key, values, unit) triple; this crate
//! defines no wire format of its own.
//!
//! ```
//! use obs_params::{IntegerKey, ParameterSetLike, Prefix, Setup, StringKey};
//!
//! let encoder = IntegerKey::make("encoder");
//! let filter = StringKey::make("filter");
//!
//! let setup = Setup::new(Prefix::new("wfos.blue.filter").unwrap())
//!     .add(encoder.set([22, 33]))
//!     .add(filter.set(["u-prime"]));
//!
//! assert_eq!(setup.len(), 2);
//! assert_eq!(setup.parameter(&encoder).unwrap().values(), &[22, 33]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod error;
pub mod events;
pub mod key;
pub mod keytype;
pub mod parameter;
pub mod paramset;
pub mod prefix;
pub mod time;
pub mod units;
pub mod value;

pub use commands::{Command, Observe, Setup};
pub use error::{Error, Result};
pub use events::{Event, EventInfo, ObserveEvent, ObsId, SystemEvent};
pub use key::{
    AnyKey, BooleanKey, FloatArrayKey, FloatKey, IntegerArrayKey, IntegerKey, Key, StringKey,
    StructKey,
};
pub use keytype::KeyType;
pub use parameter::{AnyParameter, Parameter};
pub use paramset::{ParameterSet, ParameterSetLike};
pub use prefix::{Prefix, PrefixError, Subsystem};
pub use time::EventTime;
pub use units::Units;
pub use value::{ParamType, ParamValue};
