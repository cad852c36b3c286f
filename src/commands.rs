//! Command payload variants.
//!
//! A command is a [`ParameterSet`] tagged with the [`Prefix`] of the
//! component it targets. Two kinds exist: [`Setup`] configures hardware or
//! software state, [`Observe`] drives an exposure. Both are plain immutable
//! records; extending one with [`add`](Setup::add) produces a new value
//! that shares the source and threads the set's replace-on-collision
//! semantics.
//!
//! [`Command`] is the sum the dispatch layer matches on to choose handler
//! behavior.

use crate::parameter::Parameter;
use crate::paramset::{ParameterSet, ParameterSetLike};
use crate::prefix::{Prefix, Subsystem};
use crate::value::ParamType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration command payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setup {
    source: Prefix,
    params: ParameterSet,
}

impl Setup {
    /// Create an empty setup command from its source
    pub fn new(source: Prefix) -> Self {
        Setup {
            source,
            params: ParameterSet::new(),
        }
    }

    /// Get the source prefix
    pub fn source(&self) -> &Prefix {
        &self.source
    }

    /// Get the subsystem owning the source
    pub fn subsystem(&self) -> Subsystem {
        self.source.subsystem()
    }

    /// Return a new command with `parameter` added, same source
    ///
    /// A member sharing the parameter's key is replaced; the receiver is
    /// untouched.
    pub fn add<T: ParamType>(&self, parameter: Parameter<T>) -> Self {
        Setup {
            source: self.source.clone(),
            params: self.params.add(parameter),
        }
    }
}

impl ParameterSetLike for Setup {
    fn param_set(&self) -> &ParameterSet {
        &self.params
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setup[{}]{}", self.source, self.params)
    }
}

/// Exposure command payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observe {
    source: Prefix,
    params: ParameterSet,
}

impl Observe {
    /// Create an empty observe command from its source
    pub fn new(source: Prefix) -> Self {
        Observe {
            source,
            params: ParameterSet::new(),
        }
    }

    /// Get the source prefix
    pub fn source(&self) -> &Prefix {
        &self.source
    }

    /// Get the subsystem owning the source
    pub fn subsystem(&self) -> Subsystem {
        self.source.subsystem()
    }

    /// Return a new command with `parameter` added, same source
    pub fn add<T: ParamType>(&self, parameter: Parameter<T>) -> Self {
        Observe {
            source: self.source.clone(),
            params: self.params.add(parameter),
        }
    }
}

impl ParameterSetLike for Observe {
    fn param_set(&self) -> &ParameterSet {
        &self.params
    }
}

impl fmt::Display for Observe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observe[{}]{}", self.source, self.params)
    }
}

/// Either command kind, for dispatch by pattern match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// A [`Setup`] command
    Setup(Setup),
    /// An [`Observe`] command
    Observe(Observe),
}

impl Command {
    /// Get the source prefix of either kind
    pub fn source(&self) -> &Prefix {
        match self {
            Command::Setup(c) => c.source(),
            Command::Observe(c) => c.source(),
        }
    }

    /// Get the subsystem owning the source of either kind
    pub fn subsystem(&self) -> Subsystem {
        self.source().subsystem()
    }
}

impl ParameterSetLike for Command {
    fn param_set(&self) -> &ParameterSet {
        match self {
            Command::Setup(c) => &c.params,
            Command::Observe(c) => &c.params,
        }
    }
}

impl From<Setup> for Command {
    fn from(command: Setup) -> Self {
        Command::Setup(command)
    }
}

impl From<Observe> for Command {
    fn from(command: Observe) -> Self {
        Command::Observe(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{IntegerKey, StringKey};

    fn source() -> Prefix {
        Prefix::new("wfos.red.detector").unwrap()
    }

    #[test]
    fn test_setup_starts_empty() {
        let setup = Setup::new(source());
        assert!(setup.is_empty());
        assert_eq!(setup.source().as_str(), "wfos.red.detector");
        assert_eq!(setup.subsystem(), Subsystem::WFOS);
    }

    #[test]
    fn test_add_chains_and_preserves_source() {
        let encoder = IntegerKey::make("encoder");
        let epoch = StringKey::make("epoch");

        let setup = Setup::new(source())
            .add(encoder.set([22, 33]))
            .add(epoch.set(["A", "B"]));

        assert_eq!(setup.len(), 2);
        assert_eq!(setup.source(), &source());
        assert_eq!(setup.get(&encoder).unwrap().values(), &[22, 33]);
    }

    #[test]
    fn test_add_does_not_mutate_receiver() {
        let encoder = IntegerKey::make("encoder");
        let base = Observe::new(source());
        let extended = base.add(encoder.set([1]));

        assert!(base.is_empty());
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn test_add_replaces_on_same_key() {
        let encoder = IntegerKey::make("encoder");
        let setup = Setup::new(source())
            .add(encoder.set([1]))
            .add(encoder.set([2]));

        assert_eq!(setup.len(), 1);
        assert_eq!(setup.get(&encoder).unwrap().values(), &[2]);
    }

    #[test]
    fn test_command_dispatch_by_match() {
        let setup: Command = Setup::new(source()).into();
        let observe: Command = Observe::new(source()).into();

        fn kind(command: &Command) -> &'static str {
            match command {
                Command::Setup(_) => "setup",
                Command::Observe(_) => "observe",
            }
        }

        assert_eq!(kind(&setup), "setup");
        assert_eq!(kind(&observe), "observe");
        assert_eq!(setup.subsystem(), Subsystem::WFOS);
    }

    #[test]
    fn test_command_exposes_param_set() {
        let encoder = IntegerKey::make("encoder");
        let command: Command = Setup::new(source()).add(encoder.set([5])).into();

        assert!(command.contains(&encoder));
        assert_eq!(command.len(), 1);
    }

    #[test]
    fn test_display() {
        let encoder = IntegerKey::make("encoder");
        let setup = Setup::new(source()).add(encoder.set([22, 33]));
        assert_eq!(
            setup.to_string(),
            "Setup[wfos.red.detector](encoder=22,33)"
        );
    }

    #[test]
    fn test_equality() {
        let encoder = IntegerKey::make("encoder");
        let a = Setup::new(source()).add(encoder.set([1]));
        let b = Setup::new(source()).add(encoder.set([1]));
        let c = Setup::new(source()).add(encoder.set([2]));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serialization_round_trip() {
        let encoder = IntegerKey::make("encoder");
        let command: Command = Setup::new(source()).add(encoder.set([22])).into();
        let json = serde_json::to_string(&command).unwrap();
        let restored: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(command, restored);
    }
}
