//! Event payload variants.
//!
//! An event is a [`ParameterSet`] plus [`EventInfo`] metadata: the source
//! [`Prefix`], the [`EventTime`] it was raised, and an optional [`ObsId`]
//! tying it to an observation. [`SystemEvent`] carries demand or state
//! updates; [`ObserveEvent`] marks progress of an exposure.
//!
//! Constructing an event from a bare source stamps the current time;
//! explicit metadata goes through [`EventInfo`]. Like the command variants,
//! events are immutable records extended with `add`.

use crate::parameter::Parameter;
use crate::paramset::{ParameterSet, ParameterSetLike};
use crate::prefix::{Prefix, Subsystem};
use crate::time::EventTime;
use crate::value::ParamType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque observation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObsId(String);

impl ObsId {
    /// Create an observation id
    pub fn new(id: impl Into<String>) -> Self {
        ObsId(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObsId {
    fn from(id: &str) -> Self {
        ObsId::new(id)
    }
}

impl From<String> for ObsId {
    fn from(id: String) -> Self {
        ObsId(id)
    }
}

/// Metadata attached to every event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    source: Prefix,
    event_time: EventTime,
    obs_id: Option<ObsId>,
}

impl EventInfo {
    /// Metadata for an event raised now, outside any observation
    pub fn new(source: Prefix) -> Self {
        EventInfo {
            source,
            event_time: EventTime::now(),
            obs_id: None,
        }
    }

    /// Metadata with an explicit time, outside any observation
    pub fn with_time(source: Prefix, event_time: EventTime) -> Self {
        EventInfo {
            source,
            event_time,
            obs_id: None,
        }
    }

    /// Metadata with an explicit time, tied to an observation
    pub fn with_obs_id(source: Prefix, event_time: EventTime, obs_id: ObsId) -> Self {
        EventInfo {
            source,
            event_time,
            obs_id: Some(obs_id),
        }
    }

    /// Get the source prefix
    pub fn source(&self) -> &Prefix {
        &self.source
    }

    /// Get the instant the event was raised
    pub fn event_time(&self) -> EventTime {
        self.event_time
    }

    /// Get the observation id, if the event belongs to one
    pub fn obs_id(&self) -> Option<&ObsId> {
        self.obs_id.as_ref()
    }
}

/// Demand or state update event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    info: EventInfo,
    params: ParameterSet,
}

impl SystemEvent {
    /// Create an empty event from its source, stamped now
    pub fn new(source: Prefix) -> Self {
        SystemEvent {
            info: EventInfo::new(source),
            params: ParameterSet::new(),
        }
    }

    /// Create an empty event with explicit metadata
    pub fn with_info(info: EventInfo) -> Self {
        SystemEvent {
            info,
            params: ParameterSet::new(),
        }
    }

    /// Get the metadata
    pub fn info(&self) -> &EventInfo {
        &self.info
    }

    /// Get the source prefix
    pub fn source(&self) -> &Prefix {
        self.info.source()
    }

    /// Get the subsystem owning the source
    pub fn subsystem(&self) -> Subsystem {
        self.info.source().subsystem()
    }

    /// Get the instant the event was raised
    pub fn event_time(&self) -> EventTime {
        self.info.event_time()
    }

    /// Get the observation id, if any
    pub fn obs_id(&self) -> Option<&ObsId> {
        self.info.obs_id()
    }

    /// Return a new event with `parameter` added, same metadata
    ///
    /// A member sharing the parameter's key is replaced; the receiver is
    /// untouched.
    pub fn add<T: ParamType>(&self, parameter: Parameter<T>) -> Self {
        SystemEvent {
            info: self.info.clone(),
            params: self.params.add(parameter),
        }
    }
}

impl ParameterSetLike for SystemEvent {
    fn param_set(&self) -> &ParameterSet {
        &self.params
    }
}

impl fmt::Display for SystemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemEvent[{}]{}", self.info.source(), self.params)
    }
}

/// Exposure progress event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserveEvent {
    info: EventInfo,
    params: ParameterSet,
}

impl ObserveEvent {
    /// Create an empty event from its source, stamped now
    pub fn new(source: Prefix) -> Self {
        ObserveEvent {
            info: EventInfo::new(source),
            params: ParameterSet::new(),
        }
    }

    /// Create an empty event with explicit metadata
    pub fn with_info(info: EventInfo) -> Self {
        ObserveEvent {
            info,
            params: ParameterSet::new(),
        }
    }

    /// Get the metadata
    pub fn info(&self) -> &EventInfo {
        &self.info
    }

    /// Get the source prefix
    pub fn source(&self) -> &Prefix {
        self.info.source()
    }

    /// Get the subsystem owning the source
    pub fn subsystem(&self) -> Subsystem {
        self.info.source().subsystem()
    }

    /// Get the instant the event was raised
    pub fn event_time(&self) -> EventTime {
        self.info.event_time()
    }

    /// Get the observation id, if any
    pub fn obs_id(&self) -> Option<&ObsId> {
        self.info.obs_id()
    }

    /// Return a new event with `parameter` added, same metadata
    pub fn add<T: ParamType>(&self, parameter: Parameter<T>) -> Self {
        ObserveEvent {
            info: self.info.clone(),
            params: self.params.add(parameter),
        }
    }
}

impl ParameterSetLike for ObserveEvent {
    fn param_set(&self) -> &ParameterSet {
        &self.params
    }
}

impl fmt::Display for ObserveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserveEvent[{}]{}", self.info.source(), self.params)
    }
}

/// Either event kind, for dispatch by pattern match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A [`SystemEvent`]
    System(SystemEvent),
    /// An [`ObserveEvent`]
    Observe(ObserveEvent),
}

impl Event {
    /// Get the metadata of either kind
    pub fn info(&self) -> &EventInfo {
        match self {
            Event::System(e) => e.info(),
            Event::Observe(e) => e.info(),
        }
    }

    /// Get the source prefix of either kind
    pub fn source(&self) -> &Prefix {
        self.info().source()
    }

    /// Get the instant the event was raised
    pub fn event_time(&self) -> EventTime {
        self.info().event_time()
    }
}

impl ParameterSetLike for Event {
    fn param_set(&self) -> &ParameterSet {
        match self {
            Event::System(e) => &e.params,
            Event::Observe(e) => &e.params,
        }
    }
}

impl From<SystemEvent> for Event {
    fn from(event: SystemEvent) -> Self {
        Event::System(event)
    }
}

impl From<ObserveEvent> for Event {
    fn from(event: ObserveEvent) -> Self {
        Event::Observe(event)
    }
}
