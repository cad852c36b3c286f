//! Source prefixes and the subsystem registry.
//!
//! A [`Prefix`] is the dotted-path identifier of the component a payload
//! originates from, e.g. `"wfos.red.detector"`. The first segment names the
//! owning [`Subsystem`]; the rest is the component path within it.
//!
//! ## Validation
//!
//! Prefixes must:
//! - Be non-empty
//! - Consist of non-empty segments separated by single dots
//! - Use only alphanumeric, dash, and underscore characters within segments
//!
//! Subsystem resolution is deliberately lenient: a first segment that does
//! not name a registered subsystem resolves to [`Subsystem::BAD`] rather
//! than failing, so payloads from unregistered sources still flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The closed registry of observatory subsystems
///
/// Each variant's registry name is its uppercase acronym; prefix segments
/// resolve case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    /// AO executive software
    AOESW,
    /// Alignment and phasing system
    APS,
    /// Communications and information systems
    CIS,
    /// Optical cleaning systems
    CLN,
    /// Instrumentation cryogenic cooling system
    CRYO,
    /// Common software
    CSW,
    /// Data management system
    DMS,
    /// Data processing system
    DPS,
    /// Engineering sensor system
    ESEN,
    /// Executive software system
    ESW,
    /// Facility management control system
    FMCS,
    /// Global metrology system controls
    GMS,
    /// Infrared imaging spectrometer
    IRIS,
    /// Laser guide star facility
    LGSF,
    /// Primary mirror control system
    M1CS,
    /// Diffraction-limited high-resolution infrared spectrograph
    MODHIS,
    /// Narrow field infrared AO system
    NFIRAOS,
    /// Science calibration unit
    NSCU,
    /// Observatory safety system
    OSS,
    /// Prime focus camera controls
    PFCS,
    /// AO PSF reconstructor
    PSFR,
    /// Refrigeration control system
    REFR,
    /// Real-time controller
    RTC,
    /// AO reconstructor parameter generator
    RPG,
    /// Site conditions monitoring system
    SCMS,
    /// Science operations support system
    SOSS,
    /// Telescope control system
    TCS,
    /// Wide field optical spectrograph
    WFOS,
    /// Unregistered or test subsystem
    BAD,
}

impl Subsystem {
    /// Every subsystem in the registry, in declaration order
    pub const ALL: [Subsystem; 29] = [
        Subsystem::AOESW,
        Subsystem::APS,
        Subsystem::CIS,
        Subsystem::CLN,
        Subsystem::CRYO,
        Subsystem::CSW,
        Subsystem::DMS,
        Subsystem::DPS,
        Subsystem::ESEN,
        Subsystem::ESW,
        Subsystem::FMCS,
        Subsystem::GMS,
        Subsystem::IRIS,
        Subsystem::LGSF,
        Subsystem::M1CS,
        Subsystem::MODHIS,
        Subsystem::NFIRAOS,
        Subsystem::NSCU,
        Subsystem::OSS,
        Subsystem::PFCS,
        Subsystem::PSFR,
        Subsystem::REFR,
        Subsystem::RTC,
        Subsystem::RPG,
        Subsystem::SCMS,
        Subsystem::SOSS,
        Subsystem::TCS,
        Subsystem::WFOS,
        Subsystem::BAD,
    ];

    /// Get the registry name (uppercase acronym)
    pub fn name(&self) -> &'static str {
        match self {
            Subsystem::AOESW => "AOESW",
            Subsystem::APS => "APS",
            Subsystem::CIS => "CIS",
            Subsystem::CLN => "CLN",
            Subsystem::CRYO => "CRYO",
            Subsystem::CSW => "CSW",
            Subsystem::DMS => "DMS",
            Subsystem::DPS => "DPS",
            Subsystem::ESEN => "ESEN",
            Subsystem::ESW => "ESW",
            Subsystem::FMCS => "FMCS",
            Subsystem::GMS => "GMS",
            Subsystem::IRIS => "IRIS",
            Subsystem::LGSF => "LGSF",
            Subsystem::M1CS => "M1CS",
            Subsystem::MODHIS => "MODHIS",
            Subsystem::NFIRAOS => "NFIRAOS",
            Subsystem::NSCU => "NSCU",
            Subsystem::OSS => "OSS",
            Subsystem::PFCS => "PFCS",
            Subsystem::PSFR => "PSFR",
            Subsystem::REFR => "REFR",
            Subsystem::RTC => "RTC",
            Subsystem::RPG => "RPG",
            Subsystem::SCMS => "SCMS",
            Subsystem::SOSS => "SOSS",
            Subsystem::TCS => "TCS",
            Subsystem::WFOS => "WFOS",
            Subsystem::BAD => "BAD",
        }
    }

    /// Look up a subsystem by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        Subsystem::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error when validating a source prefix
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrefixError {
    /// Prefix is empty
    #[error("prefix cannot be empty")]
    Empty,
    /// Prefix has an empty segment (leading, trailing, or doubled dot)
    #[error("prefix has an empty segment at position {position}")]
    EmptySegment {
        /// Zero-based index of the empty segment
        position: usize,
    },
    /// Prefix contains a character outside `[A-Za-z0-9_-]` and `.`
    #[error("invalid character '{char}' in prefix (segments use alphanumeric, dash, underscore)")]
    InvalidChar {
        /// The offending character
        char: char,
    },
}

/// Validated dotted-path source identifier
///
/// Immutable after construction; payload variants carry it by value and
/// never rebind it.
///
/// ```
/// use obs_params::{Prefix, Subsystem};
///
/// let prefix = Prefix::new("wfos.red.detector").unwrap();
/// assert_eq!(prefix.subsystem(), Subsystem::WFOS);
/// assert_eq!(prefix.as_str(), "wfos.red.detector");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prefix(String);

impl Prefix {
    /// Create a prefix, validating the input
    ///
    /// # Errors
    ///
    /// Returns `PrefixError` if the string is empty, has an empty segment,
    /// or contains a character outside the allowed set.
    pub fn new(value: impl Into<String>) -> Result<Self, PrefixError> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Prefix(value))
    }

    /// Validate a prefix string
    pub fn validate(value: &str) -> Result<(), PrefixError> {
        if value.is_empty() {
            return Err(PrefixError::Empty);
        }
        for (position, segment) in value.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PrefixError::EmptySegment { position });
            }
            for ch in segment.chars() {
                if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
                    return Err(PrefixError::InvalidChar { char: ch });
                }
            }
        }
        Ok(())
    }

    /// Get the full dotted path
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the owning subsystem from the first segment
    ///
    /// Unregistered first segments resolve to [`Subsystem::BAD`].
    pub fn subsystem(&self) -> Subsystem {
        let head = self.0.split('.').next().unwrap_or("");
        Subsystem::from_name(head).unwrap_or(Subsystem::BAD)
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Prefix {
    type Error = PrefixError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Prefix::new(value)
    }
}

impl TryFrom<String> for Prefix {
    type Error = PrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Prefix::new(value)
    }
}
