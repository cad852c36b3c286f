//! The closed registry of units a parameter may carry.
//!
//! A unit is an annotation on a [`Parameter`](crate::parameter::Parameter);
//! it does not affect key identity or lookup, only equality and rendering.
//! Parameters default to [`Units::NoUnits`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit tag attached to a parameter's value sequence
///
/// The registry name (returned by [`name`](Units::name)) is the unit symbol
/// used in diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    /// No unit annotation
    #[default]
    NoUnits,
    /// ångström (0.1 nm)
    Angstrom,
    /// minute of arc
    Arcmin,
    /// second of arc
    Arcsec,
    /// day
    Day,
    /// degree of arc
    Degree,
    /// electron volt
    ElectronVolt,
    /// gram
    Gram,
    /// hertz
    Hertz,
    /// hour
    Hour,
    /// joule
    Joule,
    /// kelvin
    Kelvin,
    /// kilogram
    Kilogram,
    /// kilometre
    Kilometer,
    /// litre
    Liter,
    /// metre
    Meter,
    /// micrometre
    Micrometer,
    /// microsecond
    Microsecond,
    /// milliarcsecond
    Milliarcsec,
    /// millimetre
    Millimeter,
    /// millisecond
    Millisecond,
    /// minute
    Minute,
    /// newton
    Newton,
    /// pascal
    Pascal,
    /// radian
    Radian,
    /// second
    Second,
    /// steradian
    Steradian,
    /// watt
    Watt,
    /// year
    Year,
}

impl Units {
    /// Every unit in the registry, in declaration order
    pub const ALL: [Units; 29] = [
        Units::NoUnits,
        Units::Angstrom,
        Units::Arcmin,
        Units::Arcsec,
        Units::Day,
        Units::Degree,
        Units::ElectronVolt,
        Units::Gram,
        Units::Hertz,
        Units::Hour,
        Units::Joule,
        Units::Kelvin,
        Units::Kilogram,
        Units::Kilometer,
        Units::Liter,
        Units::Meter,
        Units::Micrometer,
        Units::Microsecond,
        Units::Milliarcsec,
        Units::Millimeter,
        Units::Millisecond,
        Units::Minute,
        Units::Newton,
        Units::Pascal,
        Units::Radian,
        Units::Second,
        Units::Steradian,
        Units::Watt,
        Units::Year,
    ];

    /// Get the unit symbol
    pub fn name(&self) -> &'static str {
        match self {
            Units::NoUnits => "none",
            Units::Angstrom => "Angstrom",
            Units::Arcmin => "arcmin",
            Units::Arcsec => "arcsec",
            Units::Day => "d",
            Units::Degree => "deg",
            Units::ElectronVolt => "eV",
            Units::Gram => "g",
            Units::Hertz => "Hz",
            Units::Hour => "h",
            Units::Joule => "J",
            Units::Kelvin => "K",
            Units::Kilogram => "kg",
            Units::Kilometer => "km",
            Units::Liter => "l",
            Units::Meter => "m",
            Units::Micrometer => "um",
            Units::Microsecond => "us",
            Units::Milliarcsec => "mas",
            Units::Millimeter => "mm",
            Units::Millisecond => "ms",
            Units::Minute => "min",
            Units::Newton => "N",
            Units::Pascal => "Pa",
            Units::Radian => "rad",
            Units::Second => "s",
            Units::Steradian => "sr",
            Units::Watt => "W",
            Units::Year => "yr",
        }
    }

    /// Look up a unit by its symbol
    pub fn from_name(name: &str) -> Option<Self> {
        Units::ALL.iter().copied().find(|u| u.name() == name)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
