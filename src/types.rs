//! Shared types used across the route switch firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::NUM_ROUTES;

/// One of the four fixed relay routes
///
/// Always holds a value in `0..=3`; there is no "no route" value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Route(u8);

impl Route {
    /// Route 0, selected at power-up
    pub const FIRST: Self = Self(0);

    /// Highest valid route index
    pub const MAX_INDEX: u8 = NUM_ROUTES as u8 - 1;

    /// All routes in table order
    pub const ALL: [Self; NUM_ROUTES] = [Self(0), Self(1), Self(2), Self(3)];

    /// Create a route from its zero-based index, returns None if out of range
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index <= Self::MAX_INDEX {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Parse the ASCII route digit used on the wire (`'1'`..=`'4'`)
    #[must_use]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'1'..=b'4' => Some(Self(byte - b'1')),
            _ => None,
        }
    }

    /// Get the zero-based index
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Get the zero-based index for table lookups
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// ASCII digit reported to the host (`'1'`..=`'4'`)
    #[must_use]
    pub const fn as_ascii(self) -> u8 {
        b'1' + self.0
    }

    /// Next route, wrapping from the last back to the first
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % NUM_ROUTES as u8)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Route({})", self.0)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route {}", self.0 + 1)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Route {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "route {}", self.0 + 1);
    }
}

/// GPIO pin identifier (RP2040 bank 0 GPIO number)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(u8);

impl PinId {
    /// Create a pin identifier from its GPIO number
    #[must_use]
    pub const fn new(gpio: u8) -> Self {
        Self(gpio)
    }

    /// Get the GPIO number
    #[must_use]
    pub const fn gpio(self) -> u8 {
        self.0
    }

    /// Get the GPIO number for table lookups
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PinId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "GPIO{}", self.0);
    }
}

/// Coil pins of one double-pole latching relay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayPair {
    /// Set coil
    pub a: PinId,
    /// Reset coil
    pub b: PinId,
}

impl RelayPair {
    /// Create a relay pair from its two coil pins
    #[must_use]
    pub const fn new(a: PinId, b: PinId) -> Self {
        Self { a, b }
    }

    /// Both pins, A first
    #[must_use]
    pub const fn pins(self) -> [PinId; 2] {
        [self.a, self.b]
    }
}

/// Logic level of an active-low indicator output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off (pin high)
    #[default]
    Off,
    /// LED is on (pin low)
    On,
}

impl LedState {
    /// LED state for a boolean condition
    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Pin level that produces this state on an active-low output
    #[must_use]
    pub const fn pin_high(self) -> bool {
        matches!(self, Self::Off)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}
