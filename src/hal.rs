//! Hardware Abstraction Layer
//!
//! Provides the RP2040 pin bring-up for the route switch.
//! This module isolates chip-specific code; everything above it works
//! on `embedded-hal` traits.

pub mod gpio;
