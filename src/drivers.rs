//! Peripheral Drivers
//!
//! Input drivers for the front panel.
//! These provide domain-specific abstractions over the HAL traits.

pub mod button;
