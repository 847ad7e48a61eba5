//! RF Route Switch Firmware Library
//!
//! This library provides the core functionality for an RP2040-based
//! 4-position RF route switch. Five double-pole latching relays are pulsed
//! into one of four fixed routes, selected from a front-panel button or
//! over a USB CDC serial link.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Route Switch  │  Command Protocol  │  Button Debouncer      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     ROUTING LAYER                            │
//! │  Route Controller  │  Relay Pulse Driver  │  LED Indicators  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  GPIO  │  USB CDC ACM                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single owner**: the selected route lives in one `RouteController`
//! - **Type-driven design**: `Route` cannot hold an out-of-range value
//! - **No unsafe in application code**: hardware access goes through embassy-rp
//! - **Functional core, imperative shell**: routing logic is generic over
//!   `embedded-hal` traits and tested on the host
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_rp;
#[cfg(feature = "embedded")]
pub use embassy_time;
#[cfg(feature = "embedded")]
pub use embassy_usb;

/// Hardware Abstraction Layer
///
/// Board pin bring-up for the RP2040.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// Front-panel button debouncing.
pub mod drivers;

/// Route Control Logic
///
/// Route ownership, relay pulsing, indicator LEDs.
pub mod routing;

/// Route Switch Application
///
/// Wires the button and serial commands to the route controller.
pub mod switch;

/// USB Subsystem
///
/// CDC ACM for the route command channel.
#[cfg(feature = "embedded")]
pub mod usb;

/// Communication Protocols
///
/// Single-byte route command parser and responses.
pub mod protocol;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Route switch
    pub use crate::drivers::button::RouteButton;
    pub use crate::protocol::CommandHandler;
    pub use crate::routing::controller::RouteController;
    pub use crate::routing::indicator::{ActivityIndicator, RouteIndicator};
    pub use crate::routing::relay::RelayBank;
    pub use crate::switch::RouteSwitch;

    // Embassy
    pub use embassy_time::{Delay, Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
