//! Route Control Logic
//!
//! Owns the selected route and turns route changes into relay pulses
//! and indicator updates.

pub mod controller;
pub mod indicator;
pub mod relay;

use embedded_hal::digital::ErrorType;

/// GPIO operation result, carrying the error of pin driver `P`
pub type PinResult<T, P> = Result<T, <P as ErrorType>::Error>;
