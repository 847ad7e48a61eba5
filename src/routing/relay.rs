//! Relay Pulse Driver
//!
//! Drives the latching relay coils. Coils are pulsed, never held: a route
//! change energizes its pins for a fixed width and then drops them again.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use super::PinResult;
use crate::config::{NUM_RELAY_PINS, PINS_PER_ROUTE};
use crate::types::PinId;

/// Coil pins a route energizes
pub type PulseGroup = [PinId; PINS_PER_ROUTE];

/// Bank of relay coil outputs, indexed by GPIO number
pub struct RelayBank<P> {
    pins: [P; NUM_RELAY_PINS],
}

impl<P: OutputPin> RelayBank<P> {
    /// Create the bank and drive every coil pin low
    ///
    /// `pins[n]` must be the output for GPIO `n`.
    pub fn new(pins: [P; NUM_RELAY_PINS]) -> PinResult<Self, P> {
        let mut bank = Self { pins };
        for pin in &mut bank.pins {
            pin.set_low()?;
        }
        Ok(bank)
    }

    /// Pulse a group of coil pins high for `width_ms`, then low
    ///
    /// If raising a pin fails, the pins raised so far are dropped again
    /// before the error is returned. Every pin must belong to the bank;
    /// debug builds panic on any other pin, release builds skip it.
    pub async fn pulse<D: DelayNs>(
        &mut self,
        group: &PulseGroup,
        delay: &mut D,
        width_ms: u32,
    ) -> PinResult<(), P> {
        for (raised, pin) in group.iter().enumerate() {
            if let Err(e) = self.drive(*pin, true) {
                let _ = self.release(&group[..raised]);
                return Err(e);
            }
        }

        delay.delay_ms(width_ms).await;

        self.release(group)
    }

    /// Drive every pin of `group` low
    pub fn release(&mut self, group: &[PinId]) -> PinResult<(), P> {
        for pin in group {
            self.drive(*pin, false)?;
        }
        Ok(())
    }

    fn drive(&mut self, pin: PinId, high: bool) -> PinResult<(), P> {
        debug_assert!(pin.index() < NUM_RELAY_PINS, "GPIO {} is not a relay pin", pin.gpio());
        let Some(output) = self.pins.get_mut(pin.index()) else {
            return Ok(());
        };
        if high {
            output.set_high()
        } else {
            output.set_low()
        }
    }
}
