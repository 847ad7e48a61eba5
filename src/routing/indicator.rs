//! LED Indicators
//!
//! Route LEDs mirror the selected route; the activity LED marks command
//! processing. All indicators are active low.

use embedded_hal::digital::OutputPin;

use super::PinResult;
use crate::config::NUM_ROUTES;
use crate::types::{LedState, Route};

fn drive<P: OutputPin>(pin: &mut P, state: LedState) -> PinResult<(), P> {
    if state.pin_high() {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

/// One LED per route; exactly one is lit once a route has been shown
pub struct RouteIndicator<P> {
    leds: [P; NUM_ROUTES],
    lit: Option<Route>,
}

impl<P: OutputPin> RouteIndicator<P> {
    /// Create the indicator with all LEDs off
    pub fn new(leds: [P; NUM_ROUTES]) -> PinResult<Self, P> {
        let mut indicator = Self { leds, lit: None };
        for led in &mut indicator.leds {
            drive(led, LedState::Off)?;
        }
        Ok(indicator)
    }

    /// Light the LED for `route` and turn the others off
    pub fn show(&mut self, route: Route) -> PinResult<(), P> {
        for (i, led) in self.leds.iter_mut().enumerate() {
            drive(led, LedState::from_bool(i == route.as_usize()))?;
        }
        self.lit = Some(route);
        Ok(())
    }

    /// Route currently lit, if any
    #[must_use]
    pub const fn lit(&self) -> Option<Route> {
        self.lit
    }
}

/// Command activity LED
pub struct ActivityIndicator<P> {
    pin: P,
    state: LedState,
}

impl<P: OutputPin> ActivityIndicator<P> {
    /// Create the indicator (initially off)
    pub fn new(mut pin: P) -> PinResult<Self, P> {
        drive(&mut pin, LedState::Off)?;
        Ok(Self {
            pin,
            state: LedState::Off,
        })
    }

    /// Turn the LED on
    pub fn set_active(&mut self) -> PinResult<(), P> {
        drive(&mut self.pin, LedState::On)?;
        self.state = LedState::On;
        Ok(())
    }

    /// Turn the LED off
    pub fn set_idle(&mut self) -> PinResult<(), P> {
        drive(&mut self.pin, LedState::Off)?;
        self.state = LedState::Off;
        Ok(())
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }
}
