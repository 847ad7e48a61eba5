//! GPIO Abstractions
//!
//! Pin bring-up for the route switch board.
//! Gives each pin its electrical role before the routing layer takes it.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peripheral;

use crate::config::{NUM_RELAY_PINS, NUM_ROUTES, RELAY_PAIRS};

/// Relay coil drive output, initially low (coil off)
pub fn relay_output(pin: impl Peripheral<P = impl Pin> + 'static) -> Output<'static> {
    Output::new(pin, Level::Low)
}

/// Active-low indicator output, initially high (LED off)
pub fn indicator_output(pin: impl Peripheral<P = impl Pin> + 'static) -> Output<'static> {
    Output::new(pin, Level::High)
}

/// Push-button input, active low with internal pull-up
pub fn button_input(pin: impl Peripheral<P = impl Pin> + 'static) -> Input<'static> {
    Input::new(pin, Pull::Up)
}

/// Board pins, grouped by role
pub struct BoardPins {
    /// Relay coil outputs, `relays[n]` drives GPIO `n`
    pub relays: [Output<'static>; NUM_RELAY_PINS],
    /// Route indicator LEDs, indexed by route
    pub route_leds: [Output<'static>; NUM_ROUTES],
    /// Command activity LED
    pub activity_led: Output<'static>,
    /// Route advance button
    pub button: Input<'static>,
}

impl BoardPins {
    /// Log the relay wiring at start-up
    pub fn log_wiring(&self) {
        for (n, pair) in RELAY_PAIRS.iter().enumerate() {
            defmt::debug!("Relay {}: A={} B={}", n, pair.a, pair.b);
        }
    }
}

/// Claim the board pins from the RP2040 peripherals
///
/// Relays sit on GPIO 0..=9, route LEDs on GPIO 10..=13, the activity LED
/// on GPIO 14 and the button on GPIO 15 (see [`crate::config`]).
#[macro_export]
macro_rules! board_pins {
    ($p:expr) => {
        $crate::hal::gpio::BoardPins {
            relays: [
                $crate::hal::gpio::relay_output($p.PIN_0),
                $crate::hal::gpio::relay_output($p.PIN_1),
                $crate::hal::gpio::relay_output($p.PIN_2),
                $crate::hal::gpio::relay_output($p.PIN_3),
                $crate::hal::gpio::relay_output($p.PIN_4),
                $crate::hal::gpio::relay_output($p.PIN_5),
                $crate::hal::gpio::relay_output($p.PIN_6),
                $crate::hal::gpio::relay_output($p.PIN_7),
                $crate::hal::gpio::relay_output($p.PIN_8),
                $crate::hal::gpio::relay_output($p.PIN_9),
            ],
            route_leds: [
                $crate::hal::gpio::indicator_output($p.PIN_10),
                $crate::hal::gpio::indicator_output($p.PIN_11),
                $crate::hal::gpio::indicator_output($p.PIN_12),
                $crate::hal::gpio::indicator_output($p.PIN_13),
            ],
            activity_led: $crate::hal::gpio::indicator_output($p.PIN_14),
            button: $crate::hal::gpio::button_input($p.PIN_15),
        }
    };
}
