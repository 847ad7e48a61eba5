//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the route switch hardware.
//! All pin mappings, timing windows, and USB parameters are centralized here.

use crate::types::{PinId, RelayPair, Route};

/// Number of selectable routes
pub const NUM_ROUTES: usize = 4;

/// Number of relay pins energized per route
pub const PINS_PER_ROUTE: usize = 4;

/// Number of double-pole relays on the board
pub const NUM_RELAYS: usize = 5;

/// Number of relay coil drive pins (two per relay)
pub const NUM_RELAY_PINS: usize = NUM_RELAYS * 2;

/// Relay coil pulse width in milliseconds
///
/// Latching relays only need the coil energized long enough to flip;
/// the pins are driven low again afterwards.
pub const RELAY_PULSE_MS: u32 = 10;

/// Button debounce settle window in milliseconds
pub const BUTTON_DEBOUNCE_MS: u32 = 20;

/// Interval between button samples in the control loop
pub const BUTTON_POLL_MS: u64 = 10;

/// Route selected at power-up
pub const DEFAULT_ROUTE: Route = Route::FIRST;

/// CDC receive buffer size (matches the full-speed bulk packet size)
pub const CDC_RX_BUFFER_SIZE: usize = 64;

/// USB CDC ACM packet size
pub const USB_CDC_PACKET_SIZE: u16 = 64;

/// Longest wait for the host to accept one response packet
pub const CDC_WRITE_TIMEOUT_MS: u64 = 100;

/// CDC interface index carrying route commands
pub const CONTROL_INTERFACE: u8 = 0;

/// USB VID (use test VID for development)
pub const USB_VID: u16 = 0x1209;

/// USB PID (get from pid.codes for production)
pub const USB_PID: u16 = 0x0001;

/// USB bus power draw in mA
pub const USB_MAX_POWER_MA: u16 = 100;

/// Relay coil pin pairs (A, B), one per double-pole relay
pub const RELAY_PAIRS: [RelayPair; NUM_RELAYS] = [
    RelayPair::new(PinId::new(5), PinId::new(4)),
    RelayPair::new(PinId::new(1), PinId::new(0)),
    RelayPair::new(PinId::new(3), PinId::new(2)),
    RelayPair::new(PinId::new(9), PinId::new(8)),
    RelayPair::new(PinId::new(7), PinId::new(6)),
];

/// Pins pulsed for each route
///
/// Relay coil sides per route, relays ordered as in [`RELAY_PAIRS`]
/// (A = set coil, B = reset coil, X = untouched):
///
/// ```text
/// route 0:  A  X  A  A  A
/// route 1:  B  X  B  A  A
/// route 2:  X  A  A  B  B
/// route 3:  X  B  B  B  B
/// ```
pub const ROUTE_TABLE: [[PinId; PINS_PER_ROUTE]; NUM_ROUTES] = [
    [PinId::new(5), PinId::new(3), PinId::new(9), PinId::new(7)],
    [PinId::new(4), PinId::new(2), PinId::new(9), PinId::new(7)],
    [PinId::new(1), PinId::new(3), PinId::new(8), PinId::new(6)],
    [PinId::new(0), PinId::new(2), PinId::new(8), PinId::new(6)],
];

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    use crate::types::PinId;

    /// Route indicator LEDs, active low, indexed by route
    pub const ROUTE_LEDS: [PinId; super::NUM_ROUTES] =
        [PinId::new(10), PinId::new(11), PinId::new(12), PinId::new(13)];

    /// Command activity LED, active low
    pub const ACTIVITY_LED: PinId = PinId::new(14);

    /// Route advance push button (active low, internal pull-up)
    pub const BUTTON: PinId = PinId::new(15);
}

/// USB descriptor strings
pub mod usb_strings {
    //! Strings reported in the USB device descriptor

    /// Manufacturer name
    pub const MANUFACTURER: &str = "Route Switch Project";

    /// Product name
    pub const PRODUCT: &str = "RF Route Switch";

    /// Serial number
    pub const SERIAL: &str = "0001";
}

/// Check whether `pin` is driven by one of the relay pairs
#[must_use]
pub const fn is_relay_pin(pin: PinId) -> bool {
    let mut i = 0;
    while i < NUM_RELAYS {
        if RELAY_PAIRS[i].a.index() == pin.index() || RELAY_PAIRS[i].b.index() == pin.index() {
            return true;
        }
        i += 1;
    }
    false
}

/// Check that every route only references relay pins
#[must_use]
pub const fn route_table_is_valid() -> bool {
    let mut r = 0;
    while r < NUM_ROUTES {
        let mut p = 0;
        while p < PINS_PER_ROUTE {
            let pin = ROUTE_TABLE[r][p];
            if pin.index() >= NUM_RELAY_PINS || !is_relay_pin(pin) {
                return false;
            }
            p += 1;
        }
        r += 1;
    }
    true
}

const _: () = assert!(route_table_is_valid(), "route table references a non-relay pin");
