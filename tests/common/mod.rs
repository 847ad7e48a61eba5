//! Host-side mocks shared by the integration tests
//!
//! Output pins record every write into a shared log stamped with a virtual
//! clock. The mock delay advances that clock instantly, so timing can be
//! asserted without sleeping.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use route_switch::config::{pins, NUM_RELAY_PINS};
use route_switch::drivers::button::RouteButton;
use route_switch::protocol::CommandHandler;
use route_switch::routing::controller::RouteController;
use route_switch::routing::indicator::{ActivityIndicator, RouteIndicator};
use route_switch::routing::relay::RelayBank;
use route_switch::switch::RouteSwitch;

// ============================================================================
// Virtual Clock and Delay
// ============================================================================

/// Shared virtual time in microseconds
#[derive(Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn now_us(&self) -> u64 {
        self.0.get()
    }

    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1000
    }

    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }
}

/// Delay that advances the virtual clock and records each request
#[derive(Clone)]
pub struct MockDelay {
    clock: Clock,
    requests_ms: Rc<RefCell<Vec<u32>>>,
}

impl MockDelay {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            requests_ms: Rc::default(),
        }
    }

    pub fn requests_ms(&self) -> Vec<u32> {
        self.requests_ms.borrow().clone()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_us(u64::from(ns).div_ceil(1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.advance_us(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.requests_ms.borrow_mut().push(ms);
        self.clock.advance_ms(u64::from(ms));
    }
}

// ============================================================================
// Recording Output Pins
// ============================================================================

/// One write to an output pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinEvent {
    pub gpio: u8,
    pub high: bool,
    pub at_us: u64,
}

/// Shared write log for every mock output pin
#[derive(Clone, Default)]
pub struct PinLog(Rc<RefCell<Vec<PinEvent>>>);

impl PinLog {
    pub fn events(&self) -> Vec<PinEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Writes to one pin, in order
    pub fn events_for(&self, gpio: u8) -> Vec<PinEvent> {
        self.0.borrow().iter().filter(|e| e.gpio == gpio).copied().collect()
    }

    /// Last level written to a pin
    pub fn level(&self, gpio: u8) -> Option<bool> {
        self.0.borrow().iter().rev().find(|e| e.gpio == gpio).map(|e| e.high)
    }

    /// GPIOs that were driven high at least once
    pub fn raised(&self) -> Vec<u8> {
        let mut pins: Vec<u8> = self.0.borrow().iter().filter(|e| e.high).map(|e| e.gpio).collect();
        pins.sort_unstable();
        pins.dedup();
        pins
    }
}

/// GPIO write rejected by a faulted mock pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinFault {
    pub gpio: u8,
}

impl Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// GPIOs whose writes currently fail
#[derive(Clone, Default)]
pub struct PinFaults(Rc<RefCell<Vec<u8>>>);

impl PinFaults {
    pub fn fail(&self, gpio: u8) {
        self.0.borrow_mut().push(gpio);
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn contains(&self, gpio: u8) -> bool {
        self.0.borrow().contains(&gpio)
    }
}

/// Output pin that records writes into a [`PinLog`]
///
/// Writes to a faulted GPIO fail and are not recorded.
pub struct MockPin {
    gpio: u8,
    log: PinLog,
    clock: Clock,
    faults: PinFaults,
}

impl MockPin {
    pub fn new(gpio: u8, log: &PinLog, clock: &Clock, faults: &PinFaults) -> Self {
        Self {
            gpio,
            log: log.clone(),
            clock: clock.clone(),
            faults: faults.clone(),
        }
    }

    fn record(&mut self, high: bool) -> Result<(), PinFault> {
        if self.faults.contains(self.gpio) {
            return Err(PinFault { gpio: self.gpio });
        }
        self.log.0.borrow_mut().push(PinEvent {
            gpio: self.gpio,
            high,
            at_us: self.clock.now_us(),
        });
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = PinFault;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

// ============================================================================
// Scripted Button
// ============================================================================

/// Button held down during scripted virtual-time windows `[start, end)`
#[derive(Clone)]
pub struct ScriptedButton {
    clock: Clock,
    presses_ms: Rc<RefCell<Vec<(u64, u64)>>>,
}

impl ScriptedButton {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            presses_ms: Rc::default(),
        }
    }

    /// Hold the button from `start_ms` for `duration_ms`
    pub fn press(&self, start_ms: u64, duration_ms: u64) {
        self.presses_ms.borrow_mut().push((start_ms, start_ms + duration_ms));
    }

    fn is_down(&self) -> bool {
        let now = self.clock.now_ms();
        self.presses_ms
            .borrow()
            .iter()
            .any(|&(start, end)| now >= start && now < end)
    }
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_down())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_down())
    }
}

// ============================================================================
// Serial Port
// ============================================================================

/// Serial write failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerialError;

impl embedded_io::Error for SerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::NotConnected
    }
}

/// Host side of the serial channel
#[derive(Default)]
pub struct MockSerial {
    pub written: Vec<u8>,
    pub flushed: Vec<u8>,
    pub flush_count: usize,
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes delivered to the host by the last flush
    pub fn take_flushed(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.flushed)
    }
}

impl embedded_io_async::ErrorType for MockSerial {
    type Error = SerialError;
}

impl embedded_io_async::Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(SerialError);
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(SerialError);
        }
        self.flushed.append(&mut self.written);
        self.flush_count += 1;
        Ok(())
    }
}

// ============================================================================
// Test Rig
// ============================================================================

pub type MockController = RouteController<MockPin, MockDelay>;
pub type MockSwitch = RouteSwitch<MockPin, ScriptedButton, MockDelay>;

/// Mock board: shared clock, pin log, pin faults, button script and relay delay
pub struct Rig {
    pub clock: Clock,
    pub log: PinLog,
    pub faults: PinFaults,
    pub button: ScriptedButton,
    pub delay: MockDelay,
}

impl Rig {
    pub fn new() -> Self {
        let clock = Clock::default();
        Self {
            log: PinLog::default(),
            faults: PinFaults::default(),
            button: ScriptedButton::new(&clock),
            delay: MockDelay::new(&clock),
            clock,
        }
    }

    pub fn pin(&self, gpio: u8) -> MockPin {
        MockPin::new(gpio, &self.log, &self.clock, &self.faults)
    }

    pub fn relay_bank(&self) -> RelayBank<MockPin> {
        let pins: [MockPin; NUM_RELAY_PINS] = core::array::from_fn(|n| self.pin(n as u8));
        RelayBank::new(pins).unwrap()
    }

    pub fn route_indicator(&self) -> RouteIndicator<MockPin> {
        RouteIndicator::new(pins::ROUTE_LEDS.map(|pin| self.pin(pin.gpio()))).unwrap()
    }

    pub fn activity(&self) -> ActivityIndicator<MockPin> {
        ActivityIndicator::new(self.pin(pins::ACTIVITY_LED.gpio())).unwrap()
    }

    /// Controller with all outputs initialized, before `start`
    pub fn controller(&self) -> MockController {
        RouteController::new(self.relay_bank(), self.route_indicator(), self.delay.clone())
    }

    /// Fully assembled switch, before `start`
    pub fn switch(&self) -> MockSwitch {
        RouteSwitch::new(
            self.controller(),
            RouteButton::new(self.button.clone(), MockDelay::new(&self.clock)),
            CommandHandler::new(self.activity()),
        )
    }

    /// Current level of an indicator pin (`false` = lit)
    pub fn led_level(&self, route: usize) -> Option<bool> {
        self.log.level(pins::ROUTE_LEDS[route].gpio())
    }

    pub fn activity_level(&self) -> Option<bool> {
        self.log.level(pins::ACTIVITY_LED.gpio())
    }
}

/// Drive a future to completion on the test thread
pub fn run<F: core::future::Future>(future: F) -> F::Output {
    embassy_futures::block_on(future)
}
