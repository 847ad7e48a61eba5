//! Route Button Driver
//!
//! Polled push-button with settle-and-reconfirm debouncing.
//! Reports exactly one press per physical press-and-release cycle.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::BUTTON_DEBOUNCE_MS;

/// Debouncer state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Button is up; the next pressed sample starts a debounce
    #[default]
    Released,
    /// Pressed sample seen, waiting out the settle window
    PressedDebouncing,
    /// Press confirmed; waiting for release
    Held,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released => defmt::write!(f, "Released"),
            Self::PressedDebouncing => defmt::write!(f, "Debouncing"),
            Self::Held => defmt::write!(f, "Held"),
        }
    }
}

/// Route advance push button (active low with pull-up)
pub struct RouteButton<I, D> {
    pin: I,
    delay: D,
    state: ButtonState,
}

impl<I, D> RouteButton<I, D>
where
    I: InputPin,
    D: DelayNs,
{
    /// Create a button driver in the released state
    pub fn new(pin: I, delay: D) -> Self {
        Self {
            pin,
            delay,
            state: ButtonState::Released,
        }
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Sample the raw input (pressed reads low)
    pub fn is_pressed(&mut self) -> Result<bool, I::Error> {
        self.pin.is_low()
    }

    /// Sample the button once; call every pass of the control loop
    ///
    /// Returns `true` when a press has just been confirmed. A pressed
    /// sample blocks for the debounce window before re-sampling.
    pub async fn poll(&mut self) -> Result<bool, I::Error> {
        match self.state {
            ButtonState::Released => {
                if !self.is_pressed()? {
                    return Ok(false);
                }
                self.state = ButtonState::PressedDebouncing;
                self.delay.delay_ms(BUTTON_DEBOUNCE_MS).await;
                self.confirm()
            }
            // Only reachable if a previous poll was dropped mid-window
            ButtonState::PressedDebouncing => self.confirm(),
            ButtonState::Held => {
                if !self.is_pressed()? {
                    self.state = ButtonState::Released;
                }
                Ok(false)
            }
        }
    }

    fn confirm(&mut self) -> Result<bool, I::Error> {
        if self.is_pressed()? {
            self.state = ButtonState::Held;
            Ok(true)
        } else {
            #[cfg(feature = "embedded")]
            defmt::trace!("Button bounce discarded");
            self.state = ButtonState::Released;
            Ok(false)
        }
    }
}
