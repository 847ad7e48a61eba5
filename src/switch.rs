//! Route Switch Application
//!
//! Ties the button and the serial command handler to the route controller.
//! The switch is driven from a single control loop, so a route change always
//! finishes before the next one can start.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Write;

use crate::drivers::button::RouteButton;
use crate::protocol::{Command, CommandError, CommandHandler};
use crate::routing::controller::RouteController;
use crate::routing::PinResult;
use crate::types::Route;

/// Button servicing failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonError<I, P> {
    /// Button input could not be read
    Input(I),
    /// Route change failed on a GPIO write
    Pin(P),
}

#[cfg(feature = "embedded")]
impl<I, P> defmt::Format for ButtonError<I, P> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Input(_) => defmt::write!(f, "button read error"),
            Self::Pin(_) => defmt::write!(f, "GPIO error"),
        }
    }
}

/// The complete route switch: controller, button and command handler
pub struct RouteSwitch<P, I, D> {
    controller: RouteController<P, D>,
    button: RouteButton<I, D>,
    commands: CommandHandler<P>,
}

impl<P, I, D> RouteSwitch<P, I, D>
where
    P: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    /// Assemble the switch
    pub fn new(
        controller: RouteController<P, D>,
        button: RouteButton<I, D>,
        commands: CommandHandler<P>,
    ) -> Self {
        Self {
            controller,
            button,
            commands,
        }
    }

    /// Drive the hardware to the power-up route
    pub async fn start(&mut self) -> PinResult<Route, P> {
        self.controller.start().await
    }

    /// Get the selected route
    #[must_use]
    pub const fn route(&self) -> Route {
        self.controller.route()
    }

    /// Route controller, for inspection
    #[must_use]
    pub const fn controller(&self) -> &RouteController<P, D> {
        &self.controller
    }

    /// Button driver, for inspection
    #[must_use]
    pub const fn button(&self) -> &RouteButton<I, D> {
        &self.button
    }

    /// Command handler, for inspection
    #[must_use]
    pub const fn commands(&self) -> &CommandHandler<P> {
        &self.commands
    }

    /// Sample the button and advance the route on a confirmed press
    ///
    /// Returns the new route when the press advanced it.
    pub async fn poll_button(&mut self) -> Result<Option<Route>, ButtonError<I::Error, P::Error>> {
        if !self.button.poll().await.map_err(ButtonError::Input)? {
            return Ok(None);
        }
        let route = self.controller.advance().await.map_err(ButtonError::Pin)?;
        Ok(Some(route))
    }

    /// Handle one packet received on CDC interface `interface`
    pub async fn on_packet<W: Write>(
        &mut self,
        interface: u8,
        packet: &[u8],
        out: &mut W,
    ) -> Result<Option<Command>, CommandError<P::Error, W::Error>> {
        self.commands
            .handle(&mut self.controller, interface, packet, out)
            .await
    }
}
