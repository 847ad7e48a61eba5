//! Route Controller
//!
//! The single owner of the selected route. Every route change goes through
//! [`RouteController::set_route`] (or its typed forms). The new route is
//! recorded as soon as its relays have latched, then the route LEDs follow,
//! so the stored route always matches the relays.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use super::indicator::RouteIndicator;
use super::relay::RelayBank;
use super::PinResult;
use crate::config::{DEFAULT_ROUTE, RELAY_PULSE_MS, ROUTE_TABLE};
use crate::types::Route;

/// Selected route plus the hardware that materializes it
pub struct RouteController<P, D> {
    relays: RelayBank<P>,
    indicator: RouteIndicator<P>,
    delay: D,
    route: Route,
}

impl<P, D> RouteController<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a controller holding the power-up route
    ///
    /// No relay is pulsed until [`start`](Self::start) runs.
    pub fn new(relays: RelayBank<P>, indicator: RouteIndicator<P>, delay: D) -> Self {
        Self {
            relays,
            indicator,
            delay,
            route: DEFAULT_ROUTE,
        }
    }

    /// Drive the hardware to the power-up route
    pub async fn start(&mut self) -> PinResult<Route, P> {
        self.apply(DEFAULT_ROUTE).await?;
        Ok(self.route)
    }

    /// Get the selected route
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Select a route by zero-based index
    ///
    /// Indices outside `0..=3` are ignored: no pin changes and the stored
    /// route is kept. Returns the route applied, if any.
    pub async fn set_route(&mut self, index: u8) -> PinResult<Option<Route>, P> {
        match Route::from_index(index) {
            Some(route) => {
                self.apply(route).await?;
                Ok(Some(route))
            }
            None => {
                #[cfg(feature = "embedded")]
                defmt::debug!("Ignoring out-of-range route index {}", index);
                Ok(None)
            }
        }
    }

    /// Pulse the relays for `route`, then update the indicators
    ///
    /// Pulses even when `route` is already selected. A failed pulse keeps
    /// the previous route; a failed LED update does not.
    pub async fn apply(&mut self, route: Route) -> PinResult<(), P> {
        self.relays
            .pulse(&ROUTE_TABLE[route.as_usize()], &mut self.delay, RELAY_PULSE_MS)
            .await?;
        self.route = route;

        #[cfg(feature = "embedded")]
        defmt::info!("Selected {}", route);

        self.indicator.show(route)
    }

    /// Step to the next route, wrapping after the last
    pub async fn advance(&mut self) -> PinResult<Route, P> {
        let next = self.route.next();
        self.apply(next).await?;
        Ok(next)
    }

    /// Route currently shown on the indicators
    #[must_use]
    pub const fn indicated(&self) -> Option<Route> {
        self.indicator.lit()
    }
}
