//! Communication Protocols
//!
//! Single-byte route command parsing and handling.
//!
//! Each received packet carries one command in its first byte:
//!
//! | Byte          | Command          | Response                 |
//! |---------------|------------------|--------------------------|
//! | `0`           | query route      | one byte, `1`..`4`       |
//! | `1`..`4`      | select route     | `OK\r\n`                 |
//! | anything else | rejected         | `Invalid Command\r\n`    |

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Write;

use crate::config::{CDC_RX_BUFFER_SIZE, CONTROL_INTERFACE, NUM_ROUTES};
use crate::routing::controller::RouteController;
use crate::routing::indicator::ActivityIndicator;
use crate::routing::PinResult;
use crate::types::Route;

/// Command byte that queries the selected route
pub const QUERY_BYTE: u8 = b'0';

/// Acknowledgement for a route change
pub const OK_RESPONSE: &[u8] = b"OK\r\n";

/// Response to an unrecognized command byte
pub const INVALID_RESPONSE: &[u8] = b"Invalid Command\r\n";

/// Maximum response length
pub const MAX_RESPONSE_LEN: usize = INVALID_RESPONSE.len();

/// Route query answers, indexed by route
const ROUTE_DIGITS: &[u8; NUM_ROUTES] = b"1234";

/// Route command parsed from serial input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Report the selected route
    QueryRoute,
    /// Select a route
    SetRoute(Route),
    /// Unrecognized command byte (0 for an empty packet)
    Invalid(u8),
}

impl Command {
    /// Parse a single command byte
    #[must_use]
    pub const fn parse(byte: u8) -> Self {
        if byte == QUERY_BYTE {
            return Self::QueryRoute;
        }
        match Route::from_ascii(byte) {
            Some(route) => Self::SetRoute(route),
            None => Self::Invalid(byte),
        }
    }

    /// Parse a received packet
    ///
    /// Only the first byte is a command; the rest of the packet is dropped.
    #[must_use]
    pub fn from_packet(packet: &[u8]) -> Self {
        packet.first().map_or(Self::Invalid(0), |&byte| Self::parse(byte))
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::QueryRoute => defmt::write!(f, "QueryRoute"),
            Self::SetRoute(route) => defmt::write!(f, "SetRoute({})", route),
            Self::Invalid(byte) => defmt::write!(f, "Invalid(0x{:02X})", byte),
        }
    }
}

/// Response sent back to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// Selected route as its ASCII digit
    Route(Route),
    /// Route change accepted
    Ok,
    /// Command rejected
    InvalidCommand,
}

impl Response {
    /// Response bytes as sent on the wire
    #[must_use]
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Route(route) => {
                let i = route.as_usize();
                &ROUTE_DIGITS[i..=i]
            }
            Self::Ok => OK_RESPONSE,
            Self::InvalidCommand => INVALID_RESPONSE,
        }
    }
}

/// Command handling failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError<P, W> {
    /// GPIO write failed
    Pin(P),
    /// Response could not be written or flushed
    Write(W),
}

#[cfg(feature = "embedded")]
impl<P, W> defmt::Format for CommandError<P, W> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Pin(_) => defmt::write!(f, "GPIO error"),
            Self::Write(_) => defmt::write!(f, "serial write error"),
        }
    }
}

/// Serial command handler
///
/// Runs one packet to completion per call; the activity LED is lit for the
/// duration of every call, whatever the outcome.
pub struct CommandHandler<A> {
    activity: ActivityIndicator<A>,
}

impl<A: OutputPin> CommandHandler<A> {
    /// Create a handler driving `activity` while commands run
    #[must_use]
    pub const fn new(activity: ActivityIndicator<A>) -> Self {
        Self { activity }
    }

    /// Activity indicator, for inspection
    #[must_use]
    pub const fn activity(&self) -> &ActivityIndicator<A> {
        &self.activity
    }

    /// Handle one received packet
    ///
    /// Packets on interfaces other than the control interface are read and
    /// dropped. Returns the command executed, if any.
    pub async fn handle<P, D, W>(
        &mut self,
        controller: &mut RouteController<P, D>,
        interface: u8,
        packet: &[u8],
        out: &mut W,
    ) -> Result<Option<Command>, CommandError<A::Error, W::Error>>
    where
        P: OutputPin<Error = A::Error>,
        D: DelayNs,
        W: Write,
    {
        self.activity.set_active().map_err(CommandError::Pin)?;

        let result = if interface == CONTROL_INTERFACE {
            Self::dispatch(controller, packet, out).await.map(Some)
        } else {
            Ok(None)
        };

        let idle = self.activity.set_idle().map_err(CommandError::Pin);
        let command = result?;
        idle?;
        Ok(command)
    }

    async fn dispatch<P, D, W>(
        controller: &mut RouteController<P, D>,
        packet: &[u8],
        out: &mut W,
    ) -> Result<Command, CommandError<A::Error, W::Error>>
    where
        P: OutputPin<Error = A::Error>,
        D: DelayNs,
        W: Write,
    {
        let packet = &packet[..packet.len().min(CDC_RX_BUFFER_SIZE)];
        let command = Command::from_packet(packet);

        let response = execute(controller, command)
            .await
            .map_err(CommandError::Pin)?;

        out.write_all(response.as_bytes())
            .await
            .map_err(CommandError::Write)?;
        out.flush().await.map_err(CommandError::Write)?;

        Ok(command)
    }
}

/// Apply a command to the controller and build its response
pub async fn execute<P, D>(
    controller: &mut RouteController<P, D>,
    command: Command,
) -> PinResult<Response, P>
where
    P: OutputPin,
    D: DelayNs,
{
    match command {
        Command::QueryRoute => Ok(Response::Route(controller.route())),
        Command::SetRoute(route) => {
            controller.set_route(route.index()).await?;
            Ok(Response::Ok)
        }
        Command::Invalid(_byte) => {
            #[cfg(feature = "embedded")]
            defmt::warn!("Rejected command byte 0x{:02X}", _byte);
            Ok(Response::InvalidCommand)
        }
    }
}
