//! USB CDC ACM (Serial) Implementation
//!
//! Provides the virtual serial port carrying route commands.

use embassy_usb::class::cdc_acm::Sender;
use embassy_usb::driver::{Driver, EndpointError};
use embassy_time::{with_timeout, Duration, TimeoutError};
use embedded_io::ErrorKind;

use crate::config::{usb_strings, CDC_WRITE_TIMEOUT_MS, USB_MAX_POWER_MA, USB_PID, USB_VID};

const WRITE_TIMEOUT: Duration = Duration::from_millis(CDC_WRITE_TIMEOUT_MS);

/// CDC write failure, usable as an `embedded-io` error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CdcError {
    /// Endpoint rejected the packet
    Endpoint(EndpointError),
    /// Host stopped draining the IN endpoint
    Timeout,
}

impl From<EndpointError> for CdcError {
    fn from(err: EndpointError) -> Self {
        Self::Endpoint(err)
    }
}

impl From<TimeoutError> for CdcError {
    fn from(_: TimeoutError) -> Self {
        Self::Timeout
    }
}

impl embedded_io::Error for CdcError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Endpoint(EndpointError::BufferOverflow) => ErrorKind::OutOfMemory,
            Self::Endpoint(EndpointError::Disabled) => ErrorKind::NotConnected,
            Self::Timeout => ErrorKind::TimedOut,
        }
    }
}

impl defmt::Format for CdcError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Endpoint(EndpointError::BufferOverflow) => defmt::write!(f, "CDC buffer overflow"),
            Self::Endpoint(EndpointError::Disabled) => defmt::write!(f, "CDC endpoint disabled"),
            Self::Timeout => defmt::write!(f, "CDC write timed out"),
        }
    }
}

/// Packet writer over the CDC data-in endpoint
///
/// Splits writes into max-size packets. `flush` terminates a transfer that
/// ended on a full packet with a zero-length packet, so the host sees the
/// response immediately. Each packet gives up after
/// [`CDC_WRITE_TIMEOUT_MS`].
pub struct CdcWriter<'a, 'd, D: Driver<'d>> {
    sender: &'a mut Sender<'d, D>,
    needs_zlp: bool,
}

impl<'a, 'd, D: Driver<'d>> CdcWriter<'a, 'd, D> {
    /// Wrap the CDC sender half
    pub fn new(sender: &'a mut Sender<'d, D>) -> Self {
        Self {
            sender,
            needs_zlp: false,
        }
    }
}

impl<'d, D: Driver<'d>> embedded_io_async::ErrorType for CdcWriter<'_, 'd, D> {
    type Error = CdcError;
}

impl<'d, D: Driver<'d>> embedded_io_async::Write for CdcWriter<'_, 'd, D> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let max = usize::from(self.sender.max_packet_size());
        let len = buf.len().min(max);
        with_timeout(WRITE_TIMEOUT, self.sender.write_packet(&buf[..len])).await??;
        self.needs_zlp = len == max;
        Ok(len)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        if self.needs_zlp {
            with_timeout(WRITE_TIMEOUT, self.sender.write_packet(&[])).await??;
            self.needs_zlp = false;
        }
        Ok(())
    }
}

/// USB device descriptor strings
pub struct UsbStrings {
    /// Manufacturer name
    pub manufacturer: &'static str,
    /// Product name
    pub product: &'static str,
    /// Serial number
    pub serial: &'static str,
}

impl Default for UsbStrings {
    fn default() -> Self {
        Self {
            manufacturer: usb_strings::MANUFACTURER,
            product: usb_strings::PRODUCT,
            serial: usb_strings::SERIAL,
        }
    }
}

/// USB device info for descriptor
#[derive(Clone, Copy, Debug)]
pub struct UsbDeviceInfo {
    /// Vendor ID
    pub vid: u16,
    /// Product ID
    pub pid: u16,
    /// Device release number
    pub device_release: u16,
}

impl Default for UsbDeviceInfo {
    fn default() -> Self {
        Self {
            vid: USB_VID,
            pid: USB_PID,
            device_release: 0x0100,
        }
    }
}

impl defmt::Format for UsbDeviceInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "USB({:04X}:{:04X})", self.vid, self.pid);
    }
}

/// Build the embassy-usb device configuration for the route switch
#[must_use]
pub fn device_config(info: UsbDeviceInfo, strings: &UsbStrings) -> embassy_usb::Config<'static> {
    let mut config = embassy_usb::Config::new(info.vid, info.pid);
    config.manufacturer = Some(strings.manufacturer);
    config.product = Some(strings.product);
    config.serial_number = Some(strings.serial);
    config.device_release = info.device_release;
    config.max_power = USB_MAX_POWER_MA;
    config.max_packet_size_0 = 64;

    // Composite device with IAD so the CDC ACM pair binds on Windows
    config.device_class = 0xEF;
    config.device_sub_class = 0x02;
    config.device_protocol = 0x01;
    config.composite_with_iads = true;
    config
}

