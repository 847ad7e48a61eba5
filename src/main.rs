//! Route Switch Main Application
//!
//! Entry point for the RP2040-based RF route switch firmware.
//! Initializes hardware, spawns the USB device task and runs the control loop.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use route_switch::prelude::*;
use route_switch::protocol::CommandError;
use route_switch::switch::ButtonError;
use route_switch::usb::cdc::{device_config, CdcWriter, UsbDeviceInfo, UsbStrings};

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

type UsbDriver = Driver<'static, USB>;

/// Unwrap a result whose error cannot occur (RP2040 GPIO writes)
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Route Switch Firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_rp::init(Default::default());

    // Relay coils low, LEDs off, button pulled up
    let board = route_switch::board_pins!(p);
    board.log_wiring();

    info!("GPIO initialized");

    // USB CDC ACM device
    let driver = Driver::new(p.USB, Irqs);
    let device_info = UsbDeviceInfo::default();
    let config = device_config(device_info, &UsbStrings::default());

    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static CDC_STATE: StaticCell<State<'static>> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [], // no msos descriptors
        CONTROL_BUF.init([0; 64]),
    );
    let class = CdcAcmClass::new(&mut builder, CDC_STATE.init(State::new()), USB_CDC_PACKET_SIZE);
    let usb = builder.build();

    spawner.spawn(usb_task(usb)).unwrap();

    info!("{} started", device_info);

    let (mut sender, mut receiver) = class.split();

    let controller = RouteController::new(
        infallible(RelayBank::new(board.relays)),
        infallible(RouteIndicator::new(board.route_leds)),
        Delay,
    );
    let button = RouteButton::new(board.button, Delay);
    let commands = CommandHandler::new(infallible(ActivityIndicator::new(board.activity_led)));
    let mut switch = RouteSwitch::new(controller, button, commands);

    let route = infallible(switch.start().await);
    info!("Started on {}", route);

    // Control loop: one packet or one poll tick, then one button sample
    let mut packet = [0u8; CDC_RX_BUFFER_SIZE];
    loop {
        let event = select(
            receiver.read_packet(&mut packet),
            Timer::after_millis(BUTTON_POLL_MS),
        )
        .await;

        match event {
            Either::First(Ok(len)) => {
                let mut writer = CdcWriter::new(&mut sender);
                match switch
                    .on_packet(CONTROL_INTERFACE, &packet[..len], &mut writer)
                    .await
                {
                    Ok(Some(command)) => debug!("Handled {}", command),
                    Ok(None) => {}
                    Err(CommandError::Write(e)) => warn!("Response dropped: {}", e),
                    Err(CommandError::Pin(never)) => match never {},
                }
            }
            Either::First(Err(EndpointError::Disabled)) => {
                // Not configured by a host yet
                Timer::after_millis(BUTTON_POLL_MS).await;
            }
            Either::First(Err(e)) => warn!("CDC read failed: {}", e),
            Either::Second(()) => {}
        }

        match switch.poll_button().await {
            Ok(Some(route)) => info!("Button advanced to {}", route),
            Ok(None) => {}
            Err(ButtonError::Input(never) | ButtonError::Pin(never)) => match never {},
        }
    }
}

/// USB device task - services enumeration and control requests
#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}
