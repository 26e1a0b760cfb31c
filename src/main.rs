//! Embedded entry point (nRF52840).
//!
//! Brings up the Embassy USB stack, then polls the report engine on a
//! fixed tick. The loop itself never blocks on the endpoint: a tick
//! whose report cannot go out is simply dropped and the next tick
//! synthesizes a fresh one.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Pull};
use embassy_time::{Duration, Ticker};

use phantom_hid::config;
use phantom_hid::engine::controller::Controller;
use phantom_hid::engine::sampler::InputLine;
use phantom_hid::error::Error;
use phantom_hid::hid::Variant;
use phantom_hid::usb::hid_device::{self, EmulatorUsb, SignalBus, UsbDriver};

/// Active-low push button on P0.11 (nRF52840-DK button 1).
struct Button<'d> {
    pin: Input<'d>,
}

impl InputLine for Button<'_> {
    fn sample(&mut self) -> bool {
        self.pin.is_low()
    }
}

#[embassy_executor::task]
async fn usb_device_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn writer_task(writer: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>) -> ! {
    hid_device::hid_writer_task(writer).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("phantom-hid starting, variant: {}", config::VARIANT);

    let EmulatorUsb { device, writer } = hid_device::init(p.USBD, config::VARIANT);
    unwrap!(spawner.spawn(usb_device_task(device)));
    unwrap!(spawner.spawn(writer_task(writer)));

    let mut button = Button {
        pin: Input::new(p.P0_11, Pull::Up),
    };
    let mut bus = SignalBus;
    let mut controller: Controller<()> = match config::VARIANT {
        Variant::Mouse => Controller::mouse(config::MOTION_ENABLED),
        Variant::Keyboard => Controller::keyboard(config::KEY_USAGE),
    };

    let mut ticker = Ticker::every(Duration::from_millis(config::TICK_INTERVAL_MS));
    loop {
        ticker.next().await;
        match controller.tick(&mut bus, &mut button) {
            Ok(()) => {}
            // Gate closed: nothing ran, wait for enumeration/resume.
            Err(Error::NotReady) => {}
            // Previous transfer still in flight: report dropped.
            Err(Error::Busy) => defmt::trace!("endpoint busy, report dropped"),
        }
    }
}
