//! USB HID device bring-up and the engine-facing bus implementation.
//!
//! Initialises the Embassy USB stack on the hardware USB peripheral and
//! exposes one HID endpoint. The engine sees it through [`SignalBus`]:
//!
//! - enumeration milestones land in a gate snapshot via the device-event
//!   handler;
//! - an accepted report goes into a one-deep mailbox and raises the
//!   in-flight flag; the writer task lowers it once the endpoint write
//!   completes. A fresh busy query therefore reflects the transfer that
//!   is actually outstanding, never a cached answer.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::config;
use crate::engine::bus::{EnumerationState, UsbBus};
use crate::hid::keyboard::KEYBOARD_REPORT_DESCRIPTOR;
use crate::hid::mouse::MOUSE_REPORT_DESCRIPTOR;
use crate::hid::{Variant, MAX_REPORT_SIZE};
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// The concrete USB driver type for this board.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_EVENT_HANDLER: StaticCell<DeviceEventHandler> = StaticCell::new();

/// Gate snapshot fed by the device-event handler, read once per tick.
#[derive(Clone, Copy)]
struct GateSnapshot {
    state: EnumerationState,
    suspended: bool,
}

static GATE: BlockingMutex<CriticalSectionRawMutex, Cell<GateSnapshot>> =
    BlockingMutex::new(Cell::new(GateSnapshot {
        state: EnumerationState::Detached,
        suspended: false,
    }));

/// One serialized report on its way to the endpoint.
#[derive(Clone, Copy)]
struct OutboundReport {
    bytes: [u8; MAX_REPORT_SIZE],
    len: usize,
}

/// One-deep mailbox between the tick loop and the writer task.
static REPORT_MAILBOX: Signal<CriticalSectionRawMutex, OutboundReport> = Signal::new();

/// Raised when a report is handed over, lowered when its endpoint write
/// completes. This is the handle's busy status.
static IN_FLIGHT: AtomicBool = AtomicBool::new(false);

fn set_state(state: EnumerationState) {
    GATE.lock(|cell| {
        let mut snap = cell.get();
        snap.state = state;
        cell.set(snap);
    });
}

/// Device-event surface exposed to the stack. Everything is a
/// pass-through no-op except the milestones that feed the gate.
struct DeviceEventHandler;

impl embassy_usb::Handler for DeviceEventHandler {
    fn enabled(&mut self, enabled: bool) {
        set_state(if enabled {
            EnumerationState::Powered
        } else {
            EnumerationState::Detached
        });
    }

    fn reset(&mut self) {
        set_state(EnumerationState::Default);
    }

    fn addressed(&mut self, _addr: u8) {
        set_state(EnumerationState::Address);
    }

    fn configured(&mut self, configured: bool) {
        set_state(if configured {
            EnumerationState::Configured
        } else {
            EnumerationState::Address
        });
    }

    fn suspended(&mut self, suspended: bool) {
        GATE.lock(|cell| {
            let mut snap = cell.get();
            snap.suspended = suspended;
            cell.set(snap);
        });
    }
}

/// Engine-facing view of the USB stack.
pub struct SignalBus;

impl UsbBus for SignalBus {
    type Handle = ();

    fn enumeration_state(&self) -> EnumerationState {
        GATE.lock(|cell| cell.get()).state
    }

    fn is_suspended(&self) -> bool {
        GATE.lock(|cell| cell.get()).suspended
    }

    fn endpoint_busy(&self, _handle: &()) -> bool {
        IN_FLIGHT.load(Ordering::Acquire)
    }

    fn endpoint_transmit(&mut self, buf: &[u8]) -> Self::Handle {
        // Copy into the mailbox's own storage; the caller's buffer is
        // free for reuse immediately while this copy stays untouched
        // until the write completes.
        let len = buf.len().min(MAX_REPORT_SIZE);
        let mut report = OutboundReport {
            bytes: [0u8; MAX_REPORT_SIZE],
            len,
        };
        report.bytes[..len].copy_from_slice(&buf[..len]);

        IN_FLIGHT.store(true, Ordering::Release);
        REPORT_MAILBOX.signal(report);
    }
}

/// Build result containing the USB device runner and the HID writer.
pub struct EmulatorUsb {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writer: HidWriter<'static, UsbDriver, 8>,
}

/// Initialise the USB stack and create the HID device.
///
/// Must be called exactly once. All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD, variant: Variant) -> EmulatorUsb {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    builder.handler(USB_EVENT_HANDLER.init(DeviceEventHandler));

    let report_descriptor = match variant {
        Variant::Mouse => MOUSE_REPORT_DESCRIPTOR,
        Variant::Keyboard => KEYBOARD_REPORT_DESCRIPTOR,
    };

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let writer = HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!("USB HID device initialised ({})", variant);

    EmulatorUsb { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Endpoint writer task - carries mailbox reports to the interrupt IN
/// endpoint and keeps the in-flight flag honest.
pub async fn hid_writer_task(mut writer: HidWriter<'static, UsbDriver, 8>) -> ! {
    info!("HID writer task started");

    loop {
        let report = REPORT_MAILBOX.wait().await;
        if let Err(e) = writer.write(&report.bytes[..report.len]).await {
            warn!("endpoint write failed: {:?}", e);
        }
        IN_FLIGHT.store(false, Ordering::Release);
    }
}
