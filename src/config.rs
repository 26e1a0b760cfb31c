//! Application-wide constants and compile-time configuration.
//!
//! All USB identity, timing, and emulation parameters live here so they
//! can be tuned in one place.

use crate::hid::Variant;

// USB identity

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0007;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "phantom-hid";
pub const USB_PRODUCT: &str = "Phantom HID Emulator";
pub const USB_SERIAL_NUMBER: &str = "000001";

// Timing

/// Interrupt IN endpoint polling interval (ms). This bounds the minimum
/// report cadence the host will see.
pub const USB_HID_POLL_MS: u8 = 10;

/// Period of the report-engine scheduling tick (ms). Matched to the
/// endpoint polling interval; ticking faster only produces drops.
pub const TICK_INTERVAL_MS: u64 = 10;

// Emulation

/// Which device personality to present to the host.
pub const VARIANT: Variant = Variant::Mouse;

/// Whether the mouse variant starts out tracing its path or sitting idle.
pub const MOTION_ENABLED: bool = true;

/// Key usage sent by the keyboard variant while the input line is active
/// (0x04 = `a` on the Keyboard/Keypad usage page).
pub const KEY_USAGE: u8 = 0x04;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Actual `embassy_nrf::peripherals::*` types are selected in `main.rs`.
//
//   Input button (active-low) → P0.11
