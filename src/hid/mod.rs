//! HID report types and descriptor tables.
//!
//! The device presents exactly one of two personalities, fixed at build
//! time: a 3-byte relative mouse or an 8-byte boot-protocol keyboard.
//! Report layout must match the descriptor advertised during enumeration.

pub mod keyboard;
pub mod mouse;

use keyboard::KeyboardReport;
use mouse::MouseReport;

/// Largest report either personality produces (keyboard, 8 bytes).
pub const MAX_REPORT_SIZE: usize = keyboard::KEYBOARD_REPORT_SIZE;

/// Device personality presented to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    Mouse,
    Keyboard,
}

/// One synthesized input report, ready for submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputReport {
    Mouse(MouseReport),
    Keyboard(KeyboardReport),
}

impl InputReport {
    /// Serialise into a byte slice for USB transmission.
    /// Returns the number of bytes written.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            InputReport::Mouse(m) => m.serialize(buf),
            InputReport::Keyboard(k) => k.serialize(buf),
        }
    }
}
