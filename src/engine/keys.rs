//! Level-triggered key reporter.
//!
//! Stateless by design: the report depends only on this tick's sampled
//! level, never on history. Holding the line active re-sends the same
//! key-down report every eligible tick.

use crate::hid::keyboard::KeyboardReport;

/// Report for the current input level: the fixed key while active, the
/// all-zero (key-up) report otherwise.
pub fn level_report(active: bool, keycode: u8) -> KeyboardReport {
    if active {
        KeyboardReport::pressed(keycode)
    } else {
        KeyboardReport::empty()
    }
}
