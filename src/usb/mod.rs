//! USB Device subsystem - presents the emulated HID device to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. One HID interface with one interrupt IN endpoint is
//! exposed; its report descriptor is chosen by the configured device
//! personality (mouse or keyboard).
//!
//! Enumeration, endpoint zero, and suspend/resume are owned entirely by
//! the stack. This module's job is to feed the engine's gate with the
//! stack's enumeration milestones and to carry accepted reports to the
//! endpoint.

pub mod hid_device;
