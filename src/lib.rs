//! phantom-hid: USB HID input emulator firmware.
//!
//! The device enumerates as either a mouse tracing a continuous
//! octagonal cursor path or a keyboard sending a fixed key while a
//! button is held. All report synthesis and endpoint flow control lives
//! in [`engine`], which is pure logic and tested on the host
//! (`cargo test`); the Embassy USB stack and board bring-up sit behind
//! the `embedded` feature.
//!
//! Note: the embedded binary is `main.rs` with `#![no_std]`/`#![no_main]`
//! and requires `--features embedded` plus an nRF52840 target.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod engine;
pub mod error;
pub mod hid;

#[cfg(feature = "embedded")]
pub mod usb;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - report layout and serialization
// ═══════════════════════════════════════════════════════════════════════════
