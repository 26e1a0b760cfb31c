//! The report-generation and flow-controlled transmission engine.
//!
//! Everything in here is pure, `no_std`, hardware-free logic so it can be
//! exercised by host-side tests. Per-tick control flow:
//!
//! ```text
//! Device-State Gate → (if permitted) Input Sampler → Report Synthesizer
//!                                                  → Endpoint Transmitter
//! ```
//!
//! No stage blocks. A tick that cannot transmit (gate closed, endpoint
//! busy) simply defers to the next tick; the next tick re-evaluates
//! everything from scratch.

pub mod bus;
pub mod controller;
pub mod gate;
pub mod keys;
pub mod sampler;
pub mod trajectory;
pub mod transmitter;

#[cfg(test)]
mod tests;
