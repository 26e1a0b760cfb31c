//! Endpoint transmitter: at most one transfer in flight, drop on busy.

use crate::engine::bus::UsbBus;
use crate::error::Error;

/// Flow control for a single interrupt IN endpoint.
///
/// Holds the handle of the most recent transfer and queries it fresh
/// immediately before every submission - the stack completes transfers
/// asynchronously, so staleness must never be cached across ticks.
pub struct Transmitter<H> {
    last: Option<H>,
}

impl<H> Transmitter<H> {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Hand `buf` to the transport if the previous transfer is done.
    ///
    /// On `Busy` the buffer is discarded outright - no queue, no retry
    /// bookkeeping. The caller's next tick synthesizes fresh content,
    /// which is the implicit retry.
    pub fn submit<B>(&mut self, bus: &mut B, buf: &[u8]) -> Result<(), Error>
    where
        B: UsbBus<Handle = H>,
    {
        if let Some(handle) = &self.last {
            if bus.endpoint_busy(handle) {
                return Err(Error::Busy);
            }
        }
        self.last = Some(bus.endpoint_transmit(buf));
        Ok(())
    }
}

impl<H> Default for Transmitter<H> {
    fn default() -> Self {
        Self::new()
    }
}
