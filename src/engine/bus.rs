//! Contract with the external USB device stack.
//!
//! The enumeration state machine, control transfers, and the physical
//! endpoint all live on the other side of this trait. The engine only
//! reads bus status and hands over finished report buffers.

/// Device enumeration state, as reported by the USB stack.
///
/// Only `Configured` permits report traffic; the other states exist so
/// the gate can be fed directly from stack callbacks without translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnumerationState {
    Detached,
    Attached,
    Powered,
    Default,
    AddressPending,
    Address,
    Configured,
}

/// The external USB device-stack collaborator.
///
/// The engine is the sole writer of report content; the stack is the sole
/// mutator of a handle's busy/complete status. Once `endpoint_transmit`
/// accepts a buffer its content belongs to the stack until the handle
/// reports not-busy.
pub trait UsbBus {
    /// Opaque token for one in-flight transfer.
    type Handle;

    /// Current enumeration state. Read once per tick.
    fn enumeration_state(&self) -> EnumerationState;

    /// Whether the host has suspended the bus.
    fn is_suspended(&self) -> bool;

    /// Non-blocking completion query for a previously returned handle.
    fn endpoint_busy(&self, handle: &Self::Handle) -> bool;

    /// Start an interrupt IN transfer carrying `buf`. Must only be called
    /// when the previous handle reports not-busy.
    fn endpoint_transmit(&mut self, buf: &[u8]) -> Self::Handle;
}
