//! Tick-outcome error type.
//!
//! The taxonomy is deliberately minimal: neither variant is fatal and
//! neither schedules a retry. Every tick re-evaluates the gate and
//! re-synthesizes a fresh report, so "skip this tick" is all the engine
//! ever needs to say.

/// Why a tick produced no transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Gate closed: enumeration incomplete or bus suspended. Nothing was
    /// sampled, synthesized, or transmitted.
    NotReady,

    /// The previous transfer is still in flight. The freshly synthesized
    /// report was dropped, not queued; the next tick retries implicitly.
    Busy,
}
