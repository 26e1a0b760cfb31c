//! Device-state gate: may the engine run this tick at all?

use crate::engine::bus::EnumerationState;

/// True iff the device is fully enumerated and the bus is not suspended.
///
/// A `false` result skips the whole tick; nothing is sampled, synthesized,
/// or transmitted, and no engine state mutates.
pub fn may_run(state: EnumerationState, suspended: bool) -> bool {
    state == EnumerationState::Configured && !suspended
}
