//! Synthetic cursor trajectory generator.
//!
//! Walks an 8-entry direction table, holding each vector for a fixed
//! number of delivered reports before advancing. Y reads the table two
//! entries ahead of X, so the two axes trace the same cycle a quarter
//! turn apart and the cursor follows a closed octagonal path.

use crate::hid::mouse::MouseReport;

/// Signed per-report deltas. Length is a power of two so indices wrap
/// with a mask instead of a branch.
pub const DIRECTION_TABLE: [i8; 8] = [-4, -4, -4, 0, 4, 4, 4, 0];

/// How many delivered reports hold one direction vector.
pub const DWELL_TICKS: u8 = 14;

/// Trajectory generator state.
///
/// `dwell` counts *accepted* handoffs, not ticks: a report dropped because
/// the endpoint was busy does not advance it, so backpressure stretches
/// the path in time without skipping any table entry.
#[derive(Clone, Copy, Debug)]
pub struct Trajectory {
    vector: u8,
    dwell: u8,
    report: MouseReport,
}

impl Trajectory {
    /// Start at the top of the table with the first advance already due,
    /// so the first moving tick emits the first table vector.
    pub const fn new() -> Self {
        Self {
            vector: 0,
            dwell: DWELL_TICKS,
            report: MouseReport::empty(),
        }
    }

    /// Synthesize this tick's report.
    ///
    /// Moving: advance to the next table vector once the current one has
    /// been delivered `DWELL_TICKS` times, otherwise hold it. Idle: emit
    /// the all-zero report and leave the table index alone.
    pub fn step(&mut self, moving: bool) -> MouseReport {
        if moving {
            if self.dwell >= DWELL_TICKS {
                self.report.buttons = 0;
                self.report.dx = DIRECTION_TABLE[(self.vector & 7) as usize];
                self.report.dy = DIRECTION_TABLE[(self.vector.wrapping_add(2) & 7) as usize];
                self.vector = self.vector.wrapping_add(1);
                self.dwell = 0;
            }
        } else {
            self.report = MouseReport::empty();
        }
        self.report
    }

    /// Record one accepted handoff. Called only when the transmitter
    /// actually took the report; the counter wraps on overflow.
    pub fn on_transmitted(&mut self) {
        self.dwell = self.dwell.wrapping_add(1);
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}
