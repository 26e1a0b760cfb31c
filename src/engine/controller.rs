//! The long-lived controller driving one tick of the report engine.
//!
//! Owns all mutable engine state: the active synthesizer variant and
//! the endpoint transmitter. Constructed once at startup, ticked
//! forever.

use crate::engine::bus::UsbBus;
use crate::engine::gate;
use crate::engine::keys;
use crate::engine::sampler::InputLine;
use crate::engine::trajectory::Trajectory;
use crate::engine::transmitter::Transmitter;
use crate::error::Error;
use crate::hid::{InputReport, MAX_REPORT_SIZE};

/// Report synthesizer, polymorphic over the two device personalities.
enum Synthesizer {
    /// Continuous synthetic cursor motion. `moving` is a configuration
    /// input; there is no on-device toggle for it.
    Mouse { traj: Trajectory, moving: bool },
    /// Button-triggered fixed key report.
    Keyboard { keycode: u8 },
}

/// One controller instance per device.
pub struct Controller<H> {
    synth: Synthesizer,
    tx: Transmitter<H>,
}

impl<H> Controller<H> {
    /// Mouse personality.
    pub const fn mouse(moving: bool) -> Self {
        Self {
            synth: Synthesizer::Mouse {
                traj: Trajectory::new(),
                moving,
            },
            tx: Transmitter::new(),
        }
    }

    /// Keyboard personality sending `keycode` while the line is active.
    pub const fn keyboard(keycode: u8) -> Self {
        Self {
            synth: Synthesizer::Keyboard { keycode },
            tx: Transmitter::new(),
        }
    }

    /// Switch the mouse trajectory between moving and idle. Ignored by
    /// the keyboard personality.
    pub fn set_moving(&mut self, value: bool) {
        if let Synthesizer::Mouse { moving, .. } = &mut self.synth {
            *moving = value;
        }
    }

    /// Run one scheduling tick: gate, sample, synthesize, submit.
    ///
    /// `Err(NotReady)` - gate closed, nothing ran. `Err(Busy)` - report
    /// synthesized but dropped; trajectory dwell does not advance, so no
    /// direction-table entry is skipped under backpressure.
    pub fn tick<B>(&mut self, bus: &mut B, line: &mut impl InputLine) -> Result<(), Error>
    where
        B: UsbBus<Handle = H>,
    {
        if !gate::may_run(bus.enumeration_state(), bus.is_suspended()) {
            return Err(Error::NotReady);
        }

        let report = match &mut self.synth {
            Synthesizer::Mouse { traj, moving } => InputReport::Mouse(traj.step(*moving)),
            Synthesizer::Keyboard { keycode } => {
                InputReport::Keyboard(keys::level_report(line.sample(), *keycode))
            }
        };

        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = report.serialize(&mut buf);
        self.tx.submit(bus, &buf[..len])?;

        // Dwell counts accepted handoffs only.
        if let Synthesizer::Mouse { traj, .. } = &mut self.synth {
            traj.on_transmitted();
        }
        Ok(())
    }
}
