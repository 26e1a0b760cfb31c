use crate::engine::bus::{EnumerationState, UsbBus};
use crate::engine::controller::Controller;
use crate::engine::gate;
use crate::engine::keys;
use crate::engine::sampler::InputLine;
use crate::engine::trajectory::{Trajectory, DIRECTION_TABLE, DWELL_TICKS};
use crate::engine::transmitter::Transmitter;
use crate::error::Error;

// ════════════════════════════════════════════════════════════════════════
// Test doubles
// ════════════════════════════════════════════════════════════════════════

/// Scriptable USB stack: enumeration state, suspend flag, and busy answer
/// are all set directly by the test; accepted buffers are recorded.
struct MockBus {
    state: EnumerationState,
    suspended: bool,
    busy: bool,
    sent: Vec<Vec<u8>>,
    next_handle: u32,
}

impl MockBus {
    fn configured() -> Self {
        Self {
            state: EnumerationState::Configured,
            suspended: false,
            busy: false,
            sent: Vec::new(),
            next_handle: 0,
        }
    }

    fn in_state(state: EnumerationState) -> Self {
        Self {
            state,
            ..Self::configured()
        }
    }
}

impl UsbBus for MockBus {
    type Handle = u32;

    fn enumeration_state(&self) -> EnumerationState {
        self.state
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn endpoint_busy(&self, _handle: &u32) -> bool {
        self.busy
    }

    fn endpoint_transmit(&mut self, buf: &[u8]) -> u32 {
        self.sent.push(buf.to_vec());
        self.next_handle += 1;
        self.next_handle
    }
}

/// Input line with a fixed level that counts how often it was sampled.
struct Line {
    active: bool,
    samples: usize,
}

impl Line {
    fn low() -> Self {
        Self {
            active: false,
            samples: 0,
        }
    }

    fn high() -> Self {
        Self {
            active: true,
            samples: 0,
        }
    }
}

impl InputLine for Line {
    fn sample(&mut self) -> bool {
        self.samples += 1;
        self.active
    }
}

/// The (dx, dy) cycle the trajectory must trace: a closed octagon.
const OCTAGON: [(i8, i8); 8] = [
    (-4, -4),
    (-4, 0),
    (-4, 4),
    (0, 4),
    (4, 4),
    (4, 0),
    (4, -4),
    (0, -4),
];

// ════════════════════════════════════════════════════════════════════════
// Gate
// ════════════════════════════════════════════════════════════════════════

#[test]
fn gate_open_only_when_configured_and_awake() {
    assert!(gate::may_run(EnumerationState::Configured, false));
    assert!(!gate::may_run(EnumerationState::Configured, true));
}

#[test]
fn gate_closed_for_every_pre_configured_state() {
    for state in [
        EnumerationState::Detached,
        EnumerationState::Attached,
        EnumerationState::Powered,
        EnumerationState::Default,
        EnumerationState::AddressPending,
        EnumerationState::Address,
    ] {
        assert!(!gate::may_run(state, false));
        assert!(!gate::may_run(state, true));
    }
}

// ════════════════════════════════════════════════════════════════════════
// Trajectory generator
// ════════════════════════════════════════════════════════════════════════

/// One delivered tick: synthesize, then record the accepted handoff.
fn delivered_step(traj: &mut Trajectory) -> (i8, i8) {
    let report = traj.step(true);
    traj.on_transmitted();
    (report.dx, report.dy)
}

#[test]
fn trajectory_first_moving_tick_emits_first_vector() {
    let mut traj = Trajectory::new();
    assert_eq!(delivered_step(&mut traj), (-4, -4));
}

#[test]
fn trajectory_holds_each_vector_for_dwell_length() {
    let mut traj = Trajectory::new();
    for _ in 0..DWELL_TICKS {
        assert_eq!(delivered_step(&mut traj), (-4, -4));
    }
    // Tick 15: next table entry, quarter-cycle phase between axes.
    assert_eq!(delivered_step(&mut traj), (-4, 0));
}

#[test]
fn trajectory_traces_closed_octagon() {
    let mut traj = Trajectory::new();
    // Two full laps: 8 vectors held DWELL_TICKS ticks each, twice over.
    for lap in 0..2 {
        for &expected in OCTAGON.iter() {
            for tick in 0..DWELL_TICKS {
                assert_eq!(
                    delivered_step(&mut traj),
                    expected,
                    "lap {lap}, dwell tick {tick}"
                );
            }
        }
    }
}

#[test]
fn trajectory_octagon_matches_table_phase_offset() {
    for (v, &(dx, dy)) in OCTAGON.iter().enumerate() {
        assert_eq!(DIRECTION_TABLE[v & 7], dx);
        assert_eq!(DIRECTION_TABLE[(v + 2) & 7], dy);
    }
}

#[test]
fn trajectory_idle_emits_all_zero() {
    let mut traj = Trajectory::new();
    for _ in 0..40 {
        let report = traj.step(false);
        assert!(report.is_idle());
        traj.on_transmitted();
    }
}

#[test]
fn trajectory_dwell_frozen_without_handoff() {
    let mut traj = Trajectory::new();
    assert_eq!(delivered_step(&mut traj), (-4, -4));

    // Dropped ticks: synthesis runs but no handoff is recorded. The held
    // vector must not advance no matter how many ticks pass.
    for _ in 0..100 {
        let report = traj.step(true);
        assert_eq!((report.dx, report.dy), (-4, -4));
    }

    // Delivery resumes exactly where it left off.
    for _ in 0..(DWELL_TICKS - 1) {
        assert_eq!(delivered_step(&mut traj), (-4, -4));
    }
    assert_eq!(delivered_step(&mut traj), (-4, 0));
}

#[test]
fn trajectory_idle_then_moving_resumes_table_order() {
    let mut traj = Trajectory::new();
    assert_eq!(delivered_step(&mut traj), (-4, -4));

    // Going idle zeroes the output but leaves the table index alone.
    for _ in 0..30 {
        assert!(traj.step(false).is_idle());
        traj.on_transmitted();
    }

    // Dwell kept counting delivered idle reports, so motion resumes with
    // the advance due and no table entry skipped.
    assert_eq!(delivered_step(&mut traj), (-4, 0));
}

// ════════════════════════════════════════════════════════════════════════
// Level reporter
// ════════════════════════════════════════════════════════════════════════

#[test]
fn level_report_active_sends_fixed_key() {
    let report = keys::level_report(true, 0x04);
    assert_eq!(report.modifier, 0);
    assert_eq!(report.reserved, 0);
    assert_eq!(report.keycodes, [0x04, 0, 0, 0, 0, 0]);
}

#[test]
fn level_report_inactive_sends_key_up() {
    assert!(keys::level_report(false, 0x04).is_empty());
}

#[test]
fn level_report_has_no_memory() {
    // Same inputs, same output, regardless of what came before.
    let a = keys::level_report(true, 0x2C);
    keys::level_report(false, 0x2C);
    let b = keys::level_report(true, 0x2C);
    assert_eq!(a, b);
}

// ════════════════════════════════════════════════════════════════════════
// Transmitter
// ════════════════════════════════════════════════════════════════════════

#[test]
fn transmitter_first_submission_always_accepted() {
    let mut bus = MockBus::configured();
    bus.busy = true; // no handle yet, so busy answer is never consulted
    let mut tx = Transmitter::new();
    assert_eq!(tx.submit(&mut bus, &[1, 2, 3]), Ok(()));
    assert_eq!(bus.sent, vec![vec![1, 2, 3]]);
}

#[test]
fn transmitter_drops_on_busy() {
    let mut bus = MockBus::configured();
    let mut tx = Transmitter::new();
    tx.submit(&mut bus, &[1]).unwrap();

    bus.busy = true;
    assert_eq!(tx.submit(&mut bus, &[2]), Err(Error::Busy));
    assert_eq!(tx.submit(&mut bus, &[3]), Err(Error::Busy));
    // Dropped buffers were never handed to the stack.
    assert_eq!(bus.sent.len(), 1);
}

#[test]
fn transmitter_recovers_when_transfer_completes() {
    let mut bus = MockBus::configured();
    let mut tx = Transmitter::new();
    tx.submit(&mut bus, &[1]).unwrap();

    bus.busy = true;
    assert_eq!(tx.submit(&mut bus, &[2]), Err(Error::Busy));

    bus.busy = false;
    assert_eq!(tx.submit(&mut bus, &[3]), Ok(()));
    assert_eq!(bus.sent, vec![vec![1], vec![3]]);
}

// ════════════════════════════════════════════════════════════════════════
// Controller
// ════════════════════════════════════════════════════════════════════════

#[test]
fn controller_closed_gate_skips_everything() {
    let mut bus = MockBus::in_state(EnumerationState::Address);
    let mut line = Line::high();
    let mut controller = Controller::keyboard(0x04);

    for _ in 0..10 {
        assert_eq!(controller.tick(&mut bus, &mut line), Err(Error::NotReady));
    }
    assert_eq!(bus.sent.len(), 0);
    assert_eq!(line.samples, 0, "closed gate must not sample the line");
}

#[test]
fn controller_suspended_gate_skips_everything() {
    let mut bus = MockBus::configured();
    bus.suspended = true;
    let mut line = Line::high();
    let mut controller = Controller::keyboard(0x04);

    assert_eq!(controller.tick(&mut bus, &mut line), Err(Error::NotReady));
    assert_eq!(bus.sent.len(), 0);
    assert_eq!(line.samples, 0);
}

#[test]
fn controller_keyboard_follows_level() {
    let mut bus = MockBus::configured();
    let mut line = Line::low();
    let mut controller = Controller::keyboard(0x04);

    controller.tick(&mut bus, &mut line).unwrap();
    line.active = true;
    controller.tick(&mut bus, &mut line).unwrap();
    controller.tick(&mut bus, &mut line).unwrap();
    line.active = false;
    controller.tick(&mut bus, &mut line).unwrap();

    let key = vec![0, 0, 0x04, 0, 0, 0, 0, 0];
    let up = vec![0u8; 8];
    assert_eq!(bus.sent, vec![up.clone(), key.clone(), key, up]);
}

#[test]
fn controller_mouse_emits_three_byte_reports() {
    let mut bus = MockBus::configured();
    let mut line = Line::low();
    let mut controller = Controller::mouse(true);

    controller.tick(&mut bus, &mut line).unwrap();
    assert_eq!(bus.sent, vec![vec![0, 0xFC, 0xFC]]); // (-4, -4)
}

#[test]
fn controller_idle_mouse_emits_zero_reports() {
    let mut bus = MockBus::configured();
    let mut line = Line::low();
    let mut controller = Controller::mouse(false);

    for _ in 0..20 {
        controller.tick(&mut bus, &mut line).unwrap();
    }
    assert!(bus.sent.iter().all(|r| r == &vec![0, 0, 0]));
}

#[test]
fn controller_set_moving_starts_and_stops_motion() {
    let mut bus = MockBus::configured();
    let mut line = Line::low();
    let mut controller = Controller::mouse(false);

    controller.tick(&mut bus, &mut line).unwrap();
    assert_eq!(bus.sent.last().unwrap(), &vec![0, 0, 0]);

    controller.set_moving(true);
    controller.tick(&mut bus, &mut line).unwrap();
    assert_eq!(bus.sent.last().unwrap(), &vec![0, 0xFC, 0xFC]);

    controller.set_moving(false);
    controller.tick(&mut bus, &mut line).unwrap();
    assert_eq!(bus.sent.last().unwrap(), &vec![0, 0, 0]);
}
