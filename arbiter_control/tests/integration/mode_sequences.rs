//! Integration test: operator sessions through the event queue.
//!
//! Validates the full mode lifecycle:
//! 1. Follow request rejected until the target is reported visible
//! 2. Follow → Idle after the loss-of-target timeout
//! 3. Manual idle override while tracking
//! 4. Teleop entry and exit

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use arbiter_common::config::ControllerConfig;
use arbiter_common::mode::OperatingMode;
use arbiter_control::clock::ManualClock;
use arbiter_control::mode::controller::ModeController;
use arbiter_control::mode::transition::TransitionReason;
use arbiter_control::output::RecordingSink;
use arbiter_control::runner::{
    ControllerEvent, ControllerRunner, EventReceiver, EventSender, event_queue,
};

// ── Helpers ─────────────────────────────────────────────────────────

const RELEASED: [bool; 4] = [false; 4];
const TELEOP: [bool; 4] = [true, false, false, false];
const FOLLOW: [bool; 4] = [false, true, false, false];
const IDLE: [bool; 4] = [false, false, false, true];

struct Session {
    tx: EventSender,
    rx: EventReceiver,
    clock: ManualClock,
    runner: ControllerRunner<ManualClock, RecordingSink>,
}

impl Session {
    fn new() -> Self {
        let clock = ManualClock::new();
        let ctrl = ModeController::new(&ControllerConfig::default(), clock.clone()).unwrap();
        let (tx, rx) = event_queue();
        Self {
            tx,
            rx,
            clock,
            runner: ControllerRunner::new(ctrl, RecordingSink::new()),
        }
    }

    fn frame(&mut self, frame: &[bool]) -> OperatingMode {
        self.tx.send_frame(frame.to_vec()).unwrap();
        self.runner.drain(&self.rx).unwrap();
        self.runner.sink().last().unwrap().mode()
    }

    fn tap(&mut self, frame: &[bool]) -> OperatingMode {
        let mode = self.frame(frame);
        self.frame(&RELEASED);
        mode
    }

    fn target(&mut self, visible: bool) {
        self.tx.send_target(visible).unwrap();
        self.runner.drain(&self.rx).unwrap();
    }

    fn mode(&self) -> OperatingMode {
        self.runner.controller().mode()
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn follow_entry_requires_visible_target() {
    let mut s = Session::new();
    assert_eq!(s.tap(&FOLLOW), OperatingMode::Idle);

    s.target(true);
    assert_eq!(s.tap(&FOLLOW), OperatingMode::Follow);
}

#[test]
fn follow_times_out_after_target_loss() {
    let mut s = Session::new();
    s.target(true);
    s.tap(&FOLLOW);
    s.target(false);

    s.clock.advance(Duration::from_millis(4999));
    assert_eq!(s.frame(&RELEASED), OperatingMode::Follow);

    s.clock.advance(Duration::from_millis(2));
    assert_eq!(s.frame(&RELEASED), OperatingMode::Idle);
    assert_eq!(
        s.runner.controller().last_transition().unwrap().reason,
        TransitionReason::TargetLost
    );
}

#[test]
fn timeout_measured_from_last_visible_report() {
    let mut s = Session::new();
    s.target(true);
    s.tap(&FOLLOW);

    // Frames while visible do not extend the deadline.
    s.clock.advance(Duration::from_secs(3));
    assert_eq!(s.frame(&RELEASED), OperatingMode::Follow);
    s.target(false);

    s.clock.advance(Duration::from_millis(2500));
    assert_eq!(s.frame(&RELEASED), OperatingMode::Idle);
}

#[test]
fn timeout_detected_only_on_next_frame() {
    let mut s = Session::new();
    s.target(true);
    s.tap(&FOLLOW);
    s.target(false);
    let published = s.runner.sink().outputs().len();

    s.clock.advance(Duration::from_secs(20));
    s.target(false);
    assert_eq!(s.mode(), OperatingMode::Follow);
    assert_eq!(s.runner.sink().outputs().len(), published);

    assert_eq!(s.frame(&RELEASED), OperatingMode::Idle);
}

#[test]
fn brief_target_loss_keeps_following() {
    let mut s = Session::new();
    s.target(true);
    s.tap(&FOLLOW);

    for _ in 0..10 {
        s.target(false);
        s.clock.advance(Duration::from_secs(3));
        assert_eq!(s.frame(&RELEASED), OperatingMode::Follow);
        s.target(true);
        s.clock.advance(Duration::from_secs(1));
        assert_eq!(s.frame(&RELEASED), OperatingMode::Follow);
    }
}

#[test]
fn idle_override_while_tracking() {
    let mut s = Session::new();
    s.target(true);
    s.tap(&FOLLOW);
    assert_eq!(s.tap(&IDLE), OperatingMode::Idle);
    assert_eq!(
        s.runner.controller().last_transition().unwrap().reason,
        TransitionReason::IdleRequested
    );
}

#[test]
fn teleop_session() {
    let mut s = Session::new();
    assert_eq!(s.tap(&TELEOP), OperatingMode::Teleop);

    // Target and follow requests are ignored in Teleop.
    s.target(true);
    assert_eq!(s.tap(&FOLLOW), OperatingMode::Teleop);
    s.target(false);
    s.clock.advance(Duration::from_secs(60));
    assert_eq!(s.frame(&RELEASED), OperatingMode::Teleop);

    assert_eq!(s.tap(&IDLE), OperatingMode::Idle);
    assert_eq!(s.runner.stats().mode_changes, 2);
}

#[test]
fn holding_teleop_through_idle_does_not_reenter() {
    let mut s = Session::new();
    assert_eq!(s.frame(&TELEOP), OperatingMode::Teleop);
    assert_eq!(s.frame(&[true, false, false, true]), OperatingMode::Idle);
    // Teleop still held: no new edge.
    assert_eq!(s.frame(&TELEOP), OperatingMode::Idle);
    assert_eq!(s.frame(&RELEASED), OperatingMode::Idle);
    assert_eq!(s.frame(&TELEOP), OperatingMode::Teleop);
}

#[test]
fn independent_controllers_do_not_share_state() {
    let mut a = Session::new();
    let mut b = Session::new();
    a.tap(&TELEOP);
    assert_eq!(a.mode(), OperatingMode::Teleop);
    assert_eq!(b.frame(&RELEASED), OperatingMode::Idle);
}

#[test]
fn concurrent_sources_applied_in_arrival_order() {
    let (tx, rx) = event_queue();
    let target_tx = tx.clone();
    let frames_tx = tx;
    let target_source = std::thread::spawn(move || {
        for i in 0..200 {
            target_tx.send_target(i % 3 != 0).unwrap();
        }
    });
    let input_source = std::thread::spawn(move || {
        let cycle = [FOLLOW, RELEASED, IDLE, RELEASED];
        for i in 0..200 {
            frames_tx.send_frame(cycle[i % cycle.len()].to_vec()).unwrap();
        }
    });
    target_source.join().unwrap();
    input_source.join().unwrap();

    // Interleaving as the queue received it.
    let arrived: Vec<ControllerEvent> = rx.try_iter().collect();
    assert_eq!(arrived.len(), 400);

    // Through a queue and the runner.
    let ctrl = ModeController::new(&ControllerConfig::default(), ManualClock::new()).unwrap();
    let mut runner = ControllerRunner::new(ctrl, RecordingSink::new());
    let (replay_tx, replay_rx) = event_queue();
    for event in &arrived {
        replay_tx.send(event.clone()).unwrap();
    }
    drop(replay_tx);
    runner.run(&replay_rx, &AtomicBool::new(true)).unwrap();

    // Directly against a controller, one event at a time.
    let mut direct = ModeController::new(&ControllerConfig::default(), ManualClock::new()).unwrap();
    let mut expected = Vec::new();
    for event in arrived {
        match event {
            ControllerEvent::TargetStatus(visible) => direct.update_target(visible),
            ControllerEvent::InputFrame(frame) => expected.push(direct.process_frame(&frame).unwrap()),
        }
    }

    assert_eq!(runner.sink().outputs(), expected.as_slice());
    assert_eq!(runner.controller().mode(), direct.mode());
    assert_eq!(runner.stats().target_updates, 200);
}
