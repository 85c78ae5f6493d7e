//! Integration test: output invariants over long random sessions.
//!
//! Every published output must have `indicator_code` matching the mode and
//! carry an idle velocity and the idle flag iff the mode is Idle.

use std::time::Duration;

use arbiter_common::config::ControllerConfig;
use arbiter_common::mode::OperatingMode;
use arbiter_control::clock::ManualClock;
use arbiter_control::mode::controller::ModeController;
use arbiter_control::output::RecordingSink;
use arbiter_control::runner::{ControllerEvent, ControllerRunner};
use proptest::prelude::*;

fn event() -> impl Strategy<Value = (ControllerEvent, u64)> {
    let frame = prop::collection::vec(any::<bool>(), 4..6).prop_map(ControllerEvent::InputFrame);
    let target = any::<bool>().prop_map(ControllerEvent::TargetStatus);
    (prop_oneof![3 => frame, 1 => target], 0u64..3000)
}

proptest! {
    #[test]
    fn outputs_consistent_with_mode(events in prop::collection::vec(event(), 1..200)) {
        let clock = ManualClock::new();
        let ctrl = ModeController::new(&ControllerConfig::default(), clock.clone()).unwrap();
        let mut runner = ControllerRunner::new(ctrl, RecordingSink::new());

        for (ev, advance_ms) in events {
            clock.advance(Duration::from_millis(advance_ms));
            runner.handle(ev).unwrap();
        }

        for out in runner.sink().outputs() {
            let expected = match out.mode() {
                OperatingMode::Idle => 0,
                OperatingMode::Follow => 1,
                OperatingMode::Teleop => 2,
            };
            prop_assert_eq!(out.indicator_code(), expected);
            prop_assert_eq!(out.idle_velocity().is_some(), out.mode() == OperatingMode::Idle);
            prop_assert_eq!(out.is_idle(), out.mode() == OperatingMode::Idle);
            if let Some(v) = out.idle_velocity() {
                prop_assert!(v.is_zero());
            }
        }
        prop_assert_eq!(runner.stats().frames_processed as usize, runner.sink().outputs().len());
    }

    #[test]
    fn follow_only_entered_with_visible_target(events in prop::collection::vec(event(), 1..200)) {
        let clock = ManualClock::new();
        let mut ctrl = ModeController::new(&ControllerConfig::default(), clock.clone()).unwrap();

        for (ev, advance_ms) in events {
            clock.advance(Duration::from_millis(advance_ms));
            let before = ctrl.mode();
            match ev {
                ControllerEvent::TargetStatus(v) => ctrl.update_target(v),
                ControllerEvent::InputFrame(frame) => {
                    let out = ctrl.process_frame(&frame).unwrap();
                    if before == OperatingMode::Idle && out.mode() == OperatingMode::Follow {
                        prop_assert!(ctrl.target().visible);
                    }
                }
            }
        }
    }
}
