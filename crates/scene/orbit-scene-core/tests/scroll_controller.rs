use orbit_scene_core::{
    AnimationScheduler, EndValue, HeadingList, PropertyKey, ScrollConfig, ScrollDirection,
    ScrollRotationController, WheelEvent, WheelOutcome,
};
use orbit_test_fixtures::headings;

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn planet_headings() -> HeadingList {
    HeadingList::new(headings::load("planets").unwrap()).unwrap()
}

fn controller(total: usize) -> ScrollRotationController {
    let items = (0..total).map(|i| format!("h{i}")).collect();
    ScrollRotationController::new(ScrollConfig::default(), &HeadingList::new(items).unwrap())
}

#[test]
fn spaced_events_move_one_step_in_the_sign_of_delta() {
    let mut ctl = controller(5);
    let mut sched = AnimationScheduler::default();
    let deltas = [120.0, 3.0, -40.0, -1.0, -1.0, 99.0, -7.5, 0.0, 250.0, 250.0, 250.0];

    let mut expected: i64 = 0;
    for (i, delta) in deltas.iter().enumerate() {
        let before = ctl.step();
        let out = ctl.on_wheel(WheelEvent::new(*delta, i as f64 * 2000.0), &mut sched);
        let sign = if *delta > 0.0 { 1 } else { -1 };
        expected = (expected + sign).rem_euclid(5);

        assert_eq!(ctl.step() as i64, expected);
        assert_eq!((before as i64 + sign).rem_euclid(5), ctl.step() as i64);
        match out {
            WheelOutcome::Stepped { step, direction, .. } => {
                assert_eq!(step, ctl.step());
                assert_eq!(direction.sign(), sign as i32);
            }
            other => panic!("expected a step, got {other:?}"),
        }
    }
}

#[test]
fn events_inside_cooldown_change_nothing() {
    let mut ctl = controller(4);
    let mut sched = AnimationScheduler::default();
    ctl.on_wheel(WheelEvent::new(1.0, 1_000.0), &mut sched);
    let active = sched.active_count();

    for t in [1_000.0, 1_001.0, 1_500.0, 2_999.9] {
        let out = ctl.on_wheel(WheelEvent::new(-1.0, t), &mut sched);
        assert!(matches!(out, WheelOutcome::Ignored { .. }));
        assert_eq!(ctl.step(), 1);
        assert_eq!(sched.active_count(), active);
    }
    assert_eq!(ctl.state().last_event_ms(), Some(1_000.0));
}

#[test]
fn ignored_outcome_reports_remaining_cooldown() {
    let mut ctl = controller(4);
    let mut sched = AnimationScheduler::default();
    ctl.on_wheel(WheelEvent::new(1.0, 0.0), &mut sched);
    assert_eq!(
        ctl.on_wheel(WheelEvent::new(1.0, 500.0), &mut sched),
        WheelOutcome::Ignored {
            remaining_ms: 1500.0
        }
    );
}

#[test]
fn counter_wraps_both_ways() {
    let mut ctl = controller(3);
    let mut sched = AnimationScheduler::default();

    ctl.on_wheel(WheelEvent::new(-1.0, 0.0), &mut sched);
    assert_eq!(ctl.step(), 2);

    ctl.on_wheel(WheelEvent::new(1.0, 2_000.0), &mut sched);
    let out = ctl.on_wheel(WheelEvent::new(1.0, 4_000.0), &mut sched);
    assert_eq!(
        out,
        WheelOutcome::Stepped {
            step: 0,
            direction: ScrollDirection::Forward,
            wrapped: true
        }
    );
    assert!(ctl.step() < ctl.state().total_steps());
}

#[test]
fn reference_scenario_with_four_headings() {
    let headings = planet_headings();
    assert_eq!(headings.len(), 4);
    let mut ctl = ScrollRotationController::new(ScrollConfig::default(), &headings);
    let mut sched = AnimationScheduler::default();
    let offset = PropertyKey::heading_offset();

    // A: accepted
    let a = ctl.on_wheel(WheelEvent::new(120.0, 0.0), &mut sched);
    assert!(matches!(a, WheelOutcome::Stepped { step: 1, wrapped: false, .. }));
    let target = sched.tweens().find(|t| t.key == offset).map(|t| t.to);
    assert_eq!(target, Some(-100.0));

    // B: same cooldown window
    let b = ctl.on_wheel(WheelEvent::new(120.0, 500.0), &mut sched);
    assert!(matches!(b, WheelOutcome::Ignored { .. }));
    assert_eq!(ctl.step(), 1);

    // C: accepted, wraps back to zero and resets the headings
    let c = ctl.on_wheel(WheelEvent::new(-50.0, 2100.0), &mut sched);
    assert_eq!(
        c,
        WheelOutcome::Stepped {
            step: 0,
            direction: ScrollDirection::Backward,
            wrapped: true
        }
    );
    let heading_tweens: Vec<_> = sched.tweens().filter(|t| t.key == offset).collect();
    assert_eq!(heading_tweens.len(), 1);
    assert_eq!(heading_tweens[0].to, 0.0);

    sched.advance(5.0);
    approx(sched.value(&offset).unwrap(), 0.0, 1e-6);
}

#[test]
fn each_step_requests_offset_and_quarter_turn() {
    let mut ctl = controller(4);
    let mut sched = AnimationScheduler::default();
    ctl.on_wheel(WheelEvent::new(1.0, 0.0), &mut sched);
    ctl.on_wheel(WheelEvent::new(1.0, 2_000.0), &mut sched);

    let offset: Vec<_> = sched
        .tweens()
        .filter(|t| t.key == PropertyKey::heading_offset())
        .collect();
    assert_eq!(offset.len(), 1);
    assert_eq!(offset[0].to, -200.0);
    assert_eq!(offset[0].duration_s, 1.0);

    let rotation: Vec<_> = sched
        .tweens()
        .filter(|t| t.key == PropertyKey::group_rotation_y())
        .collect();
    assert_eq!(rotation.len(), 1);
    assert!(rotation[0].relative);
    approx(rotation[0].to, -std::f32::consts::PI, 1e-5);

    // relative request shape
    let req = orbit_scene_core::TweenRequest::by(
        PropertyKey::group_rotation_y(),
        -std::f32::consts::FRAC_PI_2,
        1.0,
        Default::default(),
    );
    assert_eq!(req.end, EndValue::Relative(-std::f32::consts::FRAC_PI_2));
}

#[test]
fn nan_timestamp_does_not_lock_out_later_events() {
    let mut ctl = controller(4);
    let mut sched = AnimationScheduler::default();

    let bad = ctl.on_wheel(WheelEvent::new(1.0, f64::NAN), &mut sched);
    assert!(matches!(bad, WheelOutcome::Ignored { .. }));
    assert_eq!(ctl.step(), 0);
    assert_eq!(sched.active_count(), 0);

    let later = ctl.on_wheel(WheelEvent::new(1.0, 1.0e9), &mut sched);
    assert!(matches!(later, WheelOutcome::Stepped { step: 1, .. }));
}
