// Host-side tests for the camera transition driver.

use exhibit_core::{StepOutcome, TransitionDriver, ARRIVAL_EPSILON};
use glam::{Quat, Vec3};
use std::time::Duration;

fn driver_toward(target: Vec3, target_rot: Quat) -> TransitionDriver {
    let mut d = TransitionDriver::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
    d.set_target(target, target_rot);
    d
}

#[test]
fn distance_to_target_never_increases() {
    let target = Vec3::new(-12.0, 4.5, 30.0);
    let mut d = driver_toward(target, Quat::from_rotation_y(2.0));
    let mut prev = d.state().distance();
    for _ in 0..2000 {
        d.step();
        let dist = d.state().distance();
        assert!(dist <= prev, "distance grew: {prev} -> {dist}");
        prev = dist;
    }
}

#[test]
fn step_never_overshoots_along_any_axis() {
    let start = Vec3::new(1.0, 2.0, 3.0);
    let target = Vec3::new(5.0, -7.0, 3.5);
    let mut d = driver_toward(target, Quat::IDENTITY);
    for _ in 0..500 {
        d.step();
        let p = d.state().current_position;
        for axis in 0..3 {
            let (lo, hi) = if start[axis] <= target[axis] {
                (start[axis], target[axis])
            } else {
                (target[axis], start[axis])
            };
            assert!(p[axis] >= lo - 1e-5 && p[axis] <= hi + 1e-5);
        }
    }
}

#[test]
fn stepping_at_target_is_a_no_op() {
    let pos = Vec3::new(0.5, 1.5, -2.0);
    let rot = Quat::from_rotation_x(0.3);
    let mut d = TransitionDriver::new(pos, rot);
    d.set_target(pos, rot);
    let before = *d.state();
    assert_eq!(d.step(), StepOutcome::Idle);
    assert_eq!(*d.state(), before);
    assert_eq!(d.step_dt(Duration::from_millis(16)), StepOutcome::Idle);
    assert_eq!(*d.state(), before);
}

#[test]
fn transition_reports_arrival_exactly_once_and_snaps() {
    let target = Vec3::new(0.0, 10.0, 0.0);
    let rot = Quat::from_rotation_z(-1.2);
    let mut d = driver_toward(target, rot);
    let mut arrivals = 0;
    for _ in 0..5000 {
        if d.step() == StepOutcome::Arrived {
            arrivals += 1;
        }
    }
    assert_eq!(arrivals, 1);
    assert!(d.is_settled());
    assert_eq!(d.state().current_position, target);
    assert!(d.state().distance() <= ARRIVAL_EPSILON);
}

#[test]
fn orientation_converges_with_position() {
    let rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let mut d = driver_toward(Vec3::ZERO, rot);
    let start_angle = d.state().angle();
    for _ in 0..30 {
        d.step();
    }
    assert!(d.state().angle() < start_angle);
}

#[test]
fn new_target_mid_flight_overwrites_pending_target() {
    let mut d = driver_toward(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);
    for _ in 0..10 {
        d.step();
    }
    let second = Vec3::new(-10.0, 0.0, 0.0);
    d.set_target(second, Quat::IDENTITY);
    assert_eq!(d.state().target_position, second);
    assert!(!d.is_settled());
    while d.step() != StepOutcome::Arrived {}
    assert_eq!(d.state().current_position, second);
}

#[test]
fn dt_scaled_steps_converge_at_similar_wall_clock_time() {
    let target = Vec3::new(0.0, 0.0, -20.0);
    let mut fast = driver_toward(target, Quat::IDENTITY);
    let mut slow = driver_toward(target, Quat::IDENTITY);
    // One second at 120 Hz vs one second at 30 Hz.
    for _ in 0..120 {
        fast.step_dt(Duration::from_secs_f64(1.0 / 120.0));
    }
    for _ in 0..30 {
        slow.step_dt(Duration::from_secs_f64(1.0 / 30.0));
    }
    let gap = (fast.state().distance() - slow.state().distance()).abs();
    assert!(gap < 0.05, "gap {gap}");
}
